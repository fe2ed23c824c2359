//! Interactive terminal session that collects initial conditions.
//!
//! Every prompt accepts `q` or `quit` to abort; end of input is treated the
//! same way. Aborting is reported as `Ok(None)`.

use lorenz_core::{
    config::{InitialCondition, Speed},
    types::Rgb,
};
use std::io::{self, BufRead, Write};

const QUIT_WORDS: [&str; 2] = ["q", "quit"];

/// Reads answers from `input` and writes prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\n============= LORENZ ATTRACTOR ANIMATOR =============\n"
        )?;
        writeln!(
            self.output,
            "Welcome! Follow the instructions below to get started,\n         or type q+Enter to quit any time.\n"
        )
    }

    pub fn goodbye(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nSee you!")
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Prints `prompt` and reads one trimmed, lowercased line.
    ///
    /// Returns `None` on a quit word or end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim().to_lowercase();
        if QUIT_WORDS.contains(&answer.as_str()) {
            return Ok(None);
        }
        Ok(Some(answer))
    }

    /// Asks a yes/no question. Only `y` and `yes` count as yes.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        Ok(self
            .ask(prompt)?
            .map(|answer| matches!(answer.as_str(), "y" | "yes")))
    }

    pub fn attractor_count(&mut self, max: usize) -> io::Result<Option<usize>> {
        let prompt = format!("How many attractors would you like to animate [1 - {max}]? ");
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
                _ => writeln!(self.output, "Please enter a number between 1 and {max}\n")?,
            }
        }
    }

    pub fn speed(&mut self, speeds: &[Speed]) -> io::Result<Option<Speed>> {
        let names: Vec<&str> = speeds.iter().map(|s| s.name()).collect();
        let prompt = format!(
            "How fast would you like the animation to evolve [{}]? ",
            names.join(" | ")
        );
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match Speed::parse(&answer).filter(|s| speeds.contains(s)) {
                Some(speed) => return Ok(Some(speed)),
                None => writeln!(self.output, "Please enter a valid choice.\n")?,
            }
        }
    }

    /// Reads one coordinate in `[-1, 1]`.
    pub fn coordinate(&mut self, axis: char) -> io::Result<Option<f64>> {
        let prompt = format!("Initial {axis} [-1.0 - +1.0]? ");
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match answer.parse::<f64>() {
                // Also rejects NaN.
                Ok(v) if v.abs() <= 1.0 => return Ok(Some(v)),
                _ => writeln!(self.output, "Please enter a value between -1.0 and +1.0\n")?,
            }
        }
    }

    /// Collects a full session: count, speed, and starting point per attractor.
    ///
    /// Colors come from `palette` by attractor index, so at most
    /// `palette.len()` attractors can be requested. A starting point with
    /// `x == 0 && y == 0` must be confirmed, otherwise the three coordinates
    /// are asked again.
    pub fn collect_conditions(
        &mut self,
        palette: &[Rgb],
        speeds: &[Speed],
    ) -> io::Result<Option<Vec<InitialCondition>>> {
        let Some(count) = self.attractor_count(palette.len())? else {
            return Ok(None);
        };
        let Some(speed) = self.speed(speeds)? else {
            return Ok(None);
        };

        let mut conditions = Vec::with_capacity(count);
        for (i, &color) in palette.iter().enumerate().take(count) {
            writeln!(self.output, "\nAttractor #{}\n=================", i + 1)?;

            let (x0, y0, z0) = loop {
                let Some(x) = self.coordinate('x')? else {
                    return Ok(None);
                };
                let Some(y) = self.coordinate('y')? else {
                    return Ok(None);
                };
                let Some(z) = self.coordinate('z')? else {
                    return Ok(None);
                };

                if x == 0.0 && y == 0.0 {
                    let warning = "WARNING: The animator currently supports attractor animations in the xy-plane only.\n         Initial x- and y-values of 0.0 will create a stationary attractor.\n\nProceed [y/n]? ";
                    match self.confirm(warning)? {
                        None => return Ok(None),
                        Some(false) => continue,
                        Some(true) => {}
                    }
                }
                break (x, y, z);
            };

            conditions.push(InitialCondition {
                x0,
                y0,
                z0,
                color,
                dt: speed.dt(),
            });
        }
        Ok(Some(conditions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorenz_core::config::{MAX_ATTRACTORS, PALETTE};

    fn run(script: &str) -> (Option<Vec<InitialCondition>>, String) {
        let mut out = Vec::new();
        let result = Prompter::new(script.as_bytes(), &mut out)
            .collect_conditions(&PALETTE, &Speed::ALL)
            .unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn collects_two_attractors() {
        let (conds, _) = run("2\nmedium\n0.1\n0\n0\n-1\n1.0\n0.5\n");
        let conds = conds.unwrap();

        assert_eq!(conds.len(), 2);
        assert_eq!(
            conds[0],
            InitialCondition {
                x0: 0.1,
                y0: 0.0,
                z0: 0.0,
                color: PALETTE[0],
                dt: 0.005
            }
        );
        assert_eq!((conds[1].x0, conds[1].y0, conds[1].z0), (-1.0, 1.0, 0.5));
        assert_eq!(conds[1].color, PALETTE[1]);
    }

    #[test]
    fn reprompts_on_invalid_answers() {
        let (conds, out) = run("zero\n0\n6\n1\nwarp\n FAST \n1.5\nabc\nnan\n0.2\n0.3\n0.4\n");
        let conds = conds.unwrap();

        assert_eq!(conds.len(), 1);
        assert_eq!(conds[0].dt, 0.01);
        assert_eq!((conds[0].x0, conds[0].y0, conds[0].z0), (0.2, 0.3, 0.4));
        assert_eq!(out.matches("Please enter a number between 1 and 5").count(), 3);
        assert_eq!(out.matches("Please enter a valid choice.").count(), 1);
        assert_eq!(out.matches("Please enter a value between -1.0 and +1.0").count(), 3);
    }

    #[test]
    fn quit_aborts_at_any_prompt() {
        assert_eq!(run("q\n").0, None);
        assert_eq!(run("3\nQUIT\n").0, None);
        assert_eq!(run("1\nslow\n0.5\n quit \n").0, None);
    }

    #[test]
    fn end_of_input_aborts() {
        assert_eq!(run("").0, None);
        assert_eq!(run("2\nslow\n0.1\n0.1\n0.1\n").0, None);
    }

    #[test]
    fn zero_xy_pair_requires_confirmation() {
        // Declined once, re-entered, then confirmed.
        let (conds, out) = run("1\nslow\n0\n0\n0.7\nn\n0\n0\n0.3\nyes\n");
        let conds = conds.unwrap();

        assert_eq!(out.matches("WARNING").count(), 2);
        assert_eq!((conds[0].x0, conds[0].y0, conds[0].z0), (0.0, 0.0, 0.3));
        assert_eq!(conds[0].dt, 0.0025);
    }

    #[test]
    fn zero_x_alone_needs_no_confirmation() {
        let (conds, out) = run("1\nslow\n0\n0.5\n0\n");
        assert!(conds.is_some());
        assert!(!out.contains("WARNING"));
    }

    #[test]
    fn quit_at_confirmation_aborts() {
        assert_eq!(run("1\nslow\n0\n0\n0\nq\n").0, None);
    }

    #[test]
    fn colors_follow_the_palette() {
        let script = format!("{MAX_ATTRACTORS}\nfast\n{}", "0.1\n0.1\n0.1\n".repeat(MAX_ATTRACTORS));
        let conds = run(&script).0.unwrap();
        let colors: Vec<Rgb> = conds.iter().map(|c| c.color).collect();
        assert_eq!(colors, PALETTE.to_vec());
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut out = Vec::new();
        let mut p = Prompter::new("y\nYes\nn\nmaybe\nq\n".as_bytes(), &mut out);
        assert_eq!(p.confirm("? ").unwrap(), Some(true));
        assert_eq!(p.confirm("? ").unwrap(), Some(true));
        assert_eq!(p.confirm("? ").unwrap(), Some(false));
        assert_eq!(p.confirm("? ").unwrap(), Some(false));
        assert_eq!(p.confirm("? ").unwrap(), None);
    }

    #[test]
    fn speed_limited_to_offered_table() {
        let mut out = Vec::new();
        let mut p = Prompter::new("fast\nslow\n".as_bytes(), &mut out);
        assert_eq!(p.speed(&[Speed::Slow]).unwrap(), Some(Speed::Slow));
        assert!(String::from_utf8(out).unwrap().contains("[slow]"));
    }
}
