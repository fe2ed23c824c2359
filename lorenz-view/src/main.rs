//! Application entry point for the Lorenz attractor animator.
//!
//! Runs a terminal session that collects initial conditions, then opens an
//! eframe window animating them until any key is pressed or the window is
//! closed. The user can start another animation afterwards.

mod canvas;
mod prompt;
mod viewer;

use anyhow::anyhow;
use glam::UVec2;
use log::info;
use lorenz_core::config::{AnimationConfig, InitialCondition, PALETTE, Speed};
use prompt::Prompter;
use std::io;
use viewer::Viewer;

const TITLE: &str = "Lorenz Attractor";
const INITIAL_SIZE: UVec2 = UVec2::new(1280, 800);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let config = AnimationConfig::default();
    prompter.welcome()?;

    while let Some(conditions) = prompter.collect_conditions(&PALETTE, &Speed::ALL)? {
        prompter.say("\nInitializing...")?;
        prompter.say("\nRunning...press any key to stop.")?;
        run_session(&conditions, &config)?;

        if prompter.confirm("\nCreate another animation [y/n]? ")? != Some(true) {
            break;
        }
    }

    prompter.goodbye()?;
    Ok(())
}

/// Opens the animation window and blocks until it closes.
///
/// ### Returns
/// - `Ok(())` once the animation has stopped.
/// - `Err` if the window cannot be created or the session fails to start.
fn run_session(conditions: &[InitialCondition], config: &AnimationConfig) -> anyhow::Result<()> {
    info!("starting session with {} attractor(s)", conditions.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([INITIAL_SIZE.x as f32, INITIAL_SIZE.y as f32])
            .with_maximized(true),
        ..Default::default()
    };

    let conditions = conditions.to_vec();
    let config = *config;
    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| {
            let viewer = Viewer::new(&conditions, &config, INITIAL_SIZE)?;
            Ok(Box::new(viewer))
        }),
    )
    .map_err(|e| anyhow!("animation window failed: {e}"))
}
