//! Frame-driven orchestration of several attractors on one display.
//!
//! Each frame runs the same pipeline:
//! 1. Poll the display's event source. `Quit`, any key press, or a closed
//!    source requests termination.
//! 2. Step every attractor once, in construction order.
//! 3. Project each attractor's previous and current position and draw the
//!    segment between them, in construction order.
//! 4. Present the touched regions and tick the clock.
//!
//! A termination request is acted on only after the frame that observed it
//! has completed.

use crate::{
    attractor::AttractorState,
    config::{AnimationConfig, InitialCondition},
    display::{Display, Event, FrameClock, Poll},
    error::{ConfigError, DisplayError, Result},
    projection::{Viewport, to_screen},
    types::Region,
};
use log::{debug, info, warn};

/// Observable lifecycle of an [`AnimationLoop`].
///
/// Initialization happens entirely inside [`AnimationLoop::start`], which only
/// returns a `Running` loop. Termination happens entirely inside
/// [`AnimationLoop::shutdown`], which leaves the loop `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Counters accumulated over a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub steps: u64,
    pub draws: u64,
    pub presented_regions: u64,
}

/// Owns the attractors, the display, and the clock for one animation session.
pub struct AnimationLoop<D: Display, C: FrameClock> {
    attractors: Vec<AttractorState>,
    display: D,
    clock: C,
    padding: f64,
    state: LoopState,
    stats: FrameStats,
    regions: Vec<Region>,
}

impl<D: Display, C: FrameClock> AnimationLoop<D, C> {
    /// Brings up a session.
    ///
    /// Order of work:
    /// 1. Validate `config` and build parameters for every condition. Invalid
    ///    configuration is rejected before anything is acquired.
    /// 2. Call `acquire` for the display and clock. A failure here is fatal
    ///    and no attractor is constructed.
    /// 3. Construct one [`AttractorState`] per condition, in the given order.
    ///
    /// ### Parameters
    /// - `conditions` - Starting point, color and time step per instance.
    ///   `(x0, y0) == (0, 0)` is accepted as-is.
    /// - `config` - Settings shared by every instance (beta, bounds, padding).
    /// - `acquire` - Produces the display surface and the frame clock.
    ///
    /// ### Returns
    /// A loop in the `Running` state.
    pub fn start<F>(
        conditions: &[InitialCondition],
        config: &AnimationConfig,
        acquire: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<(D, C), DisplayError>,
    {
        debug!("initializing animation loop");
        config.validate()?;
        let params = conditions
            .iter()
            .map(|cond| config.parameters_for(cond))
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        let (display, clock) = acquire()?;
        let size = display.size();
        info!("display acquired ({}x{})", size.x, size.y);

        let attractors: Vec<AttractorState> = conditions
            .iter()
            .zip(params)
            .map(|(cond, p)| AttractorState::from_condition(cond, p))
            .collect();
        info!("animating {} attractor(s)", attractors.len());

        Ok(Self {
            attractors,
            display,
            clock,
            padding: config.padding,
            state: LoopState::Running,
            stats: FrameStats::default(),
            regions: Vec::with_capacity(conditions.len()),
        })
    }

    /// Executes one frame and returns the state afterwards.
    ///
    /// Does nothing once the loop has stopped.
    pub fn frame(&mut self) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let stop_requested = self.poll_termination();

        for a in &mut self.attractors {
            a.step();
        }
        self.stats.steps += self.attractors.len() as u64;

        let viewport = Viewport::from_surface(self.display.size(), self.padding);
        self.regions.clear();
        for a in &self.attractors {
            let bounds = a.params().bounds();
            let from = to_screen(a.prev().x, a.prev().y, bounds, &viewport);
            let to = to_screen(a.pos().x, a.pos().y, bounds, &viewport);
            self.stats.draws += 1;
            if let Some(region) = self.display.draw_line(from, to, a.params().color()) {
                self.regions.push(region);
            }
        }

        if let Err(e) = self.display.present(&self.regions) {
            warn!("frame {}: {e}", self.stats.frames);
        }
        self.stats.presented_regions += self.regions.len() as u64;

        self.clock.tick();
        self.stats.frames += 1;

        if stop_requested {
            self.shutdown();
        }
        self.state
    }

    /// Runs frames until the loop stops.
    pub fn run(&mut self) -> FrameStats {
        while self.frame() == LoopState::Running {}
        self.stats
    }

    /// Releases the display and the clock.
    ///
    /// Idempotent; also invoked on drop so resources are released exactly
    /// once however the session ends.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        debug!("terminating animation loop");
        self.display.close();
        self.clock.stop();
        self.state = LoopState::Stopped;
        info!(
            "animation stopped after {} frame(s), {} step(s)",
            self.stats.frames, self.stats.steps
        );
    }

    fn poll_termination(&mut self) -> bool {
        match self.display.poll_events() {
            Poll::Events(events) => match events.iter().find(|e| e.terminates()) {
                Some(e) => {
                    debug!("termination requested by {e:?}");
                    true
                }
                None => false,
            },
            Poll::Closed => {
                debug!("event source closed");
                true
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn attractors(&self) -> &[AttractorState] {
        &self.attractors
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

impl<D: Display, C: FrameClock> Drop for AnimationLoop<D, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Turns a queue of events gathered between frames into a [`Poll`].
///
/// A closed source still delivers whatever was queued before reporting
/// [`Poll::Closed`].
pub fn drain_events(queue: &mut Vec<Event>, closed: bool) -> Poll {
    if closed && queue.is_empty() {
        Poll::Closed
    } else {
        Poll::Events(std::mem::take(queue))
    }
}
