//! Capabilities the animation loop consumes: a drawable surface with an
//! event source, and a frame clock.

use crate::{
    error::DisplayError,
    types::{Pixel, Region, Rgb},
};
use glam::UVec2;
use std::time::{Duration, Instant};

/// Discrete input event reported by a display's event source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The user or the platform asked the program to close.
    Quit,
    /// Any key was pressed.
    KeyPress,
    /// Anything else; ignored by the loop.
    Other,
}

impl Event {
    /// Any key stops the animation, not only a designated one.
    pub fn terminates(self) -> bool {
        matches!(self, Event::Quit | Event::KeyPress)
    }
}

/// Result of polling an event source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Poll {
    /// Zero or more events that arrived since the previous poll.
    Events(Vec<Event>),
    /// The source can no longer be polled.
    Closed,
}

/// A surface the loop draws line segments onto.
pub trait Display {
    /// Current surface size in pixels.
    fn size(&self) -> UVec2;

    /// Draws a one-pixel line from `from` to `to`.
    ///
    /// Endpoints may lie outside the surface; implementations clip.
    /// Returns the touched region, or `None` if nothing was visible.
    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Rgb) -> Option<Region>;

    /// Makes the given regions visible.
    fn present(&mut self, regions: &[Region]) -> Result<(), DisplayError>;

    fn poll_events(&mut self) -> Poll;

    /// Releases the surface. Called once when the loop stops.
    fn close(&mut self) {}
}

/// Paces frames.
pub trait FrameClock {
    /// Marks the end of a frame and returns the time since the previous tick,
    /// waiting first if the pacing policy requires it.
    fn tick(&mut self) -> Duration;

    /// Releases the clock. Called once when the loop stops.
    fn stop(&mut self) {}
}

/// Wall clock with an optional frame rate cap.
///
/// Uncapped by default: `tick` only measures.
#[derive(Debug)]
pub struct PacedClock {
    last: Instant,
    min_frame: Option<Duration>,
}

impl PacedClock {
    pub fn new(fps_cap: Option<u32>) -> Self {
        Self {
            last: Instant::now(),
            min_frame: fps_cap
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_nanos(1_000_000_000 / u64::from(fps))),
        }
    }

    pub fn uncapped() -> Self {
        Self::new(None)
    }

    pub fn min_frame(&self) -> Option<Duration> {
        self.min_frame
    }
}

impl FrameClock for PacedClock {
    fn tick(&mut self) -> Duration {
        if let Some(min) = self.min_frame {
            let spent = self.last.elapsed();
            if spent < min {
                std::thread::sleep(min - spent);
            }
        }
        let now = Instant::now();
        let delta = now - self.last;
        self.last = now;
        delta
    }
}
