//! Orthographic projection of attractor coordinates onto a pixel viewport.

use crate::{config::Bounds, types::Pixel};
use glam::{DVec2, UVec2};

/// Drawable area derived from the surface size and a padding fraction.
///
/// Padding shrinks both dimensions but does not move the origin, so padded
/// content sits toward the top-left corner of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: DVec2,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
        }
    }

    /// `padding` is expected in `[0, 1)`; see [`crate::config::AnimationConfig::validate`].
    pub fn from_surface(surface: UVec2, padding: f64) -> Self {
        Self {
            size: surface.as_dvec2() * (1.0 - padding),
        }
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }
}

/// Maps `(x, y)` from the declared bounds linearly onto the viewport.
///
/// `x_min` lands on column 0 and `x_max` on column `width`, likewise for `y`
/// (rows grow downward, the axis is not flipped). Results are rounded half to
/// even and are not clamped: points outside the bounds project outside the
/// viewport. Values too large for `i32` saturate.
pub fn to_screen(x: f64, y: f64, bounds: &Bounds, viewport: &Viewport) -> Pixel {
    let sx = viewport.width() * ((x - bounds.x_min) / (bounds.x_max - bounds.x_min));
    let sy = viewport.height() * ((y - bounds.y_min) / (bounds.y_max - bounds.y_min));
    Pixel::new(sx.round_ties_even() as i32, sy.round_ties_even() as i32)
}
