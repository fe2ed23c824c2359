//! Error types for the simulation core.

use thiserror::Error;

/// Rejected configuration. Raised eagerly at construction time, never mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("degenerate bounding box on the {axis} axis: [{min}, {max}]")]
    DegenerateBounds { axis: char, min: f64, max: f64 },

    #[error("non-finite bound on the {0} axis")]
    NonFiniteBounds(char),

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("padding must be within [0, 1), got {0}")]
    InvalidPadding(f64),

    #[error("frame rate cap must be at least 1")]
    ZeroFrameCap,
}

/// Failure reported by a display surface.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display surface is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to present frame: {0}")]
    Present(String),
}

/// Errors raised while bringing up an animation session.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to acquire display or clock: {0}")]
    Acquire(#[from] DisplayError),
}

pub type Result<T> = std::result::Result<T, AnimationError>;
