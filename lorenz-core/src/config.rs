//! Parameters and session-level configuration.
//!
//! All variance between animation setups (bounding box, `beta`, time step,
//! padding, frame cap) is expressed here as plain values; there is no
//! global state.

use crate::{error::ConfigError, types::Rgb};

pub const SIGMA: f64 = 10.0;
pub const RHO: f64 = 28.0;
/// Classic Lorenz `beta`.
pub const BETA_CLASSIC: f64 = 8.0 / 3.0;
/// Alternate `beta` used by some animation setups.
pub const BETA_ALT: f64 = 7.0 / 3.0;

/// Default viewport padding fraction.
pub const DEFAULT_PADDING: f64 = 0.1;

/// Draw colors, assigned to attractors by index.
pub const PALETTE: [Rgb; 5] = [
    Rgb(255, 165, 0),
    Rgb(5, 5, 255),
    Rgb(5, 255, 5),
    Rgb(255, 5, 5),
    Rgb(120, 120, 120),
];

/// Most attractors one session can animate (one per palette entry).
pub const MAX_ATTRACTORS: usize = PALETTE.len();

/// Animation speed, each mapped to a fixed integration time step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Medium, Speed::Fast];

    pub fn dt(self) -> f64 {
        match self {
            Speed::Slow => 0.0025,
            Speed::Medium => 0.005,
            Speed::Fast => 0.01,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Medium => "medium",
            Speed::Fast => "fast",
        }
    }

    /// Parses a case-insensitive speed name.
    pub fn parse(s: &str) -> Option<Speed> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|speed| speed.name().eq_ignore_ascii_case(s))
    }
}

/// Declared bounding box of the attractor.
///
/// Only `x` and `y` are consulted by projection; the `z` range is carried
/// for completeness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: -30.0,
            x_max: 30.0,
            y_min: -30.0,
            y_max: 30.0,
            z_min: -50.0,
            z_max: 50.0,
        }
    }
}

impl Bounds {
    /// Checks that every axis is finite and non-degenerate.
    ///
    /// Reversed ranges (`min > max`) are accepted and mirror the axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, min, max) in [
            ('x', self.x_min, self.x_max),
            ('y', self.y_min, self.y_max),
            ('z', self.z_min, self.z_max),
        ] {
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::NonFiniteBounds(axis));
            }
            if min == max {
                return Err(ConfigError::DegenerateBounds { axis, min, max });
            }
        }
        Ok(())
    }
}

/// Immutable per-instance parameters.
///
/// Construct with [`AttractorParameters::new`] or
/// [`AttractorParameters::lorenz`]; both validate, so a value of this type
/// is always usable by the integrator and the projector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractorParameters {
    sigma: f64,
    rho: f64,
    beta: f64,
    dt: f64,
    color: Rgb,
    bounds: Bounds,
}

impl AttractorParameters {
    pub fn new(
        sigma: f64,
        rho: f64,
        beta: f64,
        dt: f64,
        color: Rgb,
        bounds: Bounds,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [("sigma", sigma), ("rho", rho), ("beta", beta)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { name, value });
            }
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(dt));
        }
        bounds.validate()?;

        Ok(Self {
            sigma,
            rho,
            beta,
            dt,
            color,
            bounds,
        })
    }

    /// Standard Lorenz parameters with the classic `beta` and default bounds.
    pub fn lorenz(dt: f64, color: Rgb) -> Result<Self, ConfigError> {
        Self::new(SIGMA, RHO, BETA_CLASSIC, dt, color, Bounds::default())
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// One instance's starting point as produced by input collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitialCondition {
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    pub color: Rgb,
    pub dt: f64,
}

/// Settings shared by every instance of one animation session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    pub beta: f64,
    pub bounds: Bounds,
    /// Fraction of the surface removed from the viewport on both axes.
    pub padding: f64,
    /// Upper bound on frames per second; `None` runs uncapped.
    pub fps_cap: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            beta: BETA_CLASSIC,
            bounds: Bounds::default(),
            padding: DEFAULT_PADDING,
            fps_cap: None,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.padding) {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        if self.fps_cap == Some(0) {
            return Err(ConfigError::ZeroFrameCap);
        }
        self.bounds.validate()
    }

    /// Builds validated parameters for one instance.
    pub fn parameters_for(
        &self,
        cond: &InitialCondition,
    ) -> Result<AttractorParameters, ConfigError> {
        AttractorParameters::new(SIGMA, RHO, self.beta, cond.dt, cond.color, self.bounds)
    }
}
