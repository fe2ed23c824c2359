use crate::config::{AttractorParameters, InitialCondition};
use glam::DVec3;

/// One animated instance of the Lorenz system.
///
/// Holds the current state and the state from one step earlier, so a frame
/// can draw the segment between them without keeping any history.
#[derive(Clone, Debug)]
pub struct AttractorState {
    pos: DVec3,
    prev: DVec3,
    params: AttractorParameters,
}

impl AttractorState {
    /// Creates an instance at `start`. The previous position starts equal to it.
    pub fn new(start: DVec3, params: AttractorParameters) -> Self {
        Self {
            pos: start,
            prev: start,
            params,
        }
    }

    pub fn from_condition(cond: &InitialCondition, params: AttractorParameters) -> Self {
        Self::new(DVec3::new(cond.x0, cond.y0, cond.z0), params)
    }

    /// Advances the state by one explicit Euler step of size `dt`.
    ///
    /// After the call, [`AttractorState::prev`] holds the position from
    /// before the call. Divergent trajectories are not detected.
    pub fn step(&mut self) {
        let p = &self.params;
        self.prev = self.pos;
        let DVec3 { x, y, z } = self.prev;

        self.pos.x += p.sigma() * (y - x) * p.dt();
        self.pos.y += (x * (p.rho() - z) - y) * p.dt();
        self.pos.z += (x * y - p.beta() * z) * p.dt();
    }

    pub fn pos(&self) -> DVec3 {
        self.pos
    }

    pub fn prev(&self) -> DVec3 {
        self.prev
    }

    pub fn params(&self) -> &AttractorParameters {
        &self.params
    }
}
