//! Error taxonomy for the physics engine.
//!
//! Two failure classes exist: invalid input (rejected before any
//! computation) and numerical failure (the orbit propagator could not
//! converge within tolerance or budget). Documented model approximations
//! (spherical Earth, two-body dynamics, coarse entry-survival tiers) are
//! not errors; they bound the fidelity of otherwise-successful results.

use thiserror::Error;

/// Errors produced by engine entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Input rejected before computation: out-of-range coordinates,
    /// non-positive physical quantities, malformed time ranges.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The numerical integrator failed to converge or exhausted its
    /// step/wall-clock budget. No partial trajectory is returned.
    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

impl PhysicsError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        PhysicsError::InvalidInput(msg.into())
    }

    pub(crate) fn numerical(msg: impl Into<String>) -> Self {
        PhysicsError::NumericalFailure(msg.into())
    }
}
