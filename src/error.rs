//! Error types for constructing and evaluating single-mode solutions.

use thiserror::Error;

/// Invalid construction parameters. Nothing is derived from a configuration
/// that fails these checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Upstream flow is not supersonic, so no shock exists.
    #[error("upstream Mach number must exceed 1 (got {m1})")]
    NoShock { m1: f64 },

    #[error("heat capacity ratio must exceed 1 (got {gamma})")]
    HeatCapacityRatio { gamma: f64 },

    /// Both mode numbers are zero.
    #[error("at least one of Nx, Ny must be nonzero")]
    UndefinedMode,

    #[error("non-finite value for {what}")]
    NonFinite { what: &'static str },

    #[error("non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },
}

/// A quantity requested outside the domain where it is defined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The closed-form steady displacement needs subsonic post-shock flow.
    #[error("post-shock Mach number must be below 1 for the steady displacement (got {m2})")]
    SupersonicDownstream { m2: f64 },

    /// The front does not oscillate in time, so it has no phase maximum.
    #[error("shock front is stationary (omega = 0); no time of maximum displacement")]
    StationaryFront,

    #[error("cannot broadcast t {t:?}, x {x:?} and y {y:?} to a common shape")]
    Broadcast {
        t: Vec<usize>,
        x: Vec<usize>,
        y: Vec<usize>,
    },
}
