//! Linearized interaction of a normal shock with a single Fourier-mode
//! upstream density perturbation.
pub mod error;
pub mod initialization;
pub mod io;
pub mod solution;
pub mod sweep;

pub use error::{ConfigurationError, DomainError};
pub use solution::{ModeParameters, PerturbationSample, SingleModeSolution};
