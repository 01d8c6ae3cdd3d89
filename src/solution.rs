//! Closed-form linear response of a normal shock to a single Fourier-mode
//! upstream density perturbation.
//!
//! Lab frame: the shocked gas is at rest, the unperturbed shock sits at
//! `xs0 = M2 a2 t` and moves toward `+x`. Gas at `x <= xs0` is post-shock,
//! gas at `x > xs0` is pre-shock and moves with velocity `-(u1 - u2)`. The
//! incoming perturbation is
//! `delta rho / rho1 = epsilon_k exp(i (kx (x + (u1 - u2) t) + ky y))`.
pub mod amplitudes;
mod displacement;
mod energy;
mod fields;
pub mod regime;
pub mod shock_jump;

use std::f64::consts::PI;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigurationError;
use amplitudes::DownstreamModes;
pub use fields::PerturbationSample;
use regime::{ModeBranch, ModeGeometry, Regime};
use shock_jump::ShockJump;

/// Construction parameters of a [`SingleModeSolution`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ModeParameters {
    pub nx: f64,
    pub ny: f64,
    pub m1: f64,
    #[serde(default = "default_epsilon_k")]
    pub epsilon_k: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_reference")]
    pub rho1: f64,
    #[serde(default = "default_reference")]
    pub p1: f64,
    #[serde(default = "default_box_length")]
    pub lx: f64,
    #[serde(default = "default_box_length")]
    pub ly: f64,
}
fn default_epsilon_k() -> f64 {
    0.1
}
fn default_gamma() -> f64 {
    5.0 / 3.0
}
fn default_reference() -> f64 {
    1.0
}
fn default_box_length() -> f64 {
    2.0 * PI
}
impl ModeParameters {
    pub fn new(nx: f64, ny: f64, m1: f64, epsilon_k: f64, gamma: f64) -> Self {
        Self {
            nx,
            ny,
            m1,
            epsilon_k,
            gamma,
            rho1: default_reference(),
            p1: default_reference(),
            lx: default_box_length(),
            ly: default_box_length(),
        }
    }
    fn validate(&self) -> Result<(), ConfigurationError> {
        let finite = [
            ("Nx", self.nx),
            ("Ny", self.ny),
            ("M1", self.m1),
            ("epsilon_k", self.epsilon_k),
            ("gamma", self.gamma),
            ("rho1", self.rho1),
            ("p1", self.p1),
            ("Lx", self.lx),
            ("Ly", self.ly),
        ];
        if let Some(&(what, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigurationError::NonFinite { what });
        }
        if self.m1 <= 1.0 {
            return Err(ConfigurationError::NoShock { m1: self.m1 });
        }
        if self.gamma <= 1.0 {
            return Err(ConfigurationError::HeatCapacityRatio { gamma: self.gamma });
        }
        if self.nx == 0.0 && self.ny == 0.0 {
            return Err(ConfigurationError::UndefinedMode);
        }
        let positive = [
            ("rho1", self.rho1),
            ("p1", self.p1),
            ("Lx", self.lx),
            ("Ly", self.ly),
        ];
        if let Some(&(what, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigurationError::NonPhysical { what, value });
        }
        Ok(())
    }
}

/// Linearized shock/single-mode interaction. Every derived constant is fixed
/// at construction; the evaluators are pure functions of `(t, x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleModeSolution {
    params: ModeParameters,
    jump: ShockJump,
    geometry: ModeGeometry,
    modes: DownstreamModes,
    a1: f64,
    a2: f64,
    u1: f64,
    u2: f64,
    rho2: f64,
    p2: f64,
    phi: f64,
}
impl SingleModeSolution {
    pub fn new(
        nx: f64,
        ny: f64,
        m1: f64,
        epsilon_k: f64,
        gamma: f64,
    ) -> Result<Self, ConfigurationError> {
        Self::from_parameters(&ModeParameters::new(nx, ny, m1, epsilon_k, gamma))
    }
    pub fn from_parameters(params: &ModeParameters) -> Result<Self, ConfigurationError> {
        params.validate()?;
        let gamma = params.gamma;
        let jump = ShockJump::new(params.m1, gamma);
        let a1 = (gamma * params.p1 / params.rho1).sqrt();
        let u1 = params.m1 * a1;
        let u2 = u1 / jump.density_ratio;
        let rho2 = params.rho1 * jump.density_ratio;
        let p2 = params.p1 * jump.pressure_ratio;
        let a2 = (gamma * p2 / rho2).sqrt();

        let kx = 2.0 * PI * params.nx / params.lx;
        let ky = 2.0 * PI * params.ny / params.ly;
        let geometry = ModeGeometry::new(kx, ky, &jump, u1, a2);
        let modes = DownstreamModes::solve(&geometry, &jump);
        // Front displacement at y = 0 is Re(-epsilon_k xi exp(i omega t)),
        // extremal where omega t = phi.
        let phi = (-(-params.epsilon_k * modes.corrugation).arg()).rem_euclid(2.0 * PI);
        debug!(
            nx = params.nx,
            ny = params.ny,
            m1 = params.m1,
            m2 = jump.m2,
            branch = ?geometry.branch,
            regime = ?geometry.regime,
            wave_angle = geometry.wave_angle,
            critical_angle = geometry.critical_angle,
            "single-mode solution constructed"
        );
        Ok(Self {
            params: params.clone(),
            jump,
            geometry,
            modes,
            a1,
            a2,
            u1,
            u2,
            rho2,
            p2,
            phi,
        })
    }

    pub fn parameters(&self) -> &ModeParameters {
        &self.params
    }
    pub fn nx(&self) -> f64 {
        self.params.nx
    }
    pub fn ny(&self) -> f64 {
        self.params.ny
    }
    pub fn m1(&self) -> f64 {
        self.params.m1
    }
    pub fn epsilon_k(&self) -> f64 {
        self.params.epsilon_k
    }
    pub fn gamma(&self) -> f64 {
        self.params.gamma
    }
    pub fn lx(&self) -> f64 {
        self.params.lx
    }
    pub fn ly(&self) -> f64 {
        self.params.ly
    }
    /// Wavelength of the mode along `x`; `None` when `Nx == 0`.
    pub fn period_x(&self) -> Option<f64> {
        (self.params.nx != 0.0).then(|| self.params.lx / self.params.nx.abs())
    }
    /// Wavelength of the mode along `y`; `None` when `Ny == 0`.
    pub fn period_y(&self) -> Option<f64> {
        (self.params.ny != 0.0).then(|| self.params.ly / self.params.ny.abs())
    }
    pub fn kx(&self) -> f64 {
        self.geometry.kx
    }
    pub fn ky(&self) -> f64 {
        self.geometry.ky
    }
    pub fn omega(&self) -> f64 {
        self.geometry.omega
    }
    /// Phase `omega t` at which the front displacement at `y = 0` peaks.
    pub fn phi(&self) -> f64 {
        self.phi
    }
    pub fn branch(&self) -> ModeBranch {
        self.geometry.branch
    }
    pub fn regime(&self) -> Regime {
        self.geometry.regime
    }
    pub fn longwavelength(&self) -> bool {
        self.geometry.regime == Regime::Evanescent
    }
    pub fn wave_angle(&self) -> f64 {
        self.geometry.wave_angle
    }
    pub fn critical_angle(&self) -> f64 {
        self.geometry.critical_angle
    }
    pub fn m2(&self) -> f64 {
        self.jump.m2
    }
    /// Density ratio `rho2 / rho1` across the shock.
    pub fn r(&self) -> f64 {
        self.jump.density_ratio
    }
    pub fn rho1(&self) -> f64 {
        self.params.rho1
    }
    pub fn rho2(&self) -> f64 {
        self.rho2
    }
    pub fn p1(&self) -> f64 {
        self.params.p1
    }
    pub fn p2(&self) -> f64 {
        self.p2
    }
    pub fn a1(&self) -> f64 {
        self.a1
    }
    pub fn a2(&self) -> f64 {
        self.a2
    }
    pub fn u1(&self) -> f64 {
        self.u1
    }
    pub fn u2(&self) -> f64 {
        self.u2
    }
    /// Unperturbed shock position.
    pub fn shock_position(&self, t: f64) -> f64 {
        self.u2 * t
    }
    pub fn downstream_modes(&self) -> &DownstreamModes {
        &self.modes
    }
}
