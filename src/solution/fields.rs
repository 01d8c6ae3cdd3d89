use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn, Zip};
use num_complex::Complex64;

use super::SingleModeSolution;
use crate::error::DomainError;

const I: Complex64 = Complex64::new(0.0, 1.0);
const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Complex pressure, density and velocity perturbations at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbationSample {
    pub p: Complex64,
    pub rho: Complex64,
    pub vx: Complex64,
    pub vy: Complex64,
}

/// Common shape of `shapes` with axes aligned from the right; length-one
/// axes stretch.
fn broadcast_shape(shapes: &[&[usize]]) -> Option<Vec<usize>> {
    let ndim = shapes.iter().map(|shape| shape.len()).max().unwrap_or(0);
    let mut common = vec![1; ndim];
    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &len) in shape.iter().enumerate() {
            let slot = &mut common[offset + axis];
            if *slot == 1 {
                *slot = len;
            } else if len != 1 && len != *slot {
                return None;
            }
        }
    }
    Some(common)
}

/// Evaluates `f` over the common broadcast shape of `t`, `x` and `y`.
pub(super) fn broadcast_map<S0, S1, S2, D0, D1, D2, T, F>(
    t: &ArrayBase<S0, D0>,
    x: &ArrayBase<S1, D1>,
    y: &ArrayBase<S2, D2>,
    mut f: F,
) -> Result<ArrayD<T>, DomainError>
where
    S0: Data<Elem = f64>,
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D0: Dimension,
    D1: Dimension,
    D2: Dimension,
    F: FnMut(f64, f64, f64) -> T,
{
    let mismatch = || DomainError::Broadcast {
        t: t.shape().to_vec(),
        x: x.shape().to_vec(),
        y: y.shape().to_vec(),
    };
    let shape = broadcast_shape(&[t.shape(), x.shape(), y.shape()]).ok_or_else(mismatch)?;
    let t_view = t.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    let x_view = x.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    let y_view = y.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
    Ok(Zip::from(&t_view)
        .and(&x_view)
        .and(&y_view)
        .map_collect(|&t, &x, &y| f(t, x, y)))
}

macro_rules! field_evaluator {
    ($(#[$doc:meta])* $name:ident, $sampler:ident, $component:ident) => {
        $(#[$doc])*
        pub fn $name<S0, S1, S2, D0, D1, D2>(
            &self,
            t: &ArrayBase<S0, D0>,
            x: &ArrayBase<S1, D1>,
            y: &ArrayBase<S2, D2>,
        ) -> Result<ArrayD<Complex64>, DomainError>
        where
            S0: Data<Elem = f64>,
            S1: Data<Elem = f64>,
            S2: Data<Elem = f64>,
            D0: Dimension,
            D1: Dimension,
            D2: Dimension,
        {
            broadcast_map(t, x, y, |t, x, y| self.$sampler(t, x, y).$component)
        }
    };
}

impl SingleModeSolution {
    pub fn is_post_shock(&self, t: f64, x: f64) -> bool {
        x <= self.shock_position(t)
    }
    /// Phase of the incoming entropy wave.
    pub(super) fn upstream_phase(&self, t: f64, x: f64, y: f64) -> f64 {
        self.geometry.kx * (x + (self.u1 - self.u2) * t) + self.geometry.ky * y
    }
    /// Perturbations per unit `epsilon_k`, normalized by `gamma p2`, `rho2`
    /// and `a2`. Ahead of the shock only the convected density survives.
    pub fn tilde_at(&self, t: f64, x: f64, y: f64) -> PerturbationSample {
        let distance = self.shock_position(t) - x;
        if distance < 0.0 {
            let rho = Complex64::from_polar(
                1.0 / self.jump.density_ratio,
                self.upstream_phase(t, x, y),
            );
            return PerturbationSample {
                p: ZERO,
                rho,
                vx: ZERO,
                vy: ZERO,
            };
        }
        let m = &self.modes;
        let transverse = self.geometry.ky * y + self.geometry.omega * t;
        let acoustic = m.pressure * (I * (m.acoustic_k * distance + transverse)).exp();
        let convected = Complex64::from_polar(1.0, m.convected_k * distance + transverse);
        // mode velocities point away from the shock, against lab x
        PerturbationSample {
            p: acoustic,
            rho: acoustic + m.entropy * convected,
            vx: -(m.acoustic_v[0] * acoustic + m.vortical_v[0] * convected),
            vy: m.acoustic_v[1] * acoustic + m.vortical_v[1] * convected,
        }
    }
    /// Dimensional perturbations: [`Self::tilde_at`] scaled by `epsilon_k`
    /// and the post-shock reference values.
    pub fn delta_at(&self, t: f64, x: f64, y: f64) -> PerturbationSample {
        let tilde = self.tilde_at(t, x, y);
        let eps = self.params.epsilon_k;
        let velocity = eps * self.a2;
        PerturbationSample {
            p: tilde.p * (eps * self.params.gamma * self.p2),
            rho: tilde.rho * (eps * self.rho2),
            vx: tilde.vx * velocity,
            vy: tilde.vy * velocity,
        }
    }

    field_evaluator!(
        /// `delta p / (gamma p2)` per unit `epsilon_k`.
        tilde_p, tilde_at, p
    );
    field_evaluator!(
        /// `delta rho / rho2` per unit `epsilon_k`.
        tilde_rho, tilde_at, rho
    );
    field_evaluator!(
        /// `delta vx / a2` per unit `epsilon_k`.
        tilde_vx, tilde_at, vx
    );
    field_evaluator!(
        /// `delta vy / a2` per unit `epsilon_k`.
        tilde_vy, tilde_at, vy
    );
    field_evaluator!(delta_p, delta_at, p);
    field_evaluator!(delta_rho, delta_at, rho);
    field_evaluator!(delta_vx, delta_at, vx);
    field_evaluator!(delta_vy, delta_at, vy);
}
