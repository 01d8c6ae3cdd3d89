use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use num_complex::Complex64;

use super::{SingleModeSolution, fields::broadcast_map};
use crate::error::DomainError;

impl SingleModeSolution {
    /// Incoming pre-shock density pattern `delta rho / rho1`, advected to
    /// time `t` as if the shock were absent.
    pub fn delta_rho_rho1_at(&self, t: f64, x: f64, y: f64) -> Complex64 {
        self.params.epsilon_k * Complex64::from_polar(1.0, self.upstream_phase(t, x, y))
    }
    /// Kinetic energy density perturbation `1/2 rho |v|^2 - 1/2 rho0 |v0|^2`.
    /// The linear fields are reduced to their real parts before squaring.
    pub fn delta_ke_at(&self, t: f64, x: f64, y: f64) -> f64 {
        let delta = self.delta_at(t, x, y);
        let (rho0, vx0) = if self.is_post_shock(t, x) {
            (self.rho2, 0.0)
        } else {
            (self.params.rho1, self.u2 - self.u1)
        };
        let rho = rho0 + delta.rho.re;
        let vx = vx0 + delta.vx.re;
        let vy = delta.vy.re;
        0.5 * rho * (vx * vx + vy * vy) - 0.5 * rho0 * vx0 * vx0
    }
    /// Total energy density perturbation, `delta p / (gamma - 1)` plus the
    /// kinetic part.
    pub fn delta_te_at(&self, t: f64, x: f64, y: f64) -> f64 {
        let internal = self.delta_at(t, x, y).p.re / (self.params.gamma - 1.0);
        internal + self.delta_ke_at(t, x, y)
    }

    pub fn delta_rho_rho1<S0, S1, S2, D0, D1, D2>(
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
        broadcast_map(t, x, y, |t, x, y| self.delta_rho_rho1_at(t, x, y))
    }
    pub fn delta_ke<S0, S1, S2, D0, D1, D2>(
        &self,
        t: &ArrayBase<S0, D0>,
        x: &ArrayBase<S1, D1>,
        y: &ArrayBase<S2, D2>,
    ) -> Result<ArrayD<f64>, DomainError>
    where
        S0: Data<Elem = f64>,
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D0: Dimension,
        D1: Dimension,
        D2: Dimension,
    {
        broadcast_map(t, x, y, |t, x, y| self.delta_ke_at(t, x, y))
    }
    pub fn delta_te<S0, S1, S2, D0, D1, D2>(
        &self,
        t: &ArrayBase<S0, D0>,
        x: &ArrayBase<S1, D1>,
        y: &ArrayBase<S2, D2>,
    ) -> Result<ArrayD<f64>, DomainError>
    where
        S0: Data<Elem = f64>,
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D0: Dimension,
        D1: Dimension,
        D2: Dimension,
    {
        broadcast_map(t, x, y, |t, x, y| self.delta_te_at(t, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, arr0};

    fn grid(sol: &SingleModeSolution, t: f64) -> (Array2<f64>, Array2<f64>) {
        let x1 = 1.5 * sol.shock_position(t);
        let x = Array2::from_shape_fn((21, 11), |(i, _)| x1 * i as f64 / 20.0);
        let y = Array2::from_shape_fn((21, 11), |(_, j)| 0.03 * j as f64);
        (x, y)
    }

    #[test]
    fn derived_quantities_vanish_without_perturbation() {
        for nx in [0.0, 4.0, 26.0] {
            let sol = SingleModeSolution::new(nx, 20.0, 1.75, 0.0, 5.0 / 3.0).unwrap();
            let t = 0.6;
            let (x, y) = grid(&sol, t);
            let t = arr0(t);
            assert!(sol.delta_ke(&t, &x, &y).unwrap().iter().all(|v| *v == 0.0));
            assert!(sol.delta_te(&t, &x, &y).unwrap().iter().all(|v| *v == 0.0));
            assert!(
                sol.delta_rho_rho1(&t, &x, &y)
                    .unwrap()
                    .iter()
                    .all(|v| v.norm() == 0.0)
            );
        }
    }
    #[test]
    fn kinetic_energy_matches_velocity_fields() {
        let sol = SingleModeSolution::new(6.0, 20.0, 1.75, 0.1, 5.0 / 3.0).unwrap();
        let t = 0.8;
        let (x, y) = grid(&sol, t);
        let times = arr0(t);
        let ke = sol.delta_ke(&times, &x, &y).unwrap();
        let vx = sol.tilde_vx(&times, &x, &y).unwrap();
        let vy = sol.tilde_vy(&times, &x, &y).unwrap();
        let rho = sol.tilde_rho(&times, &x, &y).unwrap();
        let scale = 0.1 * sol.a2();
        let fields = vx.iter().zip(vy.iter()).zip(rho.iter());
        for ((value, xv), ((vx, vy), rho)) in ke.iter().zip(x.iter()).zip(fields) {
            if !sol.is_post_shock(t, *xv) {
                continue;
            }
            let density = sol.rho2() * (1.0 + 0.1 * rho.re);
            let speed_sq = (scale * vx.re).powi(2) + (scale * vy.re).powi(2);
            assert_relative_eq!(*value, 0.5 * density * speed_sq, epsilon = 1e-14);
            assert!(*value >= 0.0);
        }
    }
    #[test]
    fn total_energy_adds_pressure_work() {
        let sol = SingleModeSolution::new(26.0, 20.0, 2.25, 0.1, 1.4).unwrap();
        let (t, x, y) = (0.5, 0.2, 0.05);
        let te = sol.delta_te_at(t, x, y);
        let expected = sol.delta_at(t, x, y).p.re / 0.4 + sol.delta_ke_at(t, x, y);
        assert_relative_eq!(te, expected, epsilon = 1e-14);
    }
    #[test]
    fn preshock_kinetic_energy_is_convected_density() {
        let sol = SingleModeSolution::new(6.0, 20.0, 1.75, 0.1, 5.0 / 3.0).unwrap();
        let t = 0.3;
        let x = sol.shock_position(t) + 0.1;
        let drho = sol.rho1() * sol.delta_rho_rho1_at(t, x, 0.2).re;
        let u = sol.u1() - sol.u2();
        assert_relative_eq!(sol.delta_ke_at(t, x, 0.2), 0.5 * drho * u * u, epsilon = 1e-12);
        assert_relative_eq!(
            sol.delta_at(t, x, 0.2).rho.re,
            drho,
            epsilon = 1e-12
        );
    }
}
