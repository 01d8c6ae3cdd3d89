use std::f64::consts::PI;

use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension, arr0};
use num_complex::Complex64;

use super::{SingleModeSolution, fields::broadcast_map, regime::ModeBranch};
use crate::error::DomainError;

impl SingleModeSolution {
    /// Displacement of the shock front along `x` from `xs0 = M2 a2 t`.
    ///
    /// Unlike the flow fields, the amplitude scales with `1 / ky` (`1 / kx`
    /// for the streamwise branch) and not with `Nx / Ny` alone.
    pub fn delta_xs_at(&self, t: f64, y: f64) -> Complex64 {
        let phase = self.geometry.ky * y + self.geometry.omega * t;
        -self.params.epsilon_k * self.modes.corrugation * Complex64::from_polar(1.0, phase)
    }
    /// Front displacement at `y = 0` for every time in `t`.
    pub fn delta_xs<S, D>(&self, t: &ArrayBase<S, D>) -> Array<Complex64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        t.mapv(|t| self.delta_xs_at(t, 0.0))
    }
    /// Front displacement over the common broadcast shape of `t` and `y`.
    pub fn delta_xs_front<S0, S2, D0, D2>(
        &self,
        t: &ArrayBase<S0, D0>,
        y: &ArrayBase<S2, D2>,
    ) -> Result<ArrayD<Complex64>, DomainError>
    where
        S0: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D0: Dimension,
        D2: Dimension,
    {
        // the front has no x dependence
        broadcast_map(t, &arr0(0.0), y, |t, _, y| self.delta_xs_at(t, y))
    }
    /// First non-negative time at which the front displacement at `y = 0`
    /// reaches an extremum.
    pub fn max_displacement_time(&self) -> Result<f64, DomainError> {
        let omega = self.geometry.omega;
        if omega == 0.0 {
            return Err(DomainError::StationaryFront);
        }
        let period = 2.0 * PI / omega.abs();
        Ok((self.phi / omega).rem_euclid(period))
    }
    /// Largest excursion of the front from its unperturbed position.
    ///
    /// For the steady long-wavelength front (`Nx == 0`) this is
    /// `epsilon_k R M2^2 / (|ky| sqrt(1 - M2^2))`, which needs `M2 < 1`.
    pub fn max_delta_xs(&self) -> Result<f64, DomainError> {
        if self.longwavelength() && self.geometry.branch == ModeBranch::Transverse {
            let m2 = self.jump.m2;
            if m2 >= 1.0 {
                return Err(DomainError::SupersonicDownstream { m2 });
            }
            let amplitude = self.params.epsilon_k * self.jump.density_ratio * m2 * m2
                / (self.geometry.ky.abs() * (1.0 - m2 * m2).sqrt());
            return Ok(amplitude.abs());
        }
        let t = self.max_displacement_time()?;
        Ok(self.delta_xs_at(t, 0.0).re.abs())
    }
}
