use num_complex::Complex64;

use super::shock_jump::ShockJump;

/// Which of the mode numbers vanish. The normalizing wavenumber and the
/// wave-angle convention differ between the branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeBranch {
    /// `Nx == 0`: steady corrugation, normalized by `|ky|`.
    Transverse,
    /// `Ny == 0`: one-dimensional interaction, normalized by `|kx|`.
    Streamwise,
    /// Both mode numbers nonzero, normalized by `|ky|`.
    Oblique,
}

/// Downstream acoustic response of the shock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Pressure decays exponentially behind the shock (long wavelength).
    Evanescent,
    /// Sound waves radiate away from the shock.
    Propagating,
}

/// Wavenumbers, wave angle and regime of the imposed Fourier mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeGeometry {
    pub branch: ModeBranch,
    pub kx: f64,
    pub ky: f64,
    /// Normalizing wavenumber: `|ky|`, or `|kx|` when `ky == 0`.
    pub kappa: f64,
    /// Frequency at which upstream crests strike the shock, `kx u1`.
    pub omega: f64,
    /// `omega / (a2 kappa)`.
    pub zeta: f64,
    pub wave_angle: f64,
    pub critical_angle: f64,
    pub regime: Regime,
}
impl ModeGeometry {
    pub fn new(kx: f64, ky: f64, jump: &ShockJump, u1: f64, a2: f64) -> Self {
        let branch = if kx == 0.0 {
            ModeBranch::Transverse
        } else if ky == 0.0 {
            ModeBranch::Streamwise
        } else {
            ModeBranch::Oblique
        };
        let omega = kx * u1;
        let critical_angle = jump
            .subsonic_margin()
            .atan2(jump.density_ratio * jump.m2);
        let (kappa, wave_angle, regime) = match branch {
            ModeBranch::Transverse => (ky.abs(), 0.0, Regime::Evanescent),
            ModeBranch::Streamwise => (
                kx.abs(),
                std::f64::consts::FRAC_PI_2,
                Regime::Propagating,
            ),
            ModeBranch::Oblique => {
                let wave_angle = kx.abs().atan2(ky.abs());
                let regime = if wave_angle < critical_angle {
                    Regime::Evanescent
                } else {
                    Regime::Propagating
                };
                (ky.abs(), wave_angle, regime)
            }
        };
        Self {
            branch,
            kx,
            ky,
            kappa,
            omega,
            zeta: omega / (a2 * kappa),
            wave_angle,
            critical_angle,
            regime,
        }
    }
    /// Sign of `ky`, zero for the streamwise branch.
    pub fn transverse_sign(&self) -> f64 {
        if self.ky == 0.0 { 0.0 } else { self.ky.signum() }
    }
    /// Normalized downstream acoustic wavenumber `k / kappa` along the
    /// distance behind the shock. The evanescent root has a positive
    /// imaginary part; the propagating root radiates away from the shock.
    pub fn acoustic_wavenumber(&self, m2: f64) -> Complex64 {
        let zeta = self.zeta;
        match self.branch {
            ModeBranch::Streamwise => Complex64::new(-zeta / (1.0 + m2), 0.0),
            ModeBranch::Transverse => {
                Complex64::new(0.0, 1.0 / (1.0 - m2 * m2).max(f64::MIN_POSITIVE).sqrt())
            }
            ModeBranch::Oblique => {
                let denom = 1.0 - m2 * m2;
                let discriminant = zeta * zeta - denom;
                match self.regime {
                    Regime::Evanescent => Complex64::new(
                        zeta * m2 / denom,
                        (-discriminant).max(0.0).sqrt() / denom,
                    ),
                    Regime::Propagating => Complex64::new(
                        (zeta * m2 - zeta.signum() * discriminant.max(0.0).sqrt()) / denom,
                        0.0,
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry(kx: f64, ky: f64, m1: f64) -> (ModeGeometry, ShockJump) {
        let gamma = 5.0 / 3.0;
        let jump = ShockJump::new(m1, gamma);
        let a1 = gamma.sqrt();
        let u1 = m1 * a1;
        let a2 = a1 * (jump.pressure_ratio / jump.density_ratio).sqrt();
        (ModeGeometry::new(kx, ky, &jump, u1, a2), jump)
    }

    #[test]
    fn branches() {
        assert_eq!(geometry(0.0, 20.0, 1.75).0.branch, ModeBranch::Transverse);
        assert_eq!(geometry(4.0, 0.0, 1.75).0.branch, ModeBranch::Streamwise);
        assert_eq!(geometry(4.0, 20.0, 1.75).0.branch, ModeBranch::Oblique);
        assert_eq!(geometry(0.0, 20.0, 1.75).0.regime, Regime::Evanescent);
        assert_eq!(geometry(4.0, 0.0, 1.75).0.regime, Regime::Propagating);
        assert_eq!(geometry(20.0, 20.0, 1.75).0.regime, Regime::Propagating);
    }
    #[test]
    fn angle_and_frequency_classification_agree() {
        for i in 1..60 {
            let ratio = i as f64 * 0.025;
            let (geo, jump) = geometry(20.0 * ratio, 20.0, 2.25);
            let evanescent = geo.zeta * geo.zeta < 1.0 - jump.m2 * jump.m2;
            assert_eq!(evanescent, geo.regime == Regime::Evanescent, "ratio {ratio}");
        }
    }
    #[test]
    fn acoustic_wavenumber_satisfies_dispersion() {
        for &kx in &[1.0, 4.0, 12.0, 30.0, -6.0] {
            let (geo, jump) = geometry(kx, 20.0, 1.75);
            let m2 = jump.m2;
            let lambda = geo.acoustic_wavenumber(m2);
            let lhs = (geo.zeta + m2 * lambda).powi(2);
            let rhs = lambda * lambda + 1.0;
            assert_relative_eq!(lhs.re, rhs.re, epsilon = 1e-9);
            assert_relative_eq!(lhs.im, rhs.im, epsilon = 1e-9);
            if geo.regime == Regime::Evanescent {
                assert!(lambda.im > 0.0);
            }
        }
    }
    #[test]
    fn propagating_root_has_downstream_group_velocity() {
        let (geo, jump) = geometry(30.0, 20.0, 1.75);
        assert_eq!(geo.regime, Regime::Propagating);
        let lambda = geo.acoustic_wavenumber(jump.m2).re;
        // group velocity behind the shock: a2 (M2 - lambda / |K|)
        assert!(jump.m2 - lambda / (lambda * lambda + 1.0).sqrt() > 0.0);
    }
}
