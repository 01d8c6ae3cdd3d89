use num_complex::Complex64;

use super::{
    regime::{ModeBranch, ModeGeometry},
    shock_jump::ShockJump,
};

const I: Complex64 = Complex64::new(0.0, 1.0);

/// Complex amplitudes of the downstream acoustic, vortical and entropy
/// modes and of the shock corrugation, per unit upstream amplitude.
///
/// Velocities are normalized by `a2` and measured along the distance
/// behind the shock (opposite to the lab `x` axis), pressure by `gamma p2`
/// and density by `rho2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownstreamModes {
    /// Acoustic wavenumber along the distance behind the shock.
    pub acoustic_k: Complex64,
    pub pressure: Complex64,
    /// Velocity of the acoustic mode per unit pressure amplitude.
    pub acoustic_v: [Complex64; 2],
    /// Entropy/vortex wavenumber along the distance behind the shock.
    pub convected_k: f64,
    pub vortical_v: [Complex64; 2],
    pub entropy: Complex64,
    /// Shock corrugation along the flow direction, dimensional (`1 / k`).
    pub corrugation: Complex64,
}
impl DownstreamModes {
    /// Solves the linearized jump conditions at the shock for an incoming
    /// entropy wave of unit relative density amplitude.
    pub fn solve(geo: &ModeGeometry, jump: &ShockJump) -> Self {
        let m2 = jump.m2;
        let r = jump.density_ratio;
        let cp = jump.pressure_gain;
        let cr = jump.density_gain;
        let zeta = geo.zeta;
        let sign = geo.transverse_sign();
        let lambda = geo.acoustic_wavenumber(m2);
        let convected_k = -zeta * geo.kappa / m2;

        match geo.branch {
            ModeBranch::Streamwise => {
                let s = geo.kx.signum();
                let xi = -I * s * (cp + m2 * cr) / (2.0 * (m2 * (r - 1.0) + cp + m2 * cr));
                let mach_shift = 0.5 - I * s * xi;
                let pressure = cp * mach_shift;
                Self {
                    acoustic_k: lambda * geo.kappa,
                    pressure,
                    acoustic_v: [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                    convected_k,
                    vortical_v: [Complex64::new(0.0, 0.0); 2],
                    entropy: 1.0 + cr * mach_shift - pressure,
                    corrugation: xi / geo.kappa,
                }
            }
            ModeBranch::Transverse => {
                let margin = jump.subsonic_margin();
                let g = Complex64::new(0.0, -margin / m2);
                let xi = Complex64::new(r * m2 * m2 / margin, 0.0);
                let pressure = Complex64::new(0.5 * cp, 0.0);
                let vortical = pressure / m2 - 0.5 * m2 * cr;
                Self {
                    acoustic_k: lambda * geo.kappa,
                    pressure,
                    acoustic_v: [-lambda * g, -sign * g],
                    convected_k,
                    vortical_v: [vortical, Complex64::new(0.0, 0.0)],
                    entropy: Complex64::new(1.0 + 0.5 * cr - 0.5 * cp, 0.0),
                    corrugation: xi / geo.kappa,
                }
            }
            ModeBranch::Oblique => {
                let c = 1.0 / (r * m2);
                let g = 1.0 / (zeta + m2 * lambda);
                let q = cp * g * (zeta * lambda / m2 - 1.0) - zeta * cr;
                let w = (r - 1.0) * (m2 - zeta * zeta * c);
                let xi = -0.5 * I * q / (w + zeta * c * q);
                let mach_shift = 0.5 - I * zeta * c * xi;
                let pressure = cp * mach_shift;
                let vortical = pressure * lambda * g + m2 * (-I * zeta * c * xi - cr * mach_shift)
                    + I * zeta * xi;
                Self {
                    acoustic_k: lambda * geo.kappa,
                    pressure,
                    acoustic_v: [-lambda * g, -sign * g],
                    convected_k,
                    vortical_v: [vortical, sign * zeta / m2 * vortical],
                    entropy: 1.0 + cr * mach_shift - pressure,
                    corrugation: xi / geo.kappa,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn modes(kx: f64, ky: f64, m1: f64, gamma: f64) -> (DownstreamModes, ModeGeometry, ShockJump) {
        let jump = ShockJump::new(m1, gamma);
        let a1 = gamma.sqrt();
        let a2 = a1 * (jump.pressure_ratio / jump.density_ratio).sqrt();
        let geo = ModeGeometry::new(kx, ky, &jump, m1 * a1, a2);
        (DownstreamModes::solve(&geo, &jump), geo, jump)
    }
    fn assert_complex_eq(a: Complex64, b: Complex64, eps: f64) {
        assert_relative_eq!(a.re, b.re, epsilon = eps);
        assert_relative_eq!(a.im, b.im, epsilon = eps);
    }

    /// Re-derives every linearized jump condition from the solved amplitudes.
    fn check_jump_conditions(kx: f64, ky: f64, m1: f64, gamma: f64) {
        let (m, geo, jump) = modes(kx, ky, m1, gamma);
        let (m2, r) = (jump.m2, jump.density_ratio);
        let a2_over_u1 = 1.0 / (r * m2);
        // shock velocity over a2 and slope
        let xi_t = I * geo.zeta * geo.kappa * m.corrugation;
        let xi_y = I * geo.ky * m.corrugation;
        let mach_shift = 0.5 - xi_t * a2_over_u1;
        assert_complex_eq(m.pressure, jump.pressure_gain * mach_shift, 1e-10);
        assert_complex_eq(
            m.pressure + m.entropy,
            1.0 + jump.density_gain * mach_shift,
            1e-10,
        );
        let vx = m.acoustic_v[0] * m.pressure + m.vortical_v[0];
        assert_complex_eq(
            vx,
            m2 * (-xi_t * a2_over_u1 - jump.density_gain * mach_shift) + xi_t,
            1e-10,
        );
        let vy = m.acoustic_v[1] * m.pressure + m.vortical_v[1];
        assert_complex_eq(vy, m2 * (r - 1.0) * xi_y, 1e-10);
    }

    #[test]
    fn oblique_modes_satisfy_jump_conditions() {
        for &kx in &[2.0, 6.0, 11.0, 20.0, 26.0, -8.0] {
            check_jump_conditions(kx, 20.0, 1.75, 5.0 / 3.0);
            check_jump_conditions(kx, -20.0, 2.25, 1.4);
        }
    }
    #[test]
    fn streamwise_modes_satisfy_jump_conditions() {
        check_jump_conditions(20.0, 0.0, 1.75, 5.0 / 3.0);
        check_jump_conditions(-3.0, 0.0, 2.75, 1.4);
    }
    #[test]
    fn transverse_matches_oblique_limit() {
        let (steady, _, _) = modes(0.0, 20.0, 1.75, 5.0 / 3.0);
        let (limit, _, _) = modes(1e-9, 20.0, 1.75, 5.0 / 3.0);
        assert_complex_eq(steady.corrugation, limit.corrugation, 1e-7);
        assert_complex_eq(steady.pressure, limit.pressure, 1e-7);
        assert_complex_eq(steady.entropy, limit.entropy, 1e-7);
        assert_complex_eq(steady.vortical_v[0], limit.vortical_v[0], 1e-7);
    }
    #[test]
    fn streamwise_matches_oblique_limit() {
        let (plane, _, _) = modes(20.0, 0.0, 1.75, 5.0 / 3.0);
        let (limit, _, _) = modes(20.0, 1e-7, 1.75, 5.0 / 3.0);
        assert_complex_eq(plane.corrugation, limit.corrugation, 1e-6);
        assert_complex_eq(plane.pressure, limit.pressure, 1e-6);
        assert_complex_eq(plane.entropy, limit.entropy, 1e-6);
    }
}
