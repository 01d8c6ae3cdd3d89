/// Rankine-Hugoniot state across a normal shock in a calorically perfect gas,
/// together with the linear response of the jump to a change of the upstream
/// normal Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockJump {
    pub m1: f64,
    pub gamma: f64,
    pub m2: f64,
    pub density_ratio: f64,  // rho2 / rho1
    pub pressure_ratio: f64, // p2 / p1
    pub pressure_gain: f64,  // d(p2 / gamma p2) per unit dM1 / M1
    pub density_gain: f64,   // d ln R / d ln M1
}
impl ShockJump {
    pub fn new(m1: f64, gamma: f64) -> Self {
        let m1_sq = m1 * m1;
        let strong = 2.0 * gamma * m1_sq - (gamma - 1.0);
        let weak = (gamma - 1.0) * m1_sq + 2.0;
        let m2 = (weak / strong).sqrt();
        let density_ratio = (gamma + 1.0) * m1_sq / weak;
        let pressure_ratio = strong / (gamma + 1.0);
        Self {
            m1,
            gamma,
            m2,
            density_ratio,
            pressure_ratio,
            pressure_gain: 4.0 * m1_sq / strong,
            density_gain: 4.0 / weak,
        }
    }
    /// `sqrt(1 - M2^2)`, clamped at zero.
    pub fn subsonic_margin(&self) -> f64 {
        (1.0 - self.m2 * self.m2).max(0.0).sqrt()
    }
}
