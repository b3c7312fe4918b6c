use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::ship::ShellParameters;

/// Combined drag factor k = ½·Cd·A / m, m^2/kg.
///
/// Folds drag coefficient, frontal area (from caliber in mm) and mass into
/// the single scalar multiplying ρ·v·|v| in the equations of motion.
pub fn drag_factor(shell: &ShellParameters) -> f64 {
    let radius_m = shell.caliber / 1000.0 / 2.0;
    0.5 * shell.drag_coefficient * PI * radius_m * radius_m / shell.mass
}

/// Quadratic drag acceleration opposing velocity: −k·ρ·v·|v|.
pub fn drag_accel(vel: &Vector2<f64>, density: f64, k: f64) -> Vector2<f64> {
    let speed = vel.norm();
    -vel * (k * density * speed)
}
