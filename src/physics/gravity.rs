use nalgebra::Vector2;

use crate::dynamics::state::G;

/// Uniform gravity acceleration in the firing plane (down).
///
/// Shell trajectories stay within a few kilometres of sea level, so the
/// inverse-square falloff is not modelled.
pub fn gravity_accel() -> Vector2<f64> {
    Vector2::new(0.0, -G)
}
