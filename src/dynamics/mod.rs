pub mod state;

pub use state::{Deriv, KinematicState, G};

use crate::physics::{atmosphere, drag, gravity};

// ---------------------------------------------------------------------------
// Equations of motion (planar point mass)
// ---------------------------------------------------------------------------

/// Compute state derivatives for a shell with combined drag factor `k`.
///
/// Forces modeled:
///   1. Gravity: uniform, down
///   2. Drag: quadratic in speed, opposing velocity, density ρ(y)
pub fn derivatives(state: &KinematicState, k: f64) -> Deriv {
    let rho = atmosphere::air_density(state.pos.y);

    Deriv {
        dpos: state.vel,
        dvel: gravity::gravity_accel() + drag::drag_accel(&state.vel, rho, k),
    }
}
