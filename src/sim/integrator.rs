use crate::dynamics::{self, KinematicState};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta integrator
// ---------------------------------------------------------------------------

/// Single RK4 step: advance state by dt with combined drag factor `k`.
pub fn rk4_step(state: &KinematicState, k: f64, dt: f64) -> KinematicState {
    let k1 = dynamics::derivatives(state, k);
    let k2 = dynamics::derivatives(&state.apply(&k1, dt * 0.5), k);
    let k3 = dynamics::derivatives(&state.apply(&k2, dt * 0.5), k);
    let k4 = dynamics::derivatives(&state.apply(&k3, dt), k);

    KinematicState {
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0),
    }
}
