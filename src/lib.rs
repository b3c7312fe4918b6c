pub mod physics;
pub mod dynamics;
pub mod sim;
pub mod solver;
pub mod ship;
pub mod modifiers;
pub mod factor;
pub mod batch;
pub mod config;
pub mod error;
pub mod io;

pub use batch::{run_batch, BatchOptions, BatchReport};
pub use config::EngineConfig;
pub use error::BallisticsError;
pub use factor::{converted_range, range_from_converted, speed_factor, Rejection, SpeedFactor};
pub use modifiers::{modified_range, RangeModifierInputs, RangeModifierTable};
pub use ship::{ShellKind, ShellParameters, Ship, ShipClass};
pub use sim::{simulate, simulate_path, TrajectoryResult};
pub use solver::{ballistics_at_range, solve_angle_for_range, try_ballistics_at_range, BallisticsAtRange};

// Flat paths for the physical model
pub mod atmosphere {
    pub use crate::physics::atmosphere::*;
}

pub mod integrator {
    pub use crate::sim::integrator::rk4_step;
    pub use crate::sim::runner::{simulate, simulate_path};
}
