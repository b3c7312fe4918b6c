pub mod integrator;
pub mod runner;
pub mod event;

pub use runner::{
    simulate, simulate_path, FlightPath, Termination, TrajectoryResult, MAX_FLIGHT_TIME,
    MAX_STEPS, TIME_MULTIPLIER, TIME_STEP,
};
pub use integrator::rk4_step;
