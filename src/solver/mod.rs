pub mod angle;
pub mod query;

pub use angle::{
    max_range_angle, solve_angle_checked, solve_angle_for_range, solve_angle_with, Envelope,
    SolverConfig, ANGLE_MAX, ANGLE_MIN, ANGLE_TOLERANCE,
};
pub use query::{ballistics_at_range, try_ballistics_at_range, BallisticsAtRange};

#[cfg(test)]
mod proptest_solver;
