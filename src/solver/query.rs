use log::debug;
use serde::Serialize;

use crate::error::BallisticsError;
use crate::ship::ShellParameters;
use crate::sim::{simulate, TrajectoryResult};
use super::angle::{solve_angle_checked, solve_angle_for_range};

/// Ballistics of a shell fired to hit a given range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallisticsAtRange {
    pub launch_angle: f64,    // deg
    pub flight_time: f64,     // s, game-adjusted
    pub impact_angle: f64,    // deg below horizontal
    pub impact_velocity: f64, // m/s
}

impl BallisticsAtRange {
    fn from_result(launch_angle: f64, r: &TrajectoryResult) -> Self {
        Self {
            launch_angle,
            flight_time: r.adjusted_flight_time,
            impact_angle: r.impact_angle,
            impact_velocity: r.impact_velocity,
        }
    }
}

/// Solve the elevation for `target_range_km` and re-fly the shot once.
///
/// Flight time is always the game-adjusted value.
pub fn ballistics_at_range(target_range_km: f64, shell: &ShellParameters) -> BallisticsAtRange {
    let target_m = target_range_km * 1000.0;
    let angle = solve_angle_for_range(target_m, shell);
    let result = simulate(angle, shell);
    debug!(
        "{:.2} km: elevation {:.3}°, t={:.3} s, impact {:.2}° at {:.1} m/s",
        target_range_km, angle, result.adjusted_flight_time, result.impact_angle, result.impact_velocity
    );
    BallisticsAtRange::from_result(angle, &result)
}

/// Checked variant of [`ballistics_at_range`]: fails on targets outside
/// the shell's envelope instead of returning a short shot.
pub fn try_ballistics_at_range(
    target_range_km: f64,
    shell: &ShellParameters,
) -> Result<BallisticsAtRange, BallisticsError> {
    let angle = solve_angle_checked(target_range_km * 1000.0, shell)?;
    let result = simulate(angle, shell);
    Ok(BallisticsAtRange::from_result(angle, &result))
}
