//! Property-based tests for the integrator and angle solver using proptest.
//!
//! Shell strategies cover the gun calibres and shell weights of real naval
//! artillery: mass scales with the cube of the calibre.

use proptest::prelude::*;

use super::angle::{max_range_angle, solve_angle_checked, solve_angle_for_range};
use crate::factor::{converted_range, range_from_converted, METERS_PER_UNIT};
use crate::ship::ShellParameters;
use crate::sim::{simulate, MAX_STEPS};

/// Any naval shell from 120 mm destroyer guns to 460 mm battleship guns.
fn naval_shell() -> impl Strategy<Value = ShellParameters> {
    (700.0f64..950.0, 120.0f64..460.0, 0.6f64..1.2, 0.25f64..0.4).prop_map(|(v, cal, fill, cd)| {
        let mass = fill * (cal / 1000.0).powi(3) * 13_000.0;
        ShellParameters::new(v, cal, mass, cd)
    })
}

/// Heavy cruiser and battleship shells with a maximum range beyond 25 km.
fn heavy_shell() -> impl Strategy<Value = ShellParameters> {
    (780.0f64..950.0, 200.0f64..460.0, 0.9f64..1.2, 0.25f64..0.35).prop_map(|(v, cal, fill, cd)| {
        let mass = fill * (cal / 1000.0).powi(3) * 13_000.0;
        ShellParameters::new(v, cal, mass, cd)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Range increases with elevation below 40°, which bisection relies on.
    #[test]
    fn prop_range_increases_with_elevation(
        shell in naval_shell(),
        angle in 0.5f64..39.0,
    ) {
        let low = simulate(angle, &shell).range;
        let high = simulate(angle + 1.0, &shell).range;
        prop_assert!(high > low, "range fell from {:.1} to {:.1} m at {:.2}°", low, high, angle);
    }

    /// Every shot stops within the step ceiling, including vacuum shots.
    #[test]
    fn prop_simulation_terminates(
        velocity in 1.0f64..3_000.0,
        caliber in 1.0f64..500.0,
        mass in 0.1f64..2_000.0,
        drag in 0.0f64..1.0,
        angle in 0.0f64..89.9,
    ) {
        let shell = ShellParameters::new(velocity, caliber, mass, drag);
        let r = simulate(angle, &shell);
        prop_assert!(r.steps >= 1 && r.steps <= MAX_STEPS);
    }

    /// Same inputs, same bits.
    #[test]
    fn prop_simulation_is_deterministic(
        shell in naval_shell(),
        angle in 0.0f64..45.0,
    ) {
        let a = simulate(angle, &shell);
        let b = simulate(angle, &shell);
        prop_assert_eq!(a.range.to_bits(), b.range.to_bits());
        prop_assert_eq!(a.impact_angle.to_bits(), b.impact_angle.to_bits());
    }

    /// Half a game unit is within 0.1% of the range only beyond ~15.15 km.
    #[test]
    fn prop_converted_range_round_trip(range_km in 16.0f64..40.0) {
        let back = range_from_converted(converted_range(range_km));
        prop_assert!(((back - range_km) / range_km).abs() < 1e-3);
    }

    /// At any range, conversion loses at most half a unit.
    #[test]
    fn prop_converted_range_within_half_unit(range_km in 0.1f64..40.0) {
        let back = range_from_converted(converted_range(range_km));
        prop_assert!((back - range_km).abs() * 1000.0 <= METERS_PER_UNIT / 2.0 + 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The solved elevation reproduces the target range within 0.1%.
    #[test]
    fn prop_solver_hits_target(
        shell in heavy_shell(),
        target in 15_000.0f64..22_000.0,
    ) {
        let angle = solve_angle_for_range(target, &shell);
        let range = simulate(angle, &shell).range;
        prop_assert!(
            ((range - target) / target).abs() < 1e-3,
            "target {:.1} m, got {:.1} m at {:.4}°", target, range, angle
        );
    }

    /// On the rising branch of any shell, the checked solver hits the target.
    #[test]
    fn prop_checked_solver_within_envelope(
        shell in naval_shell(),
        fraction in 0.5f64..0.9,
    ) {
        let envelope = max_range_angle(&shell);
        let target = envelope.range * fraction;
        let angle = solve_angle_checked(target, &shell).unwrap();
        prop_assert!(angle <= envelope.angle);
        let range = simulate(angle, &shell).range;
        prop_assert!(((range - target) / target).abs() < 5e-3);
    }
}
