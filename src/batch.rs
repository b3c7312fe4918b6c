//! Roster-wide evaluation: for every ship and shell, the speed factor at
//! fixed fractions of the ship's modified firing range.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::factor::{converted_range, speed_factor, SpeedFactor};
use crate::ship::{LoadedShell, ShellKind, Ship, ShipClass};
use crate::error::BallisticsError;
use crate::solver::{ballistics_at_range, try_ballistics_at_range, BallisticsAtRange};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Evaluate ships on the rayon thread pool.
    pub parallel: bool,
    /// Fractions of the modified range at which factors are produced.
    pub range_fractions: Vec<f64>,
    /// Use the envelope-checked solver and skip unreachable points.
    pub checked: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            range_fractions: vec![0.5, 1.0],
            checked: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One `{range, factor}` pair handed to the config generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangePoint {
    pub range_km: f64,
    pub converted_range: i64,
    pub factor: f64,
    pub ballistics: BallisticsAtRange,
}

/// A range point that produced no factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPoint {
    pub range_km: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellReport {
    pub kind: ShellKind,
    pub points: Vec<RangePoint>,
    pub skipped: Vec<SkippedPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipReport {
    pub name: String,
    pub nation: String,
    pub class: ShipClass,
    pub modified_range_km: f64,
    pub applied_modifiers: Vec<String>,
    pub shells: Vec<ShellReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub ships: Vec<ShipReport>,
}

impl BatchReport {
    pub fn point_count(&self) -> usize {
        self.ships.iter().flat_map(|s| &s.shells).map(|s| s.points.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.ships.iter().flat_map(|s| &s.shells).map(|s| s.skipped.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

fn query(range_km: f64, shell: &LoadedShell, checked: bool) -> Result<BallisticsAtRange, BallisticsError> {
    if checked {
        try_ballistics_at_range(range_km, &shell.params)
    } else {
        Ok(ballistics_at_range(range_km, &shell.params))
    }
}

fn evaluate_shell(ship: &Ship, shell: &LoadedShell, modified_range_km: f64, options: &BatchOptions) -> ShellReport {
    let mut report = ShellReport {
        kind: shell.kind,
        points: Vec::with_capacity(options.range_fractions.len()),
        skipped: Vec::new(),
    };

    if let Err(e) = shell.params.validate() {
        warn!("{} {}: {}; skipping shell", ship.name, shell.kind, e);
        report.skipped = options
            .range_fractions
            .iter()
            .map(|f| SkippedPoint { range_km: modified_range_km * f, reason: e.to_string() })
            .collect();
        return report;
    }

    for fraction in &options.range_fractions {
        let range_km = modified_range_km * fraction;

        let ballistics = match query(range_km, shell, options.checked) {
            Ok(b) => b,
            Err(e) => {
                warn!("{} {} at {:.2} km: {}; skipping", ship.name, shell.kind, range_km, e);
                report.skipped.push(SkippedPoint { range_km, reason: e.to_string() });
                continue;
            }
        };

        match speed_factor(range_km, ballistics.flight_time, ballistics.impact_angle) {
            SpeedFactor::Valid(factor) => report.points.push(RangePoint {
                range_km,
                converted_range: converted_range(range_km),
                factor,
                ballistics,
            }),
            SpeedFactor::Rejected(reason) => {
                warn!("{} {} at {:.2} km: no factor ({}); skipping", ship.name, shell.kind, range_km, reason);
                report.skipped.push(SkippedPoint { range_km, reason: reason.to_string() });
            }
        }
    }

    report
}

/// Evaluate every shell of one ship.
pub fn evaluate_ship(ship: &Ship, config: &EngineConfig) -> ShipReport {
    let modified = config.modifiers.evaluate(&ship.modifier_inputs());
    info!(
        "{}: range {:.2} km -> {:.2} km ({} shells)",
        ship.name,
        ship.base_max_range_km,
        modified.range_km,
        ship.shells.len()
    );

    let shells = ship
        .shells
        .iter()
        .map(|shell| evaluate_shell(ship, shell, modified.range_km, &config.batch))
        .collect();

    ShipReport {
        name: ship.name.clone(),
        nation: ship.nation.clone(),
        class: ship.class,
        modified_range_km: modified.range_km,
        applied_modifiers: modified.applied,
        shells,
    }
}

/// Evaluate a roster. Report order follows roster order.
pub fn run_batch(ships: &[Ship], config: &EngineConfig) -> BatchReport {
    let ships = if config.batch.parallel {
        ships.par_iter().map(|s| evaluate_ship(s, config)).collect()
    } else {
        ships.iter().map(|s| evaluate_ship(s, config)).collect()
    };
    BatchReport { ships }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{presets, ShellParameters, ShipBuilder};
    use approx::assert_relative_eq;

    fn sequential() -> EngineConfig {
        EngineConfig {
            batch: BatchOptions { parallel: false, ..BatchOptions::default() },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn two_points_per_shell_at_half_and_full_range() {
        let ship = presets::heavy_cruiser();
        let report = evaluate_ship(&ship, &sequential());
        assert_relative_eq!(report.modified_range_km, 15.9 * 1.2, max_relative = 1e-12);
        assert_eq!(report.shells.len(), 2);
        for shell in &report.shells {
            assert_eq!(shell.points.len(), 2, "{:?}", shell.skipped);
            assert_relative_eq!(shell.points[0].range_km, report.modified_range_km / 2.0);
            assert_relative_eq!(shell.points[1].range_km, report.modified_range_km);
            assert!(shell.points[1].factor > 0.0);
            assert_eq!(shell.points[1].converted_range, converted_range(report.modified_range_km));
        }
    }

    #[test]
    fn factor_matches_direct_computation() {
        let ship = presets::battleship();
        let report = evaluate_ship(&ship, &sequential());
        let point = &report.shells[0].points[0];
        let b = try_ballistics_at_range(point.range_km, &ship.shells[0].params).unwrap();
        let direct = speed_factor(point.range_km, b.flight_time, b.impact_angle).value().unwrap();
        assert_eq!(point.factor, direct);
        assert_eq!(point.ballistics, b);
    }

    #[test]
    fn invalid_shell_is_skipped_not_fatal() {
        let ship = ShipBuilder::new("Broken")
            .shell(ShellKind::AP, ShellParameters::new(800.0, 203.0, 0.0, 0.3))
            .shell(ShellKind::HE, ShellParameters::new(800.0, 203.0, 118.0, 0.3))
            .build();
        let report = evaluate_ship(&ship, &sequential());
        assert!(report.shells[0].points.is_empty());
        assert_eq!(report.shells[0].skipped.len(), 2);
        assert!(report.shells[0].skipped[0].reason.contains("mass"));
        assert_eq!(report.shells[1].points.len(), 2);
    }

    #[test]
    fn unreachable_range_is_skipped() {
        let ship = ShipBuilder::new("Longshot")
            .base_max_range_km(45.0)
            .shell(ShellKind::HE, ShellParameters::new(830.0, 203.0, 118.0, 0.3))
            .build();
        let report = evaluate_ship(&ship, &sequential());
        let shell = &report.shells[0];
        // 22.5 km is reachable, 45 km is not.
        assert_eq!(shell.points.len(), 1);
        assert_eq!(shell.skipped.len(), 1);
        assert!(shell.skipped[0].reason.contains("beyond maximum range"));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let roster = presets::all();
        let par = run_batch(&roster, &EngineConfig::default());
        let seq = run_batch(&roster, &sequential());
        assert_eq!(par, seq);
        assert_eq!(par.ships[0].name, roster[0].name);
        assert_eq!(par.point_count(), 12);
        assert_eq!(par.skipped_count(), 0);
    }
}
