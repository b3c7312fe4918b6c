use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchReport;
use crate::error::BallisticsError;
use crate::ship::Ship;
use crate::sim::event::EventKind;
use crate::sim::{FlightPath, Termination};

// ---------------------------------------------------------------------------
// Roster input
// ---------------------------------------------------------------------------

/// Read a ship roster (a JSON array of ships).
pub fn read_roster_from<R: Read>(reader: R) -> Result<Vec<Ship>, BallisticsError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_roster(path: impl AsRef<Path>) -> Result<Vec<Ship>, BallisticsError> {
    let file = File::open(path)?;
    read_roster_from(BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Batch report output
// ---------------------------------------------------------------------------

pub fn write_report<W: Write>(writer: &mut W, report: &BatchReport) -> Result<(), BallisticsError> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_report_file(path: impl AsRef<Path>, report: &BatchReport) -> Result<(), BallisticsError> {
    let mut file = BufWriter::new(File::create(path)?);
    write_report(&mut file, report)?;
    file.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Trace summary
// ---------------------------------------------------------------------------

/// Summary statistics of one traced shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSummary {
    pub launch_angle_deg: f64,
    pub range_m: f64,
    pub max_height_m: f64,
    pub apex_time_s: Option<f64>,
    pub flight_time_s: f64,
    pub adjusted_flight_time_s: f64,
    pub impact_angle_deg: f64,
    pub impact_velocity_ms: f64,
    pub steps: usize,
    pub hit_time_ceiling: bool,
}

impl TraceSummary {
    pub fn from_path(path: &FlightPath) -> Self {
        let launch_angle_deg = path
            .states
            .first()
            .map(|(_, s)| s.vel.y.atan2(s.vel.x).to_degrees())
            .unwrap_or(0.0);
        let r = &path.result;

        TraceSummary {
            launch_angle_deg,
            range_m: r.range,
            max_height_m: path.max_height(),
            apex_time_s: path.event(&EventKind::Apex).map(|e| e.time),
            flight_time_s: r.flight_time,
            adjusted_flight_time_s: r.adjusted_flight_time,
            impact_angle_deg: r.impact_angle,
            impact_velocity_ms: r.impact_velocity,
            steps: r.steps,
            hit_time_ceiling: r.termination == Termination::TimeCeiling,
        }
    }
}

/// Write a trace summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &TraceSummary) -> Result<(), BallisticsError> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &TraceSummary) -> Result<(), BallisticsError> {
    let mut file = File::create(path)?;
    write_summary(&mut file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run_batch;
    use crate::config::EngineConfig;
    use crate::ship::{presets, ShellKind, ShellParameters};
    use crate::sim::simulate_path;
    use approx::assert_relative_eq;

    const ROSTER: &str = r#"[
        {
            "name": "Baltimore",
            "nation": "usa",
            "class": "cruiser",
            "tier": 8,
            "base_max_range_km": 15.9,
            "has_spotter": true,
            "shells": [
                {"kind": "AP", "muzzle_velocity": 762.0, "caliber": 203.0, "mass": 152.0, "drag_coefficient": 0.35},
                {"kind": "HE", "muzzle_velocity": 823.0, "caliber": 203.0, "mass": 118.0, "drag_coefficient": 0.3}
            ]
        },
        {
            "name": "Fletcher",
            "nation": "usa",
            "class": "destroyer",
            "base_max_range_km": 11.7,
            "shells": []
        }
    ]"#;

    #[test]
    fn roster_parses_with_defaults() {
        let ships = read_roster_from(ROSTER.as_bytes()).unwrap();
        assert_eq!(ships.len(), 2);
        assert_eq!(ships[0].shell(ShellKind::HE), Some(&ShellParameters::new(823.0, 203.0, 118.0, 0.3)));
        assert_eq!(ships[1].tier, 0);
        assert!(!ships[1].has_spotter);
    }

    #[test]
    fn roster_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        let roster = presets::all();
        std::fs::write(&path, serde_json::to_string(&roster).unwrap()).unwrap();
        let back = read_roster(&path).unwrap();
        assert_eq!(back.len(), roster.len());
        for (a, b) in back.iter().zip(&roster) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.class, b.class);
            assert_eq!(a.shells.len(), b.shells.len());
            assert_relative_eq!(a.base_max_range_km, b.base_max_range_km, max_relative = 1e-12);
        }
    }

    #[test]
    fn unknown_class_is_rejected() {
        let bad = r#"[{"name": "X", "nation": "usa", "class": "frigate", "base_max_range_km": 5.0, "shells": []}]"#;
        assert!(matches!(read_roster_from(bad.as_bytes()), Err(BallisticsError::Json(_))));
    }

    #[test]
    fn report_is_valid_json() {
        let ships = read_roster_from(ROSTER.as_bytes()).unwrap();
        let report = run_batch(&ships[..1], &EngineConfig::default());

        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let points = &v["ships"][0]["shells"][1]["points"];
        assert_eq!(points.as_array().unwrap().len(), 2);
        assert!(points[1]["factor"].as_f64().unwrap() > 0.0);
        assert_eq!(v["ships"][0]["shells"][1]["kind"], "HE");
    }

    #[test]
    fn report_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = run_batch(&[presets::destroyer()], &EngineConfig::default());
        write_report_file(&path, &report).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Fletcher\""));
        assert!(text.contains("\"Main Battery Specialist\""));
    }

    #[test]
    fn summary_of_traced_shot() {
        let shell = ShellParameters::new(830.0, 203.0, 118.0, 0.3);
        let path = simulate_path(10.0, &shell);
        let s = TraceSummary::from_path(&path);
        assert_relative_eq!(s.launch_angle_deg, 10.0, epsilon = 1e-9);
        assert_eq!(s.range_m, path.result.range);
        assert!(s.max_height_m > 500.0);
        let apex = s.apex_time_s.unwrap();
        assert!(apex > 0.0 && apex < s.flight_time_s);
        assert!(!s.hit_time_ceiling);

        let mut buf = Vec::new();
        write_summary(&mut buf, &s).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"max_height_m\""));
        assert!(json.contains("\"impact_angle_deg\""));
    }

    #[test]
    fn flat_shot_has_no_apex() {
        let shell = ShellParameters::new(830.0, 203.0, 118.0, 0.3);
        let s = TraceSummary::from_path(&simulate_path(0.0, &shell));
        assert_eq!(s.apex_time_s, None);
        assert_eq!(s.steps, 1);
    }
}
