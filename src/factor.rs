//! Speed factor and game-unit range conversion.

use std::fmt;

use serde::Serialize;

/// Impacts whose cosine falls below this (about 85°) are not representable.
pub const COS_REJECT_THRESHOLD: f64 = 0.0872;
/// Divisor of the speed factor formula.
pub const SPEED_FACTOR_DIVISOR: f64 = 32.0;
/// Metres per game distance unit.
pub const METERS_PER_UNIT: f64 = 30.3;

/// Why no speed factor could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    NonPositiveRange,
    NonPositiveFlightTime,
    SteepImpact,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::NonPositiveRange => "range must be positive",
            Rejection::NonPositiveFlightTime => "flight time must be positive",
            Rejection::SteepImpact => "impact angle too steep",
        };
        f.write_str(s)
    }
}

/// Speed factor outcome. A rejected factor carries no number, so it can
/// never be mistaken for zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedFactor {
    Valid(f64),
    Rejected(Rejection),
}

impl SpeedFactor {
    pub fn value(self) -> Option<f64> {
        match self {
            SpeedFactor::Valid(v) => Some(v),
            SpeedFactor::Rejected(_) => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, SpeedFactor::Valid(_))
    }
}

impl From<SpeedFactor> for Result<f64, Rejection> {
    fn from(f: SpeedFactor) -> Self {
        match f {
            SpeedFactor::Valid(v) => Ok(v),
            SpeedFactor::Rejected(r) => Err(r),
        }
    }
}

/// Speed factor for a shot reaching `range_km` in `flight_time_s` game
/// seconds and landing at `impact_angle_deg`.
///
/// `(range_m / (t · cos θ)) / 32`, rounded to three decimals.
pub fn speed_factor(range_km: f64, flight_time_s: f64, impact_angle_deg: f64) -> SpeedFactor {
    if !(range_km > 0.0) {
        return SpeedFactor::Rejected(Rejection::NonPositiveRange);
    }
    if !(flight_time_s > 0.0) {
        return SpeedFactor::Rejected(Rejection::NonPositiveFlightTime);
    }
    let cos = impact_angle_deg.to_radians().cos();
    if !(cos >= COS_REJECT_THRESHOLD) {
        return SpeedFactor::Rejected(Rejection::SteepImpact);
    }

    let raw = range_km * 1000.0 / (flight_time_s * cos) / SPEED_FACTOR_DIVISOR;
    SpeedFactor::Valid((raw * 1000.0).round() / 1000.0)
}

/// Range in game distance units, rounded to the nearest unit.
pub fn converted_range(range_km: f64) -> i64 {
    (range_km * 1000.0 / METERS_PER_UNIT).round() as i64
}

/// Inverse of [`converted_range`], km.
pub fn range_from_converted(units: i64) -> f64 {
    units as f64 * METERS_PER_UNIT / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn factor_formula() {
        // 15 km in 9.8 s landing at 16.9°.
        let f = speed_factor(15.0, 9.8, 16.9).value().unwrap();
        let expected = 15_000.0 / (9.8 * 16.9_f64.to_radians().cos()) / 32.0;
        assert_relative_eq!(f, expected, epsilon = 5e-4);
    }

    #[test]
    fn factor_is_rounded_to_three_decimals() {
        let f = speed_factor(12.345, 7.77, 3.3).value().unwrap();
        assert_relative_eq!(f * 1000.0, (f * 1000.0).round(), epsilon = 1e-6);
    }

    #[test]
    fn rejection_boundary_at_85_degrees() {
        assert_eq!(
            speed_factor(10.0, 5.0, 85.0001),
            SpeedFactor::Rejected(Rejection::SteepImpact)
        );
        assert!(speed_factor(10.0, 5.0, 84.9).is_valid());
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert_eq!(speed_factor(0.0, 5.0, 10.0), SpeedFactor::Rejected(Rejection::NonPositiveRange));
        assert_eq!(speed_factor(-1.0, 5.0, 10.0), SpeedFactor::Rejected(Rejection::NonPositiveRange));
        assert_eq!(speed_factor(10.0, 0.0, 10.0), SpeedFactor::Rejected(Rejection::NonPositiveFlightTime));
        assert_eq!(speed_factor(f64::NAN, 5.0, 10.0), SpeedFactor::Rejected(Rejection::NonPositiveRange));
    }

    #[test]
    fn rejected_factor_has_no_value() {
        let r: Result<f64, Rejection> = speed_factor(10.0, 5.0, 89.0).into();
        assert_eq!(r, Err(Rejection::SteepImpact));
        assert_eq!(speed_factor(10.0, 5.0, 89.0).value(), None);
    }

    #[test]
    fn converted_range_rounds() {
        assert_eq!(converted_range(15.0), 495);
        assert_eq!(converted_range(0.0), 0);
        assert_eq!(converted_range(0.0303), 1);
    }

    #[test]
    fn conversion_round_trip() {
        let km = 17.85;
        let back = range_from_converted(converted_range(km));
        assert_relative_eq!(back, km, max_relative = 1e-3);
    }

    #[test]
    fn short_range_round_trip_is_within_half_a_unit() {
        // One unit is more than 0.1% below ~15 km; only the absolute bound holds.
        for km in [5.85, 7.02, 9.54, 11.7] {
            let back = range_from_converted(converted_range(km));
            assert!((back - km).abs() * 1000.0 <= METERS_PER_UNIT / 2.0 + 1e-9, "{km} km -> {back} km");
        }
    }
}
