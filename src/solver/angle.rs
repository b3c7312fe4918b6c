use log::debug;

use crate::error::BallisticsError;
use crate::ship::ShellParameters;
use crate::sim::simulate;

// ---------------------------------------------------------------------------
// Search policy
// ---------------------------------------------------------------------------

/// Lower bound of the elevation bracket, degrees.
pub const ANGLE_MIN: f64 = 0.0;
/// Upper bound of the elevation bracket, degrees.
pub const ANGLE_MAX: f64 = 45.0;
/// Bisection stops once the bracket is this narrow, degrees.
pub const ANGLE_TOLERANCE: f64 = 0.001;
/// Hard cap on bisection iterations (default policy needs 16).
pub const MAX_ITERATIONS: usize = 64;
/// Resolution of the maximum-range search, degrees.
pub const ENVELOPE_TOLERANCE: f64 = 0.01;

/// Bracket and tolerance of one bisection run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub angle_min: f64, // deg
    pub angle_max: f64, // deg
    pub tolerance: f64, // deg
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            angle_min: ANGLE_MIN,
            angle_max: ANGLE_MAX,
            tolerance: ANGLE_TOLERANCE,
        }
    }
}

/// Maximum range of a shell and the elevation that achieves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub angle: f64, // deg
    pub range: f64, // m
}

// ---------------------------------------------------------------------------
// Bisection
// ---------------------------------------------------------------------------

/// Elevation (degrees) at which `shell` lands `target_range_m` downrange.
///
/// Bisects over `[0°, 45°]` assuming range grows with elevation. A target
/// beyond the bracket still converges, to an angle whose range falls short;
/// use [`solve_angle_checked`] when that must be detected.
pub fn solve_angle_for_range(target_range_m: f64, shell: &ShellParameters) -> f64 {
    solve_angle_with(target_range_m, shell, &SolverConfig::default())
}

/// Bisection with an explicit bracket and tolerance.
pub fn solve_angle_with(target_range_m: f64, shell: &ShellParameters, config: &SolverConfig) -> f64 {
    let mut low = config.angle_min;
    let mut high = config.angle_max;
    let mut iterations = 0;

    while high - low > config.tolerance && iterations < MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        if simulate(mid, shell).range < target_range_m {
            low = mid;
        } else {
            high = mid;
        }
        iterations += 1;
    }

    let angle = (low + high) / 2.0;
    debug!(
        "solved {:.1} m -> {:.4}° in {} iterations",
        target_range_m, angle, iterations
    );
    angle
}

// ---------------------------------------------------------------------------
// Envelope and checked solve
// ---------------------------------------------------------------------------

/// Locate the elevation of maximum range inside `[0°, 45°]` by
/// golden-section search.
///
/// Light, draggy shells peak below 45°, past which range falls again and
/// plain bisection over the full bracket would chase the wrong branch.
pub fn max_range_angle(shell: &ShellParameters) -> Envelope {
    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let range_at = |angle: f64| simulate(angle, shell).range;

    let mut a = ANGLE_MIN;
    let mut b = ANGLE_MAX;
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = range_at(c);
    let mut fd = range_at(d);

    while b - a > ENVELOPE_TOLERANCE {
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = range_at(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = range_at(d);
        }
    }

    let mid = (a + b) / 2.0;
    let inner = Envelope { angle: mid, range: range_at(mid) };
    let edge = Envelope { angle: ANGLE_MAX, range: range_at(ANGLE_MAX) };
    if edge.range > inner.range { edge } else { inner }
}

/// Like [`solve_angle_for_range`], but reports targets outside the envelope.
///
/// Targets within the 45° range get exactly the plain solver's answer. Only
/// targets between the 45° range and the peak are bisected on the rising
/// branch `[0°, peak]`.
pub fn solve_angle_checked(target_range_m: f64, shell: &ShellParameters) -> Result<f64, BallisticsError> {
    if !(target_range_m.is_finite() && target_range_m > 0.0) {
        return Err(BallisticsError::InvalidTarget { range_m: target_range_m });
    }

    let envelope = max_range_angle(shell);
    if target_range_m > envelope.range {
        return Err(BallisticsError::UnreachableRange {
            target_m: target_range_m,
            max_range_m: envelope.range,
        });
    }

    if target_range_m <= simulate(ANGLE_MAX, shell).range {
        return Ok(solve_angle_for_range(target_range_m, shell));
    }

    let config = SolverConfig {
        angle_max: envelope.angle,
        ..SolverConfig::default()
    };
    Ok(solve_angle_with(target_range_m, shell, &config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
