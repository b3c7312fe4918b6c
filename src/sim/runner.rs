use log::warn;

use crate::dynamics::KinematicState;
use crate::physics::drag;
use crate::ship::ShellParameters;
use super::event::{ApexDetector, EventDetector, EventKind, FlightEvent, ImpactDetector};
use super::integrator::rk4_step;

// ---------------------------------------------------------------------------
// Fixed numerical policy
// ---------------------------------------------------------------------------

/// Integration step, s.
pub const TIME_STEP: f64 = 0.02;
/// Flight time ceiling, s.
pub const MAX_FLIGHT_TIME: f64 = 120.0;
/// Step ceiling implied by `MAX_FLIGHT_TIME / TIME_STEP`.
pub const MAX_STEPS: usize = 6_000;
/// Divisor converting simulated seconds into game seconds.
pub const TIME_MULTIPLIER: f64 = 2.75;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Why the integration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The shell dropped below launch altitude.
    Impact,
    /// `MAX_FLIGHT_TIME` elapsed first.
    TimeCeiling,
}

/// Outcome of one simulated shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryResult {
    pub range: f64,                // m, x at termination
    pub flight_time: f64,          // s, simulated
    pub adjusted_flight_time: f64, // s, game time
    pub impact_angle: f64,         // deg below horizontal
    pub impact_velocity: f64,      // m/s
    pub steps: usize,
    pub termination: Termination,
}

impl TrajectoryResult {
    fn from_final_state(state: &KinematicState, steps: usize, termination: Termination) -> Self {
        let flight_time = steps as f64 * TIME_STEP;
        TrajectoryResult {
            range: state.x(),
            flight_time,
            adjusted_flight_time: flight_time / TIME_MULTIPLIER,
            impact_angle: state.descent_angle_deg(),
            impact_velocity: state.speed(),
            steps,
            termination,
        }
    }
}

/// Full traced trajectory: every integrated state plus detected events.
#[derive(Debug, Clone)]
pub struct FlightPath {
    pub result: TrajectoryResult,
    pub states: Vec<(f64, KinematicState)>, // (time s, state)
    pub events: Vec<FlightEvent>,
}

impl FlightPath {
    /// Highest altitude reached, m.
    pub fn max_height(&self) -> f64 {
        self.states.iter().map(|(_, s)| s.y()).fold(0.0_f64, f64::max)
    }

    pub fn event(&self, kind: &EventKind) -> Option<&FlightEvent> {
        self.events.iter().find(|e| &e.kind == kind)
    }
}

// ---------------------------------------------------------------------------
// Integration loop
// ---------------------------------------------------------------------------

/// Integrate from the muzzle until impact or the time ceiling, calling
/// `on_step(step, prev, next)` after every accepted step.
fn integrate<F>(launch_angle_deg: f64, shell: &ShellParameters, mut on_step: F) -> TrajectoryResult
where
    F: FnMut(usize, &KinematicState, &KinematicState),
{
    let k = drag::drag_factor(shell);
    let mut state = KinematicState::at_muzzle(launch_angle_deg, shell.muzzle_velocity);
    let mut steps = 0;

    let termination = loop {
        if steps >= MAX_STEPS {
            break Termination::TimeCeiling;
        }

        let next = rk4_step(&state, k, TIME_STEP);
        steps += 1;
        on_step(steps, &state, &next);
        state = next;

        if state.pos.y < 0.0 {
            break Termination::Impact;
        }
    };

    if termination == Termination::TimeCeiling {
        warn!(
            "shot at {:.3}° hit the {:.0} s ceiling (x={:.1} m, y={:.1} m)",
            launch_angle_deg, MAX_FLIGHT_TIME, state.pos.x, state.pos.y
        );
    }

    TrajectoryResult::from_final_state(&state, steps, termination)
}

/// Simulate one shot at `launch_angle_deg` (degrees above horizontal).
///
/// Always returns; pathological shells are bounded by `MAX_STEPS`.
pub fn simulate(launch_angle_deg: f64, shell: &ShellParameters) -> TrajectoryResult {
    integrate(launch_angle_deg, shell, |_, _, _| {})
}

/// Simulate one shot and keep every state and flight event.
/// `result` is identical to what [`simulate`] returns for the same inputs.
pub fn simulate_path(launch_angle_deg: f64, shell: &ShellParameters) -> FlightPath {
    let muzzle = KinematicState::at_muzzle(launch_angle_deg, shell.muzzle_velocity);

    let mut states = Vec::with_capacity(1024);
    states.push((0.0, muzzle));
    let mut events = vec![FlightEvent {
        time: 0.0,
        kind: EventKind::Launch,
        state: muzzle,
    }];

    let mut apex = ApexDetector::default();
    let mut impact = ImpactDetector;

    let result = integrate(launch_angle_deg, shell, |step, prev, next| {
        let time = step as f64 * TIME_STEP;
        states.push((time, *next));
        for kind in [apex.check(prev, next), impact.check(prev, next)].into_iter().flatten() {
            events.push(FlightEvent { time, kind, state: *next });
        }
    });

    if result.termination == Termination::TimeCeiling {
        if let Some(&(time, state)) = states.last() {
            events.push(FlightEvent { time, kind: EventKind::TimeCeiling, state });
        }
    }

    FlightPath { result, states, events }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
