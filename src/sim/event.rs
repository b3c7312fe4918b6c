use crate::dynamics::KinematicState;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events recorded on a traced trajectory.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Launch,
    Apex,
    Impact,
    TimeCeiling,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: KinematicState,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind>;
}

/// Detects the apex (vertical velocity going from positive to non-positive).
#[derive(Debug, Default)]
pub struct ApexDetector {
    fired: bool,
}

impl EventDetector for ApexDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if !self.fired && prev.vel.y > 0.0 && current.vel.y <= 0.0 {
            self.fired = true;
            Some(EventKind::Apex)
        } else {
            None
        }
    }
}

/// Detects return to launch altitude (y crossing below zero).
#[derive(Debug, Default)]
pub struct ImpactDetector;

impl EventDetector for ImpactDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if prev.pos.y >= 0.0 && current.pos.y < 0.0 {
            Some(EventKind::Impact)
        } else {
            None
        }
    }
}
