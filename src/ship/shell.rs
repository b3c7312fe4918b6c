use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BallisticsError;

// ---------------------------------------------------------------------------
// Shell definition
// ---------------------------------------------------------------------------

/// Ammunition type of a shell loaded by a ship's main battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShellKind {
    AP,
    HE,
    SAP,
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShellKind::AP => "AP",
            ShellKind::HE => "HE",
            ShellKind::SAP => "SAP",
        };
        f.write_str(s)
    }
}

/// Exterior-ballistic properties of one shell type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellParameters {
    pub muzzle_velocity: f64,  // m/s
    pub caliber: f64,          // mm
    pub mass: f64,             // kg
    pub drag_coefficient: f64, // dimensionless
}

impl ShellParameters {
    pub fn new(muzzle_velocity: f64, caliber: f64, mass: f64, drag_coefficient: f64) -> Self {
        Self { muzzle_velocity, caliber, mass, drag_coefficient }
    }

    /// Reject non-positive or non-finite fields.
    ///
    /// The integrator never calls this; orchestration does, before handing
    /// a shell to the engine.
    pub fn validate(&self) -> Result<(), BallisticsError> {
        let fields = [
            ("muzzle_velocity", self.muzzle_velocity),
            ("caliber", self.caliber),
            ("mass", self.mass),
            ("drag_coefficient", self.drag_coefficient),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(BallisticsError::InvalidShell { field, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shell builder
// ---------------------------------------------------------------------------

pub struct ShellBuilder {
    muzzle_velocity: f64,
    caliber: f64,
    mass: f64,
    drag_coefficient: f64,
}

impl ShellBuilder {
    pub fn new() -> Self {
        Self {
            muzzle_velocity: 800.0,
            caliber: 203.0,
            mass: 118.0,
            drag_coefficient: 0.3,
        }
    }

    pub fn muzzle_velocity(mut self, v: f64) -> Self { self.muzzle_velocity = v; self }
    pub fn caliber(mut self, v: f64) -> Self { self.caliber = v; self }
    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn drag_coefficient(mut self, v: f64) -> Self { self.drag_coefficient = v; self }

    pub fn build(self) -> ShellParameters {
        ShellParameters {
            muzzle_velocity: self.muzzle_velocity,
            caliber: self.caliber,
            mass: self.mass,
            drag_coefficient: self.drag_coefficient,
        }
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}
