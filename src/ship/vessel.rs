use std::fmt;

use serde::{Deserialize, Serialize};

use super::shell::{ShellKind, ShellParameters};
use crate::modifiers::RangeModifierInputs;

// ---------------------------------------------------------------------------
// Ship: hull class, firing range, and main-battery shells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    Destroyer,
    Cruiser,
    Battleship,
    AircraftCarrier,
    Submarine,
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShipClass::Destroyer => "destroyer",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Battleship => "battleship",
            ShipClass::AircraftCarrier => "aircraft_carrier",
            ShipClass::Submarine => "submarine",
        };
        f.write_str(s)
    }
}

/// One shell type carried by a ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadedShell {
    pub kind: ShellKind,
    #[serde(flatten)]
    pub params: ShellParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub nation: String,
    pub class: ShipClass,
    #[serde(default)]
    pub tier: u8,
    pub base_max_range_km: f64,
    #[serde(default)]
    pub has_spotter: bool,
    pub shells: Vec<LoadedShell>,
}

impl Ship {
    /// Inputs of the range modifier rules for this ship.
    pub fn modifier_inputs(&self) -> RangeModifierInputs<'_> {
        RangeModifierInputs {
            base_max_range_km: self.base_max_range_km,
            class: self.class,
            has_spotter: self.has_spotter,
            name: &self.name,
            nation: &self.nation,
        }
    }

    pub fn shell(&self, kind: ShellKind) -> Option<&ShellParameters> {
        self.shells.iter().find(|s| s.kind == kind).map(|s| &s.params)
    }
}

// ---------------------------------------------------------------------------
// Ship builder
// ---------------------------------------------------------------------------

pub struct ShipBuilder {
    name: String,
    nation: String,
    class: ShipClass,
    tier: u8,
    base_max_range_km: f64,
    has_spotter: bool,
    shells: Vec<LoadedShell>,
}

impl ShipBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nation: "usa".into(),
            class: ShipClass::Cruiser,
            tier: 10,
            base_max_range_km: 15.0,
            has_spotter: false,
            shells: vec![],
        }
    }

    pub fn nation(mut self, v: impl Into<String>) -> Self { self.nation = v.into(); self }
    pub fn class(mut self, v: ShipClass) -> Self { self.class = v; self }
    pub fn tier(mut self, v: u8) -> Self { self.tier = v; self }
    pub fn base_max_range_km(mut self, v: f64) -> Self { self.base_max_range_km = v; self }
    pub fn has_spotter(mut self, v: bool) -> Self { self.has_spotter = v; self }

    pub fn shell(mut self, kind: ShellKind, params: ShellParameters) -> Self {
        self.shells.push(LoadedShell { kind, params });
        self
    }

    pub fn build(self) -> Ship {
        Ship {
            name: self.name,
            nation: self.nation,
            class: self.class,
            tier: self.tier,
            base_max_range_km: self.base_max_range_km,
            has_spotter: self.has_spotter,
            shells: self.shells,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset ships
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::ship::ShellBuilder;

    /// Heavy cruiser with 203 mm guns and a spotter aircraft.
    pub fn heavy_cruiser() -> Ship {
        ShipBuilder::new("Baltimore")
            .nation("usa")
            .class(ShipClass::Cruiser)
            .tier(8)
            .base_max_range_km(15.9)
            .has_spotter(true)
            .shell(
                ShellKind::AP,
                ShellBuilder::new().muzzle_velocity(762.0).caliber(203.0).mass(152.0).drag_coefficient(0.35).build(),
            )
            .shell(
                ShellKind::HE,
                ShellBuilder::new().muzzle_velocity(823.0).caliber(203.0).mass(118.0).drag_coefficient(0.3).build(),
            )
            .build()
    }

    /// Fast battleship with 380 mm guns.
    pub fn battleship() -> Ship {
        ShipBuilder::new("Bismarck")
            .nation("germany")
            .class(ShipClass::Battleship)
            .tier(8)
            .base_max_range_km(19.8)
            .has_spotter(true)
            .shell(
                ShellKind::AP,
                ShellBuilder::new().muzzle_velocity(820.0).caliber(380.0).mass(800.0).drag_coefficient(0.33).build(),
            )
            .shell(
                ShellKind::HE,
                ShellBuilder::new().muzzle_velocity(820.0).caliber(380.0).mass(800.0).drag_coefficient(0.38).build(),
            )
            .build()
    }

    /// Gunboat destroyer with 127 mm guns.
    pub fn destroyer() -> Ship {
        ShipBuilder::new("Fletcher")
            .nation("usa")
            .class(ShipClass::Destroyer)
            .tier(9)
            .base_max_range_km(11.7)
            .shell(
                ShellKind::AP,
                ShellBuilder::new().muzzle_velocity(792.0).caliber(127.0).mass(25.0).drag_coefficient(0.36).build(),
            )
            .shell(
                ShellKind::HE,
                ShellBuilder::new().muzzle_velocity(792.0).caliber(127.0).mass(25.0).drag_coefficient(0.36).build(),
            )
            .build()
    }

    pub fn all() -> Vec<Ship> {
        vec![heavy_cruiser(), battleship(), destroyer()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_inputs_borrow_ship_fields() {
        let ship = presets::battleship();
        let inputs = ship.modifier_inputs();
        assert_eq!(inputs.name, "Bismarck");
        assert_eq!(inputs.nation, "germany");
        assert_eq!(inputs.class, ShipClass::Battleship);
        assert!(inputs.has_spotter);
    }

    #[test]
    fn shell_lookup_by_kind() {
        let ship = presets::heavy_cruiser();
        assert_eq!(ship.shell(ShellKind::AP).unwrap().mass, 152.0);
        assert!(ship.shell(ShellKind::SAP).is_none());
    }

    #[test]
    fn presets_have_valid_shells() {
        for ship in presets::all() {
            for s in &ship.shells {
                assert!(s.params.validate().is_ok(), "{} {}", ship.name, s.kind);
            }
        }
    }

    #[test]
    fn ship_json_round_trips_flattened_shells() {
        let json = r#"{
            "name": "Test",
            "nation": "japan",
            "class": "battleship",
            "base_max_range_km": 20.0,
            "shells": [
                {"kind": "AP", "muzzle_velocity": 780.0, "caliber": 410.0, "mass": 1020.0, "drag_coefficient": 0.32}
            ]
        }"#;
        let ship: Ship = serde_json::from_str(json).unwrap();
        assert_eq!(ship.class, ShipClass::Battleship);
        assert!(!ship.has_spotter);
        assert_eq!(ship.tier, 0);
        assert_eq!(ship.shells[0].params.caliber, 410.0);
    }
}
