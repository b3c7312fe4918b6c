//! Firing-range bonuses from equipment, skills, spotter aircraft and
//! per-ship traits.
//!
//! Rules are plain data in a [`RangeModifierTable`]; setting a rule to
//! `None` (or leaving the override list empty) disables it.

use serde::{Deserialize, Serialize};

use crate::ship::ShipClass;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything the rules look at for one ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeModifierInputs<'a> {
    pub base_max_range_km: f64,
    pub class: ShipClass,
    pub has_spotter: bool,
    pub name: &'a str,
    pub nation: &'a str,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Equipment available only to one nation's ships of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationBonus {
    pub name: String,
    pub nation: String,
    pub class: ShipClass,
    pub multiplier: f64,
}

/// Skill applied unconditionally to every ship of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBonus {
    pub name: String,
    pub class: ShipClass,
    pub multiplier: f64,
}

/// Spotter aircraft bonus for the listed classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotterBonus {
    pub name: String,
    pub classes: Vec<ShipClass>,
    pub multiplier: f64,
}

/// Unique range trait of a single named ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipOverride {
    pub ship: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeModifierTable {
    pub nation_bonus: Option<NationBonus>,
    pub class_bonus: Option<ClassBonus>,
    pub spotter_bonus: Option<SpotterBonus>,
    pub overrides: Vec<ShipOverride>,
}

impl Default for RangeModifierTable {
    fn default() -> Self {
        Self {
            nation_bonus: Some(NationBonus {
                name: "Gun Fire Control Mod. 2".into(),
                nation: "germany".into(),
                class: ShipClass::Battleship,
                multiplier: 1.16,
            }),
            class_bonus: Some(ClassBonus {
                name: "Main Battery Specialist".into(),
                class: ShipClass::Destroyer,
                multiplier: 1.20,
            }),
            spotter_bonus: Some(SpotterBonus {
                name: "Spotting Aircraft".into(),
                classes: vec![ShipClass::Cruiser, ShipClass::Battleship],
                multiplier: 1.20,
            }),
            overrides: vec![
                ShipOverride { ship: "Yamato".into(), multiplier: 1.05 },
                ShipOverride { ship: "Montana".into(), multiplier: 1.04 },
            ],
        }
    }
}

impl RangeModifierTable {
    /// A table with every rule disabled.
    pub fn empty() -> Self {
        Self {
            nation_bonus: None,
            class_bonus: None,
            spotter_bonus: None,
            overrides: vec![],
        }
    }

    /// Apply the rules in precedence order: nation equipment, else class
    /// skill, else spotter; then the per-ship override on top.
    pub fn evaluate(&self, inputs: &RangeModifierInputs<'_>) -> ModifiedRange {
        let mut range_km = inputs.base_max_range_km;
        let mut applied = Vec::new();

        let exclusive = self
            .nation_bonus
            .as_ref()
            .filter(|b| b.class == inputs.class && b.nation.eq_ignore_ascii_case(inputs.nation))
            .map(|b| (b.name.as_str(), b.multiplier))
            .or_else(|| {
                self.class_bonus
                    .as_ref()
                    .filter(|b| b.class == inputs.class)
                    .map(|b| (b.name.as_str(), b.multiplier))
            })
            .or_else(|| {
                self.spotter_bonus
                    .as_ref()
                    .filter(|b| inputs.has_spotter && b.classes.contains(&inputs.class))
                    .map(|b| (b.name.as_str(), b.multiplier))
            });

        if let Some((name, multiplier)) = exclusive {
            range_km *= multiplier;
            applied.push(name.to_string());
        }

        if let Some(o) = self.overrides.iter().find(|o| o.ship == inputs.name) {
            range_km *= o.multiplier;
            applied.push(format!("{} trait", o.ship));
        }

        ModifiedRange { range_km, applied }
    }
}

/// Final range and the names of the rules that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedRange {
    pub range_km: f64,
    pub applied: Vec<String>,
}

/// Modified maximum firing range, km.
pub fn modified_range(inputs: &RangeModifierInputs<'_>, table: &RangeModifierTable) -> f64 {
    table.evaluate(inputs).range_km
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
