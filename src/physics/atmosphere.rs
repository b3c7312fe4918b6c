use crate::dynamics::state::G;

// ---------------------------------------------------------------------------
// Troposphere lapse-rate atmosphere
// ---------------------------------------------------------------------------

/// Constants of the lapse-rate density model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereConstants {
    pub sea_level_temperature: f64, // K
    pub lapse_rate: f64,            // K/m (positive = cooling with height)
    pub sea_level_pressure: f64,    // Pa
    pub molar_mass: f64,            // kg/mol, dry air
    pub gas_constant: f64,          // J/(mol·K), universal
    pub gravity: f64,               // m/s^2
}

/// Standard atmosphere used by the trajectory integrator.
pub const STANDARD: AtmosphereConstants = AtmosphereConstants {
    sea_level_temperature: 288.15,
    lapse_rate: 0.0065,
    sea_level_pressure: 101_325.0,
    molar_mass: 0.028_964_4,
    gas_constant: 8.314_47,
    gravity: G,
};

/// Temperature floor, K. The power law reaches 0 K near 44 km.
const MIN_TEMPERATURE: f64 = 1.0;

impl AtmosphereConstants {
    /// Barometric exponent g·M / (R·L).
    pub fn pressure_exponent(&self) -> f64 {
        self.gravity * self.molar_mass / (self.gas_constant * self.lapse_rate)
    }

    pub fn temperature_at(&self, altitude_m: f64) -> f64 {
        (self.sea_level_temperature - self.lapse_rate * altitude_m).max(MIN_TEMPERATURE)
    }

    pub fn pressure_at(&self, altitude_m: f64) -> f64 {
        let t = self.temperature_at(altitude_m);
        self.sea_level_pressure * (t / self.sea_level_temperature).powf(self.pressure_exponent())
    }

    /// Air density at altitude (ideal gas), kg/m^3.
    pub fn density_at(&self, altitude_m: f64) -> f64 {
        let t = self.temperature_at(altitude_m);
        self.pressure_at(altitude_m) * self.molar_mass / (self.gas_constant * t)
    }
}

/// Air density at altitude relative to the launch point, kg/m^3.
///
/// Defined for every real altitude: slightly negative altitudes (RK4
/// sub-steps below the muzzle) give marginally denser air, and the
/// temperature floor keeps extreme heights finite.
pub fn air_density(altitude_m: f64) -> f64 {
    STANDARD.density_at(altitude_m)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
