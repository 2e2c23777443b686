//! Core physical constants, value types, and unit helpers.
//!
//! All engine APIs are SI (meters, seconds, kilograms, Joules). Angles are
//! accepted in degrees at the boundary and converted to radians internally.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²), CODATA 2018
pub const G: f64 = 6.67430e-11;

/// Astronomical unit in meters
pub const AU_M: f64 = 1.495978707e11;

/// Sun's gravitational parameter μ = G·M_sun (m³/s²)
pub const GM_SUN: f64 = 1.32712440018e20;

/// Earth's gravitational parameter μ = G·M_earth (m³/s²)
pub const GM_EARTH: f64 = 3.986004418e14;

/// Earth mean radius (m)
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Earth mean radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Standard surface gravity (m/s²)
pub const EARTH_SURFACE_GRAVITY: f64 = 9.80665;

/// Sea-level atmospheric density (kg/m³)
pub const ATMOSPHERIC_DENSITY_SEA_LEVEL: f64 = 1.225;

/// Atmospheric scale height (km)
pub const ATMOSPHERIC_SCALE_HEIGHT_KM: f64 = 8.0;

/// Crustal P-wave velocity (m/s)
pub const SEISMIC_VELOCITY_P_WAVE: f64 = 6000.0;

/// Crustal S-wave velocity (m/s), Vp/Vs = 1.73
pub const SEISMIC_VELOCITY_S_WAVE: f64 = 3464.0;

/// Default bulk density for a stony asteroid (kg/m³)
pub const DEFAULT_ASTEROID_DENSITY: f64 = 3000.0;

/// Default target surface density, crustal rock (kg/m³)
pub const DEFAULT_TARGET_DENSITY: f64 = 2500.0;

/// Energy density of TNT (J/kg)
pub const TNT_J_PER_KG: f64 = 4.184e6;

/// One kiloton of TNT (J)
pub const TNT_J_PER_KT: f64 = 4.184e12;

/// One megaton of TNT (J)
pub const TNT_J_PER_MT: f64 = 4.184e18;

/// Hiroshima bomb equivalent, ~15 kt (J). Display-layer convenience.
pub const HIROSHIMA_EQUIVALENT_J: f64 = 6.3e13;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Seconds per Julian year
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// Physical parameters of an incoming asteroid.
///
/// Immutable input value object, created once per simulation request and
/// validated before any model runs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AsteroidParameters {
    /// Diameter (m), > 0
    pub diameter_m: f64,
    /// Velocity at the top of the atmosphere (m/s), > 0
    pub velocity_ms: f64,
    /// Bulk density (kg/m³), > 0
    pub density_kg_m3: f64,
    /// Impact angle from horizontal (degrees), in (0, 90]
    pub impact_angle_deg: f64,
}

impl AsteroidParameters {
    /// Create parameters with the default stony-asteroid density.
    pub fn new(diameter_m: f64, velocity_ms: f64, impact_angle_deg: f64) -> Self {
        Self {
            diameter_m,
            velocity_ms,
            density_kg_m3: DEFAULT_ASTEROID_DENSITY,
            impact_angle_deg,
        }
    }

    /// Validate all fields before any model runs: positive
    /// diameter/velocity/density, angle in (0, 90].
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.diameter_m > 0.0) {
            return Err(PhysicsError::invalid_input("diameter_m must be positive"));
        }
        if !(self.velocity_ms > 0.0) {
            return Err(PhysicsError::invalid_input("velocity_ms must be positive"));
        }
        if !(self.density_kg_m3 > 0.0) {
            return Err(PhysicsError::invalid_input("density_kg_m3 must be positive"));
        }
        if !(self.impact_angle_deg > 0.0 && self.impact_angle_deg <= 90.0) {
            return Err(PhysicsError::invalid_input(
                "impact_angle_deg must be in (0, 90]",
            ));
        }
        Ok(())
    }

    /// Mass estimate assuming a sphere of the given bulk density (kg).
    pub fn mass_kg(&self) -> f64 {
        estimate_asteroid_mass(self.diameter_m, self.density_kg_m3)
    }
}

/// A geographic point, latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (degrees), in [-90, 90]
    pub lat: f64,
    /// Longitude (degrees), in [-180, 180]
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate ranges: lat in [-90, 90], lon in [-180, 180].
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(PhysicsError::invalid_input(
                "coordinates out of range: lat must be [-90,90], lon [-180,180]",
            ));
        }
        Ok(())
    }
}

/// Great-circle distance between two points via the haversine formula,
/// on a spherical Earth of mean radius.
///
/// # Returns
/// Distance in kilometers.
pub fn haversine_distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Estimate asteroid mass from diameter assuming a spherical body (kg).
pub fn estimate_asteroid_mass(diameter_m: f64, density_kg_m3: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let volume = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3);
    volume * density_kg_m3
}

/// Kinetic energy 0.5·m·v² (J).
pub fn kinetic_energy_j(mass_kg: f64, velocity_ms: f64) -> f64 {
    0.5 * mass_kg * velocity_ms * velocity_ms
}

/// Energy in Joules expressed as kilograms of TNT.
pub fn joules_to_tnt_kg(energy_j: f64) -> f64 {
    energy_j / TNT_J_PER_KG
}

/// Energy in Joules expressed as kilotons of TNT.
pub fn joules_to_tnt_kt(energy_j: f64) -> f64 {
    energy_j / TNT_J_PER_KT
}

/// Energy in Joules expressed as megatons of TNT.
pub fn joules_to_tnt_mt(energy_j: f64) -> f64 {
    energy_j / TNT_J_PER_MT
}
