//! Atmospheric entry model.
//!
//! Reduces an incoming body's mass and velocity to the surviving mass and
//! velocity after atmospheric passage. Survival uses coarse diameter tiers
//! standing in for full ablation physics; small bodies are additionally
//! capped at a terminal-velocity estimate from a drag-area/mass balance.

use serde::{Deserialize, Serialize};

use crate::types::{
    estimate_asteroid_mass, kinetic_energy_j, AsteroidParameters,
    ATMOSPHERIC_DENSITY_SEA_LEVEL, ATMOSPHERIC_SCALE_HEIGHT_KM, EARTH_SURFACE_GRAVITY,
};

/// Fraction of entry velocity retained through atmospheric drag for bodies
/// that do not reach terminal velocity.
const SMALL_BODY_DRAG_RETENTION: f64 = 0.7;

/// Velocity retention for large bodies, which punch through the atmosphere
/// mostly unimpeded.
const LARGE_BODY_DRAG_RETENTION: f64 = 0.9;

/// Diameter below which a body decelerates toward terminal velocity (m).
const TERMINAL_VELOCITY_DIAMETER_M: f64 = 50.0;

/// Drag coefficient factor used in the terminal-velocity balance.
const DRAG_FACTOR: f64 = 0.5;

/// Result of atmospheric passage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AtmosphericEntryResult {
    /// Mass at the top of the atmosphere (kg)
    pub initial_mass_kg: f64,
    /// Mass surviving to the surface (kg)
    pub surviving_mass_kg: f64,
    /// 1 − surviving fraction
    pub mass_loss_fraction: f64,
    /// Diameter at entry (m)
    pub initial_diameter_m: f64,
    /// Surviving diameter, scaled by the cube root of the mass fraction (m)
    pub surviving_diameter_m: f64,
    /// Velocity at entry (m/s)
    pub initial_velocity_ms: f64,
    /// Velocity at the surface (m/s)
    pub final_velocity_ms: f64,
    /// Kinetic energy at entry (J)
    pub initial_energy_j: f64,
    /// Kinetic energy at the surface (J)
    pub final_energy_j: f64,
    /// Fraction of entry energy deposited in the atmosphere, in [0, 1]
    pub energy_loss_fraction: f64,
    /// Slant path length through the atmosphere (km)
    pub atmospheric_path_km: f64,
}

/// Surviving-mass fraction by diameter tier.
///
/// Ordered thresholds, first match wins: small bodies mostly ablate,
/// large bodies arrive mostly intact. Deliberately coarse; callers must
/// not read more fidelity into the output than these tiers carry.
fn surviving_fraction(diameter_m: f64) -> f64 {
    if diameter_m < 10.0 {
        0.1
    } else if diameter_m < 100.0 {
        0.5
    } else {
        0.9
    }
}

/// Compute atmospheric entry effects for a validated asteroid.
///
/// Precondition: `params` has passed [`AsteroidParameters::validate`];
/// a zero-diameter input would yield zero mass and is rejected upstream.
pub fn atmospheric_entry(params: &AsteroidParameters) -> AtmosphericEntryResult {
    let mass_kg = estimate_asteroid_mass(params.diameter_m, params.density_kg_m3);
    let entry_energy_j = kinetic_energy_j(mass_kg, params.velocity_ms);

    // Slant path through the atmosphere scales with 1/sin(angle)
    let angle_rad = params.impact_angle_deg.to_radians();
    let atmospheric_path_km = ATMOSPHERIC_SCALE_HEIGHT_KM / angle_rad.sin();

    let fraction = surviving_fraction(params.diameter_m);
    let surviving_mass_kg = mass_kg * fraction;
    let surviving_diameter_m = params.diameter_m * fraction.cbrt();

    let final_velocity_ms = if params.diameter_m < TERMINAL_VELOCITY_DIAMETER_M {
        // Small bodies decelerate toward terminal velocity:
        // v_t = sqrt(2·m·g / (ρ_air·A·C_d))
        let cross_section = std::f64::consts::PI * (params.diameter_m / 2.0).powi(2);
        let terminal_velocity_ms = (2.0 * mass_kg * EARTH_SURFACE_GRAVITY
            / (ATMOSPHERIC_DENSITY_SEA_LEVEL * cross_section * DRAG_FACTOR))
            .sqrt();
        (params.velocity_ms * SMALL_BODY_DRAG_RETENTION).min(terminal_velocity_ms)
    } else {
        params.velocity_ms * LARGE_BODY_DRAG_RETENTION
    };

    let final_energy_j = kinetic_energy_j(surviving_mass_kg, final_velocity_ms);

    AtmosphericEntryResult {
        initial_mass_kg: mass_kg,
        surviving_mass_kg,
        mass_loss_fraction: 1.0 - fraction,
        initial_diameter_m: params.diameter_m,
        surviving_diameter_m,
        initial_velocity_ms: params.velocity_ms,
        final_velocity_ms,
        initial_energy_j: entry_energy_j,
        final_energy_j,
        energy_loss_fraction: 1.0 - final_energy_j / entry_energy_j,
        atmospheric_path_km,
    }
}
