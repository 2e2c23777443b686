//! Atmospheric channel: lofted dust, cooling, and air quality.
//!
//! Dust mass comes from the excavated crater volume; a fraction of it is
//! lofted and mixes through a disc-shaped volume around the impact, then
//! settles exponentially over days. Surface cooling and the air quality
//! index both track the remaining airborne fraction.

use serde::{Deserialize, Serialize};

use super::ImpactScenario;
use crate::types::DEFAULT_TARGET_DENSITY;

/// Fraction of excavated mass lofted into the atmosphere.
const LOFTED_FRACTION: f64 = 0.1;

/// Fraction of impact energy deposited in the atmosphere.
const ATMOSPHERIC_ENERGY_FRACTION: f64 = 0.05;

/// Dust settling e-folding time (hours).
const SETTLING_HOURS: f64 = 72.0;

/// Mixing layer depth for the dust cloud (m).
const MIXING_DEPTH_M: f64 = 10_000.0;

/// The dust cloud spreads this many times beyond the ejecta radius.
const CLOUD_SPREAD_FACTOR: f64 = 4.0;

/// Peak surface cooling saturates here (°C).
const MAX_COOLING_C: f64 = 20.0;

/// One timeline step of the atmospheric evolution.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AtmosphericTimelineEntry {
    pub time_hours: f64,
    /// Airborne dust concentration in the affected disc (kg/m³)
    pub dust_concentration_kg_m3: f64,
    /// Fraction of the lofted dust still airborne
    pub airborne_fraction: f64,
    /// Surface temperature change, zero or negative (°C)
    pub temperature_change_c: f64,
    /// Air quality index, clamped to [0, 500]
    pub air_quality_index: f64,
}

/// Atmospheric channel evolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtmosphericEvolution {
    /// Total lofted dust mass (kg)
    pub total_dust_mass_kg: f64,
    /// Energy deposited in the atmosphere (J)
    pub atmospheric_energy_j: f64,
    /// Radius of the affected disc (km)
    pub affected_radius_km: f64,
    pub timeline: Vec<AtmosphericTimelineEntry>,
}

/// Atmospheric state at one location and time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AtmosphericSample {
    /// Airborne dust concentration, zero outside the affected disc (kg/m³)
    pub dust_concentration_kg_m3: f64,
    /// Surface temperature change, zero or negative (°C)
    pub temperature_change_c: f64,
    /// Air quality index, clamped to [0, 500]
    pub air_quality_index: f64,
    /// Location is inside the dust cloud's reach
    pub in_affected_area: bool,
}

fn lofted_dust_mass_kg(scenario: &ImpactScenario) -> f64 {
    scenario.crater_volume_m3 * DEFAULT_TARGET_DENSITY * LOFTED_FRACTION
}

fn affected_radius_km(scenario: &ImpactScenario) -> f64 {
    scenario.ejecta_radius_km * CLOUD_SPREAD_FACTOR
}

/// Initial dust concentration: lofted mass mixed uniformly through the
/// affected disc up to the mixing depth.
fn initial_concentration_kg_m3(scenario: &ImpactScenario) -> f64 {
    let radius_m = affected_radius_km(scenario) * 1000.0;
    let volume_m3 = std::f64::consts::PI * radius_m * radius_m * MIXING_DEPTH_M;
    if volume_m3 > 0.0 {
        lofted_dust_mass_kg(scenario) / volume_m3
    } else {
        0.0
    }
}

fn airborne_fraction(time_hours: f64) -> f64 {
    (-time_hours / SETTLING_HOURS).exp()
}

fn cooling_c(scenario: &ImpactScenario, fraction: f64) -> f64 {
    // Cooling scales with the lofted mass, saturating for basin-forming
    // events, and fades as the dust settles
    let peak = (lofted_dust_mass_kg(scenario) / 1e12).min(MAX_COOLING_C);
    -peak * fraction
}

fn air_quality_index(concentration_kg_m3: f64) -> f64 {
    // AQI tracks particulate load; concentration in µg/m³ maps onto the
    // 0-500 scale directly and saturates at hazardous
    (concentration_kg_m3 * 1e9).clamp(0.0, 500.0)
}

pub(super) fn temporal_evolution(
    scenario: &ImpactScenario,
    time_hours: &[f64],
) -> AtmosphericEvolution {
    let c0 = initial_concentration_kg_m3(scenario);
    let timeline = time_hours
        .iter()
        .map(|t| {
            let fraction = airborne_fraction(*t);
            let concentration = c0 * fraction;
            AtmosphericTimelineEntry {
                time_hours: *t,
                dust_concentration_kg_m3: concentration,
                airborne_fraction: fraction,
                temperature_change_c: cooling_c(scenario, fraction),
                air_quality_index: air_quality_index(concentration),
            }
        })
        .collect();

    AtmosphericEvolution {
        total_dust_mass_kg: lofted_dust_mass_kg(scenario),
        atmospheric_energy_j: scenario.effective_energy_j * ATMOSPHERIC_ENERGY_FRACTION,
        affected_radius_km: affected_radius_km(scenario),
        timeline,
    }
}

pub(super) fn sample_at(
    scenario: &ImpactScenario,
    distance_km: f64,
    time_hours: f64,
) -> AtmosphericSample {
    let in_affected_area = distance_km <= affected_radius_km(scenario);
    if !in_affected_area {
        return AtmosphericSample {
            dust_concentration_kg_m3: 0.0,
            temperature_change_c: 0.0,
            air_quality_index: 0.0,
            in_affected_area: false,
        };
    }

    let fraction = airborne_fraction(time_hours);
    let concentration = initial_concentration_kg_m3(scenario) * fraction;
    AtmosphericSample {
        dust_concentration_kg_m3: concentration,
        temperature_change_c: cooling_c(scenario, fraction),
        air_quality_index: air_quality_index(concentration),
        in_affected_area: true,
    }
}
