//! Thermal channel: the radiative pulse from the fireball.
//!
//! 35% of the ground-coupled energy radiates as heat. The pulse is
//! front-loaded: it peaks at impact and is effectively gone within an
//! hour. Inside the thermal radius the surface temperature rises above
//! ambient, falling off linearly toward the edge.

use serde::{Deserialize, Serialize};

use super::ImpactScenario;
use crate::blast::blast_effect_radii;

/// Fraction of impact energy radiated thermally.
const THERMAL_ENERGY_FRACTION: f64 = 0.35;

/// Pulse decay e-folding time (hours).
const PULSE_DECAY_HOURS: f64 = 0.5;

/// Ambient surface temperature (K).
const AMBIENT_TEMPERATURE_K: f64 = 300.0;

/// Peak temperature rise at ground zero at the moment of impact (K).
const PEAK_TEMPERATURE_RISE_K: f64 = 1500.0;

/// One timeline step of the thermal pulse.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ThermalTimelineEntry {
    pub time_hours: f64,
    /// Remaining pulse intensity as a fraction of the peak, in [0, 1]
    pub intensity_fraction: f64,
}

/// Thermal channel evolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThermalEvolution {
    /// Energy radiated as heat (J)
    pub thermal_energy_j: f64,
    /// Third-degree-burn radius (km)
    pub thermal_radius_km: f64,
    pub timeline: Vec<ThermalTimelineEntry>,
}

/// Thermal state at one location and time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ThermalSample {
    /// Local pulse intensity in [0, 1], zero outside the thermal radius
    pub intensity: f64,
    /// Surface temperature, never below ambient (K)
    pub temperature_k: f64,
    /// Third-degree-burn radius (km)
    pub thermal_radius_km: f64,
}

fn pulse_fraction(time_hours: f64) -> f64 {
    (-time_hours / PULSE_DECAY_HOURS).exp()
}

fn thermal_radius_km(scenario: &ImpactScenario) -> f64 {
    blast_effect_radii(scenario.effective_energy_j).thermal_radius_km
}

pub(super) fn temporal_evolution(scenario: &ImpactScenario, time_hours: &[f64]) -> ThermalEvolution {
    let timeline = time_hours
        .iter()
        .map(|t| ThermalTimelineEntry {
            time_hours: *t,
            intensity_fraction: pulse_fraction(*t),
        })
        .collect();

    ThermalEvolution {
        thermal_energy_j: scenario.effective_energy_j * THERMAL_ENERGY_FRACTION,
        thermal_radius_km: thermal_radius_km(scenario),
        timeline,
    }
}

pub(super) fn sample_at(
    scenario: &ImpactScenario,
    distance_km: f64,
    time_hours: f64,
) -> ThermalSample {
    let radius_km = thermal_radius_km(scenario);
    let intensity = if radius_km > 0.0 && distance_km <= radius_km {
        pulse_fraction(time_hours) * (1.0 - distance_km / radius_km)
    } else {
        0.0
    };

    ThermalSample {
        intensity,
        temperature_k: AMBIENT_TEMPERATURE_K + intensity * PEAK_TEMPERATURE_RISE_K,
        thermal_radius_km: radius_km,
    }
}
