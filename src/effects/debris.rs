//! Debris channel: ballistic ejecta fallout.
//!
//! Ejecta mass comes from the excavated crater volume. Fallout is intense
//! immediately after impact and settles out within an hour or two; nothing
//! lands beyond the continuous ejecta blanket.

use serde::{Deserialize, Serialize};

use super::ImpactScenario;
use crate::types::DEFAULT_TARGET_DENSITY;

/// Fallout decay e-folding time (hours).
const FALLOUT_DECAY_HOURS: f64 = 0.3;

/// One timeline step of the debris fallout.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DebrisTimelineEntry {
    pub time_hours: f64,
    /// Fallout intensity as a fraction of the initial rate, in [0, 1]
    pub debris_intensity: f64,
    /// Fraction of the ejecta already on the ground
    pub settled_fraction: f64,
}

/// Debris channel evolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DebrisEvolution {
    /// Total ejected mass (kg)
    pub total_debris_mass_kg: f64,
    /// Continuous ejecta blanket radius (km)
    pub ejecta_radius_km: f64,
    pub timeline: Vec<DebrisTimelineEntry>,
}

/// Debris state at one location and time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DebrisSample {
    /// Local fallout intensity, zero outside the ejecta blanket
    pub debris_intensity: f64,
    /// Location is inside the continuous ejecta blanket
    pub in_ejecta_zone: bool,
    /// Continuous ejecta blanket radius (km)
    pub ejecta_radius_km: f64,
}

fn fallout_intensity(time_hours: f64) -> f64 {
    (-time_hours / FALLOUT_DECAY_HOURS).exp()
}

pub(super) fn temporal_evolution(scenario: &ImpactScenario, time_hours: &[f64]) -> DebrisEvolution {
    let timeline = time_hours
        .iter()
        .map(|t| {
            let intensity = fallout_intensity(*t);
            DebrisTimelineEntry {
                time_hours: *t,
                debris_intensity: intensity,
                settled_fraction: 1.0 - intensity,
            }
        })
        .collect();

    DebrisEvolution {
        total_debris_mass_kg: scenario.crater_volume_m3 * DEFAULT_TARGET_DENSITY,
        ejecta_radius_km: scenario.ejecta_radius_km,
        timeline,
    }
}

pub(super) fn sample_at(
    scenario: &ImpactScenario,
    distance_km: f64,
    time_hours: f64,
) -> DebrisSample {
    let radius_km = scenario.ejecta_radius_km;
    let in_ejecta_zone = radius_km > 0.0 && distance_km <= radius_km;
    let debris_intensity = if in_ejecta_zone {
        // Thins linearly from the rim of the crater out to the blanket edge
        fallout_intensity(time_hours) * (1.0 - distance_km / radius_km)
    } else {
        0.0
    };

    DebrisSample {
        debris_intensity,
        in_ejecta_zone,
        ejecta_radius_km: radius_km,
    }
}
