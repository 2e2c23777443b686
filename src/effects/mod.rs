//! Post-impact environmental effect fields.
//!
//! Five channels (seismic, atmospheric, thermal, debris, infrastructure),
//! each modeled as a field over time and location around the impact point.
//! The processor drives them two ways: a temporal evolution over a sampled
//! time grid, and a point query at one time and location. Point queries
//! beyond every effect radius return zero-level samples, never an error.

pub mod atmospheric;
pub mod debris;
pub mod infrastructure;
pub mod seismic;
pub mod thermal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::ImpactAnalysis;
use crate::error::PhysicsError;
use crate::types::Coordinates;

pub use atmospheric::{AtmosphericEvolution, AtmosphericSample};
pub use debris::{DebrisEvolution, DebrisSample};
pub use infrastructure::{DamageLevel, InfrastructureEvolution, InfrastructureSample};
pub use seismic::{SeismicEvolution, SeismicSample};
pub use thermal::{ThermalEvolution, ThermalSample};

/// The five environmental effect channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Seismic,
    Atmospheric,
    Thermal,
    Debris,
    Infrastructure,
}

impl EffectType {
    /// All channels, the default selection.
    pub const ALL: [EffectType; 5] = [
        EffectType::Seismic,
        EffectType::Atmospheric,
        EffectType::Thermal,
        EffectType::Debris,
        EffectType::Infrastructure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::Seismic => "seismic",
            EffectType::Atmospheric => "atmospheric",
            EffectType::Thermal => "thermal",
            EffectType::Debris => "debris",
            EffectType::Infrastructure => "infrastructure",
        }
    }
}

/// Everything the effect channels need to know about one impact.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImpactScenario {
    /// Ground-coupled impact energy (J)
    pub effective_energy_j: f64,
    /// Excavated crater volume (m³)
    pub crater_volume_m3: f64,
    /// Continuous ejecta blanket radius (km)
    pub ejecta_radius_km: f64,
    /// 1 psi overpressure radius (km)
    pub overpressure_1psi_km: f64,
    /// 5 psi overpressure radius (km)
    pub overpressure_5psi_km: f64,
    /// 20 psi overpressure radius (km)
    pub overpressure_20psi_km: f64,
    /// Ground zero
    pub location: Coordinates,
}

impl ImpactScenario {
    /// Build a scenario from a completed impact analysis and a surface
    /// impact point.
    pub fn from_analysis(analysis: &ImpactAnalysis, location: Coordinates) -> Self {
        Self {
            effective_energy_j: analysis.energy.effective_energy_j,
            crater_volume_m3: analysis.crater.volume_m3,
            ejecta_radius_km: analysis.crater.ejecta_radius_km,
            overpressure_1psi_km: analysis.effects.overpressure_1psi_km,
            overpressure_5psi_km: analysis.effects.overpressure_5psi_km,
            overpressure_20psi_km: analysis.effects.overpressure_20psi_km,
            location,
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        self.location.validate()?;
        if self.effective_energy_j < 0.0
            || self.crater_volume_m3 < 0.0
            || self.ejecta_radius_km < 0.0
            || self.overpressure_1psi_km < 0.0
            || self.overpressure_5psi_km < 0.0
            || self.overpressure_20psi_km < 0.0
        {
            return Err(PhysicsError::invalid_input(
                "scenario energies, volumes, and radii must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Per-channel temporal evolutions over one shared time grid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemporalEffects {
    /// Sample times since impact (hours)
    pub time_hours: Vec<f64>,
    /// Ground zero, echoed for consumers
    pub impact_location: Coordinates,
    pub seismic: Option<SeismicEvolution>,
    pub atmospheric: Option<AtmosphericEvolution>,
    pub thermal: Option<ThermalEvolution>,
    pub debris: Option<DebrisEvolution>,
    pub infrastructure: Option<InfrastructureEvolution>,
}

/// Per-channel samples at one time and location.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PointEffects {
    pub time_hours: f64,
    pub location: Coordinates,
    /// Great-circle distance from ground zero (km)
    pub distance_km: f64,
    pub seismic: Option<SeismicSample>,
    pub atmospheric: Option<AtmosphericSample>,
    pub thermal: Option<ThermalSample>,
    pub debris: Option<DebrisSample>,
    pub infrastructure: Option<InfrastructureSample>,
}

/// Build the sample grid `t_i = start + i·resolution` for `t_i < end`.
///
/// Half-open on the right: a (0, 24) range at 1 h resolution yields 24
/// samples ending at 23.0.
fn time_grid(start_hours: f64, end_hours: f64, resolution_hours: f64) -> Vec<f64> {
    let n = ((end_hours - start_hours) / resolution_hours).ceil() as usize;
    (0..n).map(|i| start_hours + i as f64 * resolution_hours).collect()
}

/// Evolve the selected channels over a sampled time range.
///
/// `channels` of `None` selects all five. The time range is hours since
/// impact, half-open `[start, end)`, sampled every `resolution_hours`.
pub fn calculate_temporal_effects(
    scenario: &ImpactScenario,
    time_range_hours: (f64, f64),
    resolution_hours: f64,
    channels: Option<&[EffectType]>,
) -> Result<TemporalEffects, PhysicsError> {
    scenario.validate()?;
    let (start, end) = time_range_hours;
    if start < 0.0 || start >= end {
        return Err(PhysicsError::invalid_input(
            "time range must satisfy 0 <= start < end",
        ));
    }
    if !(resolution_hours > 0.0) {
        return Err(PhysicsError::invalid_input(
            "time resolution must be positive",
        ));
    }

    let channels = channels.unwrap_or(&EffectType::ALL);
    let time_hours = time_grid(start, end, resolution_hours);
    debug!(
        samples = time_hours.len(),
        channels = channels.len(),
        "evolving environmental effects"
    );

    let selected = |t: EffectType| channels.contains(&t);
    Ok(TemporalEffects {
        seismic: selected(EffectType::Seismic)
            .then(|| seismic::temporal_evolution(scenario, &time_hours)),
        atmospheric: selected(EffectType::Atmospheric)
            .then(|| atmospheric::temporal_evolution(scenario, &time_hours)),
        thermal: selected(EffectType::Thermal)
            .then(|| thermal::temporal_evolution(scenario, &time_hours)),
        debris: selected(EffectType::Debris)
            .then(|| debris::temporal_evolution(scenario, &time_hours)),
        infrastructure: selected(EffectType::Infrastructure)
            .then(|| infrastructure::temporal_evolution(scenario, &time_hours)),
        time_hours,
        impact_location: scenario.location,
    })
}

/// Sample the selected channels at one time and location.
pub fn get_effect_at_time(
    scenario: &ImpactScenario,
    time_hours: f64,
    location: Coordinates,
    channels: Option<&[EffectType]>,
) -> Result<PointEffects, PhysicsError> {
    scenario.validate()?;
    location.validate()?;
    if time_hours < 0.0 {
        return Err(PhysicsError::invalid_input(
            "query time must be non-negative",
        ));
    }

    let channels = channels.unwrap_or(&EffectType::ALL);
    let distance_km = crate::types::haversine_distance_km(scenario.location, location);

    let selected = |t: EffectType| channels.contains(&t);
    Ok(PointEffects {
        time_hours,
        location,
        distance_km,
        seismic: selected(EffectType::Seismic)
            .then(|| seismic::sample_at(scenario, distance_km, time_hours)),
        atmospheric: selected(EffectType::Atmospheric)
            .then(|| atmospheric::sample_at(scenario, distance_km, time_hours)),
        thermal: selected(EffectType::Thermal)
            .then(|| thermal::sample_at(scenario, distance_km, time_hours)),
        debris: selected(EffectType::Debris)
            .then(|| debris::sample_at(scenario, distance_km, time_hours)),
        infrastructure: selected(EffectType::Infrastructure)
            .then(|| infrastructure::sample_at(scenario, distance_km, time_hours)),
    })
}

#[cfg(test)]
pub(crate) fn test_scenario() -> ImpactScenario {
    ImpactScenario {
        effective_energy_j: 1e15,
        crater_volume_m3: 1e9,
        ejecta_radius_km: 50.0,
        overpressure_1psi_km: 100.0,
        overpressure_5psi_km: 50.0,
        overpressure_20psi_km: 20.0,
        location: Coordinates::new(40.0, -74.0),
    }
}
