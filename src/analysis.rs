//! End-to-end impact analysis.
//!
//! Composes the individual models into one pass: atmospheric entry
//! (optional), ground-coupled energy, crater scaling, and effect radii.
//! This is the main ground-impact entry point for consumers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blast::{blast_effect_radii, BlastEffectRadii};
use crate::crater::{crater_geometry, CraterGeometry, TargetProperties};
use crate::energy::{impact_energy, ImpactEnergyResult};
use crate::entry::{atmospheric_entry, AtmosphericEntryResult};
use crate::error::PhysicsError;
use crate::types::AsteroidParameters;

/// Complete impact analysis for one asteroid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    /// Input parameters, echoed for consumers
    pub parameters: AsteroidParameters,
    /// Mass at the top of the atmosphere (kg)
    pub initial_mass_kg: f64,
    /// Atmospheric passage results, absent when entry modeling is disabled
    pub atmospheric_entry: Option<AtmosphericEntryResult>,
    /// Energy delivered at the surface
    pub energy: ImpactEnergyResult,
    /// Predicted crater
    pub crater: CraterGeometry,
    /// Blast, thermal, and seismic effect radii
    pub effects: BlastEffectRadii,
}

/// Run the full entry→energy→crater→effects pipeline.
///
/// When `include_atmospheric_entry` is set, the surviving mass and velocity
/// feed the energy model; otherwise the body impacts with its undiminished
/// entry state. Crater and effect radii always use the angle-corrected
/// effective energy.
pub fn complete_impact_analysis(
    params: &AsteroidParameters,
    target: TargetProperties,
    include_atmospheric_entry: bool,
) -> Result<ImpactAnalysis, PhysicsError> {
    params.validate()?;

    let initial_mass_kg = params.mass_kg();

    let entry = include_atmospheric_entry.then(|| atmospheric_entry(params));
    let (mass_kg, velocity_ms) = match &entry {
        Some(e) => (e.surviving_mass_kg, e.final_velocity_ms),
        None => (initial_mass_kg, params.velocity_ms),
    };

    let energy = impact_energy(mass_kg, velocity_ms, params.impact_angle_deg);
    let crater = crater_geometry(energy.effective_energy_j, target);
    let effects = blast_effect_radii(energy.effective_energy_j);

    debug!(
        diameter_m = params.diameter_m,
        effective_mt = energy.effective_energy_tnt_mt,
        crater_km = crater.diameter_km,
        "impact analysis complete"
    );

    Ok(ImpactAnalysis {
        parameters: *params,
        initial_mass_kg,
        atmospheric_entry: entry,
        energy,
        crater,
        effects,
    })
}
