//! Impact energy model.
//!
//! Converts the surviving mass, velocity, and impact angle into total
//! kinetic energy and the angle-corrected effective energy coupled into
//! the ground. A vertical (90°) impact couples everything; grazing impacts
//! deliver most of their energy tangentially.

use serde::{Deserialize, Serialize};

use crate::types::{joules_to_tnt_kt, joules_to_tnt_mt, kinetic_energy_j};

/// Impact energy in Joules and TNT-equivalent units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImpactEnergyResult {
    /// Total kinetic energy 0.5·m·v² (J)
    pub total_energy_j: f64,
    /// Ground-coupled energy, total × sin²(angle) (J)
    pub effective_energy_j: f64,
    /// Total energy in kilotons of TNT
    pub total_energy_tnt_kt: f64,
    /// Effective energy in kilotons of TNT
    pub effective_energy_tnt_kt: f64,
    /// Total energy in megatons of TNT
    pub total_energy_tnt_mt: f64,
    /// Effective energy in megatons of TNT
    pub effective_energy_tnt_mt: f64,
}

/// Compute impact energy for a given mass, velocity, and impact angle
/// (degrees from horizontal).
///
/// Invariant: `0 <= effective_energy_j <= total_energy_j`, with equality
/// only at a vertical 90° impact.
pub fn impact_energy(mass_kg: f64, velocity_ms: f64, angle_deg: f64) -> ImpactEnergyResult {
    let total_energy_j = kinetic_energy_j(mass_kg, velocity_ms);
    let sin_angle = angle_deg.to_radians().sin();
    let effective_energy_j = total_energy_j * sin_angle * sin_angle;

    ImpactEnergyResult {
        total_energy_j,
        effective_energy_j,
        total_energy_tnt_kt: joules_to_tnt_kt(total_energy_j),
        effective_energy_tnt_kt: joules_to_tnt_kt(effective_energy_j),
        total_energy_tnt_mt: joules_to_tnt_mt(total_energy_j),
        effective_energy_tnt_mt: joules_to_tnt_mt(effective_energy_j),
    }
}
