//! Individual deflection mission models.
//!
//! Three ways to push an asteroid: hit it (kinetic impactor), pull it
//! (gravity tractor), or blast it (nuclear device). Each model reduces a
//! mission design to the velocity change imparted on the asteroid plus the
//! engineering quantities a planner cares about.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::types::{joules_to_tnt_kg, G, SECONDS_PER_YEAR, TNT_J_PER_KT};

/// Reference impactor: a one-ton spacecraft at 10 km/s relative velocity.
pub const TYPICAL_IMPACTOR_MASS_KG: f64 = 1000.0;
pub const TYPICAL_IMPACTOR_VELOCITY_MS: f64 = 10_000.0;

/// Fraction of a tractor mission spent thrusting.
pub const THRUST_EFFICIENCY_DEFAULT: f64 = 0.8;

/// Ion engine specific impulse for station keeping (s).
const ION_SPECIFIC_IMPULSE_S: f64 = 3000.0;
const STANDARD_GRAVITY: f64 = 9.81;

/// Momentum enhancement from ejecta for nuclear detonations.
const NUCLEAR_STANDOFF_ENHANCEMENT: f64 = 10.0;
const NUCLEAR_SUBSURFACE_ENHANCEMENT: f64 = 20.0;

/// Energy coupling for a buried charge.
const SUBSURFACE_COUPLING: f64 = 0.5;

/// Base coupling applied on top of the geometric view factor for standoff.
const STANDOFF_BASE_COUPLING: f64 = 0.1;

/// Fraction of the asteroid mass accelerated as ejecta.
const EJECTA_FRACTION: f64 = 0.1;

/// Kinetic impactor mission results.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KineticImpactorResult {
    pub impactor_mass_kg: f64,
    pub impactor_velocity_ms: f64,
    /// Velocity component along the push direction (m/s)
    pub effective_velocity_ms: f64,
    pub impact_angle_deg: f64,
    /// β, momentum multiplication from ejecta
    pub momentum_enhancement: f64,
    pub momentum_transfer_kg_ms: f64,
    /// Velocity change imparted on the asteroid (m/s)
    pub delta_v_ms: f64,
    /// Velocity change in mm/s, the usual reporting unit
    pub delta_v_mm_s: f64,
    pub impactor_energy_j: f64,
    pub impactor_energy_tnt_kg: f64,
    pub mass_ratio: f64,
    /// Achieved Δv relative to the energy-limited ideal
    pub energy_efficiency: f64,
}

/// Gravity tractor mission results.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GravityTractorResult {
    pub tractor_mass_kg: f64,
    pub orbital_distance_m: f64,
    pub mission_duration_years: f64,
    /// Duration actually spent pulling (s)
    pub effective_duration_s: f64,
    pub gravitational_force_n: f64,
    pub acceleration_ms2: f64,
    pub delta_v_ms: f64,
    pub delta_v_mm_s: f64,
    /// Drift accumulated during the pull itself (m)
    pub deflection_distance_m: f64,
    /// Thrust to hold position against the asteroid's pull (N)
    pub required_thrust_n: f64,
    /// Station-keeping propellant at ion-engine Isp (kg)
    pub propellant_mass_kg: f64,
    pub propellant_fraction: f64,
    pub thrust_efficiency: f64,
}

/// Where the nuclear device goes off.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum DetonationMode {
    /// Detonation at a distance from the surface
    Standoff { distance_m: f64 },
    /// Buried charge
    Subsurface { depth_m: f64 },
}

/// Nuclear deflection mission results.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NuclearDeflectionResult {
    pub nuclear_yield_kt: f64,
    pub nuclear_energy_j: f64,
    pub mode: DetonationMode,
    pub momentum_enhancement: f64,
    /// Fraction of device energy coupled into the asteroid
    pub coupling_efficiency: f64,
    pub transferred_energy_j: f64,
    pub ejecta_mass_kg: f64,
    pub ejecta_velocity_ms: f64,
    pub delta_v_ms: f64,
    pub delta_v_mm_s: f64,
    /// Direct impulse estimate `sqrt(2·M·E)` (N·s)
    pub impulse_ns: f64,
}

/// Model a kinetic impactor strike.
///
/// Momentum transfer scales with the velocity component along the push
/// direction (`cos` of the impact angle) and the β enhancement from
/// crater ejecta.
pub fn kinetic_impactor_mission(
    asteroid_mass_kg: f64,
    impactor_mass_kg: f64,
    impactor_velocity_ms: f64,
    impact_angle_deg: f64,
    momentum_enhancement: f64,
) -> Result<KineticImpactorResult, PhysicsError> {
    if !(asteroid_mass_kg > 0.0) || !(impactor_mass_kg > 0.0) || !(impactor_velocity_ms > 0.0) {
        return Err(PhysicsError::invalid_input(
            "asteroid mass, impactor mass, and velocity must be positive",
        ));
    }
    if !(momentum_enhancement >= 1.0) {
        return Err(PhysicsError::invalid_input(
            "momentum enhancement factor must be at least 1",
        ));
    }

    let effective_velocity_ms = impactor_velocity_ms * impact_angle_deg.to_radians().cos();
    let momentum_transfer = impactor_mass_kg * effective_velocity_ms * momentum_enhancement;
    let delta_v_ms = momentum_transfer / asteroid_mass_kg;
    let impactor_energy_j = 0.5 * impactor_mass_kg * impactor_velocity_ms * impactor_velocity_ms;

    Ok(KineticImpactorResult {
        impactor_mass_kg,
        impactor_velocity_ms,
        effective_velocity_ms,
        impact_angle_deg,
        momentum_enhancement,
        momentum_transfer_kg_ms: momentum_transfer,
        delta_v_ms,
        delta_v_mm_s: delta_v_ms * 1000.0,
        impactor_energy_j,
        impactor_energy_tnt_kg: joules_to_tnt_kg(impactor_energy_j),
        mass_ratio: impactor_mass_kg / asteroid_mass_kg,
        energy_efficiency: delta_v_ms / (2.0 * impactor_energy_j / asteroid_mass_kg).sqrt(),
    })
}

/// Model a gravity tractor hovering near the asteroid.
///
/// The spacecraft's own gravity tugs the asteroid at a constant (tiny)
/// acceleration for the thrusting part of the mission.
pub fn gravity_tractor_mission(
    asteroid_mass_kg: f64,
    tractor_mass_kg: f64,
    orbital_distance_m: f64,
    mission_duration_years: f64,
    thrust_efficiency: f64,
) -> Result<GravityTractorResult, PhysicsError> {
    if !(asteroid_mass_kg > 0.0) || !(tractor_mass_kg > 0.0) {
        return Err(PhysicsError::invalid_input("masses must be positive"));
    }
    if !(orbital_distance_m > 0.0) || !(mission_duration_years > 0.0) {
        return Err(PhysicsError::invalid_input(
            "orbital distance and mission duration must be positive",
        ));
    }
    if !(0.0 < thrust_efficiency && thrust_efficiency <= 1.0) {
        return Err(PhysicsError::invalid_input(
            "thrust efficiency must be in (0, 1]",
        ));
    }

    let gravitational_force_n =
        G * tractor_mass_kg * asteroid_mass_kg / (orbital_distance_m * orbital_distance_m);
    let acceleration_ms2 = gravitational_force_n / asteroid_mass_kg;

    let effective_duration_s = mission_duration_years * SECONDS_PER_YEAR * thrust_efficiency;
    let delta_v_ms = acceleration_ms2 * effective_duration_s;
    let deflection_distance_m = 0.5 * acceleration_ms2 * effective_duration_s * effective_duration_s;

    let exhaust_velocity_ms = ION_SPECIFIC_IMPULSE_S * STANDARD_GRAVITY;
    let mass_flow_rate = gravitational_force_n / exhaust_velocity_ms;
    let propellant_mass_kg = mass_flow_rate * effective_duration_s;

    Ok(GravityTractorResult {
        tractor_mass_kg,
        orbital_distance_m,
        mission_duration_years,
        effective_duration_s,
        gravitational_force_n,
        acceleration_ms2,
        delta_v_ms,
        delta_v_mm_s: delta_v_ms * 1000.0,
        deflection_distance_m,
        required_thrust_n: gravitational_force_n,
        propellant_mass_kg,
        propellant_fraction: propellant_mass_kg / tractor_mass_kg,
        thrust_efficiency,
    })
}

/// Model a nuclear deflection detonation.
///
/// `mode` of `None` defaults to a standoff burst at one asteroid radius.
/// A buried charge couples half its energy; a standoff burst couples its
/// geometric view factor times a 10% base. The final Δv is the more
/// conservative of the ejecta-momentum and direct-impulse estimates.
pub fn nuclear_deflection(
    asteroid_mass_kg: f64,
    asteroid_diameter_m: f64,
    nuclear_yield_kt: f64,
    mode: Option<DetonationMode>,
) -> Result<NuclearDeflectionResult, PhysicsError> {
    if !(asteroid_mass_kg > 0.0) || !(asteroid_diameter_m > 0.0) {
        return Err(PhysicsError::invalid_input(
            "asteroid mass and diameter must be positive",
        ));
    }
    if !(nuclear_yield_kt > 0.0) {
        return Err(PhysicsError::invalid_input("yield must be positive"));
    }

    let mode = mode.unwrap_or(DetonationMode::Standoff {
        distance_m: asteroid_diameter_m / 2.0,
    });
    let nuclear_energy_j = nuclear_yield_kt * TNT_J_PER_KT;

    let (momentum_enhancement, coupling_efficiency) = match mode {
        DetonationMode::Subsurface { depth_m } => {
            if !(depth_m > 0.0) {
                return Err(PhysicsError::invalid_input("burial depth must be positive"));
            }
            (NUCLEAR_SUBSURFACE_ENHANCEMENT, SUBSURFACE_COUPLING)
        }
        DetonationMode::Standoff { distance_m } => {
            if !(distance_m > 0.0) {
                return Err(PhysicsError::invalid_input(
                    "standoff distance must be positive",
                ));
            }
            // View factor: asteroid cross-section over the full sphere at
            // the detonation distance
            let radius = asteroid_diameter_m / 2.0;
            let cross_section = std::f64::consts::PI * radius * radius;
            let sphere_area = 4.0 * std::f64::consts::PI * distance_m * distance_m;
            (
                NUCLEAR_STANDOFF_ENHANCEMENT,
                (cross_section / sphere_area) * STANDOFF_BASE_COUPLING,
            )
        }
    };

    let transferred_energy_j = nuclear_energy_j * coupling_efficiency;
    let ejecta_mass_kg = asteroid_mass_kg * EJECTA_FRACTION;
    let ejecta_velocity_ms = (2.0 * transferred_energy_j / ejecta_mass_kg).sqrt();

    // Two estimates: momentum carried by ejecta (with enhancement), and a
    // direct explosive impulse. Take the conservative one.
    let delta_v_ejecta =
        ejecta_mass_kg * ejecta_velocity_ms / asteroid_mass_kg * momentum_enhancement;
    let impulse_ns = (2.0 * asteroid_mass_kg * transferred_energy_j).sqrt();
    let delta_v_impulse = impulse_ns / asteroid_mass_kg;
    let delta_v_ms = delta_v_ejecta.min(delta_v_impulse);

    Ok(NuclearDeflectionResult {
        nuclear_yield_kt,
        nuclear_energy_j,
        mode,
        momentum_enhancement,
        coupling_efficiency,
        transferred_energy_j,
        ejecta_mass_kg,
        ejecta_velocity_ms,
        delta_v_ms,
        delta_v_mm_s: delta_v_ms * 1000.0,
        impulse_ns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Bennu-class asteroid, ~7e10 kg
    const ASTEROID_MASS_KG: f64 = 7e10;
    const ASTEROID_DIAMETER_M: f64 = 500.0;

    #[test]
    fn test_kinetic_impactor_head_on() {
        let result = kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 0.0, 1.0)
            .expect("valid mission");
        // Δv = m·v/M = 1e7 / 7e10
        assert_relative_eq!(result.delta_v_ms, 1e7 / 7e10, max_relative = 1e-12);
        assert_relative_eq!(result.effective_velocity_ms, 10000.0);
    }

    #[test]
    fn test_beta_scales_delta_v() {
        let plain = kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 0.0, 1.0)
            .expect("valid mission");
        let enhanced = kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 0.0, 3.0)
            .expect("valid mission");
        assert_relative_eq!(enhanced.delta_v_ms, plain.delta_v_ms * 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_oblique_impact_loses_momentum() {
        let head_on = kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 0.0, 2.0)
            .expect("valid mission");
        let oblique = kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 60.0, 2.0)
            .expect("valid mission");
        assert_relative_eq!(oblique.delta_v_ms, head_on.delta_v_ms * 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_kinetic_validation() {
        assert!(kinetic_impactor_mission(0.0, 1000.0, 10000.0, 0.0, 2.0).is_err());
        assert!(kinetic_impactor_mission(ASTEROID_MASS_KG, 1000.0, 10000.0, 0.0, 0.5).is_err());
    }

    #[test]
    fn test_gravity_tractor_tiny_but_steady() {
        let result =
            gravity_tractor_mission(ASTEROID_MASS_KG, 2000.0, 100.0, 5.0, THRUST_EFFICIENCY_DEFAULT)
                .expect("valid mission");

        // F = G·m·M/d² = 6.674e-11 · 2000 · 7e10 / 1e4
        assert_relative_eq!(
            result.gravitational_force_n,
            G * 2000.0 * 7e10 / 1e4,
            max_relative = 1e-12
        );
        // Years of pulling yield mm/s-scale delta-v
        assert!(result.delta_v_ms > 0.0);
        assert!(result.delta_v_ms < 1.0);
        assert!(result.propellant_mass_kg > 0.0);
        assert_relative_eq!(
            result.effective_duration_s,
            5.0 * SECONDS_PER_YEAR * 0.8
        );
    }

    #[test]
    fn test_longer_tractor_mission_more_delta_v() {
        let short = gravity_tractor_mission(ASTEROID_MASS_KG, 2000.0, 100.0, 1.0, 0.8)
            .expect("valid mission");
        let long = gravity_tractor_mission(ASTEROID_MASS_KG, 2000.0, 100.0, 10.0, 0.8)
            .expect("valid mission");
        assert_relative_eq!(long.delta_v_ms, short.delta_v_ms * 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tractor_validation() {
        assert!(gravity_tractor_mission(ASTEROID_MASS_KG, 2000.0, 0.0, 5.0, 0.8).is_err());
        assert!(gravity_tractor_mission(ASTEROID_MASS_KG, 2000.0, 100.0, 5.0, 1.5).is_err());
    }

    #[test]
    fn test_nuclear_default_standoff_at_one_radius() {
        let result = nuclear_deflection(ASTEROID_MASS_KG, ASTEROID_DIAMETER_M, 100.0, None)
            .expect("valid mission");
        match result.mode {
            DetonationMode::Standoff { distance_m } => {
                assert_relative_eq!(distance_m, ASTEROID_DIAMETER_M / 2.0);
            }
            DetonationMode::Subsurface { .. } => panic!("default must be standoff"),
        }
        // At one radius the view factor is 1/16, times the 10% base
        assert_relative_eq!(result.coupling_efficiency, 0.1 / 16.0, max_relative = 1e-12);
        assert!(result.delta_v_ms > 0.0);
    }

    #[test]
    fn test_subsurface_beats_standoff() {
        let standoff = nuclear_deflection(ASTEROID_MASS_KG, ASTEROID_DIAMETER_M, 100.0, None)
            .expect("valid mission");
        let buried = nuclear_deflection(
            ASTEROID_MASS_KG,
            ASTEROID_DIAMETER_M,
            100.0,
            Some(DetonationMode::Subsurface { depth_m: 10.0 }),
        )
        .expect("valid mission");

        assert_relative_eq!(buried.coupling_efficiency, 0.5);
        assert!(buried.delta_v_ms > standoff.delta_v_ms);
    }

    #[test]
    fn test_nuclear_conservative_estimate_wins() {
        let result = nuclear_deflection(ASTEROID_MASS_KG, ASTEROID_DIAMETER_M, 100.0, None)
            .expect("valid mission");
        let delta_v_impulse = result.impulse_ns / ASTEROID_MASS_KG;
        assert!(result.delta_v_ms <= delta_v_impulse + 1e-12);
    }

    #[test]
    fn test_nuclear_validation() {
        assert!(nuclear_deflection(ASTEROID_MASS_KG, ASTEROID_DIAMETER_M, 0.0, None).is_err());
        assert!(nuclear_deflection(
            ASTEROID_MASS_KG,
            ASTEROID_DIAMETER_M,
            100.0,
            Some(DetonationMode::Subsurface { depth_m: -1.0 })
        )
        .is_err());
    }
}
