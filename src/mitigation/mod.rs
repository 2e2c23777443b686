//! Deflection strategy analysis and comparison.
//!
//! Converts mission Δv into a deflection distance at the predicted impact
//! epoch, and ranks candidate missions against one asteroid threat. Earlier
//! is better: the same Δv applied a decade out moves the impact point by
//! Earth radii, applied a month out it moves it by kilometers.

pub mod missions;

pub use missions::{
    gravity_tractor_mission, kinetic_impactor_mission, nuclear_deflection, DetonationMode,
    GravityTractorResult, KineticImpactorResult, NuclearDeflectionResult,
    THRUST_EFFICIENCY_DEFAULT, TYPICAL_IMPACTOR_MASS_KG, TYPICAL_IMPACTOR_VELOCITY_MS,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PhysicsError;
use crate::types::{AU_M, EARTH_RADIUS_M, SECONDS_PER_YEAR};

/// Deflection strategy families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStrategy {
    KineticImpactor,
    GravityTractor,
    NuclearStandoff,
    NuclearSubsurface,
}

impl MitigationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationStrategy::KineticImpactor => "kinetic_impactor",
            MitigationStrategy::GravityTractor => "gravity_tractor",
            MitigationStrategy::NuclearStandoff => "nuclear_standoff",
            MitigationStrategy::NuclearSubsurface => "nuclear_subsurface",
        }
    }
}

/// How far a given Δv moves the impact point, given the warning time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DeflectionTiming {
    pub deflection_delta_v_ms: f64,
    pub time_to_impact_years: f64,
    pub orbital_period_years: f64,
    /// Circular-orbit estimate of the asteroid's orbital speed (m/s)
    pub orbital_velocity_ms: f64,
    /// δa/a from the tangential Δv
    pub relative_sma_change: f64,
    /// Deflection at the impact epoch (m)
    pub final_deflection_m: f64,
    pub final_deflection_km: f64,
    /// Deflection in Earth radii, the go/no-go scale
    pub deflection_earth_radii: f64,
}

/// Estimate the deflection distance a tangential Δv accumulates by the
/// impact epoch.
///
/// Two linearized estimates are computed: the along-track drift from the
/// semi-major-axis change, `(3/2)·(δa/a)·a·n·t`, and the naive `Δv·t`.
/// The smaller wins; both are order-of-magnitude tools, not ephemerides.
pub fn deflection_timing_analysis(
    orbital_period_years: f64,
    time_to_impact_years: f64,
    deflection_delta_v_ms: f64,
) -> Result<DeflectionTiming, PhysicsError> {
    if !(orbital_period_years > 0.0) || !(time_to_impact_years > 0.0) {
        return Err(PhysicsError::invalid_input(
            "orbital period and time to impact must be positive",
        ));
    }
    if deflection_delta_v_ms < 0.0 {
        return Err(PhysicsError::invalid_input("delta-v must be non-negative"));
    }

    let period_s = orbital_period_years * SECONDS_PER_YEAR;
    let time_to_impact_s = time_to_impact_years * SECONDS_PER_YEAR;

    let orbital_velocity_ms = 2.0 * std::f64::consts::PI * AU_M / period_s;
    let relative_sma_change = 2.0 * deflection_delta_v_ms / orbital_velocity_ms;

    let mean_motion_rad_s = 2.0 * std::f64::consts::PI / period_s;
    let along_track_m =
        1.5 * relative_sma_change * AU_M * mean_motion_rad_s * time_to_impact_s;
    let linear_m = deflection_delta_v_ms * time_to_impact_s;

    let final_deflection_m = along_track_m.abs().min(linear_m);

    Ok(DeflectionTiming {
        deflection_delta_v_ms,
        time_to_impact_years,
        orbital_period_years,
        orbital_velocity_ms,
        relative_sma_change,
        final_deflection_m,
        final_deflection_km: final_deflection_m / 1000.0,
        deflection_earth_radii: final_deflection_m / EARTH_RADIUS_M,
    })
}

/// The asteroid being deflected.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AsteroidThreat {
    pub mass_kg: f64,
    pub diameter_m: f64,
}

/// Orbital context for timing analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ThreatTimeline {
    pub orbital_period_years: f64,
    pub time_to_impact_years: f64,
}

/// One candidate mission design.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "strategy")]
pub enum MissionScenario {
    KineticImpactor {
        impactor_mass_kg: f64,
        impactor_velocity_ms: f64,
        impact_angle_deg: f64,
        momentum_enhancement: f64,
    },
    GravityTractor {
        tractor_mass_kg: f64,
        orbital_distance_m: f64,
        mission_duration_years: f64,
        thrust_efficiency: f64,
    },
    Nuclear {
        nuclear_yield_kt: f64,
        mode: Option<DetonationMode>,
    },
}

impl MissionScenario {
    /// The default comparison slate: a DART-class impactor, a five-year
    /// tractor campaign, and a 100 kt standoff burst at one radius.
    pub fn default_slate(threat: &AsteroidThreat) -> Vec<MissionScenario> {
        vec![
            MissionScenario::KineticImpactor {
                impactor_mass_kg: TYPICAL_IMPACTOR_MASS_KG,
                impactor_velocity_ms: TYPICAL_IMPACTOR_VELOCITY_MS,
                impact_angle_deg: 0.0,
                momentum_enhancement: 2.0,
            },
            MissionScenario::GravityTractor {
                tractor_mass_kg: 2000.0,
                orbital_distance_m: 100.0,
                mission_duration_years: 5.0,
                thrust_efficiency: THRUST_EFFICIENCY_DEFAULT,
            },
            MissionScenario::Nuclear {
                nuclear_yield_kt: 100.0,
                mode: Some(DetonationMode::Standoff {
                    distance_m: threat.diameter_m / 2.0,
                }),
            },
        ]
    }
}

/// Mission-specific results inside an assessment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MissionOutcome {
    Kinetic(KineticImpactorResult),
    Tractor(GravityTractorResult),
    Nuclear(NuclearDeflectionResult),
}

/// One evaluated mission: its physics plus the timing analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MissionAssessment {
    pub strategy: MitigationStrategy,
    pub delta_v_ms: f64,
    pub outcome: MissionOutcome,
    pub timing: DeflectionTiming,
}

/// Ranked comparison of candidate missions against one threat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissionComparison {
    pub threat: AsteroidThreat,
    pub timeline: ThreatTimeline,
    pub assessments: Vec<MissionAssessment>,
    pub max_delta_v_ms: f64,
    pub min_delta_v_ms: f64,
    pub max_deflection_km: f64,
    pub min_deflection_km: f64,
    /// Strategy achieving the largest deflection distance
    pub best_strategy: MitigationStrategy,
}

fn evaluate(
    threat: &AsteroidThreat,
    scenario: &MissionScenario,
) -> Result<(MitigationStrategy, f64, MissionOutcome), PhysicsError> {
    match *scenario {
        MissionScenario::KineticImpactor {
            impactor_mass_kg,
            impactor_velocity_ms,
            impact_angle_deg,
            momentum_enhancement,
        } => {
            let result = kinetic_impactor_mission(
                threat.mass_kg,
                impactor_mass_kg,
                impactor_velocity_ms,
                impact_angle_deg,
                momentum_enhancement,
            )?;
            Ok((
                MitigationStrategy::KineticImpactor,
                result.delta_v_ms,
                MissionOutcome::Kinetic(result),
            ))
        }
        MissionScenario::GravityTractor {
            tractor_mass_kg,
            orbital_distance_m,
            mission_duration_years,
            thrust_efficiency,
        } => {
            let result = gravity_tractor_mission(
                threat.mass_kg,
                tractor_mass_kg,
                orbital_distance_m,
                mission_duration_years,
                thrust_efficiency,
            )?;
            Ok((
                MitigationStrategy::GravityTractor,
                result.delta_v_ms,
                MissionOutcome::Tractor(result),
            ))
        }
        MissionScenario::Nuclear {
            nuclear_yield_kt,
            mode,
        } => {
            let result =
                nuclear_deflection(threat.mass_kg, threat.diameter_m, nuclear_yield_kt, mode)?;
            let strategy = match result.mode {
                DetonationMode::Standoff { .. } => MitigationStrategy::NuclearStandoff,
                DetonationMode::Subsurface { .. } => MitigationStrategy::NuclearSubsurface,
            };
            Ok((strategy, result.delta_v_ms, MissionOutcome::Nuclear(result)))
        }
    }
}

/// Evaluate candidate missions against a threat and rank them by the
/// deflection distance achieved at the impact epoch.
///
/// `scenarios` of `None` runs the default slate.
pub fn mission_comparison(
    threat: &AsteroidThreat,
    timeline: &ThreatTimeline,
    scenarios: Option<&[MissionScenario]>,
) -> Result<MissionComparison, PhysicsError> {
    if !(threat.mass_kg > 0.0) || !(threat.diameter_m > 0.0) {
        return Err(PhysicsError::invalid_input(
            "threat mass and diameter must be positive",
        ));
    }

    let default_slate;
    let scenarios = match scenarios {
        Some(s) if !s.is_empty() => s,
        Some(_) => {
            return Err(PhysicsError::invalid_input(
                "at least one mission scenario is required",
            ))
        }
        None => {
            default_slate = MissionScenario::default_slate(threat);
            &default_slate
        }
    };

    let mut assessments = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let (strategy, delta_v_ms, outcome) = evaluate(threat, scenario)?;
        let timing = deflection_timing_analysis(
            timeline.orbital_period_years,
            timeline.time_to_impact_years,
            delta_v_ms,
        )?;
        debug!(
            strategy = strategy.as_str(),
            delta_v_mm_s = delta_v_ms * 1000.0,
            deflection_km = timing.final_deflection_km,
            "mission evaluated"
        );
        assessments.push(MissionAssessment {
            strategy,
            delta_v_ms,
            outcome,
            timing,
        });
    }

    let best = assessments
        .iter()
        .max_by(|a, b| {
            a.timing
                .final_deflection_km
                .total_cmp(&b.timing.final_deflection_km)
        })
        .ok_or_else(|| PhysicsError::invalid_input("no mission scenarios evaluated"))?;
    let best_strategy = best.strategy;

    let delta_vs = assessments.iter().map(|a| a.delta_v_ms);
    let deflections = assessments.iter().map(|a| a.timing.final_deflection_km);

    Ok(MissionComparison {
        threat: *threat,
        timeline: *timeline,
        max_delta_v_ms: delta_vs.clone().fold(f64::MIN, f64::max),
        min_delta_v_ms: delta_vs.fold(f64::MAX, f64::min),
        max_deflection_km: deflections.clone().fold(f64::MIN, f64::max),
        min_deflection_km: deflections.fold(f64::MAX, f64::min),
        best_strategy,
        assessments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bennu() -> AsteroidThreat {
        AsteroidThreat {
            mass_kg: 7e10,
            diameter_m: 500.0,
        }
    }

    fn decade_warning() -> ThreatTimeline {
        ThreatTimeline {
            orbital_period_years: 1.2,
            time_to_impact_years: 10.0,
        }
    }

    #[test]
    fn test_earlier_deflection_goes_farther() {
        let early = deflection_timing_analysis(1.2, 10.0, 0.001).expect("valid");
        let late = deflection_timing_analysis(1.2, 1.0, 0.001).expect("valid");
        assert!(early.final_deflection_m > late.final_deflection_m);
    }

    #[test]
    fn test_conservative_estimate_wins() {
        let timing = deflection_timing_analysis(1.0, 10.0, 0.001).expect("valid");
        let time_s = 10.0 * SECONDS_PER_YEAR;
        let linear_m = 0.001 * time_s;
        assert!(timing.final_deflection_m <= linear_m + 1e-9);
        assert_relative_eq!(
            timing.final_deflection_km,
            timing.final_deflection_m / 1000.0
        );
    }

    #[test]
    fn test_timing_validation() {
        assert!(deflection_timing_analysis(0.0, 10.0, 0.001).is_err());
        assert!(deflection_timing_analysis(1.2, -1.0, 0.001).is_err());
        assert!(deflection_timing_analysis(1.2, 10.0, -0.001).is_err());
    }

    #[test]
    fn test_default_slate_comparison() {
        let comparison = mission_comparison(&bennu(), &decade_warning(), None).expect("valid");

        assert_eq!(comparison.assessments.len(), 3);
        let strategies: Vec<MitigationStrategy> =
            comparison.assessments.iter().map(|a| a.strategy).collect();
        assert!(strategies.contains(&MitigationStrategy::KineticImpactor));
        assert!(strategies.contains(&MitigationStrategy::GravityTractor));
        assert!(strategies.contains(&MitigationStrategy::NuclearStandoff));

        assert!(comparison.max_deflection_km >= comparison.min_deflection_km);
        assert!(comparison.max_delta_v_ms >= comparison.min_delta_v_ms);

        // The winner is the assessment with the largest deflection
        let winner = comparison
            .assessments
            .iter()
            .max_by(|a, b| {
                a.timing
                    .final_deflection_km
                    .total_cmp(&b.timing.final_deflection_km)
            })
            .expect("non-empty");
        assert_eq!(comparison.best_strategy, winner.strategy);
        assert_relative_eq!(comparison.max_deflection_km, winner.timing.final_deflection_km);
    }

    #[test]
    fn test_custom_slate() {
        let scenarios = [
            MissionScenario::Nuclear {
                nuclear_yield_kt: 1000.0,
                mode: Some(DetonationMode::Subsurface { depth_m: 20.0 }),
            },
            MissionScenario::KineticImpactor {
                impactor_mass_kg: 500.0,
                impactor_velocity_ms: 6000.0,
                impact_angle_deg: 0.0,
                momentum_enhancement: 3.0,
            },
        ];
        let comparison =
            mission_comparison(&bennu(), &decade_warning(), Some(&scenarios)).expect("valid");

        assert_eq!(comparison.assessments.len(), 2);
        // A megaton-class buried charge dwarfs a small impactor
        assert_eq!(comparison.best_strategy, MitigationStrategy::NuclearSubsurface);
    }

    #[test]
    fn test_empty_slate_rejected() {
        assert!(matches!(
            mission_comparison(&bennu(), &decade_warning(), Some(&[])),
            Err(PhysicsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_threat_rejected() {
        let threat = AsteroidThreat {
            mass_kg: -1.0,
            diameter_m: 500.0,
        };
        assert!(mission_comparison(&threat, &decade_warning(), None).is_err());
    }
}
