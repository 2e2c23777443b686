//! Infrastructure channel: structural damage bands and recovery.
//!
//! The overpressure rings set the initial damage extents: 20 psi severe,
//! 5 psi moderate, 1 psi light. Reported extents grow slightly over the
//! first day as assessments come in, then shrink on a weeks-long recovery
//! timescale.

use serde::{Deserialize, Serialize};

use super::ImpactScenario;

/// Damage assessments keep expanding the reported extent on this
/// timescale (hours).
const ASSESSMENT_HOURS: f64 = 12.0;

/// Additional extent revealed by late assessments, as a fraction.
const ASSESSMENT_GROWTH: f64 = 0.1;

/// Recovery starts after this long (hours).
const RECOVERY_START_HOURS: f64 = 48.0;

/// Recovery e-folding time (hours), roughly two weeks.
const RECOVERY_HOURS: f64 = 336.0;

/// Power stays out in lightly damaged areas for this long (hours).
const LIGHT_DAMAGE_OUTAGE_HOURS: f64 = 48.0;

/// Structural damage severity at a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageLevel {
    None,
    Light,
    Moderate,
    Severe,
}

impl DamageLevel {
    /// Fraction of structures damaged at this level.
    pub fn damage_fraction(&self) -> f64 {
        match self {
            DamageLevel::None => 0.0,
            DamageLevel::Light => 0.2,
            DamageLevel::Moderate => 0.5,
            DamageLevel::Severe => 0.9,
        }
    }
}

/// One timeline step of the damage extents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InfrastructureTimelineEntry {
    pub time_hours: f64,
    /// Severe damage extent (km)
    pub severe_damage_radius_km: f64,
    /// Moderate damage extent (km)
    pub moderate_damage_radius_km: f64,
    /// Light damage extent (km)
    pub light_damage_radius_km: f64,
}

/// Infrastructure channel evolution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InfrastructureEvolution {
    /// Initial severe damage extent, the 20 psi ring (km)
    pub initial_severe_radius_km: f64,
    /// Initial moderate damage extent, the 5 psi ring (km)
    pub initial_moderate_radius_km: f64,
    /// Initial light damage extent, the 1 psi ring (km)
    pub initial_light_radius_km: f64,
    pub timeline: Vec<InfrastructureTimelineEntry>,
}

/// Infrastructure state at one location and time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InfrastructureSample {
    pub damage_level: DamageLevel,
    /// Fraction of structures damaged, in [0, 1]
    pub damage_fraction: f64,
    /// Electric power is out at this location
    pub power_outage: bool,
}

/// Reported-extent factor: assessment growth over the first day, then an
/// exponential recovery after the first two days.
fn extent_factor(time_hours: f64) -> f64 {
    let assessed = 1.0 + ASSESSMENT_GROWTH * (1.0 - (-time_hours / ASSESSMENT_HOURS).exp());
    let recovery = if time_hours > RECOVERY_START_HOURS {
        (-(time_hours - RECOVERY_START_HOURS) / RECOVERY_HOURS).exp()
    } else {
        1.0
    };
    assessed * recovery
}

pub(super) fn temporal_evolution(
    scenario: &ImpactScenario,
    time_hours: &[f64],
) -> InfrastructureEvolution {
    let timeline = time_hours
        .iter()
        .map(|t| {
            let factor = extent_factor(*t);
            InfrastructureTimelineEntry {
                time_hours: *t,
                severe_damage_radius_km: scenario.overpressure_20psi_km * factor,
                moderate_damage_radius_km: scenario.overpressure_5psi_km * factor,
                light_damage_radius_km: scenario.overpressure_1psi_km * factor,
            }
        })
        .collect();

    InfrastructureEvolution {
        initial_severe_radius_km: scenario.overpressure_20psi_km,
        initial_moderate_radius_km: scenario.overpressure_5psi_km,
        initial_light_radius_km: scenario.overpressure_1psi_km,
        timeline,
    }
}

pub(super) fn sample_at(
    scenario: &ImpactScenario,
    distance_km: f64,
    time_hours: f64,
) -> InfrastructureSample {
    let factor = extent_factor(time_hours);

    let damage_level = if distance_km <= scenario.overpressure_20psi_km * factor {
        DamageLevel::Severe
    } else if distance_km <= scenario.overpressure_5psi_km * factor {
        DamageLevel::Moderate
    } else if distance_km <= scenario.overpressure_1psi_km * factor {
        DamageLevel::Light
    } else {
        DamageLevel::None
    };

    let power_outage = match damage_level {
        DamageLevel::Severe | DamageLevel::Moderate => true,
        DamageLevel::Light => time_hours < LIGHT_DAMAGE_OUTAGE_HOURS,
        DamageLevel::None => false,
    };

    InfrastructureSample {
        damage_level,
        damage_fraction: damage_level.damage_fraction(),
        power_outage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_scenario;

    #[test]
    fn test_extents_evolve_over_a_week() {
        let times = [0.0, 1.0, 12.0, 24.0, 48.0, 168.0];
        let evolution = temporal_evolution(&test_scenario(), &times);

        let severe: Vec<f64> = evolution
            .timeline
            .iter()
            .map(|e| e.severe_damage_radius_km)
            .collect();

        // Assessments grow the extent early, recovery shrinks it late
        assert!(severe[2] > severe[0]);
        assert!(severe[5] < severe[2]);
        assert_ne!(severe[0], severe[5]);
        assert_eq!(evolution.initial_severe_radius_km, 20.0);
    }

    #[test]
    fn test_band_ordering() {
        let evolution = temporal_evolution(&test_scenario(), &[0.0, 24.0, 168.0]);
        for entry in &evolution.timeline {
            assert!(entry.severe_damage_radius_km <= entry.moderate_damage_radius_km);
            assert!(entry.moderate_damage_radius_km <= entry.light_damage_radius_km);
        }
    }

    #[test]
    fn test_damage_bands_by_distance() {
        let scenario = test_scenario();
        assert_eq!(sample_at(&scenario, 5.0, 0.0).damage_level, DamageLevel::Severe);
        assert_eq!(sample_at(&scenario, 30.0, 0.0).damage_level, DamageLevel::Moderate);
        assert_eq!(sample_at(&scenario, 80.0, 0.0).damage_level, DamageLevel::Light);
        assert_eq!(sample_at(&scenario, 500.0, 0.0).damage_level, DamageLevel::None);
    }

    #[test]
    fn test_damage_fractions_bounded() {
        let scenario = test_scenario();
        for d in [0.0, 10.0, 40.0, 90.0, 1000.0] {
            let sample = sample_at(&scenario, d, 12.0);
            assert!((0.0..=1.0).contains(&sample.damage_fraction));
        }
    }

    #[test]
    fn test_power_restored_in_light_zone() {
        let scenario = test_scenario();
        let early = sample_at(&scenario, 80.0, 1.0);
        assert_eq!(early.damage_level, DamageLevel::Light);
        assert!(early.power_outage);

        // Weeks later the light zone has power again
        let late = sample_at(&scenario, 80.0, 400.0);
        assert!(!late.power_outage);
    }

    #[test]
    fn test_no_damage_no_outage() {
        let sample = sample_at(&test_scenario(), 5000.0, 0.0);
        assert_eq!(sample.damage_level, DamageLevel::None);
        assert!(!sample.power_outage);
    }
}
