//! Integration tests for the ground-impact pipeline: atmospheric entry
//! through energy, crater, blast radii, and environmental effect fields.

use bolide::analysis::complete_impact_analysis;
use bolide::crater::{CraterRegime, TargetProperties};
use bolide::effects::{
    calculate_temporal_effects, get_effect_at_time, DamageLevel, EffectType, ImpactScenario,
};
use bolide::types::{AsteroidParameters, Coordinates};

fn city_killer() -> AsteroidParameters {
    AsteroidParameters::new(100.0, 20000.0, 45.0)
}

#[test]
fn city_killer_end_to_end() {
    let analysis = complete_impact_analysis(&city_killer(), TargetProperties::default(), false)
        .expect("valid parameters");

    // A 100 m stony impactor is a tens-of-megatons event
    let mt = analysis.energy.effective_energy_tnt_mt;
    assert!((10.0..=200.0).contains(&mt), "expected 10-200 Mt, got {mt}");

    // Kilometer-scale complex crater
    assert!((1.0..=5.0).contains(&analysis.crater.diameter_km));
    assert_eq!(analysis.crater.regime, CraterRegime::Complex);

    // Blast rings are properly nested
    let e = &analysis.effects;
    assert!(e.overpressure_20psi_km < e.overpressure_5psi_km);
    assert!(e.overpressure_5psi_km < e.overpressure_1psi_km);
    assert!(e.richter_magnitude > 5.0);
}

#[test]
fn atmospheric_entry_trims_the_event() {
    let with_entry = complete_impact_analysis(&city_killer(), TargetProperties::default(), true)
        .expect("valid parameters");

    // 100 m sits in the large-body tier: 90% of the mass arrives,
    // at 90% of the entry velocity
    let entry = with_entry.atmospheric_entry.expect("entry modeling enabled");
    assert_eq!(entry.surviving_mass_kg, entry.initial_mass_kg * 0.9);
    assert_eq!(entry.final_velocity_ms, entry.initial_velocity_ms * 0.9);

    let without = complete_impact_analysis(&city_killer(), TargetProperties::default(), false)
        .expect("valid parameters");
    assert!(with_entry.crater.diameter_m < without.crater.diameter_m);
}

#[test]
fn larger_impactors_do_more_of_everything() {
    let small = complete_impact_analysis(
        &AsteroidParameters::new(50.0, 20000.0, 45.0),
        TargetProperties::default(),
        true,
    )
    .expect("valid parameters");
    let large = complete_impact_analysis(
        &AsteroidParameters::new(500.0, 20000.0, 45.0),
        TargetProperties::default(),
        true,
    )
    .expect("valid parameters");

    assert!(large.energy.effective_energy_j > small.energy.effective_energy_j);
    assert!(large.crater.diameter_m > small.crater.diameter_m);
    assert!(large.effects.thermal_radius_km > small.effects.thermal_radius_km);
    assert!(large.effects.richter_magnitude > small.effects.richter_magnitude);
}

#[test]
fn impact_analysis_feeds_environmental_effects() {
    let impact_point = Coordinates::new(40.7128, -74.0060);
    let analysis = complete_impact_analysis(
        &AsteroidParameters::new(200.0, 20000.0, 45.0),
        TargetProperties::default(),
        true,
    )
    .expect("valid parameters");
    let scenario = ImpactScenario::from_analysis(&analysis, impact_point);

    let temporal = calculate_temporal_effects(&scenario, (0.0, 48.0), 2.0, None)
        .expect("valid time range");

    assert_eq!(temporal.time_hours.len(), 24);
    assert_eq!(temporal.time_hours[0], 0.0);
    assert_eq!(temporal.time_hours[23], 46.0);

    let seismic = temporal.seismic.expect("all channels selected");
    assert!(seismic.magnitude > 0.0);

    let atmospheric = temporal.atmospheric.expect("all channels selected");
    for w in atmospheric.timeline.windows(2) {
        assert!(w[1].dust_concentration_kg_m3 <= w[0].dust_concentration_kg_m3);
    }

    let thermal = temporal.thermal.expect("all channels selected");
    assert_eq!(thermal.timeline[0].intensity_fraction, 1.0);

    // Point query ~100 km out, two hours in
    let point = get_effect_at_time(&scenario, 2.0, Coordinates::new(41.5, -74.0), None)
        .expect("valid query");
    assert!(point.distance_km > 50.0 && point.distance_km < 150.0);

    let sample = point.seismic.expect("all channels selected");
    assert!(sample.s_wave_arrival_hours >= sample.p_wave_arrival_hours);
    assert!(sample.intensity >= 0.0);
}

#[test]
fn channel_selection_is_respected_end_to_end() {
    let analysis = complete_impact_analysis(&city_killer(), TargetProperties::default(), true)
        .expect("valid parameters");
    let scenario = ImpactScenario::from_analysis(&analysis, Coordinates::new(0.0, 0.0));

    let temporal = calculate_temporal_effects(
        &scenario,
        (0.0, 24.0),
        1.0,
        Some(&[EffectType::Infrastructure]),
    )
    .expect("valid time range");

    assert!(temporal.infrastructure.is_some());
    assert!(temporal.seismic.is_none());
    assert!(temporal.thermal.is_none());

    let infra = temporal.infrastructure.expect("selected");
    assert!(infra.initial_light_radius_km >= infra.initial_severe_radius_km);
}

#[test]
fn far_field_point_queries_are_quiet_but_valid() {
    let analysis = complete_impact_analysis(&city_killer(), TargetProperties::default(), true)
        .expect("valid parameters");
    let scenario = ImpactScenario::from_analysis(&analysis, Coordinates::new(0.0, 0.0));

    // Opposite side of the planet
    let point = get_effect_at_time(&scenario, 5.0, Coordinates::new(0.0, 180.0), None)
        .expect("valid query");

    assert_eq!(point.thermal.expect("selected").intensity, 0.0);
    assert_eq!(point.debris.expect("selected").debris_intensity, 0.0);
    assert_eq!(
        point.infrastructure.expect("selected").damage_level,
        DamageLevel::None
    );
    assert!(!point.atmospheric.expect("selected").in_affected_area);
}

#[test]
fn results_serialize_to_json() {
    let analysis = complete_impact_analysis(&city_killer(), TargetProperties::default(), true)
        .expect("valid parameters");
    let scenario = ImpactScenario::from_analysis(&analysis, Coordinates::new(40.0, -74.0));
    let temporal =
        calculate_temporal_effects(&scenario, (0.0, 6.0), 1.0, None).expect("valid time range");

    let json = serde_json::to_string(&temporal).expect("serializable");
    assert!(json.contains("\"time_hours\""));
    assert!(json.contains("\"magnitude\""));

    let back: bolide::effects::TemporalEffects =
        serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back.time_hours.len(), temporal.time_hours.len());
}
