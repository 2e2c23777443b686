//! Property-based tests for orbital element conversions and propagation.

use proptest::prelude::*;

use super::*;
use crate::types::{AU_M, GM_SUN, SECONDS_PER_DAY};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Element → state → element round trip recovers the inputs away from
    /// degenerate geometries.
    #[test]
    fn prop_element_round_trip(
        a_au in 0.5f64..5.0,
        eccentricity in 0.01f64..0.9,
        inclination in 1.0f64..179.0,
        raan in 1.0f64..359.0,
        arg_per in 1.0f64..359.0,
        true_anomaly in 1.0f64..359.0,
    ) {
        let elements = KeplerianElements {
            semi_major_axis_m: a_au * AU_M,
            eccentricity,
            inclination_deg: inclination,
            raan_deg: raan,
            arg_periapsis_deg: arg_per,
            true_anomaly_deg: true_anomaly,
        };

        let state = keplerian_to_cartesian(&elements, GM_SUN);
        let back = cartesian_to_keplerian(&state, GM_SUN);

        let rel = |x: f64, y: f64| ((x - y) / y.abs().max(1e-12)).abs();
        prop_assert!(rel(back.semi_major_axis_m, elements.semi_major_axis_m) < 1e-6);
        prop_assert!(rel(back.eccentricity, elements.eccentricity) < 1e-6);
        prop_assert!((back.inclination_deg - elements.inclination_deg).abs() < 1e-6);
        prop_assert!((back.raan_deg - elements.raan_deg).abs() < 1e-5);
        prop_assert!((back.arg_periapsis_deg - elements.arg_periapsis_deg).abs() < 1e-5);
        prop_assert!((back.true_anomaly_deg - elements.true_anomaly_deg).abs() < 1e-5);
    }

    /// The state vector always satisfies the conic equation
    /// r = p / (1 + e·cos ν).
    #[test]
    fn prop_conic_radius(
        a_au in 0.5f64..5.0,
        eccentricity in 0.0f64..0.9,
        true_anomaly in 0.0f64..360.0,
    ) {
        let elements = KeplerianElements {
            semi_major_axis_m: a_au * AU_M,
            eccentricity,
            inclination_deg: 20.0,
            raan_deg: 45.0,
            arg_periapsis_deg: 60.0,
            true_anomaly_deg: true_anomaly,
        };
        let state = keplerian_to_cartesian(&elements, GM_SUN);

        let p = elements.semi_major_axis_m * (1.0 - eccentricity * eccentricity);
        let expected = p / (1.0 + eccentricity * true_anomaly.to_radians().cos());
        let r = state.position_m.length();
        prop_assert!(((r - expected) / expected).abs() < 1e-10);
    }

    /// Propagated trajectories are well-formed: exact sample count,
    /// strictly increasing times, conserved specific orbital energy.
    #[test]
    fn prop_trajectory_well_formed(
        a_au in 0.8f64..3.0,
        eccentricity in 0.0f64..0.5,
        span_days in 1.0f64..60.0,
        n_points in 2usize..50,
    ) {
        let elements = KeplerianElements {
            semi_major_axis_m: a_au * AU_M,
            eccentricity,
            inclination_deg: 5.0,
            raan_deg: 0.0,
            arg_periapsis_deg: 0.0,
            true_anomaly_deg: 0.0,
        };
        let state = keplerian_to_cartesian(&elements, GM_SUN);

        let trajectory = propagate_orbit(
            state,
            span_days * SECONDS_PER_DAY,
            n_points,
            &PropagationConfig::default(),
        );
        prop_assert!(trajectory.is_ok());
        let trajectory = trajectory.unwrap();

        prop_assert_eq!(trajectory.len(), n_points);
        prop_assert_eq!(trajectory.times_s[0], 0.0);
        for w in trajectory.times_s.windows(2) {
            prop_assert!(w[1] > w[0]);
        }

        let energy = |i: usize| {
            trajectory.velocities_ms[i].length_squared() / 2.0
                - GM_SUN / trajectory.positions_m[i].length()
        };
        let e0 = energy(0);
        for i in 1..trajectory.len() {
            let drift = ((energy(i) - e0) / e0).abs();
            prop_assert!(drift < 1e-6, "energy drift {drift:.3e} at sample {i}");
        }
    }
}
