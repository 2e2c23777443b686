//! Seismic channel: impact-induced ground shaking.
//!
//! Magnitude from the Gutenberg–Richter energy relation, peak ground
//! acceleration from a simplified Boore–Atkinson attenuation, and Modified
//! Mercalli intensity from a PGA threshold ladder. Shaking at a location
//! starts with the P-wave arrival, reaches full strength with the S-wave,
//! and rings down over the following hour.

use serde::{Deserialize, Serialize};

use super::ImpactScenario;
use crate::blast::richter_magnitude;
use crate::types::{SEISMIC_VELOCITY_P_WAVE, SEISMIC_VELOCITY_S_WAVE};

/// PGA reported at ground zero, where the attenuation law diverges (g).
const GROUND_ZERO_PGA_G: f64 = 10.0;

/// Minimum detectable acceleration floor (g).
const PGA_FLOOR_G: f64 = 0.001;

/// Ring-down timescale after the S-wave arrival (hours).
const RINGDOWN_HOURS: f64 = 1.0;

/// Amplitude fraction carried by the P-wave before the S-wave arrives.
const P_WAVE_FRACTION: f64 = 0.3;

/// Distance rings for the temporal intensity grid (km).
const DISTANCE_RINGS_KM: [f64; 12] = [
    1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
];

/// Modified Mercalli intensity ladder: (MMI, minimum PGA in g), descending.
const MMI_THRESHOLDS: [(u8, f64); 10] = [
    (10, 0.65),
    (9, 0.34),
    (8, 0.18),
    (7, 0.092),
    (6, 0.039),
    (5, 0.018),
    (4, 0.0086),
    (3, 0.0039),
    (2, 0.00175),
    (1, 0.0),
];

/// Seismic field evolution over a ring grid of distances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeismicEvolution {
    /// Equivalent earthquake magnitude
    pub magnitude: f64,
    /// Ring distances from ground zero (km)
    pub distances_km: Vec<f64>,
    /// P-wave arrival at each ring (hours)
    pub p_wave_arrival_hours: Vec<f64>,
    /// S-wave arrival at each ring (hours)
    pub s_wave_arrival_hours: Vec<f64>,
    /// Shaking intensity, `grid[time][ring]`
    pub intensity_grid: Vec<Vec<f64>>,
}

/// Seismic state at one location and time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SeismicSample {
    /// Time-dependent shaking intensity (MMI scaled by the wave envelope)
    pub intensity: f64,
    /// Equivalent earthquake magnitude
    pub magnitude: f64,
    /// Distance from ground zero (km)
    pub distance_km: f64,
    /// Peak ground acceleration at this distance (g)
    pub pga_g: f64,
    /// Modified Mercalli intensity at this distance
    pub mmi: u8,
    /// P-wave arrival (hours)
    pub p_wave_arrival_hours: f64,
    /// S-wave arrival (hours)
    pub s_wave_arrival_hours: f64,
}

/// Peak ground acceleration in g at a given distance,
/// `log10 PGA = M − 3.5·log10 d − 2.0`, floored at the detection limit.
pub fn peak_ground_acceleration_g(magnitude: f64, distance_km: f64) -> f64 {
    let pga = if distance_km > 0.0 {
        10f64.powf(magnitude - 3.5 * distance_km.log10() - 2.0)
    } else {
        GROUND_ZERO_PGA_G
    };
    pga.max(PGA_FLOOR_G)
}

/// Modified Mercalli intensity from PGA by descending threshold ladder.
pub fn mmi_from_pga(pga_g: f64) -> u8 {
    for (mmi, threshold) in MMI_THRESHOLDS {
        if pga_g >= threshold {
            return mmi;
        }
    }
    1
}

fn arrival_hours(distance_km: f64, wave_velocity_ms: f64) -> f64 {
    distance_km * 1000.0 / wave_velocity_ms / 3600.0
}

/// Wave-envelope factor: 0 before the P-wave, partial between P and S,
/// full at the S-wave, exponential ring-down after.
fn envelope(time_hours: f64, p_arrival: f64, s_arrival: f64) -> f64 {
    if time_hours < p_arrival {
        0.0
    } else if time_hours < s_arrival {
        P_WAVE_FRACTION
    } else {
        (-(time_hours - s_arrival) / RINGDOWN_HOURS).exp()
    }
}

pub(super) fn temporal_evolution(scenario: &ImpactScenario, time_hours: &[f64]) -> SeismicEvolution {
    let magnitude = richter_magnitude(scenario.effective_energy_j);
    let distances_km: Vec<f64> = DISTANCE_RINGS_KM.to_vec();

    let p_wave_arrival_hours: Vec<f64> = distances_km
        .iter()
        .map(|d| arrival_hours(*d, SEISMIC_VELOCITY_P_WAVE))
        .collect();
    let s_wave_arrival_hours: Vec<f64> = distances_km
        .iter()
        .map(|d| arrival_hours(*d, SEISMIC_VELOCITY_S_WAVE))
        .collect();

    let intensity_grid = time_hours
        .iter()
        .map(|t| {
            distances_km
                .iter()
                .zip(p_wave_arrival_hours.iter().zip(&s_wave_arrival_hours))
                .map(|(d, (p, s))| {
                    let mmi = mmi_from_pga(peak_ground_acceleration_g(magnitude, *d));
                    f64::from(mmi) * envelope(*t, *p, *s)
                })
                .collect()
        })
        .collect();

    SeismicEvolution {
        magnitude,
        distances_km,
        p_wave_arrival_hours,
        s_wave_arrival_hours,
        intensity_grid,
    }
}

pub(super) fn sample_at(
    scenario: &ImpactScenario,
    distance_km: f64,
    time_hours: f64,
) -> SeismicSample {
    let magnitude = richter_magnitude(scenario.effective_energy_j);
    let pga_g = peak_ground_acceleration_g(magnitude, distance_km);
    let mmi = mmi_from_pga(pga_g);

    let p_arrival = arrival_hours(distance_km, SEISMIC_VELOCITY_P_WAVE);
    let s_arrival = arrival_hours(distance_km, SEISMIC_VELOCITY_S_WAVE);

    SeismicSample {
        intensity: f64::from(mmi) * envelope(time_hours, p_arrival, s_arrival),
        magnitude,
        distance_km,
        pga_g,
        mmi,
        p_wave_arrival_hours: p_arrival,
        s_wave_arrival_hours: s_arrival,
    }
}
