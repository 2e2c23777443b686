//! Blast, thermal, and seismic effect radii.
//!
//! Yield-scaling power laws calibrated against surface-burst nuclear test
//! data, applied to the ground-coupled impact energy. Radii are in km from
//! ground zero; all values are floored at zero.

use serde::{Deserialize, Serialize};

use crate::types::joules_to_tnt_kt;

/// Effect radii and seismic magnitude for a given impact energy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BlastEffectRadii {
    /// Third-degree-burn thermal radiation radius (km)
    pub thermal_radius_km: f64,
    /// 1 psi overpressure, window breakage (km)
    pub overpressure_1psi_km: f64,
    /// 5 psi overpressure, building damage (km)
    pub overpressure_5psi_km: f64,
    /// 20 psi overpressure, severe destruction (km)
    pub overpressure_20psi_km: f64,
    /// Seismic damage radius (km)
    pub seismic_radius_km: f64,
    /// Richter magnitude of the impact-induced earthquake
    pub richter_magnitude: f64,
}

/// Richter magnitude from energy via Gutenberg–Richter,
/// `log10 E = 1.5·M + 4.8`, floored at 0. Zero energy maps to 0.
pub fn richter_magnitude(energy_j: f64) -> f64 {
    if energy_j > 0.0 {
        ((energy_j.log10() - 4.8) / 1.5).max(0.0)
    } else {
        0.0
    }
}

/// Compute effect radii from ground-coupled impact energy.
pub fn blast_effect_radii(effective_energy_j: f64) -> BlastEffectRadii {
    let tnt_kt = joules_to_tnt_kt(effective_energy_j);

    let magnitude = richter_magnitude(effective_energy_j);
    let seismic_radius_km = if effective_energy_j > 0.0 {
        10.0 * 10f64.powf(magnitude - 4.0)
    } else {
        0.0
    };

    BlastEffectRadii {
        thermal_radius_km: (0.4 * tnt_kt.powf(0.4)).max(0.0),
        overpressure_1psi_km: (2.2 * tnt_kt.powf(0.33)).max(0.0),
        overpressure_5psi_km: (1.0 * tnt_kt.powf(0.33)).max(0.0),
        overpressure_20psi_km: (0.5 * tnt_kt.powf(0.33)).max(0.0),
        seismic_radius_km: seismic_radius_km.max(0.0),
        richter_magnitude: magnitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overpressure_rings_nested() {
        // Higher overpressure thresholds are always closer in
        let r = blast_effect_radii(4.184e15); // 1 Mt
        assert!(r.overpressure_20psi_km < r.overpressure_5psi_km);
        assert!(r.overpressure_5psi_km < r.overpressure_1psi_km);
    }

    #[test]
    fn test_one_kiloton_reference() {
        let r = blast_effect_radii(4.184e12);
        assert_relative_eq!(r.thermal_radius_km, 0.4);
        assert_relative_eq!(r.overpressure_1psi_km, 2.2);
        assert_relative_eq!(r.overpressure_5psi_km, 1.0);
        assert_relative_eq!(r.overpressure_20psi_km, 0.5);
    }

    #[test]
    fn test_richter_magnitude_scale() {
        // 1e16 J: (16 - 4.8) / 1.5 ≈ 7.47
        assert_relative_eq!(richter_magnitude(1e16), (16.0 - 4.8) / 1.5);
        // Tiny energies floor at zero rather than going negative
        assert_eq!(richter_magnitude(1.0), 0.0);
        assert_eq!(richter_magnitude(0.0), 0.0);
    }

    #[test]
    fn test_radii_monotonic_in_energy() {
        let small = blast_effect_radii(4.184e12);
        let large = blast_effect_radii(4.184e15);
        assert!(large.thermal_radius_km > small.thermal_radius_km);
        assert!(large.overpressure_1psi_km > small.overpressure_1psi_km);
        assert!(large.seismic_radius_km > small.seismic_radius_km);
        assert!(large.richter_magnitude > small.richter_magnitude);
    }

    #[test]
    fn test_zero_energy_all_zero() {
        let r = blast_effect_radii(0.0);
        assert_eq!(r.thermal_radius_km, 0.0);
        assert_eq!(r.overpressure_1psi_km, 0.0);
        assert_eq!(r.seismic_radius_km, 0.0);
        assert_eq!(r.richter_magnitude, 0.0);
    }
}
