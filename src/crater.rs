//! Crater scaling model.
//!
//! Pi-group energy scaling, `D = K1 · (E / (ρ_target · g))^μ`, with separate
//! simple/complex regime constants split at 1e16 J of ground-coupled energy.
//! Complex craters are wider and proportionally shallower.

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_TARGET_DENSITY, EARTH_SURFACE_GRAVITY};

/// Effective-energy boundary between simple and complex craters (J).
const COMPLEX_CRATER_ENERGY_J: f64 = 1e16;

/// Rim height as a fraction of crater diameter.
const RIM_HEIGHT_RATIO: f64 = 0.05;

/// Ejecta blanket radius as a multiple of crater diameter.
const EJECTA_RADIUS_RATIO: f64 = 2.5;

/// Crater morphology regime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraterRegime {
    Simple,
    Complex,
}

impl CraterRegime {
    fn from_energy(energy_j: f64) -> Self {
        if energy_j >= COMPLEX_CRATER_ENERGY_J {
            CraterRegime::Complex
        } else {
            CraterRegime::Simple
        }
    }

    /// (K1, μ, depth/diameter) scaling constants for this regime.
    fn scaling(self) -> (f64, f64, f64) {
        match self {
            CraterRegime::Simple => (1.88, 0.41, 0.20),
            CraterRegime::Complex => (1.54, 0.22, 0.10),
        }
    }
}

/// Target surface properties for crater scaling.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TargetProperties {
    /// Target material density (kg/m³)
    pub density_kg_m3: f64,
    /// Surface gravity (m/s²)
    pub gravity_ms2: f64,
}

impl Default for TargetProperties {
    /// Crustal rock on Earth.
    fn default() -> Self {
        Self {
            density_kg_m3: DEFAULT_TARGET_DENSITY,
            gravity_ms2: EARTH_SURFACE_GRAVITY,
        }
    }
}

/// Predicted crater dimensions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CraterGeometry {
    /// Final crater diameter (m)
    pub diameter_m: f64,
    /// Final crater diameter (km)
    pub diameter_km: f64,
    /// Crater depth (m)
    pub depth_m: f64,
    /// Rim height above the pre-impact surface (m)
    pub rim_height_m: f64,
    /// Radius of the continuous ejecta blanket (m)
    pub ejecta_radius_m: f64,
    /// Ejecta blanket radius (km)
    pub ejecta_radius_km: f64,
    /// Morphology regime
    pub regime: CraterRegime,
    /// Excavated volume, cone approximation π/6·D²·depth (m³)
    pub volume_m3: f64,
}

/// Scale a crater from ground-coupled impact energy.
///
/// Uses the effective (angle-corrected) energy, not the total. Zero energy
/// yields a zero-size crater rather than an error.
pub fn crater_geometry(effective_energy_j: f64, target: TargetProperties) -> CraterGeometry {
    let regime = CraterRegime::from_energy(effective_energy_j);
    let (k1, mu, depth_ratio) = regime.scaling();

    let diameter_m = k1 * (effective_energy_j / (target.density_kg_m3 * target.gravity_ms2)).powf(mu);
    let depth_m = diameter_m * depth_ratio;
    let ejecta_radius_m = diameter_m * EJECTA_RADIUS_RATIO;

    CraterGeometry {
        diameter_m,
        diameter_km: diameter_m / 1000.0,
        depth_m,
        rim_height_m: diameter_m * RIM_HEIGHT_RATIO,
        ejecta_radius_m,
        ejecta_radius_km: ejecta_radius_m / 1000.0,
        regime,
        volume_m3: std::f64::consts::PI / 6.0 * diameter_m * diameter_m * depth_m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regime_boundary() {
        assert_eq!(CraterRegime::from_energy(9.99e15), CraterRegime::Simple);
        // Exactly at the boundary is complex
        assert_eq!(CraterRegime::from_energy(1e16), CraterRegime::Complex);
        assert_eq!(CraterRegime::from_energy(1e18), CraterRegime::Complex);
    }

    #[test]
    fn test_crater_grows_with_energy() {
        let target = TargetProperties::default();
        let small = crater_geometry(1e12, target);
        let large = crater_geometry(1e15, target);
        assert!(large.diameter_m > small.diameter_m);
    }

    #[test]
    fn test_complex_craters_shallower() {
        let target = TargetProperties::default();
        let simple = crater_geometry(1e15, target);
        let complex = crater_geometry(1e17, target);
        assert_relative_eq!(simple.depth_m / simple.diameter_m, 0.20);
        assert_relative_eq!(complex.depth_m / complex.diameter_m, 0.10);
    }

    #[test]
    fn test_derived_dimensions() {
        let c = crater_geometry(1e15, TargetProperties::default());
        assert_relative_eq!(c.rim_height_m, c.diameter_m * 0.05);
        assert_relative_eq!(c.ejecta_radius_m, c.diameter_m * 2.5);
        assert_relative_eq!(c.diameter_km * 1000.0, c.diameter_m);
        assert_relative_eq!(
            c.volume_m3,
            std::f64::consts::PI / 6.0 * c.diameter_m.powi(2) * c.depth_m
        );
    }

    #[test]
    fn test_zero_energy_zero_crater() {
        let c = crater_geometry(0.0, TargetProperties::default());
        assert_eq!(c.diameter_m, 0.0);
        assert_eq!(c.volume_m3, 0.0);
    }

    #[test]
    fn test_denser_target_smaller_crater() {
        let soft = crater_geometry(
            1e15,
            TargetProperties {
                density_kg_m3: 2000.0,
                gravity_ms2: EARTH_SURFACE_GRAVITY,
            },
        );
        let hard = crater_geometry(
            1e15,
            TargetProperties {
                density_kg_m3: 3000.0,
                gravity_ms2: EARTH_SURFACE_GRAVITY,
            },
        );
        assert!(hard.diameter_m < soft.diameter_m);
    }
}
