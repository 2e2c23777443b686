//! Orbital mechanics: Keplerian elements, state vectors, propagation,
//! and Earth close-approach analysis.
//!
//! Heliocentric two-body dynamics with an optional simplified Earth
//! perturbation. Element angles are degrees at the API boundary, radians
//! internally. Earth is treated as sitting at the coordinate origin for
//! close-approach scans, which is the resolution limit of this model.

mod propagator;

#[cfg(test)]
mod proptest_orbit;

pub use propagator::{propagate_orbit, PropagationConfig, Trajectory};

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::types::{Coordinates, AU_M, EARTH_RADIUS_M, SECONDS_PER_DAY};

/// Close approaches inside this many Earth radii count as SOI entry.
const DEFAULT_SOI_EARTH_RADII: f64 = 100.0;

/// Impact details are only estimated inside this many Earth radii.
const IMPACT_DETAIL_EARTH_RADII: f64 = 10.0;

/// Threshold below which node/eccentricity vectors are treated as degenerate.
const DEGENERACY_EPS: f64 = 1e-10;

/// Classical Keplerian orbital elements. Angles in degrees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KeplerianElements {
    /// Semi-major axis (m)
    pub semi_major_axis_m: f64,
    /// Eccentricity, [0, 1) for bound orbits
    pub eccentricity: f64,
    /// Inclination (degrees)
    pub inclination_deg: f64,
    /// Right ascension of the ascending node (degrees)
    pub raan_deg: f64,
    /// Argument of periapsis (degrees)
    pub arg_periapsis_deg: f64,
    /// True anomaly (degrees)
    pub true_anomaly_deg: f64,
}

impl KeplerianElements {
    /// Semi-major axis in astronomical units.
    pub fn semi_major_axis_au(&self) -> f64 {
        self.semi_major_axis_m / AU_M
    }

    /// Orbital period (s) for a bound orbit, `None` when unbound.
    pub fn period_s(&self, gm: f64) -> Option<f64> {
        if self.semi_major_axis_m > 0.0 {
            Some(2.0 * std::f64::consts::PI * (self.semi_major_axis_m.powi(3) / gm).sqrt())
        } else {
            None
        }
    }

    /// Orbital period in Julian years for a bound orbit.
    pub fn period_years(&self, gm: f64) -> Option<f64> {
        self.period_s(gm).map(|p| p / (365.25 * SECONDS_PER_DAY))
    }
}

/// Heliocentric Cartesian state vector.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CartesianState {
    /// Position (m)
    pub position_m: DVec3,
    /// Velocity (m/s)
    pub velocity_ms: DVec3,
}

/// Convert Keplerian elements to a Cartesian state vector.
///
/// Position and velocity are built in the perifocal frame and rotated into
/// the inertial frame with `Rz(Ω)·Rx(i)·Rz(ω)`. Valid for bound orbits
/// (a > 0, e < 1).
pub fn keplerian_to_cartesian(elements: &KeplerianElements, gm: f64) -> CartesianState {
    let i = elements.inclination_deg.to_radians();
    let raan = elements.raan_deg.to_radians();
    let arg_per = elements.arg_periapsis_deg.to_radians();
    let nu = elements.true_anomaly_deg.to_radians();

    let a = elements.semi_major_axis_m;
    let e = elements.eccentricity;

    let p = a * (1.0 - e * e); // semi-latus rectum
    let r = p / (1.0 + e * nu.cos());
    let h = (gm * p).sqrt(); // specific angular momentum

    let r_perifocal = DVec3::new(r * nu.cos(), r * nu.sin(), 0.0);
    let v_perifocal = DVec3::new(-(gm / h) * nu.sin(), (gm / h) * (e + nu.cos()), 0.0);

    let rotation =
        DMat3::from_rotation_z(raan) * DMat3::from_rotation_x(i) * DMat3::from_rotation_z(arg_per);

    CartesianState {
        position_m: rotation * r_perifocal,
        velocity_ms: rotation * v_perifocal,
    }
}

/// Recover Keplerian elements from a Cartesian state vector.
///
/// Degenerate geometries (equatorial or circular orbits, where the node or
/// eccentricity vector vanishes) report zero for the undefined angles.
pub fn cartesian_to_keplerian(state: &CartesianState, gm: f64) -> KeplerianElements {
    let r_vec = state.position_m;
    let v_vec = state.velocity_ms;
    let r = r_vec.length();
    let v = v_vec.length();

    // Vis-viva: specific orbital energy fixes the semi-major axis
    let energy = v * v / 2.0 - gm / r;
    let a = -gm / (2.0 * energy);

    let h_vec = r_vec.cross(v_vec);
    let h = h_vec.length();

    let e_vec = v_vec.cross(h_vec) / gm - r_vec / r;
    let e = e_vec.length();

    let inclination = (h_vec.z / h).clamp(-1.0, 1.0).acos().to_degrees();

    let n_vec = DVec3::Z.cross(h_vec);
    let n = n_vec.length();

    let raan = if n > DEGENERACY_EPS {
        let mut raan = (n_vec.x / n).clamp(-1.0, 1.0).acos().to_degrees();
        if n_vec.y < 0.0 {
            raan = 360.0 - raan;
        }
        raan
    } else {
        0.0
    };

    let arg_per = if n > DEGENERACY_EPS && e > DEGENERACY_EPS {
        let mut arg = (n_vec.dot(e_vec) / (n * e)).clamp(-1.0, 1.0).acos().to_degrees();
        if e_vec.z < 0.0 {
            arg = 360.0 - arg;
        }
        arg
    } else {
        0.0
    };

    let true_anomaly = if e > DEGENERACY_EPS {
        let mut nu = (e_vec.dot(r_vec) / (e * r)).clamp(-1.0, 1.0).acos().to_degrees();
        if r_vec.dot(v_vec) < 0.0 {
            nu = 360.0 - nu;
        }
        nu
    } else {
        0.0
    };

    KeplerianElements {
        semi_major_axis_m: a,
        eccentricity: e,
        inclination_deg: inclination,
        raan_deg: raan,
        arg_periapsis_deg: arg_per,
        true_anomaly_deg: true_anomaly,
    }
}

/// Impact geometry, estimated only for close approaches inside
/// ten Earth radii.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImpactDetails {
    /// Speed at closest approach (m/s)
    pub impact_velocity_ms: f64,
    /// Speed at closest approach (km/s)
    pub impact_velocity_kms: f64,
    /// Surface point under the approach, spherical projection
    pub coordinates: Coordinates,
}

/// Result of a close-approach scan over a propagated trajectory.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImpactPrediction {
    /// Minimum approach fell inside the sphere of influence
    pub impact_detected: bool,
    /// Minimum distance from Earth's center (m)
    pub min_distance_m: f64,
    /// Minimum distance (km)
    pub min_distance_km: f64,
    /// Minimum distance in Earth radii
    pub min_distance_earth_radii: f64,
    /// Trajectory time of closest approach (s)
    pub time_to_closest_approach_s: f64,
    /// Trajectory time of closest approach (days)
    pub time_to_closest_approach_days: f64,
    /// Present only when the approach is inside ten Earth radii
    pub details: Option<ImpactDetails>,
}

/// Scan a trajectory for Earth close approach and possible impact.
///
/// `soi_radius_m` defaults to 100 Earth radii. Earth sits at the origin of
/// the trajectory frame. Detail estimation (velocity, surface coordinates)
/// happens only when the minimum approach is inside ten Earth radii;
/// latitude is clamped to [-90, 90] and longitude wrapped to (-180, 180].
pub fn earth_impact_probability(
    trajectory: &Trajectory,
    soi_radius_m: Option<f64>,
) -> Result<ImpactPrediction, PhysicsError> {
    if trajectory.is_empty() {
        return Err(PhysicsError::invalid_input(
            "cannot scan an empty trajectory for close approaches",
        ));
    }
    let soi_radius_m = soi_radius_m.unwrap_or(EARTH_RADIUS_M * DEFAULT_SOI_EARTH_RADII);

    let mut min_idx = 0;
    let mut min_distance_m = f64::INFINITY;
    for (idx, pos) in trajectory.positions_m.iter().enumerate() {
        let d = pos.length();
        if d < min_distance_m {
            min_distance_m = d;
            min_idx = idx;
        }
    }

    let impact_detected = min_distance_m < soi_radius_m;
    let time_s = trajectory.times_s[min_idx];

    let details = if impact_detected && min_distance_m < EARTH_RADIUS_M * IMPACT_DETAIL_EARTH_RADII
    {
        let pos = trajectory.positions_m[min_idx];
        let speed = trajectory.velocities_ms[min_idx].length();

        let lat = (pos.z / min_distance_m).clamp(-1.0, 1.0).asin().to_degrees();
        let mut lon = pos.y.atan2(pos.x).to_degrees();
        if lon <= -180.0 {
            lon += 360.0;
        }

        Some(ImpactDetails {
            impact_velocity_ms: speed,
            impact_velocity_kms: speed / 1000.0,
            coordinates: Coordinates::new(lat.clamp(-90.0, 90.0), lon),
        })
    } else {
        None
    };

    Ok(ImpactPrediction {
        impact_detected,
        min_distance_m,
        min_distance_km: min_distance_m / 1000.0,
        min_distance_earth_radii: min_distance_m / EARTH_RADIUS_M,
        time_to_closest_approach_s: time_s,
        time_to_closest_approach_days: time_s / SECONDS_PER_DAY,
        details,
    })
}

/// Earth-like circular reference orbit, handy in tests and demos.
pub fn earth_reference_orbit() -> KeplerianElements {
    KeplerianElements {
        semi_major_axis_m: AU_M,
        eccentricity: 0.0167,
        inclination_deg: 0.0,
        raan_deg: 0.0,
        arg_periapsis_deg: 102.9,
        true_anomaly_deg: 0.0,
    }
}
