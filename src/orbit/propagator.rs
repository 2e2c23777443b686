//! Adaptive trajectory propagation.
//!
//! Dormand–Prince RK5(4) with embedded error control, stepping the
//! heliocentric two-body problem (plus an optional simplified Earth
//! perturbation) and sampling the state at exact, evenly spaced output
//! times. Integration is bounded by a step budget and an optional
//! wall-clock deadline; exhausting either is a hard failure, never a
//! partial trajectory.

use std::time::{Duration, Instant};

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::CartesianState;
use crate::error::PhysicsError;
use crate::types::{AU_M, GM_EARTH, GM_SUN, SECONDS_PER_DAY};

/// Fixed Earth distance used by the simplified perturbation term (m).
const PERTURBATION_EARTH_DISTANCE_M: f64 = 1.5e11;

/// Step-size controller bounds.
const STEP_SHRINK_LIMIT: f64 = 0.2;
const STEP_GROW_LIMIT: f64 = 5.0;
const STEP_SAFETY: f64 = 0.9;

/// Configuration for orbit propagation.
#[derive(Clone, Copy, Debug)]
pub struct PropagationConfig {
    /// Gravitational parameter of the central body (m³/s²). Default: Sun.
    pub gm: f64,
    /// Relative error tolerance. Default: 1e-8.
    pub rtol: f64,
    /// Absolute error tolerance. Default: 1e-10.
    pub atol: f64,
    /// Maximum accepted-or-rejected integration steps before giving up.
    pub max_steps: usize,
    /// Optional wall-clock deadline for the whole propagation.
    pub wall_clock_limit: Option<Duration>,
    /// Add the simplified fixed-distance Earth perturbation term.
    pub include_earth_perturbation: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            gm: GM_SUN,
            rtol: 1e-8,
            atol: 1e-10,
            max_steps: 1_000_000,
            wall_clock_limit: None,
            include_earth_perturbation: false,
        }
    }
}

/// A sampled trajectory: parallel arrays of time, position, and velocity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory {
    /// Sample times since propagation start (s)
    pub times_s: Vec<f64>,
    /// Heliocentric positions (m)
    pub positions_m: Vec<DVec3>,
    /// Velocities (m/s)
    pub velocities_ms: Vec<DVec3>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times_s.is_empty()
    }

    /// Sample times in days.
    pub fn times_days(&self) -> Vec<f64> {
        self.times_s.iter().map(|t| t / SECONDS_PER_DAY).collect()
    }

    /// Heliocentric distance at each sample (AU).
    pub fn distances_au(&self) -> Vec<f64> {
        self.positions_m.iter().map(|p| p.length() / AU_M).collect()
    }
}

#[derive(Clone, Copy)]
struct State {
    r: DVec3,
    v: DVec3,
}

#[derive(Clone, Copy)]
struct Derivative {
    dr: DVec3,
    dv: DVec3,
}

fn dynamics(state: State, config: &PropagationConfig) -> Derivative {
    let r = state.r.length();
    let mut acc = -config.gm * state.r / (r * r * r);
    if config.include_earth_perturbation {
        // Fixed-distance stand-in for Earth's pull; full planetary
        // ephemerides are beyond this model's resolution
        let d3 = PERTURBATION_EARTH_DISTANCE_M.powi(3);
        acc += -GM_EARTH * state.r / d3;
    }
    Derivative {
        dr: state.v,
        dv: acc,
    }
}

fn advance(state: State, d: Derivative, h: f64) -> State {
    State {
        r: state.r + d.dr * h,
        v: state.v + d.dv * h,
    }
}

/// One Dormand–Prince 5(4) step. Returns the 5th-order solution, the first
/// stage of the next step (FSAL), and the scaled error norm.
fn dopri5_step(
    state: State,
    k1: Derivative,
    h: f64,
    config: &PropagationConfig,
) -> (State, Derivative, f64) {
    let k2 = dynamics(advance(state, combine(&[(0.2, k1)]), h), config);
    let k3 = dynamics(
        advance(state, combine(&[(3.0 / 40.0, k1), (9.0 / 40.0, k2)]), h),
        config,
    );
    let k4 = dynamics(
        advance(
            state,
            combine(&[(44.0 / 45.0, k1), (-56.0 / 15.0, k2), (32.0 / 9.0, k3)]),
            h,
        ),
        config,
    );
    let k5 = dynamics(
        advance(
            state,
            combine(&[
                (19372.0 / 6561.0, k1),
                (-25360.0 / 2187.0, k2),
                (64448.0 / 6561.0, k3),
                (-212.0 / 729.0, k4),
            ]),
            h,
        ),
        config,
    );
    let k6 = dynamics(
        advance(
            state,
            combine(&[
                (9017.0 / 3168.0, k1),
                (-355.0 / 33.0, k2),
                (46732.0 / 5247.0, k3),
                (49.0 / 176.0, k4),
                (-5103.0 / 18656.0, k5),
            ]),
            h,
        ),
        config,
    );

    // 5th-order solution (also the b-row for k7, FSAL)
    let fifth = combine(&[
        (35.0 / 384.0, k1),
        (500.0 / 1113.0, k3),
        (125.0 / 192.0, k4),
        (-2187.0 / 6784.0, k5),
        (11.0 / 84.0, k6),
    ]);
    let next = advance(state, fifth, h);
    let k7 = dynamics(next, config);

    // Embedded 4th-order solution for the error estimate
    let fourth = combine(&[
        (5179.0 / 57600.0, k1),
        (7571.0 / 16695.0, k3),
        (393.0 / 640.0, k4),
        (-92097.0 / 339200.0, k5),
        (187.0 / 2100.0, k6),
        (1.0 / 40.0, k7),
    ]);
    let low = advance(state, fourth, h);

    let err = scaled_error_norm(state, next, low, config);
    (next, k7, err)
}

fn combine(terms: &[(f64, Derivative)]) -> Derivative {
    let mut dr = DVec3::ZERO;
    let mut dv = DVec3::ZERO;
    for (w, d) in terms {
        dr += *w * d.dr;
        dv += *w * d.dv;
    }
    Derivative { dr, dv }
}

/// RMS of component errors scaled by `atol + rtol·max(|y|, |y_new|)`.
fn scaled_error_norm(old: State, new: State, low: State, config: &PropagationConfig) -> f64 {
    let mut sum = 0.0;
    for i in 0..3 {
        let e = new.r[i] - low.r[i];
        let scale = config.atol + config.rtol * old.r[i].abs().max(new.r[i].abs());
        sum += (e / scale).powi(2);
        let e = new.v[i] - low.v[i];
        let scale = config.atol + config.rtol * old.v[i].abs().max(new.v[i].abs());
        sum += (e / scale).powi(2);
    }
    (sum / 6.0).sqrt()
}

/// Propagate a state vector over `time_span_s`, sampling at exactly
/// `n_points` evenly spaced times covering `[0, time_span_s]` inclusive.
///
/// # Errors
/// `InvalidInput` for a non-positive time span or fewer than two sample
/// points; `NumericalFailure` when the integrator exhausts its step budget
/// or wall-clock deadline, or when the step size collapses.
pub fn propagate_orbit(
    initial: CartesianState,
    time_span_s: f64,
    n_points: usize,
    config: &PropagationConfig,
) -> Result<Trajectory, PhysicsError> {
    if !(time_span_s > 0.0) {
        return Err(PhysicsError::invalid_input("time span must be positive"));
    }
    if n_points < 2 {
        return Err(PhysicsError::invalid_input(
            "trajectory needs at least 2 sample points",
        ));
    }
    if initial.position_m.length() == 0.0 {
        return Err(PhysicsError::invalid_input(
            "initial position must not be at the central body's center",
        ));
    }

    let started = Instant::now();
    let dt_sample = time_span_s / (n_points - 1) as f64;

    let mut state = State {
        r: initial.position_m,
        v: initial.velocity_ms,
    };
    let mut k1 = dynamics(state, config);
    let mut t = 0.0;
    let mut h = (time_span_s / 1000.0).min(SECONDS_PER_DAY);
    let min_step = time_span_s * 1e-14;

    let mut trajectory = Trajectory {
        times_s: Vec::with_capacity(n_points),
        positions_m: Vec::with_capacity(n_points),
        velocities_ms: Vec::with_capacity(n_points),
    };
    trajectory.times_s.push(0.0);
    trajectory.positions_m.push(state.r);
    trajectory.velocities_ms.push(state.v);

    let mut steps = 0usize;
    for sample in 1..n_points {
        // Last sample lands exactly on the span end
        let t_target = if sample == n_points - 1 {
            time_span_s
        } else {
            sample as f64 * dt_sample
        };

        while t < t_target {
            steps += 1;
            if steps > config.max_steps {
                return Err(PhysicsError::numerical(format!(
                    "step budget of {} exhausted at t = {t:.3e} s",
                    config.max_steps
                )));
            }
            if let Some(limit) = config.wall_clock_limit {
                if started.elapsed() > limit {
                    return Err(PhysicsError::numerical(format!(
                        "wall-clock limit of {limit:?} exceeded at t = {t:.3e} s"
                    )));
                }
            }

            // Clamp the trial step onto the next sample time
            let h_trial = h.min(t_target - t);
            let (next, k_next, err) = dopri5_step(state, k1, h_trial, config);

            if err <= 1.0 {
                t += h_trial;
                state = next;
                k1 = k_next;
            } else {
                trace!(t, h = h_trial, err, "step rejected");
            }

            // Standard 5th-order controller with clamped growth
            let factor = if err > 0.0 {
                (STEP_SAFETY * err.powf(-0.2)).clamp(STEP_SHRINK_LIMIT, STEP_GROW_LIMIT)
            } else {
                STEP_GROW_LIMIT
            };
            h = (h_trial * factor).max(min_step);
            if h <= min_step && err > 1.0 {
                return Err(PhysicsError::numerical(format!(
                    "step size collapsed below {min_step:.3e} s at t = {t:.3e} s"
                )));
            }
        }

        trajectory.times_s.push(t_target);
        trajectory.positions_m.push(state.r);
        trajectory.velocities_ms.push(state.v);
    }

    debug!(
        steps,
        n_points,
        span_days = time_span_s / SECONDS_PER_DAY,
        "propagation complete"
    );
    Ok(trajectory)
}
