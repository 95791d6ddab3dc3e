//! Trajectory solver for the oscillator
//!
//! Samples the system on the grid `t_i = t1 + i * substep` for
//! `i in [0, N)` with `N = ceil((t2 - t1) / substep)`, advancing the state
//! between samples with velocity–Verlet. Depending on `compute_pos` the
//! output states are either the scalar coordinate or its 3-vector
//! embedding on the rotating director:
//!
//! `(xi * cos(omega_0 * t), xi * sin(omega_0 * t), xi_dot)`

use super::integrator::verlet_step;
use super::oscillator::{ForceSet, LinearRestoring};
use super::params::OscillatorParams;
use super::states::{NVec3, OscState, StateSeq, Trajectory};

/// Compute the sampled trajectory over `interval = (t1, t2)`
///
/// The returned [`Trajectory`] satisfies the pairing invariant
/// `t.len() == states.len()`; a non-positive span yields an empty
/// trajectory.
pub fn compute(
    interval: (f64, f64),
    substep: f64,
    params: &OscillatorParams,
    compute_pos: bool,
) -> Trajectory {
    let (t1, t2) = interval;

    // N = ceil(span / substep); negative or NaN spans collapse to zero
    let n = ((t2 - t1) / substep).ceil().max(0.0) as usize;

    let mut state = OscState {
        xi: params.xi_0,
        xi_dot: params.xi_dot_0,
        t: t1,
    };

    let forces = ForceSet::new().with(LinearRestoring::from_frequency(params.m, params.omega_0));

    let mut times = Vec::with_capacity(n);
    if compute_pos {
        let mut positions: Vec<NVec3> = Vec::with_capacity(n);
        for _ in 0..n {
            times.push(state.t);
            positions.push(embed(&state, params.omega_0));
            verlet_step(&mut state, &forces, params.m, substep);
        }
        Trajectory::from_parts(times, StateSeq::Spatial(positions))
    } else {
        let mut coords = Vec::with_capacity(n);
        for _ in 0..n {
            times.push(state.t);
            coords.push(state.xi);
            verlet_step(&mut state, &forces, params.m, substep);
        }
        Trajectory::from_parts(times, StateSeq::Scalar(coords))
    }
}

/// 3-vector embedding of a sample on the rotating director
fn embed(state: &OscState, omega_0: f64) -> NVec3 {
    let phase = omega_0 * state.t;
    NVec3::new(
        state.xi * phase.cos(),
        state.xi * phase.sin(),
        state.xi_dot,
    )
}
