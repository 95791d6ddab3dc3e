//! Fixed-step time integrator for the oscillator
//!
//! Velocity–Verlet for a single degree of freedom, driven by a
//! [`ForceSet`] and a fixed step size. Two force evaluations per step.

use super::oscillator::ForceSet;
use super::states::OscState;

/// Advance the state by one step using velocity–Verlet
/// Updates `xi`, `xi_dot` and `t` in-place with fixed step `dt`
pub fn verlet_step(state: &mut OscState, forces: &ForceSet, m: f64, dt: f64) {
    let half_dt = 0.5 * dt; // half step dt/2, half update for verlet

    // a_n from xi_n at time t_n
    let a_old = forces.total_force(state.t, state) / m;

    // Kick: v_n+1/2 = v_n + (1/2 * dt) * a_n
    state.xi_dot += half_dt * a_old;

    // Drift: xi_n+1 = xi_n + dt * v_n+1/2
    state.xi += dt * state.xi_dot;

    // advance time: t_n+1 = t_n + dt
    state.t += dt;

    // a_n+1 from xi_n+1 at time t_n+1
    let a_new = forces.total_force(state.t, state) / m;

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    state.xi_dot += half_dt * a_new;
}
