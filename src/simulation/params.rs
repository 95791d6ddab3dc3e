//! Physical parameters of the oscillator
//!
//! `OscillatorParams` holds the four quantities describing the system:
//! mass, natural angular frequency, and the two initial conditions.

#[derive(Debug, Clone)]
pub struct OscillatorParams {
    pub m: f64, // mass
    pub omega_0: f64, // natural angular frequency
    pub xi_0: f64, // initial generalized position
    pub xi_dot_0: f64, // initial generalized velocity
}
