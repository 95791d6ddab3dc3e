//! Force contributors for the single-degree-of-freedom system
//!
//! Defines the `RestoringForce` trait and the linear (Hookean) restoring
//! term that models the oscillator. Contributions are summed by a
//! [`ForceSet`] so additional terms (damping, driving) can be registered
//! without touching the integrator.

use crate::simulation::states::OscState;

/// Collection of generalized-force terms acting on the coordinate
/// Each term implements [`RestoringForce`] and their contributions are
/// summed into a single scalar force
pub struct ForceSet {
    terms: Vec<Box<dyn RestoringForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: RestoringForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total generalized force at time `t` for the given state
    pub fn total_force(&self, t: f64, state: &OscState) -> f64 {
        let mut f = 0.0;
        for term in &self.terms {
            f += term.force(t, state);
        }
        f
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for generalized-force sources acting on [`OscState`]
pub trait RestoringForce {
    fn force(&self, t: f64, state: &OscState) -> f64;
}

/// Linear restoring force F = -k * xi
/// With k = m * omega_0^2 this reproduces the natural frequency omega_0
pub struct LinearRestoring {
    pub k: f64, // stiffness
}

impl LinearRestoring {
    /// Stiffness from mass and natural angular frequency
    pub fn from_frequency(m: f64, omega_0: f64) -> Self {
        Self {
            k: m * omega_0 * omega_0,
        }
    }
}

impl RestoringForce for LinearRestoring {
    fn force(&self, _t: f64, state: &OscState) -> f64 {
        -self.k * state.xi
    }
}
