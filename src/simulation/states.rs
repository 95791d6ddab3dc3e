//! Core state types for the oscillator run
//!
//! Defines the instantaneous solver state (`OscState`) and the sampled
//! result handed to the renderers (`Trajectory`), which pairs a time grid
//! with either scalar or 3-vector states.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, Copy)]
pub struct OscState {
    pub xi: f64, // generalized coordinate
    pub xi_dot: f64, // generalized velocity
    pub t: f64, // time
}

/// State sequence of a sampled run
/// Scalar when only the generalized coordinate is tracked,
/// Spatial when each sample is a 3-vector position
#[derive(Debug, Clone)]
pub enum StateSeq {
    Scalar(Vec<f64>),
    Spatial(Vec<NVec3>),
}

impl StateSeq {
    pub fn len(&self) -> usize {
        match self {
            StateSeq::Scalar(v) => v.len(),
            StateSeq::Spatial(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Option<&[f64]> {
        match self {
            StateSeq::Scalar(v) => Some(v),
            StateSeq::Spatial(_) => None,
        }
    }

    pub fn as_spatial(&self) -> Option<&[NVec3]> {
        match self {
            StateSeq::Scalar(_) => None,
            StateSeq::Spatial(v) => Some(v),
        }
    }

    /// Short label used in renderer wiring errors
    pub fn kind(&self) -> &'static str {
        match self {
            StateSeq::Scalar(_) => "scalar",
            StateSeq::Spatial(_) => "3-vector",
        }
    }
}

/// Sampled trajectory: time grid paired one-to-one with a state sequence
///
/// The pairing invariant `t.len() == states.len()` is enforced at
/// construction and holds for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub states: StateSeq,
}

impl Trajectory {
    pub fn from_parts(t: Vec<f64>, states: StateSeq) -> Self {
        assert_eq!(
            t.len(),
            states.len(),
            "time and state sequences must pair one-to-one"
        );
        Self { t, states }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}
