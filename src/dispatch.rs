//! Rendering-mode dispatch
//!
//! A small state machine: a run starts in `Idle`, inspects the resolved
//! mode string exactly once, and moves to one of the three rendering
//! states or to `Failed`. All four outcomes are terminal for the run; an
//! unrecognized mode surfaces as a named error and never reaches a
//! renderer.

use anyhow::Result;
use thiserror::Error;

use crate::configuration::config::Settings;
use crate::output::sink;
use crate::simulation::states::{NVec3, Trajectory};
use crate::visualization::frame::RenderError;
use crate::visualization::{run_2d, run_3d, run_anim};

/// Unsupported-mode error, carrying the offending string
#[derive(Debug, Error)]
pub enum ModeError {
    #[error("not supported mode: {0:?}")]
    Unsupported(String),
}

/// Per-run rendering state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Rendering2D,
    Rendering3D,
    Animating,
    Failed,
}

impl RunState {
    /// Transition on the resolved mode string
    ///
    /// Only `Idle` inspects the mode; the rendering states and `Failed`
    /// are terminal and return themselves unchanged.
    pub fn on_mode(self, mode: &str) -> RunState {
        match self {
            RunState::Idle => match mode {
                "2d" => RunState::Rendering2D,
                "3d" => RunState::Rendering3D,
                "anim" => RunState::Animating,
                _ => RunState::Failed,
            },
            terminal => terminal,
        }
    }
}

/// Route one resolved run to its rendering pipeline
///
/// The save flag selects between the interactive viewer and the file
/// sink; the resolved settings are threaded through explicitly.
pub fn run(settings: &Settings, trajectory: Trajectory) -> Result<()> {
    match RunState::Idle.on_mode(&settings.mode) {
        RunState::Rendering2D => {
            let xi = scalar_states(&trajectory)?;
            if settings.save {
                sink::save_2d(&trajectory.t, xi)
            } else {
                run_2d(&trajectory.t, xi);
                Ok(())
            }
        }
        RunState::Rendering3D => {
            let positions = spatial_states(&trajectory)?;
            if settings.save {
                sink::save_3d(positions)
            } else {
                run_3d(positions);
                Ok(())
            }
        }
        RunState::Animating => {
            let positions = spatial_states(&trajectory)?;
            if settings.save {
                sink::save_anim(settings, &trajectory.t, positions)
            } else {
                run_anim(&trajectory.t, positions, settings.omega_0, settings.ts)
                    .map_err(Into::into)
            }
        }
        RunState::Failed => Err(ModeError::Unsupported(settings.mode.clone()).into()),
        // no mode inspected yet; nothing to render
        RunState::Idle => Ok(()),
    }
}

fn scalar_states(trajectory: &Trajectory) -> Result<&[f64], RenderError> {
    trajectory.states.as_scalar().ok_or(RenderError::StateShape {
        want: "scalar",
        got: trajectory.states.kind(),
    })
}

fn spatial_states(trajectory: &Trajectory) -> Result<&[NVec3], RenderError> {
    trajectory.states.as_spatial().ok_or(RenderError::StateShape {
        want: "3-vector",
        got: trajectory.states.kind(),
    })
}
