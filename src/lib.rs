pub mod configuration;
pub mod simulation;
pub mod dispatch;
pub mod visualization;
pub mod output;

pub use configuration::config::{CliOverrides, ConfigError, Settings};

pub use simulation::params::OscillatorParams;
pub use simulation::solver::compute;
pub use simulation::states::{NVec3, OscState, StateSeq, Trajectory};

pub use dispatch::{ModeError, RunState};

pub use visualization::frame::{glyph_vectors, AxisBounds, RenderError};
pub use visualization::{run_2d, run_3d, run_anim};

pub use output::sink::figure_path;
