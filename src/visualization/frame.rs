//! Per-frame geometry for the animation
//!
//! Pure functions shared by the interactive viewer and the GIF writer:
//! the rotating three-arrow glyph and the axis bounds computed once from
//! the full trajectory before playback begins.

use thiserror::Error;

use crate::simulation::states::NVec3;

/// Magnitude of the two horizontal glyph arrows
pub const HORIZONTAL_MAGNITUDE: f64 = 10.0;

/// Magnitude of the vertical glyph arrow during playback
pub const VERTICAL_MAGNITUDE: f64 = 35.0;

/// Magnitude of the vertical glyph arrow in the pre-playback preview.
/// Differs from [`VERTICAL_MAGNITUDE`] on purpose; the two update paths
/// have always disagreed on this value.
pub const PREVIEW_VERTICAL_MAGNITUDE: f64 = 10.0;

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    /// Playback over zero samples has no defined behavior.
    #[error("cannot animate an empty trajectory")]
    EmptyTrajectory,

    /// A renderer was wired to the wrong state shape for its mode.
    #[error("renderer was handed {got} states where {want} states were required")]
    StateShape {
        want: &'static str,
        got: &'static str,
    },
}

/// The three glyph arrows for time `t`, anchored at the origin:
/// two horizontal vectors of magnitude 10 at phases `omega_0 * t` and
/// `omega_0 * t + pi/2`, and one vertical vector of magnitude `vertical`
pub fn glyph_vectors(omega_0: f64, t: f64, vertical: f64) -> [NVec3; 3] {
    let phase = omega_0 * t;
    let quarter = phase + std::f64::consts::FRAC_PI_2;
    [
        NVec3::new(
            HORIZONTAL_MAGNITUDE * phase.cos(),
            HORIZONTAL_MAGNITUDE * phase.sin(),
            0.0,
        ),
        NVec3::new(
            HORIZONTAL_MAGNITUDE * quarter.cos(),
            HORIZONTAL_MAGNITUDE * quarter.sin(),
            0.0,
        ),
        NVec3::new(0.0, 0.0, vertical),
    ]
}

/// Axis bounds for animation playback
///
/// `x_max` and `y_max` are both the maximum |x| over the trajectory, so
/// the horizontal axes are symmetric about 0; `z_min`/`z_max` are the
/// actual vertical extrema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_max: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl AxisBounds {
    /// Scan the entire trajectory once; fails fast on zero samples
    pub fn from_positions(positions: &[NVec3]) -> Result<Self, RenderError> {
        if positions.is_empty() {
            return Err(RenderError::EmptyTrajectory);
        }

        let mut x_mag: f64 = 0.0;
        let mut z_min = f64::INFINITY;
        let mut z_max = f64::NEG_INFINITY;
        for p in positions {
            x_mag = x_mag.max(p.x.abs());
            z_min = z_min.min(p.z);
            z_max = z_max.max(p.z);
        }

        Ok(Self {
            x_max: x_mag,
            y_max: x_mag,
            z_min,
            z_max,
        })
    }
}
