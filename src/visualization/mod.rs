pub mod frame;
pub mod oscvis_vis2d;
pub mod oscvis_vis3d;
pub mod oscvis_anim;

pub use oscvis_anim::run_anim;
pub use oscvis_vis2d::run_2d;
pub use oscvis_vis3d::run_3d;

use bevy::math::Vec3;

use crate::simulation::states::NVec3;

/// World-space → render-space scaling factor shared by the 3D viewers
pub(crate) const SCALE3D: f32 = 10.0;

/// Map a trajectory sample into bevy render space
pub(crate) fn to_render_space(p: &NVec3) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32) * SCALE3D
}
