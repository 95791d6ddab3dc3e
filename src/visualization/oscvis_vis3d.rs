use bevy::prelude::*;
use bevy::math::primitives::Cuboid;

use crate::simulation::states::NVec3;
use crate::visualization::{to_render_space, SCALE3D};

/// Distance of the camera from the origin
const CAMERA_DISTANCE: f32 = 450.0;

/// Half-length of the reference axis rods, in world units
const AXIS_HALF_LEN: f32 = 12.0;

/// The parametric curve, already mapped into render space
#[derive(Resource)]
struct Curve3D {
    points: Vec<Vec3>,
}

pub fn run_3d(positions: &[NVec3]) {
    println!(
        "run_3d: starting Bevy 3D viewer with {} samples",
        positions.len()
    );

    let points = positions.iter().map(to_render_space).collect();

    App::new()
        .insert_resource(Curve3D { points })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, draw_curve_3d)
        .run();
}

/// Startup system: camera, light, and reference axes
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 3D camera looking at the origin; data z is the vertical axis
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(CAMERA_DISTANCE, CAMERA_DISTANCE * 0.7, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Z),
        ..Default::default()
    });

    // Basic point light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);
}

/// Per-frame redraw of the ordered parametric curve
fn draw_curve_3d(curve: Res<Curve3D>, mut gizmos: Gizmos) {
    gizmos.linestrip(curve.points.iter().copied(), Color::srgb(0.3, 0.6, 1.0));
}

/// Three thin boxes along X, Y, Z for visual reference
fn spawn_axes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let axis_len = 2.0 * AXIS_HALF_LEN * SCALE3D;
    let axis_thickness = 0.02 * SCALE3D;

    let mut axis = |size: Vec3, color: Color| {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            // Cuboid is centered at its transform origin, so this crosses the world origin
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    };

    // X axis: red
    axis(
        Vec3::new(axis_len, axis_thickness, axis_thickness),
        Color::srgb(1.0, 0.0, 0.0),
    );
    // Y axis: green
    axis(
        Vec3::new(axis_thickness, axis_len, axis_thickness),
        Color::srgb(0.0, 1.0, 0.0),
    );
    // Z axis: blue
    axis(
        Vec3::new(axis_thickness, axis_thickness, axis_len),
        Color::srgb(0.0, 0.0, 1.0),
    );
}
