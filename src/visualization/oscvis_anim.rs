use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Sphere};

use crate::simulation::states::NVec3;
use crate::visualization::frame::{self, AxisBounds, RenderError};
use crate::visualization::{to_render_space, SCALE3D};

const CAMERA_DISTANCE: f32 = 650.0;
const POINT_RADIUS: f32 = 0.35 * SCALE3D;
const ARROW_THICKNESS: f32 = 0.09 * SCALE3D;
const AXIS_THICKNESS: f32 = 0.02 * SCALE3D;

/// Immutable playback input: the trajectory, its frame geometry inputs,
/// and the axis bounds computed once before the first frame
#[derive(Resource)]
struct AnimData {
    t: Vec<f64>,
    positions: Vec<NVec3>,
    omega_0: f64,
    ts: f64,
    bounds: AxisBounds,
}

/// Mutable per-frame state, owned by the animation loop
///
/// `glyph` holds the current three arrow entities. It is replaced
/// wholesale every frame: the old entities are despawned and new ones
/// spawned from the frame's angle. Nothing else holds these ids.
#[derive(Resource)]
struct Playback {
    index: usize,
    timer: Timer,
    glyph: Vec<Entity>,
}

/// Marker for the single moving point
#[derive(Component)]
struct TracePoint;

/// Run the animation viewer; one frame per sample, repeating indefinitely
///
/// Fails fast on an empty trajectory, before any window is opened.
pub fn run_anim(
    t: &[f64],
    positions: &[NVec3],
    omega_0: f64,
    ts: f64,
) -> Result<(), RenderError> {
    let bounds = AxisBounds::from_positions(positions)?;

    println!(
        "run_anim: starting Bevy animation with {} frames",
        positions.len()
    );

    App::new()
        .insert_resource(AnimData {
            t: t.to_vec(),
            positions: positions.to_vec(),
            omega_0,
            ts,
            bounds,
        })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_anim)
        .add_systems(Update, advance_frame_system)
        .run();

    Ok(())
}

/// Startup system: camera, light, bounds-sized axes, the moving point at
/// its first sample, and the static preview glyph
fn setup_anim(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<AnimData>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.93, 0.93, 0.93)),
            ..Default::default()
        },
        transform: Transform::from_xyz(CAMERA_DISTANCE, CAMERA_DISTANCE * 0.7, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Z),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_bounds_axes(&mut commands, &mut meshes, &mut materials, &data.bounds);

    // The single moving point, starting on the first sample
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(POINT_RADIUS).mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.1, 0.3, 0.9),
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_translation(to_render_space(&data.positions[0])),
            ..Default::default()
        },
        TracePoint,
    ));

    // Static preview glyph. The preview uses the short vertical arrow;
    // playback below uses the long one.
    let vectors = frame::glyph_vectors(
        data.omega_0,
        data.t[0],
        frame::PREVIEW_VERTICAL_MAGNITUDE,
    );
    let glyph = spawn_glyph(&mut commands, &mut meshes, &mut materials, &vectors);

    commands.insert_resource(Playback {
        index: 0,
        timer: Timer::from_seconds(data.ts as f32, TimerMode::Repeating),
        glyph,
    });
}

/// Per-frame update: replace the glyph, move the point, advance the index
fn advance_frame_system(
    mut commands: Commands,
    time: Res<Time>,
    data: Res<AnimData>,
    mut playback: ResMut<Playback>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut point: Query<&mut Transform, With<TracePoint>>,
) {
    playback.timer.tick(time.delta());
    if !playback.timer.just_finished() {
        return;
    }

    let i = playback.index;

    // Replace the glyph wholesale: discard the old arrows, create new
    // ones from this frame's angle
    for entity in playback.glyph.drain(..) {
        commands.entity(entity).despawn();
    }
    let vectors = frame::glyph_vectors(data.omega_0, data.t[i], frame::VERTICAL_MAGNITUDE);
    playback.glyph = spawn_glyph(&mut commands, &mut meshes, &mut materials, &vectors);

    // Move the point to exactly this sample; no trail is kept
    for mut transform in &mut point {
        transform.translation = to_render_space(&data.positions[i]);
    }

    // repeat indefinitely
    playback.index = (i + 1) % data.positions.len();
}

/// Spawn the three arrow entities for one frame and return their ids
fn spawn_glyph(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    vectors: &[NVec3; 3],
) -> Vec<Entity> {
    vectors
        .iter()
        .map(|v| {
            let tip = Vec3::new(v.x as f32, v.y as f32, v.z as f32) * SCALE3D;
            let len = tip.length();
            // a thin rod from the origin to the tip: the cuboid's long side
            // runs along +X, so rotate +X onto the arrow direction and park
            // the center at the midpoint
            let rotation = Quat::from_rotation_arc(Vec3::X, tip.normalize_or_zero());
            commands
                .spawn(PbrBundle {
                    mesh: meshes.add(Cuboid::new(len, ARROW_THICKNESS, ARROW_THICKNESS).mesh()),
                    material: materials.add(StandardMaterial {
                        base_color: Color::BLACK,
                        unlit: true,
                        ..Default::default()
                    }),
                    transform: Transform {
                        translation: tip * 0.5,
                        rotation,
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .id()
        })
        .collect()
}

/// Axis rods sized to the precomputed bounds: x and y symmetric about 0,
/// z spanning the actual extrema
fn spawn_bounds_axes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    bounds: &AxisBounds,
) {
    let x_len = (2.0 * bounds.x_max) as f32 * SCALE3D;
    let y_len = (2.0 * bounds.y_max) as f32 * SCALE3D;
    let z_len = (bounds.z_max - bounds.z_min) as f32 * SCALE3D;
    let z_center = (0.5 * (bounds.z_max + bounds.z_min)) as f32 * SCALE3D;

    let mut axis = |size: Vec3, center: Vec3, color: Color| {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_translation(center),
            ..Default::default()
        });
    };

    axis(
        Vec3::new(x_len, AXIS_THICKNESS, AXIS_THICKNESS),
        Vec3::ZERO,
        Color::srgb(1.0, 0.0, 0.0),
    );
    axis(
        Vec3::new(AXIS_THICKNESS, y_len, AXIS_THICKNESS),
        Vec3::ZERO,
        Color::srgb(0.0, 1.0, 0.0),
    );
    axis(
        Vec3::new(AXIS_THICKNESS, AXIS_THICKNESS, z_len),
        Vec3::new(0.0, 0.0, z_center),
        Color::srgb(0.0, 0.0, 1.0),
    );
}
