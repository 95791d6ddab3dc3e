use bevy::prelude::*;

/// Screen width allotted to the time axis, in pixels
const TIME_SPAN_PX: f32 = 1100.0;

/// Vertical pixels per coordinate unit
const SCALE: f32 = 25.0;

/// Curve points already mapped into screen space
#[derive(Resource)]
struct Curve2D {
    points: Vec<Vec2>,
}

pub fn run_2d(t: &[f64], xi: &[f64]) {
    println!("run_2d: starting Bevy 2D viewer with {} samples", t.len());

    // Map (t, xi) into screen space once, centered on the window
    let t0 = t.first().copied().unwrap_or(0.0);
    let t1 = t.last().copied().unwrap_or(1.0);
    let span = (t1 - t0).max(f64::EPSILON);
    let points = t
        .iter()
        .zip(xi)
        .map(|(&ti, &x)| {
            let fx = (((ti - t0) / span) as f32 - 0.5) * TIME_SPAN_PX;
            Vec2::new(fx, x as f32 * SCALE)
        })
        .collect();

    App::new()
        .insert_resource(Curve2D { points })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_camera)
        .add_systems(Update, draw_curve_system)
        .run();
}

fn setup_camera(mut commands: Commands) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());
}

fn draw_curve_system(curve: Res<Curve2D>, mut gizmos: Gizmos) {
    // time axis through xi = 0
    gizmos.line_2d(
        Vec2::new(-TIME_SPAN_PX / 2.0, 0.0),
        Vec2::new(TIME_SPAN_PX / 2.0, 0.0),
        Color::srgb(0.4, 0.4, 0.4),
    );

    gizmos.linestrip_2d(curve.points.iter().copied(), Color::WHITE);
}
