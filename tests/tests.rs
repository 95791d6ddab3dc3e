use oscvis::configuration::config::{CliOverrides, ConfigError, Settings};
use oscvis::output::sink::figure_path;
use oscvis::simulation::params::OscillatorParams;
use oscvis::simulation::solver::compute;
use oscvis::simulation::states::{NVec3, StateSeq};
use oscvis::visualization::frame::{
    glyph_vectors, AxisBounds, RenderError, PREVIEW_VERTICAL_MAGNITUDE, VERTICAL_MAGNITUDE,
};
use oscvis::RunState;

use approx::assert_relative_eq;
use chrono::TimeZone;
use std::io::Write;

/// CLI layer with no settings file
pub fn cli(
    mode: Option<&str>,
    save: bool,
    time: Option<&str>,
    parameters: Option<&str>,
) -> CliOverrides {
    CliOverrides {
        mode: mode.map(str::to_string),
        save,
        settings: None,
        time: time.map(str::to_string),
        parameters: parameters.map(str::to_string),
    }
}

/// Write a JSON settings file into a temp dir and return the handle
pub fn settings_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write settings");
    file
}

/// Default oscillator parameters used by the solver tests
pub fn default_params() -> OscillatorParams {
    OscillatorParams {
        m: 1.0,
        omega_0: std::f64::consts::PI,
        xi_0: 10.0,
        xi_dot_0: 0.0,
    }
}

const FULL_SETTINGS_JSON: &str = r#"{
    "mode": "3d",
    "t1": 1.0,
    "t2": 4.0,
    "ts": 0.25,
    "m": 2.5,
    "omega_0": 6.28,
    "xi_0": 3.0,
    "xi_dot_0": -1.0,
    "save": true
}"#;

// ==================================================================================
// Settings resolution
// ==================================================================================

#[test]
fn defaults_without_any_flags() {
    let settings = Settings::resolve(&cli(None, false, None, None)).unwrap();

    assert_eq!(settings.mode, "");
    assert_eq!(settings.t1, 0.0);
    assert_eq!(settings.t2, 10.0);
    assert_eq!(settings.ts, 0.01);
    assert_eq!(settings.m, 1.0);
    assert_eq!(settings.omega_0, std::f64::consts::PI);
    assert_eq!(settings.xi_0, 10.0);
    assert_eq!(settings.xi_dot_0, 0.0);
    assert!(!settings.save);
    assert!(!settings.compute_pos);
}

#[test]
fn cli_overrides_apply_field_by_field() {
    // end-to-end scenario: -m 2d -t 0:10:0.1 -p 2:3.14:5:0
    let settings =
        Settings::resolve(&cli(Some("2d"), false, Some("0:10:0.1"), Some("2:3.14:5:0"))).unwrap();

    assert_eq!(settings.mode, "2d");
    assert_eq!((settings.t1, settings.t2, settings.ts), (0.0, 10.0, 0.1));
    assert_eq!(settings.m, 2.0);
    assert_eq!(settings.omega_0, 3.14);
    assert_eq!(settings.xi_0, 5.0);
    assert_eq!(settings.xi_dot_0, 0.0);
    assert!(!settings.compute_pos);
}

#[test]
fn mode_is_lowercased() {
    let settings = Settings::resolve(&cli(Some("2D"), false, None, None)).unwrap();
    assert_eq!(settings.mode, "2d");

    let settings = Settings::resolve(&cli(Some("Anim"), false, None, None)).unwrap();
    assert_eq!(settings.mode, "anim");
    assert!(settings.compute_pos);
}

#[test]
fn anim_with_explicit_time_pins_substep() {
    // the supplied 0.2 is dropped in favor of the playback interval
    let settings = Settings::resolve(&cli(Some("anim"), false, Some("0:5:0.2"), None)).unwrap();

    assert_eq!((settings.t1, settings.t2), (0.0, 5.0));
    assert_eq!(settings.ts, 1.0 / 30.0);
    assert!(settings.compute_pos);
}

#[test]
fn anim_without_time_flag_keeps_default_substep() {
    let settings = Settings::resolve(&cli(Some("anim"), false, None, None)).unwrap();
    assert_eq!(settings.ts, 0.01);
}

#[test]
fn non_anim_time_keeps_supplied_substep() {
    let settings = Settings::resolve(&cli(Some("2d"), false, Some("0:10:0.05"), None)).unwrap();
    assert_eq!((settings.t1, settings.t2, settings.ts), (0.0, 10.0, 0.05));
}

#[test]
fn save_defaults_used_for_3d() {
    // end-to-end scenario: -m 3d -s with no explicit time/parameters
    let settings = Settings::resolve(&cli(Some("3d"), true, None, None)).unwrap();

    assert!(settings.save);
    assert!(settings.compute_pos);
    assert_eq!((settings.t1, settings.t2, settings.ts), (0.0, 10.0, 0.01));
}

#[test]
fn compute_pos_follows_mode_on_every_path() {
    for (mode, expected) in [("2d", false), ("3d", true), ("anim", true), ("4d", false)] {
        let settings = Settings::resolve(&cli(Some(mode), false, None, None)).unwrap();
        assert_eq!(settings.compute_pos, expected, "mode {mode:?}");
    }
}

#[test]
fn malformed_time_spec_is_rejected() {
    assert!(matches!(
        Settings::resolve(&cli(Some("2d"), false, Some("0:10"), None)),
        Err(ConfigError::TimeArity(_))
    ));
    assert!(matches!(
        Settings::resolve(&cli(Some("2d"), false, Some("0:ten:0.1"), None)),
        Err(ConfigError::BadNumber { .. })
    ));
}

#[test]
fn malformed_parameter_spec_is_rejected() {
    assert!(matches!(
        Settings::resolve(&cli(Some("2d"), false, None, Some("1:2:3"))),
        Err(ConfigError::ParameterArity(_))
    ));
}

// ==================================================================================
// Settings file resolution
// ==================================================================================

#[test]
fn settings_file_replaces_every_cli_field() {
    let file = settings_file(FULL_SETTINGS_JSON);

    // conflicting CLI flags alongside the file; all of them must be ignored
    let overrides = CliOverrides {
        mode: Some("anim".to_string()),
        save: false,
        settings: Some(file.path().to_path_buf()),
        time: Some("0:99:0.5".to_string()),
        parameters: Some("9:9:9:9".to_string()),
    };
    let settings = Settings::resolve(&overrides).unwrap();

    assert_eq!(settings.mode, "3d");
    assert_eq!((settings.t1, settings.t2, settings.ts), (1.0, 4.0, 0.25));
    assert_eq!(settings.m, 2.5);
    assert_eq!(settings.omega_0, 6.28);
    assert_eq!(settings.xi_0, 3.0);
    assert_eq!(settings.xi_dot_0, -1.0);
    assert!(settings.save);
    assert!(settings.compute_pos); // derived from the file's mode
}

#[test]
fn settings_file_resolution_is_idempotent() {
    let file = settings_file(FULL_SETTINGS_JSON);
    let overrides = CliOverrides {
        settings: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let a = Settings::resolve(&overrides).unwrap();
    let b = Settings::resolve(&overrides).unwrap();

    assert_eq!(a.mode, b.mode);
    assert_eq!((a.t1, a.t2, a.ts), (b.t1, b.t2, b.ts));
    assert_eq!(
        (a.m, a.omega_0, a.xi_0, a.xi_dot_0),
        (b.m, b.omega_0, b.xi_0, b.xi_dot_0)
    );
    assert_eq!((a.save, a.compute_pos), (b.save, b.compute_pos));
}

#[test]
fn compute_pos_in_file_is_ignored() {
    // a stray compute_pos key must not leak into the derived flag
    let file = settings_file(
        r#"{
            "mode": "2d",
            "t1": 0.0, "t2": 1.0, "ts": 0.1,
            "m": 1.0, "omega_0": 3.0, "xi_0": 1.0, "xi_dot_0": 0.0,
            "save": false,
            "compute_pos": true
        }"#,
    );
    let overrides = CliOverrides {
        settings: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let settings = Settings::resolve(&overrides).unwrap();
    assert!(!settings.compute_pos);
}

#[test]
fn malformed_settings_file_is_rejected() {
    let file = settings_file("{ not json");
    let overrides = CliOverrides {
        settings: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(matches!(
        Settings::resolve(&overrides),
        Err(ConfigError::SettingsParse { .. })
    ));
}

#[test]
fn missing_settings_file_is_rejected() {
    let overrides = CliOverrides {
        settings: Some("does/not/exist.json".into()),
        ..Default::default()
    };

    assert!(matches!(
        Settings::resolve(&overrides),
        Err(ConfigError::SettingsRead { .. })
    ));
}

// ==================================================================================
// Mode dispatch
// ==================================================================================

#[test]
fn idle_transitions_on_mode() {
    assert_eq!(RunState::Idle.on_mode("2d"), RunState::Rendering2D);
    assert_eq!(RunState::Idle.on_mode("3d"), RunState::Rendering3D);
    assert_eq!(RunState::Idle.on_mode("anim"), RunState::Animating);
}

#[test]
fn unknown_mode_fails_and_never_renders() {
    assert_eq!(RunState::Idle.on_mode("4d"), RunState::Failed);
    assert_eq!(RunState::Idle.on_mode(""), RunState::Failed);
    assert_eq!(RunState::Idle.on_mode("2D"), RunState::Failed); // dispatch sees normalized modes only
}

#[test]
fn rendering_states_are_terminal() {
    assert_eq!(RunState::Rendering2D.on_mode("3d"), RunState::Rendering2D);
    assert_eq!(RunState::Animating.on_mode("2d"), RunState::Animating);
    assert_eq!(RunState::Failed.on_mode("2d"), RunState::Failed);
}

// ==================================================================================
// Solver
// ==================================================================================

#[test]
fn time_and_state_sequences_pair_one_to_one() {
    let params = default_params();

    let scalar = compute((0.0, 10.0), 0.01, &params, false);
    assert_eq!(scalar.t.len(), scalar.states.len());
    assert!(!scalar.is_empty());

    let spatial = compute((0.0, 10.0), 0.01, &params, true);
    assert_eq!(spatial.t.len(), spatial.states.len());
}

#[test]
fn sample_grid_covers_the_interval() {
    // 10 / 0.25 is exact, so N is exactly 40
    let trajectory = compute((0.0, 10.0), 0.25, &default_params(), false);

    assert_eq!(trajectory.len(), 40);
    assert_eq!(trajectory.t[0], 0.0);
    for pair in trajectory.t.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], 0.25, epsilon = 1e-12);
    }
}

#[test]
fn degenerate_interval_yields_empty_trajectory() {
    let trajectory = compute((5.0, 5.0), 0.1, &default_params(), false);
    assert!(trajectory.is_empty());

    let trajectory = compute((5.0, 1.0), 0.1, &default_params(), true);
    assert!(trajectory.is_empty());
}

#[test]
fn verlet_tracks_the_analytic_oscillation() {
    let params = default_params();
    let trajectory = compute((0.0, 2.0), 0.01, &params, false);

    let xi = trajectory.states.as_scalar().unwrap();
    for (ti, &x) in trajectory.t.iter().zip(xi) {
        let exact = params.xi_0 * (params.omega_0 * ti).cos();
        assert!(
            (x - exact).abs() < 1e-2,
            "at t = {ti}: computed {x}, analytic {exact}"
        );
    }
}

#[test]
fn spatial_embedding_preserves_the_coordinate_radius() {
    let params = default_params();
    let scalar = compute((0.0, 2.0), 0.01, &params, false);
    let spatial = compute((0.0, 2.0), 0.01, &params, true);

    let xi = scalar.states.as_scalar().unwrap();
    let positions = spatial.states.as_spatial().unwrap();
    assert_eq!(xi.len(), positions.len());

    for (&x, p) in xi.iter().zip(positions) {
        let radius = (p.x * p.x + p.y * p.y).sqrt();
        assert_relative_eq!(radius, x.abs(), epsilon = 1e-9);
    }
}

#[test]
fn initial_sample_matches_the_initial_conditions() {
    let params = OscillatorParams {
        m: 2.0,
        omega_0: 3.14,
        xi_0: 5.0,
        xi_dot_0: 0.0,
    };
    let trajectory = compute((0.0, 10.0), 0.1, &params, false);

    assert_eq!(trajectory.t[0], 0.0);
    assert_eq!(trajectory.states.as_scalar().unwrap()[0], 5.0);
}

// ==================================================================================
// Animation frame geometry
// ==================================================================================

#[test]
fn axis_bounds_are_symmetric_in_x_and_y() {
    let positions = vec![
        NVec3::new(-3.0, 0.5, 2.0),
        NVec3::new(5.0, -2.0, 9.0),
        NVec3::new(-1.0, 1.0, 2.0),
    ];
    let bounds = AxisBounds::from_positions(&positions).unwrap();

    assert_eq!(bounds.x_max, 5.0);
    assert_eq!(bounds.y_max, 5.0); // x extremum drives both horizontal axes
    assert_eq!((bounds.z_min, bounds.z_max), (2.0, 9.0));
}

#[test]
fn axis_bounds_refuse_an_empty_trajectory() {
    assert!(matches!(
        AxisBounds::from_positions(&[]),
        Err(RenderError::EmptyTrajectory)
    ));
}

#[test]
fn glyph_arrows_have_the_prescribed_magnitudes() {
    let vectors = glyph_vectors(std::f64::consts::PI, 0.37, VERTICAL_MAGNITUDE);

    assert_relative_eq!(vectors[0].norm(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(vectors[1].norm(), 10.0, epsilon = 1e-12);
    assert_relative_eq!(vectors[2].norm(), 35.0, epsilon = 1e-12);

    // the horizontal pair is a quarter turn apart
    assert_relative_eq!(vectors[0].dot(&vectors[1]), 0.0, epsilon = 1e-9);
    // the third arrow is purely vertical
    assert_eq!((vectors[2].x, vectors[2].y), (0.0, 0.0));
}

#[test]
fn preview_glyph_uses_the_short_vertical_arrow() {
    let vectors = glyph_vectors(1.0, 0.0, PREVIEW_VERTICAL_MAGNITUDE);

    assert_relative_eq!(vectors[2].norm(), 10.0, epsilon = 1e-12);
    // at t = 0 the horizontal arrows sit on the x and y axes
    assert_relative_eq!(vectors[0].x, 10.0, epsilon = 1e-12);
    assert_relative_eq!(vectors[0].y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(vectors[1].x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(vectors[1].y, 10.0, epsilon = 1e-12);
}

// ==================================================================================
// Output naming
// ==================================================================================

#[test]
fn figure_path_uses_timestamp_and_mode_extension() {
    let now = chrono::Local.with_ymd_and_hms(2026, 8, 5, 14, 30, 9).unwrap();

    assert_eq!(
        figure_path(RunState::Rendering2D, now),
        std::path::PathBuf::from("figures/fig_2026-08-05_14_30_09.png")
    );
    assert_eq!(
        figure_path(RunState::Rendering3D, now),
        std::path::PathBuf::from("figures/fig_2026-08-05_14_30_09.png")
    );
    assert_eq!(
        figure_path(RunState::Animating, now),
        std::path::PathBuf::from("figures/fig_2026-08-05_14_30_09.gif")
    );
}

// ==================================================================================
// End-to-end resolution -> solver
// ==================================================================================

#[test]
fn resolved_settings_drive_the_solver() {
    let settings =
        Settings::resolve(&cli(Some("2d"), false, Some("0:10:0.1"), Some("2:3.14:5:0"))).unwrap();

    let trajectory = compute(
        (settings.t1, settings.t2),
        settings.ts,
        &OscillatorParams {
            m: settings.m,
            omega_0: settings.omega_0,
            xi_0: settings.xi_0,
            xi_dot_0: settings.xi_dot_0,
        },
        settings.compute_pos,
    );

    assert!(matches!(trajectory.states, StateSeq::Scalar(_)));
    assert_eq!(trajectory.states.as_scalar().unwrap()[0], 5.0);
    assert_eq!(trajectory.t.len(), trajectory.states.len());
}

#[test]
fn anim_resolution_produces_spatial_states() {
    let settings = Settings::resolve(&cli(Some("anim"), false, Some("0:5:0.2"), None)).unwrap();
    assert_eq!(settings.ts, 1.0 / 30.0);

    let trajectory = compute(
        (settings.t1, settings.t2),
        settings.ts,
        &default_params(),
        settings.compute_pos,
    );

    assert!(matches!(trajectory.states, StateSeq::Spatial(_)));
    // one frame per sample over the whole interval
    let expected = ((settings.t2 - settings.t1) / settings.ts).ceil() as usize;
    assert_eq!(trajectory.len(), expected);
}
