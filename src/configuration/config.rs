//! Settings resolution for an oscillator run
//!
//! This module produces the canonical [`Settings`] record from three
//! layered sources with strict precedence:
//!
//! 1. built-in defaults,
//! 2. command-line flags, applied field-by-field on top of the defaults,
//! 3. an optional JSON settings file which, when supplied, fully replaces
//!    the defaults *and* every other command-line field.
//!
//! `compute_pos` is always derived from the final mode string and is never
//! read from the settings file, even if present there.
//!
//! # JSON format
//! ```json
//! {
//!   "mode": "anim",
//!   "t1": 0.0,
//!   "t2": 10.0,
//!   "ts": 0.01,
//!   "m": 1.0,
//!   "omega_0": 3.141592653589793,
//!   "xi_0": 10.0,
//!   "xi_dot_0": 0.0,
//!   "save": false
//! }
//! ```

use std::f64::consts::PI;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Frame interval forced by `--time` when the resolved mode is `anim`
const ANIM_SUBSTEP: f64 = 1.0 / 30.0;

/// Settings resolution error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--time` value is not a t0:t1:ts triple.
    #[error("time specification {0:?} must have the form t0:t1:ts")]
    TimeArity(String),

    /// `--parameters` value is not an m:omega_0:xi_0:xi_dot_0 quadruple.
    #[error("parameter specification {0:?} must have the form m:omega_0:xi_0:xi_dot_0")]
    ParameterArity(String),

    /// A colon-separated field failed to parse as a number.
    #[error("non-numeric token {token:?} in {spec:?}")]
    BadNumber { spec: String, token: String },

    /// The settings file could not be opened.
    #[error("cannot read settings file {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not a valid settings object.
    #[error("cannot parse settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Command-line override layer, one field per flag
///
/// Kept separate from the argument parser so resolution is testable
/// without going through `clap`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub save: bool,
    pub settings: Option<PathBuf>,
    pub time: Option<String>,
    pub parameters: Option<String>,
}

/// Canonical configuration for a run, immutable after resolution
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub mode: String,
    pub t1: f64,
    pub t2: f64,
    pub ts: f64,
    pub m: f64,
    pub omega_0: f64,
    pub xi_0: f64,
    pub xi_dot_0: f64,
    pub save: bool,

    // derived from `mode`, never read from a file
    #[serde(skip)]
    pub compute_pos: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: String::new(),
            t1: 0.0,
            t2: 10.0,
            ts: 0.01,
            m: 1.0,
            omega_0: PI,
            xi_0: 10.0,
            xi_dot_0: 0.0,
            save: false,
            compute_pos: false,
        }
    }
}

impl Settings {
    /// Resolve the canonical settings from the command-line layer
    ///
    /// A supplied settings file short-circuits every other flag. Otherwise
    /// the flags override the defaults field-by-field. Either way
    /// `compute_pos` is re-derived after the mode is final.
    pub fn resolve(cli: &CliOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = &cli.settings {
            return Self::load(path);
        }

        let mut settings = Settings::default();

        if let Some(mode) = &cli.mode {
            settings.mode = mode.to_lowercase();
        }
        settings.save = cli.save;

        if let Some(spec) = &cli.time {
            let (t1, t2, ts) = parse_time_spec(spec)?;
            settings.t1 = t1;
            settings.t2 = t2;
            // an explicit --time in anim mode pins the substep to the
            // playback frame interval; the supplied third field is dropped
            settings.ts = if settings.mode == "anim" { ANIM_SUBSTEP } else { ts };
        }

        if let Some(spec) = &cli.parameters {
            let (m, omega_0, xi_0, xi_dot_0) = parse_parameter_spec(spec)?;
            settings.m = m;
            settings.omega_0 = omega_0;
            settings.xi_0 = xi_0;
            settings.xi_dot_0 = xi_dot_0;
        }

        settings.compute_pos = derive_compute_pos(&settings.mode);
        Ok(settings)
    }

    /// Load settings from a JSON file, replacing every other layer
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut settings: Settings =
            serde_json::from_reader(reader).map_err(|source| ConfigError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.compute_pos = derive_compute_pos(&settings.mode);
        Ok(settings)
    }

    /// Print the resolved configuration in human-readable form
    /// Informational only; not part of the resolution contract
    pub fn print_summary(&self) {
        println!("Running with the following parameters:");
        println!("    {:<12}{}", "Mass:", self.m);
        println!("    {:<12}{}", "Omega:", self.omega_0);
        println!("    {:<12}{}", "Position:", self.xi_0);
        println!("    {:<12}{}", "Velocity:", self.xi_dot_0);
        println!("    {:<12}{} -> {}", "Timespan:", self.t1, self.t2);
        println!("    {:<12}{}", "Timestep:", self.ts);
    }
}

/// `compute_pos` selects the 3-vector solver output
fn derive_compute_pos(mode: &str) -> bool {
    mode == "3d" || mode == "anim"
}

/// Parse a `t0:t1:ts` triple
pub fn parse_time_spec(spec: &str) -> Result<(f64, f64, f64), ConfigError> {
    match parse_fields(spec)?.as_slice() {
        &[t1, t2, ts] => Ok((t1, t2, ts)),
        _ => Err(ConfigError::TimeArity(spec.to_string())),
    }
}

/// Parse an `m:omega_0:xi_0:xi_dot_0` quadruple
pub fn parse_parameter_spec(spec: &str) -> Result<(f64, f64, f64, f64), ConfigError> {
    match parse_fields(spec)?.as_slice() {
        &[m, omega_0, xi_0, xi_dot_0] => Ok((m, omega_0, xi_0, xi_dot_0)),
        _ => Err(ConfigError::ParameterArity(spec.to_string())),
    }
}

/// Split a colon-separated spec into numbers, failing on the first bad token
fn parse_fields(spec: &str) -> Result<Vec<f64>, ConfigError> {
    spec.split(':')
        .map(|token| {
            token.trim().parse::<f64>().map_err(|_| ConfigError::BadNumber {
                spec: spec.to_string(),
                token: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_spec_parses_triple() {
        let (t1, t2, ts) = parse_time_spec("0:10:0.05").unwrap();
        assert_eq!((t1, t2, ts), (0.0, 10.0, 0.05));
    }

    #[test]
    fn time_spec_rejects_wrong_arity() {
        assert!(matches!(
            parse_time_spec("0:10"),
            Err(ConfigError::TimeArity(_))
        ));
        assert!(matches!(
            parse_time_spec("0:10:0.1:4"),
            Err(ConfigError::TimeArity(_))
        ));
    }

    #[test]
    fn parameter_spec_rejects_bad_token() {
        let err = parse_parameter_spec("1:abc:10:0").unwrap_err();
        assert!(matches!(err, ConfigError::BadNumber { ref token, .. } if token == "abc"));
    }
}
