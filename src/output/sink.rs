//! File output for saved figures
//!
//! Renders the resolved run to `figures/fig_<timestamp>.png` for the two
//! static modes, or to `figures/fig_<timestamp>.gif` for the animation.
//! The target directory is assumed to exist already; nothing is created
//! here. The interactive path never enters this module.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use plotters::prelude::*;

use crate::configuration::config::Settings;
use crate::dispatch::RunState;
use crate::simulation::states::NVec3;
use crate::visualization::frame::{self, AxisBounds};

const FIGURE_SIZE: (u32, u32) = (1024, 768);

/// File name for a persisted figure: `figures/fig_<timestamp>.<ext>`
/// The extension follows the dispatched state: an animated image for
/// `Animating`, a still for everything else
pub fn figure_path(state: RunState, now: DateTime<Local>) -> PathBuf {
    let extension = match state {
        RunState::Animating => "gif",
        _ => "png",
    };
    PathBuf::from(format!(
        "figures/fig_{}.{}",
        now.format("%Y-%m-%d_%H_%M_%S"),
        extension
    ))
}

/// Persist the 2D curve of the scalar state over time
pub fn save_2d(t: &[f64], xi: &[f64]) -> Result<()> {
    let path = figure_path(RunState::Rendering2D, Local::now());
    let root = BitMapBackend::new(&path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (t_min, t_max) = span(t);
    let (y_min, y_max) = span(xi);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)?;
    chart.configure_mesh().x_desc("t").y_desc("xi").draw()?;

    chart.draw_series(LineSeries::new(
        t.iter().zip(xi).map(|(&a, &b)| (a, b)),
        &BLUE,
    ))?;

    root.present()
        .with_context(|| format!("cannot write {}", path.display()))?;
    println!("saved figure to {}", path.display());
    Ok(())
}

/// Persist the static 3D parametric curve, insertion order preserved
pub fn save_3d(positions: &[NVec3]) -> Result<()> {
    let path = figure_path(RunState::Rendering3D, Local::now());
    let root = BitMapBackend::new(&path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = span_by(positions, |p| p.x);
    let (y_min, y_max) = span_by(positions, |p| p.y);
    let (z_min, z_max) = span_by(positions, |p| p.z);

    // plotters' vertical chart axis is y; the oscillator's vertical
    // coordinate is z, so the two are swapped when drawing
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_3d(x_min..x_max, z_min..z_max, y_min..y_max)?;
    chart.with_projection(|mut pb| {
        pb.pitch = 0.25;
        pb.yaw = 0.6;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart.configure_axes().draw()?;

    chart.draw_series(LineSeries::new(
        positions.iter().map(|p| (p.x, p.z, p.y)),
        &BLUE,
    ))?;

    root.present()
        .with_context(|| format!("cannot write {}", path.display()))?;
    println!("saved figure to {}", path.display());
    Ok(())
}

/// Render every animation frame into a GIF
///
/// Frame geometry and bounds are the same ones the interactive viewer
/// uses; the per-frame delay is the resolved substep in milliseconds. The
/// whole animation is constructed before the file is complete.
pub fn save_anim(settings: &Settings, t: &[f64], positions: &[NVec3]) -> Result<()> {
    let bounds = AxisBounds::from_positions(positions)?;
    let path = figure_path(RunState::Animating, Local::now());

    let frame_delay_ms = (settings.ts * 1000.0) as u32;
    let root = BitMapBackend::gif(&path, FIGURE_SIZE, frame_delay_ms)?.into_drawing_area();

    // flat trajectories still get a drawable box
    let x_half = bounds.x_max.max(1e-6);
    let y_half = bounds.y_max.max(1e-6);
    let (z_min, z_max) = pad_if_flat(bounds.z_min, bounds.z_max);

    for (i, p) in positions.iter().enumerate() {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_3d(-x_half..x_half, z_min..z_max, -y_half..y_half)?;
        chart.with_projection(|mut pb| {
            pb.pitch = 0.25;
            pb.yaw = 0.6;
            pb.scale = 0.85;
            pb.into_matrix()
        });
        chart.configure_axes().draw()?;

        let vectors =
            frame::glyph_vectors(settings.omega_0, t[i], frame::VERTICAL_MAGNITUDE);
        for v in &vectors {
            chart.draw_series(LineSeries::new(
                [(0.0, 0.0, 0.0), (v.x, v.z, v.y)],
                &BLACK,
            ))?;
        }

        chart.draw_series(std::iter::once(Circle::new(
            (p.x, p.z, p.y),
            4,
            BLUE.filled(),
        )))?;

        root.present()?;
    }

    println!("saved animation to {}", path.display());
    Ok(())
}

/// Data range with a fallback for empty or flat input
fn span(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    pad_if_flat(min, max)
}

fn span_by(positions: &[NVec3], f: impl Fn(&NVec3) -> f64) -> (f64, f64) {
    let projected: Vec<f64> = positions.iter().map(f).collect();
    span(&projected)
}

fn pad_if_flat(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}
