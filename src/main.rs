use oscvis::{compute, dispatch, CliOverrides, OscillatorParams, Settings};

use clap::Parser;
use anyhow::Result;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Renders the time evolution of a single-DOF oscillator")]
struct Args {
    /// what mode to run in; 3D, anim or 2D
    #[arg(short, long)]
    mode: Option<String>,

    /// whether or not to save the figure
    #[arg(short, long)]
    save: bool,

    /// uses a supplied json-file as parameters, ignoring all other flags
    #[arg(short = 'S', long)]
    settings: Option<PathBuf>,

    /// timespan and resolution on the form t0:t1:ts
    #[arg(short, long)]
    time: Option<String>,

    /// physical parameters on the form m:omega_0:xi_0:xi_dot_0
    #[arg(short, long)]
    parameters: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let cli = CliOverrides {
        mode: args.mode,
        save: args.save,
        settings: args.settings,
        time: args.time,
        parameters: args.parameters,
    };
    let settings = Settings::resolve(&cli)?;
    settings.print_summary();

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

    dispatch::run(&settings, trajectory)
}
