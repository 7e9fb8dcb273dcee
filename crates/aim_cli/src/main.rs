//! Aim CLI
//!
//! Replay an aim engagement offline and dump per-tick samples.

#[cfg(feature = "cli")]
use aim_core::{turn_speed_regression, AimRecorder, Rotation, SpatialPoint};
#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "aim_cli")]
#[command(about = "Simulate humanized aim plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Aim at a point from a standing viewer and print every tick
    Simulate {
        /// Aim config JSON (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Starting yaw (degrees)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        yaw: f32,

        /// Starting pitch (degrees)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pitch: f32,

        /// Target point "x,y,z"
        #[arg(long, value_parser = aim_cli::parse_point, allow_hyphen_values = true)]
        target: SpatialPoint,

        /// Viewer feet position "x,y,z"
        #[arg(long, value_parser = aim_cli::parse_point, default_value = "0,0,0", allow_hyphen_values = true)]
        position: SpatialPoint,

        /// Eye position "x,y,z" (standing height above the feet when omitted)
        #[arg(long, value_parser = aim_cli::parse_point, allow_hyphen_values = true)]
        eyes: Option<SpatialPoint>,

        /// Tick limit
        #[arg(long, default_value = "100")]
        ticks: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Write samples as JSON lines
        #[arg(long)]
        record: Option<PathBuf>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the regression turn speed for a difference and distance
    Regression {
        /// Remaining rotation difference (degrees)
        #[arg(long)]
        difference: f32,

        /// Distance to the target
        #[arg(long, default_value = "0")]
        distance: f32,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { config, yaw, pitch, target, position, eyes, ticks, seed, record, json } => {
            let config = aim_cli::load_config(config.as_deref())?;
            let mut scene = aim_cli::Scene::standing(Rotation::new(yaw, pitch), position, target);
            if let Some(eyes) = eyes {
                scene.eyes = eyes;
            }
            let mut recorder = AimRecorder::new(record.is_some());

            let report = aim_cli::simulate(&config, &scene, ticks, seed, &mut recorder)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Aim target: {}", report.aim);
                for tick in &report.ticks {
                    println!("{:>4}  {:<10?}  {}", tick.tick, tick.phase, tick.rotation);
                }
                println!(
                    "{} ticks, released: {}, mean turn {:.3}, max turn {:.3}",
                    report.ticks.len(),
                    report.released,
                    report.summary.mean_turn_speed,
                    report.summary.max_turn_speed
                );
            }

            if let Some(path) = record {
                recorder.save(&path)?;
                println!("Samples saved to: {}", path.display());
            }
        }

        Commands::Regression { difference, distance } => {
            println!("{:.4}", turn_speed_regression(difference, distance));
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("aim_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
