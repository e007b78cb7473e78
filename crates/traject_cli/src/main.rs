//! TRAJECT CLI
//!
//! Operator tooling for particle checkpoint debugging: inspect a
//! checkpoint's decoded contents, or preview the random stream seed a
//! replay would reconstruct for it.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::Result;
use traject_core::{EnergyMode, SimulationProgress};
use traject_replay::ParticleSeed;
use traject_snapshot::{JsonDataset, SnapshotDecoder};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "traject")]
#[command(about = "TRAJECT - Particle checkpoint replay tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a checkpoint and print the particle and run context
    Inspect {
        /// Path to the checkpoint file
        #[arg(short, long)]
        snapshot: String,
    },
    /// Reconstruct the replay seed for a checkpoint without transporting
    Seed {
        /// Path to the checkpoint file
        #[arg(short, long)]
        snapshot: String,
        /// Generations completed before the current batch
        #[arg(long, default_value_t = 0)]
        total_generations: u64,
        /// Overall generation index across all batches
        #[arg(long, default_value_t = 1)]
        overall_generation: u64,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { snapshot } => {
            let dataset = JsonDataset::open(&snapshot)?;
            let decoder = SnapshotDecoder::new(EnergyMode::Continuous);
            let (particle, context) = decoder.decode(&dataset)?;

            println!("Checkpoint: {}", snapshot);
            println!("Run mode:   {}", context.run_mode);
            println!(
                "Progress:   batch {} generation {} ({} per batch, {} particles)",
                context.current_batch,
                context.current_generation,
                context.generations_per_batch,
                context.n_particles
            );
            println!("Particle:   {} (id {})", particle.kind, particle.id);
            println!("Weight:     {}", particle.wgt);
            println!("Energy:     {} eV", particle.energy);
            println!("Position:   {}", particle.r);
            println!("Direction:  {}", particle.u);
            Ok(())
        }
        Commands::Seed {
            snapshot,
            total_generations,
            overall_generation,
        } => {
            let dataset = JsonDataset::open(&snapshot)?;
            let decoder = SnapshotDecoder::new(EnergyMode::Continuous);
            let (particle, context) = decoder.decode(&dataset)?;

            let progress = SimulationProgress::new(total_generations, overall_generation);
            let seed = ParticleSeed::reconstruct(
                context.run_mode,
                &progress,
                context.n_particles,
                particle.id,
            );

            println!(
                "Seed for particle {} ({} mode): {}",
                particle.id, context.run_mode, seed
            );
            Ok(())
        }
    }
}
