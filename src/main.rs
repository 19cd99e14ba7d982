//! Progression - main entry point

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use progression::registry::ModelKind;
use progression::server::{run_server, ServerConfig};
use progression::training::{train, TrainOptions};

#[derive(Parser)]
#[command(name = "progression")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Diabetes-progression regression: training CLI and prediction API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and write artifacts
    Train {
        /// Random seed for the train/test split
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Model to train (linear, ridge, random_forest)
        #[arg(long, default_value = "ridge")]
        model: String,

        /// Directory to write artifacts into
        #[arg(long, default_value = "model")]
        artifact_dir: PathBuf,
    },

    /// Serve predictions from the latest trained model
    Serve {
        /// Bind host
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Bind port
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Directory holding the trained artifacts
        #[arg(long, default_value = "model")]
        model_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "progression=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            seed,
            model,
            artifact_dir,
        } => {
            let model: ModelKind = model.parse()?;
            let report = train(&TrainOptions {
                seed,
                model,
                artifact_dir,
            })?;
            println!(
                "{} {} ({}) RMSE: {:.4} (seed={})",
                "[train]".cyan(),
                report.version.bold(),
                report.model,
                report.rmse,
                report.random_state,
            );
        }
        Commands::Serve {
            host,
            port,
            model_dir,
        } => {
            run_server(ServerConfig {
                host,
                port,
                model_dir: model_dir.display().to_string(),
            })
            .await?;
        }
    }

    Ok(())
}
