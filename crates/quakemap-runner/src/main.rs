//! `quakemap` - fetch, parse, and map earthquake catalogs.

use clap::Parser;
use quakemap_runner::{run_pipeline, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quakemap", about = "Earthquake catalog map pipeline")]
struct Args {
    /// Pipeline configuration file.
    #[arg(long, default_value = "quakemap.yaml")]
    config: PathBuf,

    /// Override the configured years (comma separated).
    #[arg(long, value_delimiter = ',')]
    years: Option<Vec<i32>>,

    /// Skip basemap fetching and map rendering.
    #[arg(long)]
    skip_render: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match PipelineConfig::from_yaml_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(years) = args.years {
        config.years = years;
    }
    if args.skip_render {
        config.render = false;
    }

    match run_pipeline(&config) {
        Ok(summary) => {
            println!(
                "{} of {} years loaded, {} rows combined, {} rows in the area of interest",
                summary.years_loaded,
                summary.years_requested,
                summary.rows_combined,
                summary.rows_clipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
