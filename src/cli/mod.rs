use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use lineread::config::MergeConfig;
use lineread::pipeline::LineMerger;

mod config;

use config::{Config, Parameters};

const DEFAULT_OUTPUT: &str = "output.tli";
const DEFAULT_WL_INIT: f64 = 1.0;
const DEFAULT_WL_FINAL: f64 = 2.0;

/// lineread - merge spectral line-list databases into a TLI file
#[derive(Parser)]
#[command(name = "lineread")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load settings from a TOML config file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output TLI file [default: output.tli]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Line-transition database file (repeat for several files)
    #[arg(short = 'd', long = "database", value_name = "FILE")]
    databases: Vec<PathBuf>,

    /// Partition-function file, one per database
    #[arg(short = 'p', long = "partition", value_name = "FILE")]
    partitions: Vec<PathBuf>,

    /// Database type, one per database: 'hit' (HITRAN/HITEMP) or 'ps' (Partridge & Schwenke)
    #[arg(short = 't', long = "dbtype", value_name = "TYPE")]
    dbtypes: Vec<String>,

    /// Initial wavelength in microns [default: 1.0]
    #[arg(short = 'i', long = "wl-init", value_name = "MICRONS", allow_negative_numbers = true)]
    wl_init: Option<f64>,

    /// Final wavelength in microns [default: 2.0]
    #[arg(short = 'f', long = "wl-final", value_name = "MICRONS", allow_negative_numbers = true)]
    wl_final: Option<f64>,
}

impl Cli {
    /// Log filter level implied by `-v`/`-q`
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    fn into_parameters(self) -> Parameters {
        Parameters {
            databases: self.databases,
            partitions: self.partitions,
            dbtypes: self.dbtypes,
            output: self.output,
            wl_init: self.wl_init,
            wl_final: self.wl_final,
        }
    }
}

/// Install env_logger; `RUST_LOG` overrides `log_level`
pub fn init_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Resolve file and command-line settings into a run configuration
fn resolve(cli: Cli) -> Result<(MergeConfig, PathBuf)> {
    let file_params = match &cli.config {
        Some(path) => Config::from_file(path)?.parameters,
        None => Parameters::default(),
    };
    let params = file_params.overridden_by(cli.into_parameters());

    let merge = MergeConfig::from_lists(
        &params.databases,
        &params.partitions,
        &params.dbtypes,
        params.wl_init.unwrap_or(DEFAULT_WL_INIT),
        params.wl_final.unwrap_or(DEFAULT_WL_FINAL),
    )?;
    let output = params
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    Ok((merge, output))
}

/// Merge the configured databases into a TLI file
pub fn run(cli: Cli) -> Result<()> {
    let (config, output) = resolve(cli)?;

    info!("lineread - line lists to TLI");
    info!("=============================");
    for (i, source) in config.sources.iter().enumerate() {
        info!(
            "Input {}: {} ({}; partition file {})",
            i + 1,
            source.path.display(),
            source.format,
            source.partition_path.display()
        );
    }
    info!("Output: {}", output.display());
    info!(
        "Wavelength range: [{}, {}] um",
        config.window.min, config.window.max
    );

    let merger = LineMerger::new(config)?;
    let stats = merger
        .run(&output)
        .with_context(|| format!("Failed to write TLI file {}", output.display()))?;

    info!("Done.");
    info!("  Databases: {}", stats.databases);
    info!("  Transitions: {}", stats.transitions);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        stats.bytes_written,
        stats.bytes_written as f64 / 1024.0 / 1024.0
    );
    Ok(())
}
