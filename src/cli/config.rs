//! TOML configuration file support.
//!
//! Every command-line option can also be given in a config file, which is
//! convenient for runs with many input databases:
//!
//! ```toml
//! # lineread.toml
//! [parameters]
//! databases  = ["01_hit12.par", "01_hit12_b.par"]
//! partitions = ["H2O.pf", "H2O.pf"]
//! dbtypes    = ["hit", "hit"]
//! output     = "H2O.tli"
//! wl_init    = 1.0
//! wl_final   = 5.5
//! ```
//!
//! Command-line values take precedence. A list given on the command line
//! replaces the file's list entirely.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for lineread.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Run parameters.
    #[serde(default)]
    pub parameters: Parameters,
}

/// Settings mirroring the command-line flags.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Parameters {
    /// Line-transition database files.
    #[serde(default)]
    pub databases: Vec<PathBuf>,

    /// Partition-function files, one per database.
    #[serde(default)]
    pub partitions: Vec<PathBuf>,

    /// Database format tags, one per database.
    #[serde(default)]
    pub dbtypes: Vec<String>,

    /// Output TLI file.
    pub output: Option<PathBuf>,

    /// Initial wavelength in microns.
    pub wl_init: Option<f64>,

    /// Final wavelength in microns.
    pub wl_final: Option<f64>,
}

impl Parameters {
    /// Overlay `other` on top of `self`; set values in `other` win.
    pub fn overridden_by(self, other: Parameters) -> Parameters {
        fn pick<T>(base: Vec<T>, over: Vec<T>) -> Vec<T> {
            if over.is_empty() {
                base
            } else {
                over
            }
        }

        Parameters {
            databases: pick(self.databases, other.databases),
            partitions: pick(self.partitions, other.partitions),
            dbtypes: pick(self.dbtypes, other.dbtypes),
            output: other.output.or(self.output),
            wl_init: other.wl_init.or(self.wl_init),
            wl_final: other.wl_final.or(self.wl_final),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
