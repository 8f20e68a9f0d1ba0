//! Run configuration for a merge: the input triples and the wavelength window.

use std::path::{Path, PathBuf};

use crate::error::{LineReadError, Result};

/// Wavelength window (microns) applied to every driver read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthWindow {
    /// Lower bound in microns (inclusive)
    pub min: f64,
    /// Upper bound in microns (inclusive)
    pub max: f64,
}

impl WavelengthWindow {
    /// Create a window, rejecting non-finite or inverted bounds
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(LineReadError::config(format!(
                "wavelength bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(LineReadError::config(format!(
                "initial wavelength ({min} um) is greater than final wavelength ({max} um)"
            )));
        }
        Ok(Self { min, max })
    }

    /// Whether `wavelength` (microns) falls inside the window
    #[inline]
    pub fn contains(&self, wavelength: f64) -> bool {
        wavelength >= self.min && wavelength <= self.max
    }

    /// Window expressed as a wavenumber range in cm^-1, `(low, high)`.
    ///
    /// A zero lower wavelength maps to an infinite upper wavenumber.
    pub fn wavenumber_range(&self) -> (f64, f64) {
        let low = if self.max > 0.0 { 1e4 / self.max } else { f64::INFINITY };
        let high = if self.min > 0.0 { 1e4 / self.min } else { f64::INFINITY };
        (low, high)
    }
}

impl Default for WavelengthWindow {
    fn default() -> Self {
        Self { min: 1.0, max: 2.0 }
    }
}

/// One input line-list database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSource {
    /// Line-transition file
    pub path: PathBuf,
    /// Auxiliary partition-function file
    pub partition_path: PathBuf,
    /// Format tag selecting the driver (e.g. `hit`, `ps`)
    pub format: String,
}

impl DatabaseSource {
    /// Create a source from its three components
    pub fn new(
        path: impl AsRef<Path>,
        partition_path: impl AsRef<Path>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            partition_path: partition_path.as_ref().to_path_buf(),
            format: format.into(),
        }
    }
}

/// Everything a merge run needs besides the output stream
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Inputs in command-line order
    pub sources: Vec<DatabaseSource>,
    /// Wavelength window in microns
    pub window: WavelengthWindow,
}

impl MergeConfig {
    /// Build a config from the three parallel option lists.
    ///
    /// The lists must have equal, non-zero length and the window must be
    /// valid; otherwise a [`LineReadError::Config`] is returned before any
    /// file is touched.
    pub fn from_lists(
        databases: &[PathBuf],
        partitions: &[PathBuf],
        formats: &[String],
        wl_init: f64,
        wl_final: f64,
    ) -> Result<Self> {
        if databases.is_empty() {
            return Err(LineReadError::config("no input databases were given"));
        }
        if databases.len() != partitions.len() || databases.len() != formats.len() {
            return Err(LineReadError::config(format!(
                "mismatched option lists: {} database(s), {} partition file(s), {} type(s)",
                databases.len(),
                partitions.len(),
                formats.len()
            )));
        }

        let window = WavelengthWindow::new(wl_init, wl_final)?;
        let sources = databases
            .iter()
            .zip(partitions)
            .zip(formats)
            .map(|((db, pf), tag)| DatabaseSource::new(db, pf, tag.clone()))
            .collect();

        Ok(Self { sources, window })
    }

    /// Re-check the invariants of a config that was built by hand
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(LineReadError::config("no input databases were given"));
        }
        WavelengthWindow::new(self.window.min, self.window.max)?;
        Ok(())
    }
}
