//! # Line-database drivers
//!
//! Every supported line-list format implements [`LineDatabase`], the
//! capability set the merge pipeline relies on: identity (`name`,
//! `molecule`), isotope metadata, the partition-function table and a
//! windowed transition read.
//!
//! Drivers are selected by format tag through [`open_driver`]:
//!
//! | Tag   | Driver                         | Line-list encoding                  |
//! |-------|--------------------------------|-------------------------------------|
//! | `hit` | [`HitranDriver`]               | HITRAN/HITEMP 160-char text records |
//! | `ps`  | [`PartridgeSchwenkeDriver`]    | 8-byte big-endian binary records    |
//!
//! Both drivers take isotope metadata and partition functions from the
//! text format parsed by [`PartitionFile`]. [`MemoryDatabase`] serves
//! callers that already hold their data in memory; it has no tag.

mod error;
mod hitran;
mod memory;
mod pands;
mod partition_file;

#[cfg(test)]
mod tests;

use std::fmt;

pub use error::DriverError;
pub use hitran::{parse_record, HitranDriver, HitranRecord};
pub use memory::MemoryDatabase;
pub use pands::PartridgeSchwenkeDriver;
pub use partition_file::PartitionFile;

use crate::config::{DatabaseSource, WavelengthWindow};
use crate::error::{LineReadError, Result};

/// Temperature grid plus a partition-function table (isotopes × temperatures)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionTable {
    /// Temperature samples in Kelvin, strictly increasing
    pub temperatures: Vec<f64>,
    /// One row per isotope, each sampled on `temperatures`
    pub values: Vec<Vec<f64>>,
}

impl PartitionTable {
    /// Number of isotope rows
    pub fn isotope_count(&self) -> usize {
        self.values.len()
    }
}

/// Index-aligned transition columns returned by a single driver read.
///
/// `isotope` holds ids local to the driver's own isotope list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionColumns {
    /// Wavelength in microns
    pub wavelength: Vec<f64>,
    /// Weighted oscillator strength
    pub gf: Vec<f64>,
    /// Lower-state energy in cm^-1
    pub elow: Vec<f64>,
    /// Local isotope index
    pub isotope: Vec<u16>,
}

impl TransitionColumns {
    /// Create empty columns with room for `capacity` transitions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            wavelength: Vec::with_capacity(capacity),
            gf: Vec::with_capacity(capacity),
            elow: Vec::with_capacity(capacity),
            isotope: Vec::with_capacity(capacity),
        }
    }

    /// Append one transition
    #[inline]
    pub fn push(&mut self, wavelength: f64, gf: f64, elow: f64, isotope: u16) {
        self.wavelength.push(wavelength);
        self.gf.push(gf);
        self.elow.push(elow);
        self.isotope.push(isotope);
    }

    /// Number of transitions, taken from the wavelength column
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether no transitions were read
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Check that all four columns have the same length
    pub fn validate(&self) -> std::result::Result<(), String> {
        let n = self.wavelength.len();
        if self.gf.len() != n || self.elow.len() != n || self.isotope.len() != n {
            return Err(format!(
                "column lengths differ: wavelength={}, gf={}, elow={}, isotope={}",
                n,
                self.gf.len(),
                self.elow.len(),
                self.isotope.len()
            ));
        }
        Ok(())
    }
}

/// Capability set shared by every line-database format
pub trait LineDatabase {
    /// Database name; inputs sharing a name are the same logical database
    fn name(&self) -> &str;

    /// Molecule (or atom) the database describes
    fn molecule(&self) -> &str;

    /// Isotope names, in local-id order
    fn isotopes(&self) -> &[String];

    /// Isotope masses in atomic mass units, index-aligned with [`isotopes`](Self::isotopes)
    fn mass(&self) -> &[f64];

    /// Isotopic abundance ratios, index-aligned with [`isotopes`](Self::isotopes)
    fn isoratio(&self) -> &[f64];

    /// Temperature grid and partition-function table
    fn partition_function(&self) -> std::result::Result<PartitionTable, DriverError>;

    /// Read every transition inside `window`, tagged with local isotope ids
    fn read_transitions(
        &self,
        window: &WavelengthWindow,
    ) -> std::result::Result<TransitionColumns, DriverError>;
}

/// Supported line-list formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFormat {
    /// HITRAN / HITEMP fixed-width text
    Hitran,
    /// Partridge & Schwenke (1997) H2O binary
    PartridgeSchwenke,
}

impl DatabaseFormat {
    /// Resolve a (case-insensitive) format tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hit" => Some(Self::Hitran),
            "ps" => Some(Self::PartridgeSchwenke),
            _ => None,
        }
    }

    /// Canonical tag for this format
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Hitran => "hit",
            Self::PartridgeSchwenke => "ps",
        }
    }
}

impl fmt::Display for DatabaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Construct the driver for one source.
///
/// `index` is the 0-based input position, used in diagnostics.
pub fn open_driver(index: usize, source: &DatabaseSource) -> Result<Box<dyn LineDatabase>> {
    let format =
        DatabaseFormat::from_tag(&source.format).ok_or_else(|| LineReadError::UnknownFormat {
            index: index + 1,
            tag: source.format.clone(),
        })?;

    let driver: Box<dyn LineDatabase> = match format {
        DatabaseFormat::Hitran => Box::new(HitranDriver::open(&source.path, &source.partition_path)?),
        DatabaseFormat::PartridgeSchwenke => Box::new(PartridgeSchwenkeDriver::open(
            &source.path,
            &source.partition_path,
        )?),
    };

    log::debug!(
        "File {}, database name: '{}' ({} driver)",
        index + 1,
        driver.name(),
        format
    );
    Ok(driver)
}

/// Construct one driver per source, preserving input order.
///
/// Every tag is resolved before any driver is opened, so an unknown tag is
/// reported without touching the file system.
pub fn open_drivers(sources: &[DatabaseSource]) -> Result<Vec<Box<dyn LineDatabase>>> {
    for (index, source) in sources.iter().enumerate() {
        if DatabaseFormat::from_tag(&source.format).is_none() {
            return Err(LineReadError::UnknownFormat {
                index: index + 1,
                tag: source.format.clone(),
            });
        }
    }

    sources
        .iter()
        .enumerate()
        .map(|(index, source)| open_driver(index, source))
        .collect()
}
