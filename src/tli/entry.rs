use std::cmp::Ordering;

use crate::config::WavelengthWindow;
use crate::drivers::{LineDatabase, PartitionTable};

use super::TliError;

/// Largest value an int16 count or length field can hold
pub(crate) const I16_MAX: usize = i16::MAX as usize;

/// Container header contents (versions are fixed by the crate)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TliHeader {
    /// Wavelength window the transitions were selected with
    pub window: WavelengthWindow,
    /// Number of unique databases in the partition block
    pub num_databases: usize,
}

/// Borrowed view of one partition-block entry
#[derive(Debug, Clone, Copy)]
pub struct DatabaseEntry<'a> {
    /// Database name
    pub name: &'a str,
    /// Molecule name
    pub molecule: &'a str,
    /// Isotope names
    pub isotopes: &'a [String],
    /// Isotope masses (amu)
    pub mass: &'a [f64],
    /// Isotopic abundance ratios
    pub ratio: &'a [f64],
    /// Temperature grid and per-isotope partition functions
    pub table: &'a PartitionTable,
}

impl<'a> DatabaseEntry<'a> {
    /// Assemble an entry from a driver and the table its `partition_function` returned
    pub fn from_driver(driver: &'a dyn LineDatabase, table: &'a PartitionTable) -> Self {
        Self {
            name: driver.name(),
            molecule: driver.molecule(),
            isotopes: driver.isotopes(),
            mass: driver.mass(),
            ratio: driver.isoratio(),
            table,
        }
    }

    /// Check every count and length the partition block depends on
    pub fn validate(&self) -> Result<(), TliError> {
        let n_iso = self.isotopes.len();
        let n_temp = self.table.temperatures.len();

        if n_iso == 0 {
            return Err(self.malformed("no isotopes".to_string()));
        }
        if n_temp == 0 {
            return Err(self.malformed("empty temperature grid".to_string()));
        }
        if let Some(i) = self
            .table
            .temperatures
            .windows(2)
            .position(|pair| pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less))
        {
            return Err(self.malformed(format!(
                "temperature grid is not strictly increasing at sample {}",
                i + 1
            )));
        }
        if self.table.values.len() != n_iso {
            return Err(self.malformed(format!(
                "{} partition-function rows for {} isotopes",
                self.table.values.len(),
                n_iso
            )));
        }
        if self.mass.len() != n_iso || self.ratio.len() != n_iso {
            return Err(self.malformed(format!(
                "{} isotopes but {} masses and {} ratios",
                n_iso,
                self.mass.len(),
                self.ratio.len()
            )));
        }
        if let Some((j, row)) = self
            .table
            .values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_temp)
        {
            return Err(self.malformed(format!(
                "isotope '{}' has {} partition-function samples, expected {}",
                self.isotopes[j],
                row.len(),
                n_temp
            )));
        }

        self.check_width("database name length", self.name.len())?;
        self.check_width("molecule name length", self.molecule.len())?;
        self.check_width("temperature count", n_temp)?;
        self.check_width("isotope count", n_iso)?;
        for iso in self.isotopes {
            self.check_width("isotope name length", iso.len())?;
        }
        Ok(())
    }

    /// Number of bytes this entry occupies in the container
    pub fn encoded_len(&self) -> u64 {
        let n_temp = self.table.temperatures.len() as u64;
        let header = 2 + self.name.len() as u64 + 2 + self.molecule.len() as u64 + 2 + 2 + 8 * n_temp;
        let isotopes: u64 = self
            .isotopes
            .iter()
            .map(|iso| 2 + iso.len() as u64 + 8 + 8 + 8 * n_temp)
            .sum();
        header + isotopes
    }

    fn check_width(&self, field: &str, value: usize) -> Result<(), TliError> {
        if value > I16_MAX {
            return Err(self.malformed(format!("{field} {value} exceeds {I16_MAX}")));
        }
        Ok(())
    }

    fn malformed(&self, reason: String) -> TliError {
        TliError::MalformedPartition {
            database: self.name.to_string(),
            reason,
        }
    }
}
