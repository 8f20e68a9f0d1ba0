//! In-memory line database for programmatic merges and tests.

use super::{DriverError, LineDatabase, PartitionTable, TransitionColumns};
use crate::config::WavelengthWindow;

/// A line database whose contents are supplied directly by the caller.
///
/// # Example
///
/// ```
/// use lineread::drivers::{LineDatabase, MemoryDatabase, TransitionColumns};
///
/// let mut lines = TransitionColumns::default();
/// lines.push(1.5, 0.01, 120.0, 0);
///
/// let db = MemoryDatabase::new("Demo", "CO")
///     .with_isotopes(vec!["26".into()], vec![27.995], vec![0.9865])
///     .with_partition_table(vec![100.0, 200.0], vec![vec![36.4, 72.5]])
///     .with_transitions(lines);
/// assert_eq!(db.name(), "Demo");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    name: String,
    molecule: String,
    isotopes: Vec<String>,
    mass: Vec<f64>,
    ratio: Vec<f64>,
    table: PartitionTable,
    transitions: TransitionColumns,
}

impl MemoryDatabase {
    /// Create an empty database
    pub fn new(name: impl Into<String>, molecule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            molecule: molecule.into(),
            ..Default::default()
        }
    }

    /// Set isotope names, masses and abundance ratios
    pub fn with_isotopes(mut self, isotopes: Vec<String>, mass: Vec<f64>, ratio: Vec<f64>) -> Self {
        self.isotopes = isotopes;
        self.mass = mass;
        self.ratio = ratio;
        self
    }

    /// Set the temperature grid and per-isotope partition functions
    pub fn with_partition_table(mut self, temperatures: Vec<f64>, values: Vec<Vec<f64>>) -> Self {
        self.table = PartitionTable {
            temperatures,
            values,
        };
        self
    }

    /// Set the transitions returned by reads (filtered by the read window)
    pub fn with_transitions(mut self, transitions: TransitionColumns) -> Self {
        self.transitions = transitions;
        self
    }
}

impl LineDatabase for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn molecule(&self) -> &str {
        &self.molecule
    }

    fn isotopes(&self) -> &[String] {
        &self.isotopes
    }

    fn mass(&self) -> &[f64] {
        &self.mass
    }

    fn isoratio(&self) -> &[f64] {
        &self.ratio
    }

    fn partition_function(&self) -> Result<PartitionTable, DriverError> {
        Ok(self.table.clone())
    }

    fn read_transitions(&self, window: &WavelengthWindow) -> Result<TransitionColumns, DriverError> {
        let all = &self.transitions;
        let mut columns = TransitionColumns::with_capacity(all.len());
        let rows = all
            .wavelength
            .iter()
            .zip(&all.gf)
            .zip(&all.elow)
            .zip(&all.isotope);
        for (((&wavelength, &gf), &elow), &isotope) in rows {
            if window.contains(wavelength) {
                columns.push(wavelength, gf, elow, isotope);
            }
        }
        Ok(columns)
    }
}
