//! Database deduplication and global isotope numbering.
//!
//! Several input files may name the same logical database (for example a
//! HITEMP list split across wavelength chunks). The catalog keeps the unique
//! names in first-seen order and the prefix sum `acum` of isotope counts,
//! so that a local isotope id `j` of unique database `d` maps to the
//! global id `acum[d] + j`.

use log::debug;

use crate::drivers::LineDatabase;
use crate::error::{LineReadError, Result};

/// Most isotopes a container can number with its int16 isotope ids
pub const MAX_ISOTOPES: usize = i16::MAX as usize + 1;

/// Read-only deduplication result shared by the later merge phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseCatalog {
    names: Vec<String>,
    first_source: Vec<usize>,
    resolved: Vec<usize>,
    acum: Vec<usize>,
}

impl DatabaseCatalog {
    /// Deduplicate `drivers` by name and number their isotopes.
    ///
    /// Fails with [`LineReadError::Config`] if the total isotope count would
    /// overflow the container's int16 isotope id.
    pub fn build(drivers: &[Box<dyn LineDatabase>]) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut first_source = Vec::new();
        let mut resolved = Vec::with_capacity(drivers.len());
        let mut acum = vec![0usize];

        for (i, driver) in drivers.iter().enumerate() {
            match names.iter().position(|name| name == driver.name()) {
                Some(unique) => {
                    debug!(
                        "File {} repeats database '{}', partition data omitted",
                        i + 1,
                        driver.name()
                    );
                    resolved.push(unique);
                }
                None => {
                    resolved.push(names.len());
                    names.push(driver.name().to_string());
                    first_source.push(i);
                    let total = acum[acum.len() - 1] + driver.isotopes().len();
                    acum.push(total);
                }
            }
        }

        let total = acum[acum.len() - 1];
        if total > MAX_ISOTOPES {
            return Err(LineReadError::config(format!(
                "{total} isotopes across all databases exceed the container limit of {MAX_ISOTOPES}"
            )));
        }

        debug!("Cumulative number of isotopes per database: {:?}", acum);

        Ok(Self {
            names,
            first_source,
            resolved,
            acum,
        })
    }

    /// Unique database names in first-seen order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of unique databases
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog holds no databases
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of input sources the catalog was built from
    pub fn source_count(&self) -> usize {
        self.resolved.len()
    }

    /// Prefix sum of isotope counts; `acum()[0] == 0`, length `len() + 1`
    pub fn acum(&self) -> &[usize] {
        &self.acum
    }

    /// Total isotopes declared across unique databases
    pub fn total_isotopes(&self) -> usize {
        self.acum[self.acum.len() - 1]
    }

    /// Unique-database index that source `source` resolves to
    pub fn database_index(&self, source: usize) -> usize {
        self.resolved[source]
    }

    /// Whether source `source` repeats an earlier database name
    pub fn is_duplicate(&self, source: usize) -> bool {
        self.first_source[self.resolved[source]] != source
    }

    /// Source indices that introduce each unique database, in order
    pub fn first_sources(&self) -> &[usize] {
        &self.first_source
    }

    /// Global id offset applied to every local isotope id of `source`
    pub fn offset(&self, source: usize) -> usize {
        self.acum[self.resolved[source]]
    }

    /// Number of isotopes declared by the database `source` resolves to
    pub fn isotope_count(&self, source: usize) -> usize {
        let unique = self.resolved[source];
        self.acum[unique + 1] - self.acum[unique]
    }

    /// Global isotope id of local isotope `local` in `source`
    pub fn global_id(&self, source: usize, local: usize) -> usize {
        self.offset(source) + local
    }
}
