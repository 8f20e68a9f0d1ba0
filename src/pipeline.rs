//! Merge orchestration: drivers → catalog → partition block → transitions.

use std::fmt;
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::catalog::DatabaseCatalog;
use crate::config::MergeConfig;
use crate::drivers::{open_drivers, LineDatabase};
use crate::error::{LineReadError, Result};
use crate::merge::{collect_transitions, pack};
use crate::tli::{DatabaseEntry, TliHeader, TliWriter};

/// Statistics from a completed merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Input files read
    pub input_files: usize,
    /// Unique databases written to the partition block
    pub databases: usize,
    /// Isotopes declared across unique databases
    pub declared_isotopes: usize,
    /// Isotopes with at least one transition in the window
    pub isotopes_with_transitions: usize,
    /// Transitions written
    pub transitions: usize,
    /// Size of the container in bytes
    pub bytes_written: u64,
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} transitions ({} of {} isotopes) from {} database(s) in {} file(s), {} bytes",
            self.transitions,
            self.isotopes_with_transitions,
            self.declared_isotopes,
            self.databases,
            self.input_files,
            self.bytes_written
        )
    }
}

/// Runs the full merge for one configuration
#[derive(Debug, Clone)]
pub struct LineMerger {
    config: MergeConfig,
}

impl LineMerger {
    /// Validate `config`; nothing is opened yet
    pub fn new(config: MergeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Open a driver for every source and write the container to `output`.
    ///
    /// The output file is created only after every driver has been opened
    /// and the isotope numbering has been checked. A failure after that
    /// point leaves a partial file behind.
    pub fn run<P: AsRef<Path>>(&self, output: P) -> Result<MergeStats> {
        let drivers = open_drivers(&self.config.sources)?;
        let catalog = DatabaseCatalog::build(&drivers)?;

        info!(
            "Beginning to write the TLI file: '{}'",
            output.as_ref().display()
        );
        let writer = TliWriter::create(output)?;
        let (stats, _) = self.write(&drivers, &catalog, writer)?;
        Ok(stats)
    }

    /// Merge already constructed drivers into any writer.
    ///
    /// `drivers` must be index-aligned with the configured sources.
    pub fn merge_into<W: Write>(
        &self,
        drivers: &[Box<dyn LineDatabase>],
        sink: W,
    ) -> Result<(MergeStats, W)> {
        let catalog = DatabaseCatalog::build(drivers)?;
        self.write(drivers, &catalog, TliWriter::new(sink))
    }

    fn write<W: Write>(
        &self,
        drivers: &[Box<dyn LineDatabase>],
        catalog: &DatabaseCatalog,
        mut writer: TliWriter<W>,
    ) -> Result<(MergeStats, W)> {
        if drivers.len() != self.config.sources.len() {
            return Err(LineReadError::config(format!(
                "{} drivers for {} configured sources",
                drivers.len(),
                self.config.sources.len()
            )));
        }

        writer.write_header(&TliHeader {
            window: self.config.window,
            num_databases: catalog.len(),
        })?;
        info!(
            "There are {} databases in {} files",
            catalog.len(),
            drivers.len()
        );

        info!("Reading and writing partition function info");
        for (idb, &source) in catalog.first_sources().iter().enumerate() {
            let driver = &*drivers[source];
            let table = driver.partition_function()?;
            debug!(
                "Database ({}/{}): '{}' ({} molecule), {} temperatures, {} isotopes",
                idb + 1,
                catalog.len(),
                driver.name(),
                driver.molecule(),
                table.temperatures.len(),
                driver.isotopes().len()
            );
            writer.write_database(&DatabaseEntry::from_driver(driver, &table))?;
        }

        info!("Reading transitions");
        let records = collect_transitions(
            drivers,
            &self.config.sources,
            catalog,
            &self.config.window,
        )?;

        let block = pack(records);
        debug!("Transitions per isotope: {:?}", block.per_isotope);
        writer.write_transitions(&block)?;

        let written = writer.finish()?;
        let stats = MergeStats {
            input_files: drivers.len(),
            databases: catalog.len(),
            declared_isotopes: catalog.total_isotopes(),
            isotopes_with_transitions: block.isotopes_with_transitions(),
            transitions: block.len(),
            bytes_written: written.bytes_written,
        };
        info!("{}", stats);
        Ok((stats, written.inner))
    }
}
