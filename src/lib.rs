//! # lineread - Spectral Line-List Merger
//!
//! `lineread` combines molecular and atomic line-transition databases in
//! different source formats into one TLI ("transit line information")
//! container, the binary input of the transit radiative-transfer code.
//!
//! ## Key Features
//!
//! - **Pluggable drivers**: every source format implements [`drivers::LineDatabase`];
//!   HITRAN/HITEMP text and Partridge & Schwenke binary lists are built in.
//!
//! - **Database deduplication**: inputs that name the same database (for
//!   example a line list split into wavelength chunks) share one partition
//!   entry and one isotope numbering.
//!
//! - **Global isotope ids**: isotopes of all databases are numbered
//!   contiguously in first-seen order.
//!
//! - **Canonical ordering**: transitions are sorted by isotope id, then by
//!   wavelength, with a total order on ties.
//!
//! - **Self-describing byte order**: the container is written in native
//!   endianness behind a magic number that identifies it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lineread::config::{DatabaseSource, MergeConfig, WavelengthWindow};
//! use lineread::pipeline::LineMerger;
//!
//! let config = MergeConfig {
//!     sources: vec![
//!         DatabaseSource::new("01_hit12.par", "H2O.pf", "hit"),
//!         DatabaseSource::new("05_hit12.par", "CO.pf", "hit"),
//!     ],
//!     window: WavelengthWindow::new(1.0, 5.0)?,
//! };
//!
//! let stats = LineMerger::new(config)?.run("output.tli")?;
//! println!("{}", stats);
//! # Ok::<(), lineread::LineReadError>(())
//! ```
//!
//! ## Merging In-Memory Data
//!
//! ```rust
//! use lineread::config::{DatabaseSource, MergeConfig, WavelengthWindow};
//! use lineread::drivers::{LineDatabase, MemoryDatabase, TransitionColumns};
//! use lineread::pipeline::LineMerger;
//!
//! let mut lines = TransitionColumns::default();
//! lines.push(2.35, 1.2e-5, 0.0, 0);
//! lines.push(2.30, 3.4e-6, 11.5, 0);
//!
//! let co: Box<dyn LineDatabase> = Box::new(
//!     MemoryDatabase::new("HITRAN CO", "CO")
//!         .with_isotopes(vec!["26".into()], vec![27.995], vec![0.9865])
//!         .with_partition_table(vec![100.0, 1000.0], vec![vec![36.4, 362.4]])
//!         .with_transitions(lines),
//! );
//!
//! let config = MergeConfig {
//!     sources: vec![DatabaseSource::new("co.par", "CO.pf", "hit")],
//!     window: WavelengthWindow::new(2.0, 2.5)?,
//! };
//! let (stats, bytes) = LineMerger::new(config)?.merge_into(&[co], Vec::new())?;
//! assert_eq!(stats.transitions, 2);
//! assert_eq!(bytes.len() as u64, stats.bytes_written);
//! # Ok::<(), lineread::LineReadError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`config`]: input triples and the wavelength window
//! - [`drivers`]: the driver trait, the format registry and built-in drivers
//! - [`catalog`]: database deduplication and global isotope numbering
//! - [`merge`]: transition collection, sorting and packing
//! - [`tli`]: container framing and the phase-ordered writer
//! - [`pipeline`]: the end-to-end merge
//!
//! ## Container Layout
//!
//! See [`tli`] for the field-by-field layout of the header, partition block
//! and transition block.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod drivers;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod tli;

pub use error::{LineReadError, Result};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::catalog::DatabaseCatalog;
    pub use crate::config::{DatabaseSource, MergeConfig, WavelengthWindow};
    pub use crate::drivers::{
        open_driver, open_drivers, DatabaseFormat, DriverError, HitranDriver, LineDatabase,
        MemoryDatabase, PartitionFile, PartitionTable, PartridgeSchwenkeDriver, TransitionColumns,
    };
    pub use crate::error::LineReadError;
    pub use crate::merge::{TransitionBlock, TransitionRecord};
    pub use crate::pipeline::{LineMerger, MergeStats};
    pub use crate::tli::{TliError, TliWriter, TLI_VERSION};
}
