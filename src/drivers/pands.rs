//! Partridge & Schwenke (1997) H2O line-list driver.
//!
//! The line list is a flat binary file of 8-byte big-endian records sorted
//! by increasing wavenumber:
//!
//! ```text
//! iw   i32   wavenumber index: nu = exp(iw * ln(1 + 1/2e6)) cm^-1
//! ielo i16   |ielo| = lower-state energy in cm^-1
//! igf  i16   |igf|  = 1000 * log10(gf) + 16384
//! ```
//!
//! The isotope is packed into the signs: bit 0 is `ielo < 0`, bit 1 is
//! `igf < 0`, giving local ids 0..=3.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, info};

use super::{DriverError, LineDatabase, PartitionFile, PartitionTable, TransitionColumns};
use crate::config::WavelengthWindow;

/// Size in bytes of one binary record
pub const RECORD_SIZE: u64 = 8;

/// Default database name when the partition file does not set one
pub const DEFAULT_NAME: &str = "Partridge & Schwenke (1997)";

/// Logarithmic spacing of the wavenumber grid
fn ratio_log() -> f64 {
    (1.0 + 1.0 / 2e6_f64).ln()
}

/// Decoded fields of one binary record
#[derive(Debug, Clone, Copy, PartialEq)]
struct PandsRecord {
    wavenumber: f64,
    elow: f64,
    gf: f64,
    isotope: u16,
}

impl PandsRecord {
    fn decode(iw: i32, ielo: i16, igf: i16) -> Self {
        let isotope = (u16::from(igf < 0) << 1) | u16::from(ielo < 0);
        let igf_abs = f64::from(igf.unsigned_abs());
        Self {
            wavenumber: (f64::from(iw) * ratio_log()).exp(),
            elow: f64::from(ielo.unsigned_abs()),
            gf: 10f64.powf((igf_abs - 16384.0) * 0.001),
            isotope,
        }
    }
}

/// Driver for the Partridge & Schwenke binary H2O line list
#[derive(Debug, Clone)]
pub struct PartridgeSchwenkeDriver {
    path: PathBuf,
    name: String,
    partition: PartitionFile,
}

impl PartridgeSchwenkeDriver {
    /// Open a binary line list and load its partition-function file
    pub fn open(path: &Path, partition_path: &Path) -> Result<Self, DriverError> {
        if !path.is_file() {
            return Err(DriverError::InvalidFile {
                path: path.to_path_buf(),
                message: "line-list file does not exist".to_string(),
            });
        }
        let partition = PartitionFile::open(partition_path)?;
        Ok(Self::with_partition(path, partition))
    }

    /// Build a driver from an already parsed partition file
    pub fn with_partition(path: &Path, partition: PartitionFile) -> Self {
        let name = partition
            .database
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        Self {
            path: path.to_path_buf(),
            name,
            partition,
        }
    }
}

impl LineDatabase for PartridgeSchwenkeDriver {
    fn name(&self) -> &str {
        &self.name
    }

    fn molecule(&self) -> &str {
        &self.partition.molecule
    }

    fn isotopes(&self) -> &[String] {
        &self.partition.isotopes
    }

    fn mass(&self) -> &[f64] {
        &self.partition.mass
    }

    fn isoratio(&self) -> &[f64] {
        &self.partition.ratio
    }

    fn partition_function(&self) -> Result<PartitionTable, DriverError> {
        Ok(self.partition.table())
    }

    fn read_transitions(&self, window: &WavelengthWindow) -> Result<TransitionColumns, DriverError> {
        info!("Reading Partridge & Schwenke file '{}'", self.path.display());

        let file = File::open(&self.path).map_err(|e| DriverError::io(&self.path, e))?;
        let size = file
            .metadata()
            .map_err(|e| DriverError::io(&self.path, e))?
            .len();
        if size % RECORD_SIZE != 0 {
            return Err(DriverError::InvalidFile {
                path: self.path.clone(),
                message: format!("file size {size} is not a multiple of {RECORD_SIZE}-byte records"),
            });
        }
        let n_records = size / RECORD_SIZE;

        let (wn_low, wn_high) = window.wavenumber_range();
        let mut reader = BufReader::new(file);
        let mut columns = TransitionColumns::default();

        for irec in 0..n_records {
            let record = read_record(&mut reader)
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => DriverError::parse(
                        &self.path,
                        irec as usize + 1,
                        "truncated record",
                    ),
                    _ => DriverError::io(&self.path, e),
                })?;

            if record.wavenumber < wn_low {
                continue;
            }
            if record.wavenumber > wn_high {
                break;
            }

            let wavelength = 1e4 / record.wavenumber;
            if window.contains(wavelength) {
                columns.push(wavelength, record.gf, record.elow, record.isotope);
            }
        }

        debug!(
            "{} records in file, kept {} transitions in [{}, {}] um",
            n_records,
            columns.len(),
            window.min,
            window.max
        );
        Ok(columns)
    }
}

fn read_record<R: ReadBytesExt>(reader: &mut R) -> std::io::Result<PandsRecord> {
    let iw = reader.read_i32::<BigEndian>()?;
    let ielo = reader.read_i16::<BigEndian>()?;
    let igf = reader.read_i16::<BigEndian>()?;
    Ok(PandsRecord::decode(iw, ielo, igf))
}
