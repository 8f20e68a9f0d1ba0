//! HITRAN / HITEMP line-list driver.
//!
//! Reads the fixed-width 160-character record format used since HITRAN 2004.
//! Only the fields needed for a TLI file are decoded:
//!
//! | Field        | Columns (0-based) | Format |
//! |--------------|-------------------|--------|
//! | isotope code | 2..3              | A1     |
//! | wavenumber   | 3..15             | F12.6  |
//! | Einstein A   | 25..35            | E10.3  |
//! | E''          | 45..55            | F10.4  |
//! | g'           | 146..153          | F7.1   |
//!
//! Files ending in `.gz` are decompressed on the fly when the `gzip`
//! feature is enabled.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{DriverError, LineDatabase, PartitionFile, PartitionTable, TransitionColumns};
use crate::config::WavelengthWindow;

/// Length of one HITRAN record, excluding the line terminator
pub const RECORD_LENGTH: usize = 160;

/// m_e c / (8 pi^2 e^2) in CGS units; gf = C * g' * A / nu^2
const GF_CONSTANT: f64 = 1.499_19;

const ISOTOPE: Range<usize> = 2..3;
const WAVENUMBER: Range<usize> = 3..15;
const EINSTEIN_A: Range<usize> = 25..35;
const ELOW: Range<usize> = 45..55;
const G_UPPER: Range<usize> = 146..153;

/// The subset of a HITRAN record used for the merge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitranRecord {
    /// 0-based local isotope index
    pub isotope: u16,
    /// Transition wavenumber in cm^-1
    pub wavenumber: f64,
    /// Einstein A coefficient in s^-1
    pub einstein_a: f64,
    /// Lower-state energy in cm^-1
    pub elow: f64,
    /// Upper-state statistical weight
    pub g_upper: f64,
}

impl HitranRecord {
    /// Wavelength in microns
    #[inline]
    pub fn wavelength(&self) -> f64 {
        1e4 / self.wavenumber
    }

    /// Weighted oscillator strength
    #[inline]
    pub fn gf(&self) -> f64 {
        GF_CONSTANT * self.g_upper * self.einstein_a / (self.wavenumber * self.wavenumber)
    }
}

/// Decode a single record (without its line terminator).
///
/// Never panics on arbitrary input; every failure is reported as a message.
pub fn parse_record(line: &[u8]) -> Result<HitranRecord, String> {
    if line.len() < RECORD_LENGTH {
        return Err(format!(
            "record is {} bytes long, expected {RECORD_LENGTH}",
            line.len()
        ));
    }

    let isotope = decode_isotope(line[ISOTOPE.start])?;
    let wavenumber = numeric_field(line, WAVENUMBER, "wavenumber")?;
    if !(wavenumber.is_finite() && wavenumber > 0.0) {
        return Err(format!("wavenumber must be positive, got {wavenumber}"));
    }

    Ok(HitranRecord {
        isotope,
        wavenumber,
        einstein_a: numeric_field(line, EINSTEIN_A, "Einstein A")?,
        elow: numeric_field(line, ELOW, "lower-state energy")?,
        g_upper: numeric_field(line, G_UPPER, "upper statistical weight")?,
    })
}

/// HITRAN isotope codes: '1'..'9' are 1-9, '0' is 10, 'A', 'B', ... continue at 11
fn decode_isotope(code: u8) -> Result<u16, String> {
    match code {
        b'1'..=b'9' => Ok((code - b'1') as u16),
        b'0' => Ok(9),
        b'A'..=b'Z' => Ok(10 + (code - b'A') as u16),
        other => Err(format!("invalid isotope code {:?}", other as char)),
    }
}

fn numeric_field(line: &[u8], range: Range<usize>, name: &str) -> Result<f64, String> {
    let raw = std::str::from_utf8(&line[range]).map_err(|_| format!("{name} field is not ASCII"))?;
    let raw = raw.trim();
    raw.parse::<f64>()
        .map_err(|_| format!("invalid {name} '{raw}'"))
}

fn trim_line_end(buf: &[u8]) -> &[u8] {
    let mut end = buf.len();
    while end > 0 && matches!(buf[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &buf[..end]
}

fn open_lines(path: &Path) -> Result<Box<dyn BufRead>, DriverError> {
    let file = File::open(path).map_err(|e| DriverError::io(path, e))?;

    #[cfg(feature = "gzip")]
    {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
        {
            return Ok(Box::new(BufReader::new(flate2::read::GzDecoder::new(file))));
        }
    }

    Ok(Box::new(BufReader::new(file)))
}

/// Driver for HITRAN and HITEMP `.par` files
#[derive(Debug, Clone)]
pub struct HitranDriver {
    path: PathBuf,
    name: String,
    partition: PartitionFile,
}

impl HitranDriver {
    /// Open a line list and load its partition-function file.
    ///
    /// The database name is the partition file's `@DATABASE` value, or
    /// `"HITRAN <molecule>"` when absent.
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
            .unwrap_or_else(|| format!("HITRAN {}", partition.molecule));
        Self {
            path: path.to_path_buf(),
            name,
            partition,
        }
    }
}

impl LineDatabase for HitranDriver {
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
        info!("Reading HITRAN file '{}'", self.path.display());
        let (wn_low, wn_high) = window.wavenumber_range();

        let mut reader = open_lines(&self.path)?;
        let mut columns = TransitionColumns::default();
        let mut buf = Vec::with_capacity(RECORD_LENGTH + 2);
        let mut lineno = 0usize;
        let mut scanned = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| DriverError::io(&self.path, e))?;
            if read == 0 {
                break;
            }
            lineno += 1;

            let line = trim_line_end(&buf);
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let record =
                parse_record(line).map_err(|message| DriverError::parse(&self.path, lineno, message))?;
            scanned += 1;

            if record.wavenumber < wn_low {
                continue;
            }
            // HITRAN files are sorted by increasing wavenumber
            if record.wavenumber > wn_high {
                break;
            }

            let wavelength = record.wavelength();
            if window.contains(wavelength) {
                columns.push(wavelength, record.gf(), record.elow, record.isotope);
            }
        }

        debug!(
            "Scanned {} records, kept {} transitions in [{}, {}] um",
            scanned,
            columns.len(),
            window.min,
            window.max
        );
        Ok(columns)
    }
}
