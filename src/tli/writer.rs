use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{NativeEndian, WriteBytesExt};
use log::debug;

use super::entry::I16_MAX;
use super::{DatabaseEntry, Phase, TliError, TliHeader, LR_REVISION, LR_VERSION, MAGIC, TLI_VERSION};
use crate::merge::TransitionBlock;

const I32_MAX: usize = i32::MAX as usize;

/// Result of a completed container write
#[derive(Debug)]
pub struct WrittenTli<W> {
    /// The underlying writer, flushed
    pub inner: W,
    /// Total bytes written
    pub bytes_written: u64,
}

/// Sequential TLI container writer.
///
/// The writer moves through [`Phase::Header`] → [`Phase::Partition`] →
/// [`Phase::Transitions`] → [`Phase::Closed`] and never goes back. An
/// operation issued in the wrong phase fails with [`TliError::Phase`]
/// without writing anything. Bytes already written are never rolled back.
pub struct TliWriter<W: Write> {
    inner: W,
    phase: Phase,
    declared_databases: usize,
    databases_written: usize,
    bytes_written: u64,
}

impl TliWriter<BufWriter<File>> {
    /// Create (truncating) a container file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TliError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TliWriter<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            phase: Phase::Header,
            declared_databases: 0,
            databases_written: 0,
            bytes_written: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write the header: magic, versions, wavelength bounds and database count
    pub fn write_header(&mut self, header: &TliHeader) -> Result<(), TliError> {
        self.expect_phase(Phase::Header)?;
        let num_databases = to_i16("numDatabases", header.num_databases)?;

        self.inner.write_u32::<NativeEndian>(MAGIC)?;
        self.put_i16(TLI_VERSION)?;
        self.put_i16(LR_VERSION)?;
        self.put_i16(LR_REVISION)?;
        self.put_f64(header.window.min)?;
        self.put_f64(header.window.max)?;
        self.put_i16(num_databases)?;
        self.bytes_written += 4;

        debug!(
            "TLI header: version {}, reader protocol {}.{}, window [{}, {}] um, {} database(s)",
            TLI_VERSION, LR_VERSION, LR_REVISION, header.window.min, header.window.max, num_databases
        );

        self.declared_databases = header.num_databases;
        self.phase = if header.num_databases == 0 {
            Phase::Transitions
        } else {
            Phase::Partition
        };
        Ok(())
    }

    /// Write one partition-block entry.
    ///
    /// The entry is fully validated first; a rejected entry leaves no bytes
    /// behind.
    pub fn write_database(&mut self, entry: &DatabaseEntry<'_>) -> Result<(), TliError> {
        self.expect_phase(Phase::Partition)?;
        if self.databases_written >= self.declared_databases {
            return Err(TliError::DatabaseCount {
                declared: self.declared_databases,
                written: self.databases_written + 1,
            });
        }
        entry.validate()?;

        let start = self.bytes_written;
        self.put_str(entry.name)?;
        self.put_str(entry.molecule)?;
        self.put_i16(to_i16("numTemps", entry.table.temperatures.len())?)?;
        self.put_i16(to_i16("numIsotopes", entry.isotopes.len())?)?;
        self.put_f64_slice(&entry.table.temperatures)?;

        for (j, iso) in entry.isotopes.iter().enumerate() {
            self.put_str(iso)?;
            self.put_f64(entry.mass[j])?;
            self.put_f64(entry.ratio[j])?;
            self.put_f64_slice(&entry.table.values[j])?;
        }
        debug_assert_eq!(self.bytes_written - start, entry.encoded_len());

        self.databases_written += 1;
        if self.databases_written == self.declared_databases {
            self.phase = Phase::Transitions;
        }
        Ok(())
    }

    /// Write the transition block
    pub fn write_transitions(&mut self, block: &TransitionBlock) -> Result<(), TliError> {
        if self.phase == Phase::Partition {
            return Err(TliError::DatabaseCount {
                declared: self.declared_databases,
                written: self.databases_written,
            });
        }
        self.expect_phase(Phase::Transitions)?;

        let total = block.len();
        if block.gf.len() != total || block.elow.len() != total || block.isotope.len() != total {
            return Err(TliError::InconsistentTransitions(
                "transition columns have different lengths".to_string(),
            ));
        }
        let counted: usize = block.per_isotope.iter().sum();
        if counted != total {
            return Err(TliError::InconsistentTransitions(format!(
                "per-isotope counts sum to {counted}, expected {total}"
            )));
        }
        let total_field = to_i32("totalTransitions", total)?;
        let n_iso = to_i32("numIsotopesWithTransitions", block.per_isotope.len())?;

        self.put_i32(total_field)?;
        self.put_i32(n_iso)?;
        for &count in &block.per_isotope {
            // count <= total, which fits
            self.put_i32(count as i32)?;
        }
        self.put_f64_slice(&block.wavelength)?;
        for &id in &block.isotope {
            self.put_i16(id)?;
        }
        self.put_f64_slice(&block.elow)?;
        self.put_f64_slice(&block.gf)?;

        debug!(
            "Wrote {} transitions for {} isotope(s)",
            total,
            block.per_isotope.len()
        );
        self.phase = Phase::Closed;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<WrittenTli<W>, TliError> {
        self.expect_phase(Phase::Closed)?;
        self.inner.flush()?;
        Ok(WrittenTli {
            inner: self.inner,
            bytes_written: self.bytes_written,
        })
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), TliError> {
        if self.phase != expected {
            return Err(TliError::Phase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Fixed-width field helpers
    // ========================================================================

    #[inline]
    fn put_i16(&mut self, value: i16) -> Result<(), TliError> {
        self.inner.write_i16::<NativeEndian>(value)?;
        self.bytes_written += 2;
        Ok(())
    }

    #[inline]
    fn put_i32(&mut self, value: i32) -> Result<(), TliError> {
        self.inner.write_i32::<NativeEndian>(value)?;
        self.bytes_written += 4;
        Ok(())
    }

    #[inline]
    fn put_f64(&mut self, value: f64) -> Result<(), TliError> {
        self.inner.write_f64::<NativeEndian>(value)?;
        self.bytes_written += 8;
        Ok(())
    }

    fn put_f64_slice(&mut self, values: &[f64]) -> Result<(), TliError> {
        for &value in values {
            self.inner.write_f64::<NativeEndian>(value)?;
        }
        self.bytes_written += 8 * values.len() as u64;
        Ok(())
    }

    /// Length-prefixed string; callers validate the length beforehand
    fn put_str(&mut self, value: &str) -> Result<(), TliError> {
        let len = to_i16("string length", value.len())?;
        self.put_i16(len)?;
        self.inner.write_all(value.as_bytes())?;
        self.bytes_written += value.len() as u64;
        Ok(())
    }
}

fn to_i16(field: &'static str, value: usize) -> Result<i16, TliError> {
    i16::try_from(value).map_err(|_| TliError::FieldOverflow {
        field,
        value,
        max: I16_MAX,
    })
}

fn to_i32(field: &'static str, value: usize) -> Result<i32, TliError> {
    i32::try_from(value).map_err(|_| TliError::FieldOverflow {
        field,
        value,
        max: I32_MAX,
    })
}
