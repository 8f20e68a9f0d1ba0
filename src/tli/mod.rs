//! # TLI container framing
//!
//! A TLI ("transit line information") file is a flat sequence of
//! fixed-width fields in the writing host's native byte order. Readers
//! detect the byte order from the leading magic number.
//!
//! ```text
//! Header
//!   magic                 4 bytes   AB B3 B6 FF (big-endian host) / FF B6 B3 AB (little-endian host)
//!   containerVersion      i16
//!   protocolVersionMajor  i16
//!   protocolVersionMinor  i16
//!   wavelengthMin         f64       microns
//!   wavelengthMax         f64       microns
//!   numDatabases          i16
//! PartitionBlock, repeated numDatabases times
//!   nameLen i16, name bytes
//!   moleculeLen i16, molecule bytes
//!   numTemps i16, numIsotopes i16
//!   temperatures          f64 x numTemps
//!   per isotope: isoNameLen i16, isoName bytes, mass f64, isoRatio f64,
//!                partitionFn f64 x numTemps
//! TransitionBlock
//!   totalTransitions            i32
//!   numIsotopesWithTransitions  i32
//!   transitionsPerIsotope       i32 x numIsotopesWithTransitions
//!   wavelengths                 f64 x totalTransitions
//!   isotopeIds                  i16 x totalTransitions
//!   lowerEnergies               f64 x totalTransitions
//!   gfValues                    f64 x totalTransitions
//! ```
//!
//! Strings are raw UTF-8 bytes without a terminator.

mod entry;
mod error;
mod writer;


pub use entry::{DatabaseEntry, TliHeader};
pub use error::{Phase, TliError};
pub use writer::{TliWriter, WrittenTli};

/// Container format version
pub const TLI_VERSION: i16 = 6;

/// Reader protocol major version
pub const LR_VERSION: i16 = 5;

/// Reader protocol minor version
pub const LR_REVISION: i16 = 0;

/// The magic number; written in native order it encodes the file's endianness
pub const MAGIC: u32 = 0xABB3_B6FF;

/// Magic bytes as they appear in a file written on a big-endian host
pub const MAGIC_BIG_ENDIAN: [u8; 4] = [0xAB, 0xB3, 0xB6, 0xFF];

/// Magic bytes as they appear in a file written on a little-endian host
pub const MAGIC_LITTLE_ENDIAN: [u8; 4] = [0xFF, 0xB6, 0xB3, 0xAB];

/// Magic bytes this host writes
pub fn native_magic() -> [u8; 4] {
    if cfg!(target_endian = "big") {
        MAGIC_BIG_ENDIAN
    } else {
        MAGIC_LITTLE_ENDIAN
    }
}
