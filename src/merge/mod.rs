//! # Transition merging
//!
//! Transitions from every input (duplicate databases included) are
//! collected into one buffer with global isotope ids, then sorted into the
//! canonical (isotope, wavelength) order and split into the columns of
//! the container's transition block.
//!
//! The whole merged set lives in memory; inputs larger than RAM are not
//! supported.

mod collect;
mod sort;


pub use collect::collect_transitions;
pub use sort::{compare_records, count_per_isotope, pack, sort_transitions};

/// A merged transition carrying its global isotope id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRecord {
    /// Wavelength in microns
    pub wavelength: f64,
    /// Weighted oscillator strength
    pub gf: f64,
    /// Lower-state energy in cm^-1
    pub elow: f64,
    /// Global isotope id
    pub isotope: i16,
}

/// Sorted, column-oriented transition block ready for serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionBlock {
    /// Transition count for each isotope that has at least one transition,
    /// in increasing isotope-id order
    pub per_isotope: Vec<usize>,
    /// Wavelengths in microns
    pub wavelength: Vec<f64>,
    /// Global isotope ids
    pub isotope: Vec<i16>,
    /// Lower-state energies in cm^-1
    pub elow: Vec<f64>,
    /// Weighted oscillator strengths
    pub gf: Vec<f64>,
}

impl TransitionBlock {
    /// Total number of transitions
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Whether the block holds no transitions
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Number of isotopes with at least one transition
    pub fn isotopes_with_transitions(&self) -> usize {
        self.per_isotope.len()
    }

    /// Number of bytes the block occupies in the container
    pub fn encoded_len(&self) -> u64 {
        let n = self.len() as u64;
        4 + 4 + 4 * self.per_isotope.len() as u64 + n * (8 + 2 + 8 + 8)
    }
}
