use std::cmp::Ordering;

use super::{TransitionBlock, TransitionRecord};

/// Canonical record order.
///
/// Isotope id ascending, then wavelength ascending. Remaining ties are
/// broken on gf and then elow so that equal keys still get a single total
/// order regardless of input order. Floats compare with `total_cmp`.
pub fn compare_records(a: &TransitionRecord, b: &TransitionRecord) -> Ordering {
    a.isotope
        .cmp(&b.isotope)
        .then_with(|| a.wavelength.total_cmp(&b.wavelength))
        .then_with(|| a.gf.total_cmp(&b.gf))
        .then_with(|| a.elow.total_cmp(&b.elow))
}

/// Sort records into canonical order in place
pub fn sort_transitions(records: &mut [TransitionRecord]) {
    records.sort_unstable_by(compare_records);
}

/// Run lengths of equal isotope ids in a sorted slice.
///
/// Isotopes without transitions do not appear, so the result may be shorter
/// than the number of declared isotopes.
pub fn count_per_isotope(sorted: &[TransitionRecord]) -> Vec<usize> {
    let mut counts = Vec::new();
    let mut current: Option<i16> = None;
    for record in sorted {
        if current == Some(record.isotope) {
            if let Some(last) = counts.last_mut() {
                *last += 1;
            }
        } else {
            current = Some(record.isotope);
            counts.push(1);
        }
    }
    counts
}

/// Sort the merged records and split them into transition-block columns
pub fn pack(mut records: Vec<TransitionRecord>) -> TransitionBlock {
    sort_transitions(&mut records);
    let per_isotope = count_per_isotope(&records);

    let n = records.len();
    let mut block = TransitionBlock {
        per_isotope,
        wavelength: Vec::with_capacity(n),
        isotope: Vec::with_capacity(n),
        elow: Vec::with_capacity(n),
        gf: Vec::with_capacity(n),
    };
    for record in records {
        block.wavelength.push(record.wavelength);
        block.isotope.push(record.isotope);
        block.elow.push(record.elow);
        block.gf.push(record.gf);
    }
    block
}
