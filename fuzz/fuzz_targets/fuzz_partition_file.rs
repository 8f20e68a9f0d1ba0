#![no_main]

use libfuzzer_sys::fuzz_target;
use lineread::drivers::PartitionFile;
use std::io::Cursor;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(pf) = PartitionFile::from_reader(Cursor::new(data), Path::new("fuzz.pf")) {
        // Transposing ragged rows must not panic either
        let _ = pf.table();
    }
});
