#![no_main]

use libfuzzer_sys::fuzz_target;
use lineread::drivers::parse_record;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the bytes
    if let Ok(record) = parse_record(data) {
        assert!(record.wavenumber > 0.0);
        let _ = record.wavelength();
        let _ = record.gf();
    }
});
