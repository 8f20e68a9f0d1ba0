use super::*;
use std::io::{Cursor, Write};
use std::path::Path;

use byteorder::{BigEndian, WriteBytesExt};
use tempfile::tempdir;

const H2O_PF: &str = "\
# Water partition functions
@DATABASE HITEMP-H2O
@MOLECULE H2O
@ISOTOPES
  161 181
  171
@MASS
  18.010565 20.014811 19.014780
@RATIO
  0.997317 0.0019998 3.71884e-4
@DATA
  300.0   174.58  176.05  1052.0
  1000.0  919.4   926.1   5549.0
  3000.0  9800.0  9900.0  59000.0
";

fn hitran_line(iso: char, wavenumber: f64, einstein_a: f64, elow: f64, g_upper: f64) -> String {
    let mut line = format!("{:>2}{}{:>12.6}{:>10.3e}{:>10.3e}", 1, iso, wavenumber, 1.0e-20, einstein_a);
    line.push_str(&" ".repeat(45 - line.len()));
    line.push_str(&format!("{:>10.4}", elow));
    line.push_str(&" ".repeat(146 - line.len()));
    line.push_str(&format!("{:>7.1}{:>7.1}", g_upper, g_upper));
    assert_eq!(line.len(), hitran::RECORD_LENGTH);
    line
}

fn parse_pf(text: &str) -> std::result::Result<PartitionFile, DriverError> {
    PartitionFile::from_reader(Cursor::new(text), Path::new("test.pf"))
}

#[test]
fn test_partition_file_parse() {
    let pf = parse_pf(H2O_PF).unwrap();
    assert_eq!(pf.database.as_deref(), Some("HITEMP-H2O"));
    assert_eq!(pf.molecule, "H2O");
    assert_eq!(pf.isotopes, vec!["161", "181", "171"]);
    assert_eq!(pf.mass.len(), 3);
    assert_eq!(pf.ratio[2], 3.71884e-4);
    assert_eq!(pf.temperatures, vec![300.0, 1000.0, 3000.0]);

    let table = pf.table();
    assert_eq!(table.isotope_count(), 3);
    assert_eq!(table.values[0], vec![174.58, 919.4, 9800.0]);
    assert_eq!(table.values[2], vec![1052.0, 5549.0, 59000.0]);
}

#[test]
fn test_partition_file_missing_molecule() {
    let text = "@ISOTOPES\n1\n@MASS\n1.0\n@RATIO\n1.0\n@DATA\n100 1.0\n";
    let err = parse_pf(text).unwrap_err();
    assert!(matches!(
        err,
        DriverError::MissingDirective {
            directive: "@MOLECULE",
            ..
        }
    ));
}

#[test]
fn test_partition_file_missing_data() {
    let text = "@MOLECULE CO\n@ISOTOPES\n26\n@MASS\n28.0\n@RATIO\n0.98\n";
    let err = parse_pf(text).unwrap_err();
    assert!(matches!(
        err,
        DriverError::MissingDirective {
            directive: "@DATA",
            ..
        }
    ));
}

#[test]
fn test_partition_file_bad_number_reports_line() {
    let text = "@MOLECULE CO\n@ISOTOPES\n26\n@MASS\nabc\n";
    match parse_pf(text).unwrap_err() {
        DriverError::Parse { line, message, .. } => {
            assert_eq!(line, 5);
            assert!(message.contains("abc"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_partition_file_unknown_directive() {
    let err = parse_pf("@MOLECULE CO\n@FOO\n").unwrap_err();
    assert!(matches!(err, DriverError::Parse { line: 2, .. }));
}

#[test]
fn test_partition_file_inline_values() {
    let text = "@MOLECULE CO\n@ISOTOPES 26 36\n@MASS 27.99 28.99\n@RATIO 0.98 0.01\n@DATA\n100 1 2\n";
    let pf = parse_pf(text).unwrap();
    assert_eq!(pf.isotopes, vec!["26", "36"]);
    assert_eq!(pf.mass, vec![27.99, 28.99]);
}

#[test]
fn test_partition_table_ragged_rows_are_not_repaired() {
    let text = "@MOLECULE CO\n@ISOTOPES 26 36\n@MASS 1 2\n@RATIO 1 1\n@DATA\n100 1 2\n200 3\n";
    let table = parse_pf(text).unwrap().table();
    assert_eq!(table.temperatures.len(), 2);
    assert_eq!(table.values[0].len(), 2);
    assert_eq!(table.values[1].len(), 1);
}

#[test]
fn test_parse_record_fields() {
    let line = hitran_line('2', 5000.0, 2.5e-3, 1234.5678, 21.0);
    let record = parse_record(line.as_bytes()).unwrap();
    assert_eq!(record.isotope, 1);
    assert_eq!(record.wavenumber, 5000.0);
    assert_eq!(record.elow, 1234.5678);
    assert_eq!(record.g_upper, 21.0);
    assert!((record.wavelength() - 2.0).abs() < 1e-12);

    let expected_gf = 1.49919 * 21.0 * 2.5e-3 / (5000.0 * 5000.0);
    assert!((record.gf() - expected_gf).abs() < 1e-20);
}

#[test]
fn test_parse_record_isotope_codes() {
    let ten = hitran_line('0', 4000.0, 1.0, 0.0, 1.0);
    assert_eq!(parse_record(ten.as_bytes()).unwrap().isotope, 9);
    let eleven = hitran_line('A', 4000.0, 1.0, 0.0, 1.0);
    assert_eq!(parse_record(eleven.as_bytes()).unwrap().isotope, 10);
    let bad = hitran_line('*', 4000.0, 1.0, 0.0, 1.0);
    assert!(parse_record(bad.as_bytes()).is_err());
}

#[test]
fn test_parse_record_rejects_short_and_garbage() {
    assert!(parse_record(b"  1 123.0").is_err());
    let mut garbage = hitran_line('1', 4000.0, 1.0, 0.0, 1.0).into_bytes();
    garbage[5] = b'x';
    assert!(parse_record(&garbage).is_err());
    assert!(parse_record(&[0xffu8; 200]).is_err());
}

#[test]
fn test_hitran_driver_reads_window() {
    let dir = tempdir().unwrap();
    let par = dir.path().join("h2o.par");
    let mut file = std::fs::File::create(&par).unwrap();
    // Wavelengths: 2.5, 2.0, 1.25, 0.8 um
    for (iso, wn) in [('1', 4000.0), ('2', 5000.0), ('1', 8000.0), ('3', 12500.0)] {
        writeln!(file, "{}", hitran_line(iso, wn, 1.0e-2, 100.0, 3.0)).unwrap();
    }
    drop(file);

    let driver = HitranDriver::with_partition(&par, parse_pf(H2O_PF).unwrap());
    assert_eq!(driver.name(), "HITEMP-H2O");
    assert_eq!(driver.molecule(), "H2O");
    assert_eq!(driver.isotopes().len(), 3);

    let window = WavelengthWindow::new(1.0, 2.0).unwrap();
    let columns = driver.read_transitions(&window).unwrap();
    columns.validate().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns.isotope, vec![1, 0]);
    assert!((columns.wavelength[0] - 2.0).abs() < 1e-12);
    assert!((columns.wavelength[1] - 1.25).abs() < 1e-12);
}

#[test]
fn test_hitran_driver_reports_bad_line_number() {
    let dir = tempdir().unwrap();
    let par = dir.path().join("bad.par");
    let mut file = std::fs::File::create(&par).unwrap();
    writeln!(file, "{}", hitran_line('1', 6000.0, 1.0, 0.0, 1.0)).unwrap();
    writeln!(file, "truncated").unwrap();
    drop(file);

    let driver = HitranDriver::with_partition(&par, parse_pf(H2O_PF).unwrap());
    let window = WavelengthWindow::new(0.5, 5.0).unwrap();
    match driver.read_transitions(&window).unwrap_err() {
        DriverError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(feature = "gzip")]
#[test]
fn test_hitran_driver_reads_gzip() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let dir = tempdir().unwrap();
    let par = dir.path().join("h2o.par.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&par).unwrap(), Compression::default());
    writeln!(encoder, "{}", hitran_line('1', 6000.0, 1.0, 0.0, 1.0)).unwrap();
    encoder.finish().unwrap();

    let driver = HitranDriver::with_partition(&par, parse_pf(H2O_PF).unwrap());
    let window = WavelengthWindow::new(1.0, 2.0).unwrap();
    assert_eq!(driver.read_transitions(&window).unwrap().len(), 1);
}

#[test]
fn test_hitran_default_name() {
    let text = "@MOLECULE CO2\n@ISOTOPES 626\n@MASS 44\n@RATIO 0.98\n@DATA\n100 1\n";
    let driver = HitranDriver::with_partition(Path::new("co2.par"), parse_pf(text).unwrap());
    assert_eq!(driver.name(), "HITRAN CO2");
}

#[test]
fn test_pands_driver_reads_window() {
    let dir = tempdir().unwrap();
    let bin = dir.path().join("h2o.bin");
    let mut file = std::fs::File::create(&bin).unwrap();
    let ratio_log = (1.0 + 1.0 / 2e6_f64).ln();
    // Wavelengths roughly 3.0, 1.5 and 0.9 um
    for (wn, ielo, igf) in [(3333.4, 10i16, 16384i16), (6666.7, -20, 15384), (11111.2, 30, -16384)] {
        let iw = (f64::ln(wn) / ratio_log).round() as i32;
        file.write_i32::<BigEndian>(iw).unwrap();
        file.write_i16::<BigEndian>(ielo).unwrap();
        file.write_i16::<BigEndian>(igf).unwrap();
    }
    drop(file);

    let text = "@MOLECULE H2O\n@ISOTOPES 1H1H16O 1H1H17O 1H1H18O 1H2H16O\n\
                @MASS 18 19 20 19\n@RATIO 0.997 3e-4 2e-3 3e-4\n@DATA\n100 1 1 1 1\n";
    let driver = PartridgeSchwenkeDriver::with_partition(&bin, parse_pf(text).unwrap());
    assert_eq!(driver.name(), pands::DEFAULT_NAME);

    let window = WavelengthWindow::new(1.0, 2.0).unwrap();
    let columns = driver.read_transitions(&window).unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns.isotope, vec![1]);
    assert_eq!(columns.elow, vec![20.0]);
    assert!((columns.gf[0] - 0.1).abs() < 1e-12);
}

#[test]
fn test_pands_driver_rejects_partial_record() {
    let dir = tempdir().unwrap();
    let bin = dir.path().join("short.bin");
    std::fs::write(&bin, [0u8; 12]).unwrap();

    let text = "@MOLECULE H2O\n@ISOTOPES a\n@MASS 18\n@RATIO 1\n@DATA\n100 1\n";
    let driver = PartridgeSchwenkeDriver::with_partition(&bin, parse_pf(text).unwrap());
    let window = WavelengthWindow::new(1.0, 2.0).unwrap();
    assert!(matches!(
        driver.read_transitions(&window).unwrap_err(),
        DriverError::InvalidFile { .. }
    ));
}

#[test]
fn test_format_tags() {
    assert_eq!(DatabaseFormat::from_tag("hit"), Some(DatabaseFormat::Hitran));
    assert_eq!(DatabaseFormat::from_tag(" PS "), Some(DatabaseFormat::PartridgeSchwenke));
    assert_eq!(DatabaseFormat::from_tag("ts"), None);
    assert_eq!(DatabaseFormat::Hitran.to_string(), "hit");
}

#[test]
fn test_open_drivers_unknown_tag_before_io() {
    let sources = vec![
        DatabaseSource::new("/nonexistent/a.par", "/nonexistent/a.pf", "hit"),
        DatabaseSource::new("/nonexistent/b.dat", "/nonexistent/b.pf", "vo"),
    ];
    match open_drivers(&sources) {
        Err(LineReadError::UnknownFormat { index, tag }) => {
            assert_eq!(index, 2);
            assert_eq!(tag, "vo");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an unknown-format error"),
    }
}

#[test]
fn test_open_driver_missing_file() {
    let source = DatabaseSource::new("/nonexistent/a.par", "/nonexistent/a.pf", "hit");
    assert!(matches!(
        open_driver(0, &source),
        Err(LineReadError::Driver(DriverError::InvalidFile { .. }))
    ));
}
