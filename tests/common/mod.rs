//! Shared fixtures: line-list writers and a TLI decoder for round-trip checks.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use lineread::tli::{MAGIC_BIG_ENDIAN, MAGIC_LITTLE_ENDIAN};

/// One decoded partition-block entry
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDatabase {
    pub name: String,
    pub molecule: String,
    pub temperatures: Vec<f64>,
    pub isotopes: Vec<DecodedIsotope>,
}

/// One decoded isotope
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIsotope {
    pub name: String,
    pub mass: f64,
    pub ratio: f64,
    pub partition: Vec<f64>,
}

/// A fully decoded TLI container
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTli {
    pub magic: [u8; 4],
    pub versions: (i16, i16, i16),
    pub wl_min: f64,
    pub wl_max: f64,
    pub databases: Vec<DecodedDatabase>,
    pub per_isotope: Vec<i32>,
    pub wavelength: Vec<f64>,
    pub isotope: Vec<i16>,
    pub elow: Vec<f64>,
    pub gf: Vec<f64>,
}

impl DecodedTli {
    pub fn total_isotopes(&self) -> usize {
        self.databases.iter().map(|db| db.isotopes.len()).sum()
    }
}

/// Decode a TLI container, detecting byte order from the magic number
pub fn decode_tli(bytes: &[u8]) -> DecodedTli {
    let magic: [u8; 4] = bytes[..4].try_into().unwrap();
    match magic {
        MAGIC_LITTLE_ENDIAN => decode_with::<LittleEndian>(bytes),
        MAGIC_BIG_ENDIAN => decode_with::<BigEndian>(bytes),
        other => panic!("bad magic {:02x?}", other),
    }
}

pub fn decode_file(path: &Path) -> DecodedTli {
    decode_tli(&std::fs::read(path).unwrap())
}

fn read_string<B: ByteOrder>(cursor: &mut Cursor<&[u8]>) -> String {
    let len = cursor.read_i16::<B>().unwrap();
    assert!(len >= 0);
    let mut buf = vec![0u8; len as usize];
    cursor.read_exact(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn read_f64s<B: ByteOrder>(cursor: &mut Cursor<&[u8]>, n: usize) -> Vec<f64> {
    (0..n).map(|_| cursor.read_f64::<B>().unwrap()).collect()
}

fn decode_with<B: ByteOrder>(bytes: &[u8]) -> DecodedTli {
    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic).unwrap();

    let versions = (
        cursor.read_i16::<B>().unwrap(),
        cursor.read_i16::<B>().unwrap(),
        cursor.read_i16::<B>().unwrap(),
    );
    let wl_min = cursor.read_f64::<B>().unwrap();
    let wl_max = cursor.read_f64::<B>().unwrap();
    let n_db = cursor.read_i16::<B>().unwrap() as usize;

    let mut databases = Vec::with_capacity(n_db);
    for _ in 0..n_db {
        let name = read_string::<B>(&mut cursor);
        let molecule = read_string::<B>(&mut cursor);
        let n_temp = cursor.read_i16::<B>().unwrap() as usize;
        let n_iso = cursor.read_i16::<B>().unwrap() as usize;
        let temperatures = read_f64s::<B>(&mut cursor, n_temp);
        let isotopes = (0..n_iso)
            .map(|_| DecodedIsotope {
                name: read_string::<B>(&mut cursor),
                mass: cursor.read_f64::<B>().unwrap(),
                ratio: cursor.read_f64::<B>().unwrap(),
                partition: read_f64s::<B>(&mut cursor, n_temp),
            })
            .collect();
        databases.push(DecodedDatabase {
            name,
            molecule,
            temperatures,
            isotopes,
        });
    }

    let total = cursor.read_i32::<B>().unwrap() as usize;
    let n_with = cursor.read_i32::<B>().unwrap() as usize;
    let per_isotope = (0..n_with).map(|_| cursor.read_i32::<B>().unwrap()).collect();
    let wavelength = read_f64s::<B>(&mut cursor, total);
    let isotope = (0..total).map(|_| cursor.read_i16::<B>().unwrap()).collect();
    let elow = read_f64s::<B>(&mut cursor, total);
    let gf = read_f64s::<B>(&mut cursor, total);

    assert_eq!(
        cursor.position() as usize,
        bytes.len(),
        "trailing bytes after transition block"
    );

    DecodedTli {
        magic,
        versions,
        wl_min,
        wl_max,
        databases,
        per_isotope,
        wavelength,
        isotope,
        elow,
        gf,
    }
}

/// Format one 160-character HITRAN record
pub fn hitran_line(iso: char, wavenumber: f64, einstein_a: f64, elow: f64, g_upper: f64) -> String {
    let mut line = format!("{:>2}{}{:>12.6}{:>10.3e}{:>10.3e}", 1, iso, wavenumber, 1.0e-20, einstein_a);
    line.push_str(&" ".repeat(45 - line.len()));
    line.push_str(&format!("{:>10.4}", elow));
    line.push_str(&" ".repeat(146 - line.len()));
    line.push_str(&format!("{:>7.1}{:>7.1}", g_upper, g_upper));
    assert_eq!(line.len(), 160);
    line
}

/// Write a HITRAN file with `(isotope code, wavenumber)` records (sorted by the caller)
pub fn write_hitran(path: &Path, records: &[(char, f64)]) -> PathBuf {
    let mut file = std::fs::File::create(path).unwrap();
    for &(iso, wn) in records {
        writeln!(file, "{}", hitran_line(iso, wn, 1.0e-2, 250.0, 9.0)).unwrap();
    }
    path.to_path_buf()
}

/// Write a Partridge & Schwenke binary file from `(wavenumber, ielo, igf)` records
pub fn write_pands(path: &Path, records: &[(f64, i16, i16)]) -> PathBuf {
    let ratio_log = (1.0 + 1.0 / 2e6_f64).ln();
    let mut file = std::fs::File::create(path).unwrap();
    for &(wn, ielo, igf) in records {
        let iw = (wn.ln() / ratio_log).round() as i32;
        file.write_i32::<BigEndian>(iw).unwrap();
        file.write_i16::<BigEndian>(ielo).unwrap();
        file.write_i16::<BigEndian>(igf).unwrap();
    }
    path.to_path_buf()
}

/// Write a partition-function file with a three-point temperature grid
pub fn write_partition_file(
    path: &Path,
    database: Option<&str>,
    molecule: &str,
    isotopes: &[&str],
) -> PathBuf {
    let mut text = String::new();
    if let Some(name) = database {
        text.push_str(&format!("@DATABASE {name}\n"));
    }
    text.push_str(&format!("@MOLECULE {molecule}\n@ISOTOPES\n  {}\n", isotopes.join(" ")));
    let masses: Vec<String> = (0..isotopes.len()).map(|i| format!("{}", 18.0 + i as f64)).collect();
    text.push_str(&format!("@MASS\n  {}\n", masses.join(" ")));
    let ratios: Vec<String> = (0..isotopes.len()).map(|i| format!("{}", 0.9 / (i + 1) as f64)).collect();
    text.push_str(&format!("@RATIO\n  {}\n", ratios.join(" ")));
    text.push_str("@DATA\n");
    for t in [300.0, 1000.0, 3000.0] {
        let values: Vec<String> = (0..isotopes.len())
            .map(|i| format!("{}", t * (i + 1) as f64 / 10.0))
            .collect();
        text.push_str(&format!("  {t}  {}\n", values.join(" ")));
    }
    std::fs::write(path, text).unwrap();
    path.to_path_buf()
}
