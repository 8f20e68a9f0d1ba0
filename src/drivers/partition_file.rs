//! Parser for the directive-based partition-function text file.
//!
//! ```text
//! # comment
//! @DATABASE HITEMP-H2O
//! @MOLECULE H2O
//! @ISOTOPES
//!   161 181 171 162
//! @MASS
//!   18.010565 20.014811 19.014780 19.016740
//! @RATIO
//!   0.997317 0.0019998 3.71884e-4 3.10693e-4
//! @DATA
//!   300.0  174.58  176.05  1052.0  864.8
//! ```
//!
//! `@DATABASE` and `@MOLECULE` take their value on the directive line. The
//! list sections take whitespace-separated tokens that may span lines.
//! Each `@DATA` row holds a temperature followed by one value per isotope.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DriverError, PartitionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Isotopes,
    Mass,
    Ratio,
    Data,
}

/// Contents of a partition-function file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionFile {
    /// Optional database name override (`@DATABASE`)
    pub database: Option<String>,
    /// Molecule name (`@MOLECULE`)
    pub molecule: String,
    /// Isotope names (`@ISOTOPES`)
    pub isotopes: Vec<String>,
    /// Isotope masses in amu (`@MASS`)
    pub mass: Vec<f64>,
    /// Isotopic abundance ratios (`@RATIO`)
    pub ratio: Vec<f64>,
    /// Temperatures of the `@DATA` rows
    pub temperatures: Vec<f64>,
    /// Raw `@DATA` rows without the temperature column
    rows: Vec<Vec<f64>>,
}

impl PartitionFile {
    /// Read and parse a partition-function file from disk
    pub fn open(path: &Path) -> Result<Self, DriverError> {
        let file = File::open(path).map_err(|e| DriverError::io(path, e))?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse from any buffered reader; `path` is only used in diagnostics
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, DriverError> {
        let mut pf = PartitionFile::default();
        let mut section = Section::Preamble;
        let mut seen_molecule = false;
        let mut seen = [false; 4]; // isotopes, mass, ratio, data

        for (idx, line) in reader.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.map_err(|e| DriverError::io(path, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut rest = trimmed;
            if let Some(directive_line) = trimmed.strip_prefix('@') {
                let (directive, value) = match directive_line.split_once(char::is_whitespace) {
                    Some((d, v)) => (d, v.trim()),
                    None => (directive_line, ""),
                };
                match directive.to_ascii_uppercase().as_str() {
                    "DATABASE" => {
                        if value.is_empty() {
                            return Err(DriverError::parse(path, lineno, "@DATABASE needs a value"));
                        }
                        pf.database = Some(value.to_string());
                        section = Section::Preamble;
                        continue;
                    }
                    "MOLECULE" => {
                        if value.is_empty() {
                            return Err(DriverError::parse(path, lineno, "@MOLECULE needs a value"));
                        }
                        pf.molecule = value.to_string();
                        seen_molecule = true;
                        section = Section::Preamble;
                        continue;
                    }
                    "ISOTOPES" => {
                        section = Section::Isotopes;
                        seen[0] = true;
                    }
                    "MASS" => {
                        section = Section::Mass;
                        seen[1] = true;
                    }
                    "RATIO" => {
                        section = Section::Ratio;
                        seen[2] = true;
                    }
                    "DATA" => {
                        section = Section::Data;
                        seen[3] = true;
                    }
                    other => {
                        return Err(DriverError::parse(
                            path,
                            lineno,
                            format!("unknown directive @{other}"),
                        ));
                    }
                }
                rest = value;
                if rest.is_empty() {
                    continue;
                }
            }

            match section {
                Section::Preamble => {
                    return Err(DriverError::parse(
                        path,
                        lineno,
                        "values found outside of any section",
                    ));
                }
                Section::Isotopes => {
                    pf.isotopes.extend(rest.split_whitespace().map(str::to_string));
                }
                Section::Mass => pf.mass.extend(parse_floats(rest, path, lineno)?),
                Section::Ratio => pf.ratio.extend(parse_floats(rest, path, lineno)?),
                Section::Data => {
                    let values = parse_floats(rest, path, lineno)?;
                    // Non-empty: `rest` had at least one token
                    pf.temperatures.push(values[0]);
                    pf.rows.push(values[1..].to_vec());
                }
            }
        }

        if !seen_molecule {
            return Err(DriverError::MissingDirective {
                path: path.to_path_buf(),
                directive: "@MOLECULE",
            });
        }
        for (present, directive) in seen.iter().zip(["@ISOTOPES", "@MASS", "@RATIO", "@DATA"]) {
            if !present {
                return Err(DriverError::MissingDirective {
                    path: path.to_path_buf(),
                    directive,
                });
            }
        }

        Ok(pf)
    }

    /// Transpose the `@DATA` rows into a per-isotope partition table.
    ///
    /// Ragged rows are not repaired: the table simply ends up with rows of
    /// unequal length, which the container serializer rejects.
    pub fn table(&self) -> PartitionTable {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let values = (0..width)
            .map(|iso| self.rows.iter().filter_map(|row| row.get(iso).copied()).collect())
            .collect();

        PartitionTable {
            temperatures: self.temperatures.clone(),
            values,
        }
    }
}

fn parse_floats(text: &str, path: &Path, lineno: usize) -> Result<Vec<f64>, DriverError> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                DriverError::parse(path, lineno, format!("invalid number '{token}'"))
            })
        })
        .collect()
}
