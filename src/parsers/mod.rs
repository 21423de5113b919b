// ==============================================================================
// parsers/mod.rs - Input table parsers
// ==============================================================================
// Description: Loaders for the LD grouping and CoDeS3D output tables
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod ld;
pub mod eqtls;
pub mod genes;
pub mod snps;

pub use ld::LdParser;
pub use eqtls::EqtlParser;
pub use genes::GeneParser;
pub use snps::SnpParser;

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading an input table
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot open {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column '{column}' missing from {file}")]
    MissingColumn { file: String, column: String },

    #[error("Malformed row in {file} at line {line}: {details}")]
    Malformed {
        file: String,
        line: u64,
        details: String,
    },

    #[error("Invalid value in {file} at line {line}: {details}")]
    InvalidValue {
        file: String,
        line: u64,
        details: String,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open an input file, decompressing it on the fly when the name ends in `.gz`
pub fn open_input(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|source| InputError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gzip = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Build a header-aware delimited reader over an input file
pub(crate) fn delimited_reader(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>, InputError> {
    let source = open_input(path)?;
    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source))
}

/// Fail with `MissingColumn` for the first required column absent from `headers`
pub(crate) fn require_columns(
    headers: &StringRecord,
    required: &[&str],
    file: &str,
) -> Result<(), InputError> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(InputError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Short display name used in error messages
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Line number of a record for error reporting (1 when unknown)
pub(crate) fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(1)
}

/// Deserialize a two-column lookup table, dropping repeated rows while
/// keeping first-occurrence order
pub(crate) fn parse_lookup<T>(
    path: &Path,
    required: &[&str],
) -> Result<Vec<T>, InputError>
where
    T: serde::de::DeserializeOwned + Clone + Eq + std::hash::Hash,
{
    let file = file_label(path);
    let mut reader = delimited_reader(path, b'\t')?;
    let headers = reader.headers()?.clone();
    require_columns(&headers, required, &file)?;

    let mut seen = std::collections::HashSet::new();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let row: T = record.deserialize(Some(&headers)).map_err(|e| {
            InputError::Malformed {
                file: file.clone(),
                line: record_line(&record),
                details: e.to_string(),
            }
        })?;

        if seen.insert(row.clone()) {
            rows.push(row);
        }
    }

    Ok(rows)
}


#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_open_missing_file_is_file_access_error() {
        let result = open_input(Path::new("/nonexistent/eqtls.txt"));
        match result {
            Err(InputError::FileAccess { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/eqtls.txt"));
            }
            _ => panic!("Expected FileAccess error"),
        }
    }

    #[test]
    fn test_gzip_input_is_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"gene\tgencode_id\nTP53\tENSG01\n").unwrap();
        encoder.finish().unwrap();

        let mut contents = String::new();
        open_input(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "gene\tgencode_id\nTP53\tENSG01\n");
    }

    #[test]
    fn test_require_columns_reports_first_missing() {
        let headers = StringRecord::from(vec!["gene", "chrom"]);
        match require_columns(&headers, &["gene", "gencode_id"], "genes.txt") {
            Err(InputError::MissingColumn { file, column }) => {
                assert_eq!(file, "genes.txt");
                assert_eq!(column, "gencode_id");
            }
            _ => panic!("Expected MissingColumn error"),
        }
    }
}
