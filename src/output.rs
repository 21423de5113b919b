// ==============================================================================
// output.rs - Shortlist Output Generation
// ==============================================================================
// Description: Tab-separated writers for the representative and significant
//              eQTL tables
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::{CorrectedEqtl, Representative};

/// Representative table, in CoDeS3D `eqtls.txt` layout
pub const SHORTLIST_FILE: &str = "eqtls_shortlisted.txt";

/// FDR-filtered, annotated result table
pub const SIGNIFICANT_FILE: &str = "significant_eqtls_shortlisted.txt";

pub const SHORTLIST_COLUMNS: [&str; 10] = [
    "sid", "pid", "sid_chr", "sid_pos", "adj_pval", "pval", "b", "b_se", "maf", "tissue",
];

pub const SIGNIFICANT_COLUMNS: [&str; 14] = [
    "risk_locus",
    "variant_id",
    "snp",
    "sid_chr",
    "sid_pos",
    "gencode_id",
    "gene",
    "adj_pval_shortlisted",
    "adj_pval",
    "pval",
    "b",
    "b_se",
    "maf",
    "tissue",
];

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Row of `eqtls_shortlisted.txt` (field order is column order)
#[derive(Debug, Serialize)]
struct ShortlistRow<'a> {
    sid: &'a str,
    pid: &'a str,
    sid_chr: &'a str,
    sid_pos: u64,
    adj_pval: Option<f64>,
    pval: f64,
    b: Option<f64>,
    b_se: Option<f64>,
    maf: Option<f64>,
    tissue: &'a str,
}

impl<'a> From<&'a Representative> for ShortlistRow<'a> {
    fn from(rep: &'a Representative) -> Self {
        let r = &rep.record;
        Self {
            sid: &r.sid,
            pid: &r.pid,
            sid_chr: &r.sid_chr,
            sid_pos: r.sid_pos,
            adj_pval: r.adj_pval,
            pval: r.pval,
            b: r.b,
            b_se: r.b_se,
            maf: r.maf,
            tissue: &r.tissue,
        }
    }
}

/// Row of `significant_eqtls_shortlisted.txt`
#[derive(Debug, Serialize)]
struct SignificantRow<'a> {
    risk_locus: &'a str,
    variant_id: &'a str,
    snp: &'a str,
    sid_chr: &'a str,
    sid_pos: u64,
    gencode_id: &'a str,
    gene: &'a str,
    adj_pval_shortlisted: f64,
    adj_pval: Option<f64>,
    pval: f64,
    b: Option<f64>,
    b_se: Option<f64>,
    maf: Option<f64>,
    tissue: &'a str,
}

impl<'a> From<&'a CorrectedEqtl> for SignificantRow<'a> {
    fn from(row: &'a CorrectedEqtl) -> Self {
        let rep = &row.representative;
        let r = &rep.record;
        Self {
            risk_locus: &rep.risk_locus,
            variant_id: &r.sid,
            snp: &rep.snp,
            sid_chr: &r.sid_chr,
            sid_pos: r.sid_pos,
            gencode_id: &r.pid,
            gene: &rep.gene,
            adj_pval_shortlisted: row.adj_pval_shortlisted,
            adj_pval: r.adj_pval,
            pval: r.pval,
            b: r.b,
            b_se: r.b_se,
            maf: r.maf,
            tissue: &r.tissue,
        }
    }
}

/// Write rows as a headed TSV. The header is written explicitly so that an
/// empty table still produces a header line.
fn write_table<R, I>(path: &Path, columns: &[&str], rows: I) -> Result<usize, OutputError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(columns)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush().map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(count)
}

/// Write the representative checkpoint (`eqtls_shortlisted.txt` layout)
pub fn write_shortlist(path: &Path, representatives: &[Representative]) -> Result<(), OutputError> {
    let count = write_table(
        path,
        &SHORTLIST_COLUMNS,
        representatives.iter().map(ShortlistRow::from),
    )?;
    info!("Wrote {} representative eQTLs to {:?}", count, path);
    Ok(())
}

/// Write the significant eQTL table
pub fn write_significant(path: &Path, rows: &[CorrectedEqtl]) -> Result<(), OutputError> {
    let count = write_table(
        path,
        &SIGNIFICANT_COLUMNS,
        rows.iter().map(SignificantRow::from),
    )?;
    info!("Wrote {} significant eQTLs to {:?}", count, path);
    Ok(())
}
