// ==============================================================================
// parsers/eqtls.rs - CoDeS3D eQTL Table Parser
// ==============================================================================
// Description: Parser for the CoDeS3D `eqtls.txt` association table
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Tab-delimited with header, columns located by name
// Example:
//   sid    pid    sid_chr    sid_pos    pval    adj_pval    b    b_se    maf    tissue
//   1_1000_A_G_b38    ENSG00000141510.16    1    1000    1e-05    0.002    0.4    0.08    0.21    Lung
// ==============================================================================

use std::path::Path;
use tracing::debug;

use super::{delimited_reader, file_label, record_line, require_columns, InputError};
use crate::models::EqtlRecord;

/// Columns that must be present in `eqtls.txt`
pub const EQTL_COLUMNS: [&str; 10] = [
    "sid", "pid", "sid_chr", "sid_pos", "pval", "adj_pval", "b", "b_se", "maf", "tissue",
];

/// Parser for CoDeS3D eQTL associations
pub struct EqtlParser;

impl EqtlParser {
    /// Parse eQTL associations
    ///
    /// # Returns
    /// * `Ok(Vec<EqtlRecord>)` - Rows in file order
    /// * `Err(InputError)` - Missing column, malformed row or out-of-range value
    ///
    /// `pval` must be a finite value in [0, 1]. Empty `adj_pval`, `b`, `b_se`
    /// and `maf` cells are kept as missing.
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<EqtlRecord>, InputError> {
        let path = path.as_ref();
        let file = file_label(path);

        let mut reader = delimited_reader(path, b'\t')?;
        let headers = reader.headers()?.clone();
        require_columns(&headers, &EQTL_COLUMNS, &file)?;

        let mut eqtls = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record_line(&record);

            let eqtl: EqtlRecord = record.deserialize(Some(&headers)).map_err(|e| {
                InputError::Malformed {
                    file: file.clone(),
                    line,
                    details: e.to_string(),
                }
            })?;

            Self::validate(&eqtl).map_err(|details| InputError::InvalidValue {
                file: file.clone(),
                line,
                details,
            })?;

            eqtls.push(eqtl);
        }

        debug!("Parsed {} eQTL associations from {}", eqtls.len(), file);
        Ok(eqtls)
    }

    fn validate(eqtl: &EqtlRecord) -> Result<(), String> {
        if !eqtl.pval.is_finite() || !(0.0..=1.0).contains(&eqtl.pval) {
            return Err(format!("pval must be within [0, 1], got {}", eqtl.pval));
        }

        let optional = [
            ("adj_pval", eqtl.adj_pval),
            ("b", eqtl.b),
            ("b_se", eqtl.b_se),
            ("maf", eqtl.maf),
        ];
        for (name, value) in optional {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(format!("Non-finite {}: {}", name, v));
                }
            }
        }

        Ok(())
    }
}
