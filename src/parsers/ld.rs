// ==============================================================================
// parsers/ld.rs - LD Grouping Parser
// ==============================================================================
// Description: Parser for risk locus / LD partner groupings
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================
// Format: Comma-separated with a header row, read by position
// Example:
//   risk_locus,ld_snp
//   rs4869313/rs4869314,rs2549782
//   rs4869313/rs4869314,rs4869313
// ==============================================================================

use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::debug;

use super::{file_label, open_input, record_line, InputError};
use crate::models::LdPair;

/// Parser for the LD grouping CSV
pub struct LdParser;

impl LdParser {
    /// Parse LD groupings
    ///
    /// Column 0 is the risk locus, column 1 the LD partner rsID. Header names
    /// are not interpreted; additional columns are ignored.
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<LdPair>, InputError> {
        let path = path.as_ref();
        let file = file_label(path);

        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(open_input(path)?);

        if reader.headers()?.len() < 2 {
            return Err(InputError::MissingColumn {
                file,
                column: "column 1 (LD partner)".to_string(),
            });
        }

        let mut pairs = Vec::new();

        for result in reader.records() {
            let record = result?;

            // Skip blank lines
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            match (record.get(0), record.get(1)) {
                (Some(locus), Some(partner)) if !locus.is_empty() && !partner.is_empty() => {
                    pairs.push(LdPair {
                        risk_locus: locus.to_string(),
                        partner: partner.to_string(),
                    });
                }
                _ => {
                    return Err(InputError::Malformed {
                        file,
                        line: record_line(&record),
                        details: format!(
                            "Expected risk locus and LD partner, found {} field(s)",
                            record.iter().filter(|f| !f.is_empty()).count()
                        ),
                    });
                }
            }
        }

        debug!("Parsed {} LD pairs from {}", pairs.len(), file);
        Ok(pairs)
    }
}
