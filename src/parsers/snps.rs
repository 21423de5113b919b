// ==============================================================================
// parsers/snps.rs - CoDeS3D SNP Table Parser
// ==============================================================================
// Description: Parser for the rsID / variant id lookup (`snps.txt`)
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::path::Path;
use tracing::debug;

use super::{file_label, parse_lookup, InputError};
use crate::models::SnpRecord;

/// Parser for the CoDeS3D SNP table
pub struct SnpParser;

impl SnpParser {
    /// Parse (snp, variant_id) pairs, deduplicated in first-seen order
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<SnpRecord>, InputError> {
        let path = path.as_ref();
        let snps: Vec<SnpRecord> = parse_lookup(path, &["snp", "variant_id"])?;
        debug!("Parsed {} distinct SNP mappings from {}", snps.len(), file_label(path));
        Ok(snps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::create_test_file;

    #[test]
    fn test_parse_snps() {
        let file = create_test_file(
            "\
snp\tchr\tlocus\tvariant_id
rs2549782\t5\t96237326\t5_96237326_G_T_b38
rs2549782\t5\t96237326\t5_96237326_G_T_b38
rs4869313\t5\t96265211\t5_96265211_T_C_b38
",
        );

        let snps = SnpParser::parse(file.path()).unwrap();
        assert_eq!(snps.len(), 2);
        assert_eq!(snps[0].snp, "rs2549782");
        assert_eq!(snps[0].variant_id, "5_96237326_G_T_b38");
        assert_eq!(snps[1].snp, "rs4869313");
    }

    #[test]
    fn test_missing_file() {
        match SnpParser::parse("/nonexistent/snps.txt") {
            Err(InputError::FileAccess { .. }) => {}
            other => panic!("Expected FileAccess error, got {:?}", other),
        }
    }
}
