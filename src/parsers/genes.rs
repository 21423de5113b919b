// ==============================================================================
// parsers/genes.rs - CoDeS3D Gene Table Parser
// ==============================================================================
// Description: Parser for the gene symbol / GENCODE id lookup (`genes.txt`)
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::path::Path;
use tracing::debug;

use super::{file_label, parse_lookup, InputError};
use crate::models::GeneRecord;

/// Parser for the CoDeS3D gene interaction table
pub struct GeneParser;

impl GeneParser {
    /// Parse (gene, gencode_id) pairs, deduplicated in first-seen order.
    /// Every other column of `genes.txt` is ignored.
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<GeneRecord>, InputError> {
        let path = path.as_ref();
        let genes: Vec<GeneRecord> = parse_lookup(path, &["gene", "gencode_id"])?;
        debug!("Parsed {} distinct gene mappings from {}", genes.len(), file_label(path));
        Ok(genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::create_test_file;

    #[test]
    fn test_parse_deduplicates_pairs() {
        let file = create_test_file(
            "\
snp\tgene\tgencode_id\tcell_line
rs1\tTP53\tENSG01\tGM12878
rs2\tTP53\tENSG01\tIMR90
rs2\tBRCA1\tENSG02\tIMR90
",
        );

        let genes = GeneParser::parse(file.path()).unwrap();
        assert_eq!(genes, vec![
            GeneRecord { gene: "TP53".to_string(), gencode_id: "ENSG01".to_string() },
            GeneRecord { gene: "BRCA1".to_string(), gencode_id: "ENSG02".to_string() },
        ]);
    }

    #[test]
    fn test_missing_gencode_column() {
        let file = create_test_file("gene\tsymbol\nTP53\tTP53\n");
        match GeneParser::parse(file.path()) {
            Err(InputError::MissingColumn { column, .. }) => assert_eq!(column, "gencode_id"),
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }
}
