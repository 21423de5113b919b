// ==============================================================================
// models.rs - eQTL Shortlisting Data Models
// ==============================================================================
// Description: Record types flowing through the shortlisting pipeline
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use serde::Deserialize;

/// One row of the LD grouping file: a risk locus and one of its LD partners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdPair {
    /// Risk locus identifier (e.g., "rs4869313/rs4869314")
    pub risk_locus: String,

    /// rsID of a SNP in LD with the risk locus
    pub partner: String,
}

/// eQTL association as emitted by CoDeS3D (`eqtls.txt`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EqtlRecord {
    /// Variant identifier (e.g., "1_1000_A_G_b38")
    pub sid: String,

    /// Target gene GENCODE identifier (e.g., "ENSG00000141510.16")
    pub pid: String,

    /// Chromosome ("1"-"22", "X", "Y", "MT")
    pub sid_chr: String,

    /// Base pair position
    pub sid_pos: u64,

    /// Raw association p-value
    pub pval: f64,

    /// Upstream adjusted p-value (empty cell if missing)
    pub adj_pval: Option<f64>,

    /// Effect size
    pub b: Option<f64>,

    /// Standard error of the effect size
    pub b_se: Option<f64>,

    /// Minor allele frequency
    pub maf: Option<f64>,

    /// Tissue or cell type label
    pub tissue: String,
}

/// Gene symbol lookup row (`genes.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct GeneRecord {
    pub gene: String,
    pub gencode_id: String,
}

/// rsID lookup row (`snps.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SnpRecord {
    pub snp: String,
    pub variant_id: String,
}

/// eQTL row after the rsID/gene joins and risk-locus lookup.
///
/// `record.sid` and `record.pid` carry the variant id and GENCODE id; the
/// annotations are `None` when the corresponding join or lookup missed.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedEqtl {
    pub record: EqtlRecord,
    pub snp: Option<String>,
    pub gene: Option<String>,
    pub risk_locus: Option<String>,
}

impl AnnotatedEqtl {
    /// Grouping key, present only when tissue, risk locus and gene symbol are
    /// all known (an empty tissue cell counts as missing)
    pub fn group_key(&self) -> Option<GroupKey> {
        if self.record.tissue.is_empty() {
            return None;
        }
        match (&self.risk_locus, &self.gene) {
            (Some(risk_locus), Some(gene)) => Some(GroupKey {
                tissue: self.record.tissue.clone(),
                risk_locus: risk_locus.clone(),
                gene: gene.clone(),
            }),
            _ => None,
        }
    }
}

/// (tissue, risk locus, gene) hypothesis cluster.
///
/// Field order defines the output ordering of representatives.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub tissue: String,
    pub risk_locus: String,
    pub gene: String,
}

/// Minimum p-value eQTL chosen for one (tissue, risk locus, gene) cluster
#[derive(Debug, Clone, PartialEq)]
pub struct Representative {
    pub risk_locus: String,
    pub snp: String,
    pub gene: String,
    pub record: EqtlRecord,
}

/// Representative with its per-tissue Benjamini-Hochberg adjusted p-value
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedEqtl {
    pub representative: Representative,
    pub adj_pval_shortlisted: f64,
}

/// Per-tissue outcome of the correction stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TissueSummary {
    pub tissue: String,
    /// Number of representative hypotheses corrected together
    pub tested: usize,
    /// Number passing the significance threshold
    pub significant: usize,
}

/// FDR cut-off applied to the shortlisted adjusted p-values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceThreshold(f64);

impl Default for SignificanceThreshold {
    fn default() -> Self {
        Self(0.05)
    }
}

impl SignificanceThreshold {
    pub fn new(alpha: f64) -> Self {
        Self(alpha)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Closed interval: an adjusted p-value equal to the threshold passes
    pub fn passes(&self, adjusted: f64) -> bool {
        adjusted <= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tissue: &str) -> EqtlRecord {
        EqtlRecord {
            sid: "1_100_A_G_b38".to_string(),
            pid: "ENSG01".to_string(),
            sid_chr: "1".to_string(),
            sid_pos: 100,
            pval: 0.01,
            adj_pval: Some(0.2),
            b: Some(0.5),
            b_se: Some(0.1),
            maf: Some(0.3),
            tissue: tissue.to_string(),
        }
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let alpha = SignificanceThreshold::default();
        assert_eq!(alpha.value(), 0.05);
        assert!(alpha.passes(0.05));
        assert!(alpha.passes(0.01));
        assert!(!alpha.passes(0.0500001));
    }

    #[test]
    fn test_group_key_requires_locus_and_gene() {
        let mut eqtl = AnnotatedEqtl {
            record: record("Lung"),
            snp: Some("rs1".to_string()),
            gene: Some("TP53".to_string()),
            risk_locus: Some("L1".to_string()),
        };
        let key = eqtl.group_key().unwrap();
        assert_eq!(key.tissue, "Lung");
        assert_eq!(key.risk_locus, "L1");
        assert_eq!(key.gene, "TP53");

        eqtl.risk_locus = None;
        assert!(eqtl.group_key().is_none());

        eqtl.risk_locus = Some("L1".to_string());
        eqtl.gene = None;
        assert!(eqtl.group_key().is_none());
    }

    #[test]
    fn test_group_key_requires_tissue() {
        let eqtl = AnnotatedEqtl {
            record: record(""),
            snp: Some("rs1".to_string()),
            gene: Some("TP53".to_string()),
            risk_locus: Some("L1".to_string()),
        };
        assert!(eqtl.group_key().is_none());
    }

    #[test]
    fn test_group_key_orders_by_tissue_first() {
        let a = GroupKey {
            tissue: "Adipose".to_string(),
            risk_locus: "Z".to_string(),
            gene: "Z".to_string(),
        };
        let b = GroupKey {
            tissue: "Blood".to_string(),
            risk_locus: "A".to_string(),
            gene: "A".to_string(),
        };
        assert!(a < b);
    }
}
