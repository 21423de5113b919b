// ==============================================================================
// correction.rs - Per-Tissue FDR Correction and Significance Filter
// ==============================================================================
// Description: BH-adjusts representative p-values within each tissue and keeps
//              the significant representatives
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::fdr::benjamini_hochberg;
use crate::models::{CorrectedEqtl, Representative, SignificanceThreshold, TissueSummary};

/// Result of the correction stage
#[derive(Debug, Clone, Default)]
pub struct CorrectionOutcome {
    /// Representatives passing the threshold, in representative order
    pub significant: Vec<CorrectedEqtl>,
    /// One entry per tissue, ordered by tissue label
    pub tissues: Vec<TissueSummary>,
}

/// Apply Benjamini-Hochberg correction independently within each tissue and
/// keep rows whose adjusted p-value is at or below `threshold`.
///
/// Each tissue is its own family of hypotheses: the number of tests `m` is the
/// number of representatives for that tissue (exact, case-sensitive label match).
pub fn correct_and_filter(
    representatives: Vec<Representative>,
    threshold: SignificanceThreshold,
) -> CorrectionOutcome {
    let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, rep) in representatives.iter().enumerate() {
        partitions
            .entry(rep.record.tissue.as_str())
            .or_default()
            .push(idx);
    }

    let mut adjusted = vec![f64::NAN; representatives.len()];
    let mut tissues = Vec::with_capacity(partitions.len());

    for (tissue, indices) in &partitions {
        if indices.is_empty() {
            continue;
        }

        let p_values: Vec<f64> = indices
            .iter()
            .map(|&idx| representatives[idx].record.pval)
            .collect();
        let q_values = benjamini_hochberg(&p_values);

        let mut significant = 0;
        for (&idx, &q) in indices.iter().zip(&q_values) {
            adjusted[idx] = q;
            if threshold.passes(q) {
                significant += 1;
            }
        }

        debug!(
            "Tissue {}: {} of {} representatives significant",
            tissue,
            significant,
            indices.len()
        );

        tissues.push(TissueSummary {
            tissue: tissue.to_string(),
            tested: indices.len(),
            significant,
        });
    }

    let significant: Vec<CorrectedEqtl> = representatives
        .into_iter()
        .zip(adjusted)
        .filter(|(_, q)| threshold.passes(*q))
        .map(|(representative, adj_pval_shortlisted)| CorrectedEqtl {
            representative,
            adj_pval_shortlisted,
        })
        .collect();

    info!(
        "FDR correction across {} tissue(s): {} significant eQTLs at adjusted p <= {}",
        tissues.len(),
        significant.len(),
        threshold.value()
    );

    CorrectionOutcome {
        significant,
        tissues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EqtlRecord;

    fn rep(tissue: &str, gene: &str, pval: f64) -> Representative {
        Representative {
            risk_locus: "L1".to_string(),
            snp: format!("rs_{}", gene),
            gene: gene.to_string(),
            record: EqtlRecord {
                sid: format!("v_{}", gene),
                pid: format!("g_{}", gene),
                sid_chr: "1".to_string(),
                sid_pos: 10,
                pval,
                adj_pval: Some(0.5),
                b: Some(0.1),
                b_se: Some(0.01),
                maf: Some(0.2),
                tissue: tissue.to_string(),
            },
        }
    }

    #[test]
    fn test_single_row_partition_keeps_raw_pvalue() {
        let outcome = correct_and_filter(vec![rep("T1", "G1", 0.01)], SignificanceThreshold::default());
        assert_eq!(outcome.significant.len(), 1);
        assert_eq!(outcome.significant[0].adj_pval_shortlisted, 0.01);
        assert_eq!(outcome.tissues, vec![TissueSummary {
            tissue: "T1".to_string(),
            tested: 1,
            significant: 1,
        }]);
    }

    #[test]
    fn test_correction_is_per_tissue() {
        // Corrected together, 0.03 * 2 / 1 = 0.06 would fail; per tissue each m = 1
        let outcome = correct_and_filter(
            vec![rep("T1", "G1", 0.03), rep("T2", "G1", 0.03)],
            SignificanceThreshold::default(),
        );
        assert_eq!(outcome.significant.len(), 2);
        for row in &outcome.significant {
            assert!((row.adj_pval_shortlisted - 0.03).abs() < 1e-15);
        }
    }

    #[test]
    fn test_tissue_labels_are_case_sensitive() {
        let outcome = correct_and_filter(
            vec![rep("lung", "G1", 0.01), rep("Lung", "G2", 0.02)],
            SignificanceThreshold::default(),
        );
        assert_eq!(outcome.tissues.len(), 2);
        assert!(outcome.tissues.iter().all(|t| t.tested == 1));
    }

    #[test]
    fn test_filter_boundary_inclusive() {
        let outcome = correct_and_filter(
            vec![rep("T1", "G1", 0.05), rep("T2", "G1", 0.0500001)],
            SignificanceThreshold::default(),
        );
        assert_eq!(outcome.significant.len(), 1);
        assert_eq!(outcome.significant[0].representative.record.tissue, "T1");
        assert_eq!(outcome.significant[0].adj_pval_shortlisted, 0.05);
    }

    #[test]
    fn test_adjusted_column_distinct_from_upstream() {
        let outcome = correct_and_filter(
            vec![rep("T1", "G1", 0.001), rep("T1", "G2", 0.02)],
            SignificanceThreshold::default(),
        );
        assert_eq!(outcome.significant.len(), 2);
        assert!((outcome.significant[0].adj_pval_shortlisted - 0.002).abs() < 1e-15);
        assert!((outcome.significant[1].adj_pval_shortlisted - 0.02).abs() < 1e-15);
        // Upstream adj_pval untouched
        assert_eq!(outcome.significant[0].representative.record.adj_pval, Some(0.5));
    }

    #[test]
    fn test_custom_threshold_and_order_preserved() {
        let outcome = correct_and_filter(
            vec![
                rep("T1", "G1", 0.2),
                rep("T1", "G2", 0.001),
                rep("T1", "G3", 0.6),
            ],
            SignificanceThreshold::new(0.35),
        );
        let genes: Vec<&str> = outcome
            .significant
            .iter()
            .map(|r| r.representative.gene.as_str())
            .collect();
        assert_eq!(genes, vec!["G1", "G2"]);
        assert_eq!(outcome.tissues[0].significant, 2);
    }

    #[test]
    fn test_empty_input() {
        let outcome = correct_and_filter(Vec::new(), SignificanceThreshold::default());
        assert!(outcome.significant.is_empty());
        assert!(outcome.tissues.is_empty());
    }
}
