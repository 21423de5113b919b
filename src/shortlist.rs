// ==============================================================================
// shortlist.rs - Representative eQTL Selection
// ==============================================================================
// Description: Minimum p-value eQTL per (tissue, risk locus, gene) cluster
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::collections::BTreeMap;
use tracing::info;

use crate::models::{AnnotatedEqtl, GroupKey, Representative};

/// Counts from representative selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStats {
    pub input_rows: usize,
    /// Rows without a risk locus or gene symbol (not grouped)
    pub excluded_rows: usize,
    pub groups: usize,
}

/// Pick one representative eQTL per (tissue, risk locus, gene).
///
/// Within a group the row with the smallest `pval` wins; on ties the earliest
/// row is kept. Rows lacking a risk locus or gene symbol cannot be grouped and
/// are excluded. Representatives come back ordered by (tissue, risk locus, gene).
pub fn select_representatives(eqtls: Vec<AnnotatedEqtl>) -> (Vec<Representative>, SelectionStats) {
    let mut stats = SelectionStats {
        input_rows: eqtls.len(),
        ..Default::default()
    };
    let mut groups: BTreeMap<GroupKey, Representative> = BTreeMap::new();

    for eqtl in eqtls {
        let (key, snp) = match (eqtl.group_key(), eqtl.snp) {
            (Some(key), Some(snp)) => (key, snp),
            _ => {
                stats.excluded_rows += 1;
                continue;
            }
        };

        match groups.get_mut(&key) {
            Some(current) => {
                if eqtl.record.pval < current.record.pval {
                    current.snp = snp;
                    current.record = eqtl.record;
                }
            }
            None => {
                let representative = Representative {
                    risk_locus: key.risk_locus.clone(),
                    gene: key.gene.clone(),
                    snp,
                    record: eqtl.record,
                };
                groups.insert(key, representative);
            }
        }
    }

    stats.groups = groups.len();

    info!(
        "Selected {} representative eQTLs from {} rows ({} rows without risk locus or gene excluded)",
        stats.groups, stats.input_rows, stats.excluded_rows
    );

    (groups.into_values().collect(), stats)
}
