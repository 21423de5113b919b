// ==============================================================================
// locus_map.rs - Risk Locus Mapping and eQTL Annotation
// ==============================================================================
// Description: SNP -> risk locus reverse map and rsID/gene/locus annotation joins
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::models::{AnnotatedEqtl, EqtlRecord, GeneRecord, LdPair, SnpRecord};

/// Immutable SNP rsID -> risk locus lookup built from the LD grouping
#[derive(Debug, Clone, Default)]
pub struct LocusMap {
    by_snp: HashMap<String, String>,
    risk_loci: usize,
    conflicts: usize,
}

impl LocusMap {
    /// Risk locus a SNP is in LD with, or `None` if it belongs to no LD set
    pub fn categorize(&self, snp: &str) -> Option<&str> {
        self.by_snp.get(snp).map(String::as_str)
    }

    /// Number of distinct SNPs with a risk locus
    pub fn len(&self) -> usize {
        self.by_snp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_snp.is_empty()
    }

    /// Number of distinct risk loci in the LD grouping
    pub fn risk_loci(&self) -> usize {
        self.risk_loci
    }

    /// SNPs listed under more than one risk locus (only the first assignment is kept)
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }
}

/// Build the SNP -> risk locus map.
///
/// A SNP listed under several risk loci keeps the locus that appears first in
/// the LD file (by first row of that locus). Later assignments are counted as
/// conflicts and dropped.
pub fn build_locus_map(pairs: &[LdPair]) -> LocusMap {
    let mut locus_order: Vec<&str> = Vec::new();
    let mut partners: HashMap<&str, Vec<&str>> = HashMap::new();

    for pair in pairs {
        partners
            .entry(pair.risk_locus.as_str())
            .or_insert_with(|| {
                locus_order.push(pair.risk_locus.as_str());
                Vec::new()
            })
            .push(pair.partner.as_str());
    }

    let mut by_snp: HashMap<String, String> = HashMap::new();
    let mut conflicts = 0;

    for locus in &locus_order {
        for partner in partners.get(locus).into_iter().flatten() {
            match by_snp.entry(partner.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(locus.to_string());
                }
                Entry::Occupied(existing) => {
                    if existing.get() != locus {
                        debug!(
                            "SNP {} listed under {} and {}; keeping {}",
                            partner, existing.get(), locus, existing.get()
                        );
                        conflicts += 1;
                    }
                }
            }
        }
    }

    if conflicts > 0 {
        warn!(
            "{} LD partner(s) assigned to more than one risk locus; first locus kept",
            conflicts
        );
    }

    info!(
        "Built risk locus map: {} SNPs across {} risk loci",
        by_snp.len(),
        locus_order.len()
    );

    LocusMap {
        by_snp,
        risk_loci: locus_order.len(),
        conflicts,
    }
}

/// Join-miss counts from `annotate`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStats {
    pub input_rows: usize,
    pub output_rows: usize,
    pub missing_snp: usize,
    pub missing_gene: usize,
    pub missing_risk_locus: usize,
}

/// Ordered many-valued index over a lookup table.
///
/// Rows with an empty key or value are left out, so a blank cell is a join
/// miss rather than a symbol or rsID of "".
fn index_by<'a, T>(
    rows: &'a [T],
    key: impl Fn(&'a T) -> &'a str,
    value: impl Fn(&'a T) -> &'a str,
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in rows {
        let (k, v) = (key(row), value(row));
        if k.is_empty() || v.is_empty() {
            continue;
        }
        index.entry(k).or_default().push(v);
    }
    index
}

/// Matches for a left join: every hit in table order, or a single miss
fn left_matches<'a>(index: &HashMap<&str, Vec<&'a str>>, key: &str) -> Vec<Option<&'a str>> {
    match index.get(key) {
        Some(hits) if !hits.is_empty() => hits.iter().map(|hit| Some(*hit)).collect(),
        _ => vec![None],
    }
}

/// Annotate eQTLs with rsID, gene symbol and risk locus.
///
/// Both joins are left joins: `sid` against `snps.variant_id`, then `pid`
/// against `genes.gencode_id`. Unmatched rows are kept with `None` in the
/// missed field; a key with several matches yields one row per match.
pub fn annotate(
    eqtls: Vec<EqtlRecord>,
    snps: &[SnpRecord],
    genes: &[GeneRecord],
    locus_map: &LocusMap,
) -> (Vec<AnnotatedEqtl>, AnnotationStats) {
    let snp_index = index_by(snps, |s| s.variant_id.as_str(), |s| s.snp.as_str());
    let gene_index = index_by(genes, |g| g.gencode_id.as_str(), |g| g.gene.as_str());

    let mut stats = AnnotationStats {
        input_rows: eqtls.len(),
        ..Default::default()
    };
    let mut annotated = Vec::with_capacity(eqtls.len());

    for record in eqtls {
        let snp_hits = left_matches(&snp_index, &record.sid);
        let gene_hits = left_matches(&gene_index, &record.pid);

        for snp in &snp_hits {
            for gene in &gene_hits {
                let risk_locus = snp.and_then(|rsid| locus_map.categorize(rsid));

                if snp.is_none() {
                    stats.missing_snp += 1;
                }
                if gene.is_none() {
                    stats.missing_gene += 1;
                }
                if risk_locus.is_none() {
                    stats.missing_risk_locus += 1;
                }

                annotated.push(AnnotatedEqtl {
                    record: record.clone(),
                    snp: snp.map(str::to_string),
                    gene: gene.map(str::to_string),
                    risk_locus: risk_locus.map(str::to_string),
                });
            }
        }
    }

    stats.output_rows = annotated.len();

    info!(
        "Annotated {} eQTL rows ({} after joins): {} without rsID, {} without gene symbol, {} without risk locus",
        stats.input_rows,
        stats.output_rows,
        stats.missing_snp,
        stats.missing_gene,
        stats.missing_risk_locus
    );

    (annotated, stats)
}
