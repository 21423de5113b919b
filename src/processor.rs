// ==============================================================================
// processor.rs - eQTL Shortlisting Pipeline
// ==============================================================================
// Description: Loads LD groupings and CoDeS3D outputs, selects one eQTL per
//              (tissue, risk locus, gene) and applies per-tissue FDR filtering
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::correction::correct_and_filter;
use crate::locus_map::{annotate, build_locus_map, AnnotationStats};
use crate::models::{SignificanceThreshold, TissueSummary};
use crate::output::{write_shortlist, write_significant, SHORTLIST_FILE, SIGNIFICANT_FILE};
use crate::parsers::{EqtlParser, GeneParser, LdParser, SnpParser};
use crate::shortlist::{select_representatives, SelectionStats};
use crate::validator::FileValidator;

/// Paths of the four required inputs
#[derive(Debug, Clone)]
pub struct InputFiles {
    /// Comma-separated LD grouping (risk locus, LD partner)
    pub ld_data: PathBuf,
    /// CoDeS3D `eqtls.txt`
    pub eqtls: PathBuf,
    /// CoDeS3D `genes.txt`
    pub genes: PathBuf,
    /// CoDeS3D `snps.txt`
    pub snps: PathBuf,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct ShortlistReport {
    pub shortlist_path: PathBuf,
    pub significant_path: PathBuf,
    pub annotation: AnnotationStats,
    pub selection: SelectionStats,
    pub significant: usize,
    pub tissues: Vec<TissueSummary>,
}

pub struct ShortlistProcessor {
    inputs: InputFiles,
    output_dir: PathBuf,
    threshold: SignificanceThreshold,
    validator: FileValidator,
}

impl ShortlistProcessor {
    /// Processor writing to the current working directory at FDR 0.05
    pub fn new(inputs: InputFiles) -> Self {
        Self {
            inputs,
            output_dir: PathBuf::from("."),
            threshold: SignificanceThreshold::default(),
            validator: FileValidator::new(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_threshold(mut self, threshold: SignificanceThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Main processing pipeline
    pub fn process(&self) -> Result<ShortlistReport> {
        info!("Starting eQTL shortlisting");

        // 1. Check every input before reading any of them
        self.validate_inputs()?;

        // 2. Load tables
        let ld_pairs = LdParser::parse(&self.inputs.ld_data)
            .context("Failed to load LD data")?;
        let eqtls = EqtlParser::parse(&self.inputs.eqtls)
            .context("Failed to load eQTL associations")?;
        let genes = GeneParser::parse(&self.inputs.genes)
            .context("Failed to load gene table")?;
        let snps = SnpParser::parse(&self.inputs.snps)
            .context("Failed to load SNP table")?;

        info!(
            "Loaded {} LD pairs, {} eQTLs, {} gene mappings, {} SNP mappings",
            ld_pairs.len(),
            eqtls.len(),
            genes.len(),
            snps.len()
        );

        // 3. Risk locus lookup and annotation joins
        let locus_map = build_locus_map(&ld_pairs);
        let (annotated, annotation) = annotate(eqtls, &snps, &genes, &locus_map);

        // 4. One representative per (tissue, risk locus, gene), checkpointed to disk
        let (representatives, selection) = select_representatives(annotated);

        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.output_dir))?;

        let shortlist_path = self.output_dir.join(SHORTLIST_FILE);
        write_shortlist(&shortlist_path, &representatives)
            .context("Failed to write representative eQTLs")?;

        // 5. Per-tissue BH correction and significance filter
        let outcome = correct_and_filter(representatives, self.threshold);

        let significant_path = self.output_dir.join(SIGNIFICANT_FILE);
        write_significant(&significant_path, &outcome.significant)
            .context("Failed to write significant eQTLs")?;

        for summary in &outcome.tissues {
            info!(
                "{}: {} significant of {} representatives",
                summary.tissue, summary.significant, summary.tested
            );
        }

        info!("Shortlisting complete, result: {:?}", significant_path);

        Ok(ShortlistReport {
            shortlist_path,
            significant_path,
            annotation,
            selection,
            significant: outcome.significant.len(),
            tissues: outcome.tissues,
        })
    }

    fn validate_inputs(&self) -> Result<()> {
        let inputs = [
            ("LD data", &self.inputs.ld_data),
            ("eQTLs", &self.inputs.eqtls),
            ("genes", &self.inputs.genes),
            ("SNPs", &self.inputs.snps),
        ];

        for (label, path) in inputs {
            self.validator
                .validate_input(label, path)
                .context("Input validation failed")?;
        }

        Ok(())
    }
}
