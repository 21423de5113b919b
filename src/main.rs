// ==============================================================================
// main.rs - eQTL Shortlisting Entry Point
// ==============================================================================
// Description: Command line wrapper around the shortlisting pipeline
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eqtl_shortlist::{InputFiles, ShortlistProcessor};

/// Shortlist CoDeS3D eQTLs by risk locus and filter them with per-tissue FDR correction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A comma-separated file containing the LD groupings of the input SNPs; the
    /// first column holds the risk loci and the second the input SNPs
    #[arg(short = 'l', long = "ld_data", value_name = "ld_data.txt", env = "EQTL_LD_DATA")]
    ld_data: PathBuf,

    /// A tab-separated file of eQTL-target gene pairs and their p-values
    /// (the CoDeS3D 'eqtls.txt' output file)
    #[arg(short = 'e', long = "eqtls", value_name = "eqtls.txt", env = "EQTL_EQTLS")]
    eqtls: PathBuf,

    /// A tab-separated file of all genes physically interacting with the input
    /// SNPs (the CoDeS3D 'genes.txt' output file)
    #[arg(short = 'g', long = "genes", value_name = "genes.txt", env = "EQTL_GENES")]
    genes: PathBuf,

    /// A tab-separated file of all SNPs found in the eQTL databases
    /// (the CoDeS3D 'snps.txt' output file)
    #[arg(short = 's', long = "snps", value_name = "snps.txt", env = "EQTL_SNPS")]
    snps: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eqtl_shortlist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let processor = ShortlistProcessor::new(InputFiles {
        ld_data: args.ld_data,
        eqtls: args.eqtls,
        genes: args.genes,
        snps: args.snps,
    });

    match processor.process() {
        Ok(report) => {
            info!(
                "Wrote {} representatives to {:?} and {} significant eQTLs to {:?}",
                report.selection.groups,
                report.shortlist_path,
                report.significant,
                report.significant_path
            );
            Ok(())
        }
        Err(e) => {
            warn!("Shortlisting failed: {:#}", e);
            Err(e)
        }
    }
}
