// ==============================================================================
// lib.rs - eQTL Shortlisting Library
// ==============================================================================
// Description: Library interface for risk-locus eQTL shortlisting modules
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

pub mod parsers;
pub mod validator;
pub mod models;
pub mod locus_map;
pub mod shortlist;
pub mod fdr;
pub mod correction;
pub mod output;
pub mod processor;

pub use processor::{InputFiles, ShortlistProcessor, ShortlistReport};
