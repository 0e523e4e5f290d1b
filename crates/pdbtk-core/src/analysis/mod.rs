//! # Analysis Module
//!
//! This module implements the analysis engine for macromolecular structures in PDBTK,
//! providing the computational core for gap detection, sequence extraction, disulfide
//! classification, and chain extraction.
//!
//! ## Overview
//!
//! The analysis module operates on parsed structural models and never mutates its
//! input. Each analysis is an independent task with its own configuration and result
//! types, so callers can run a single inspection or compose several into a batch.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different aspects
//! of the analysis process:
//!
//! - **Configuration** ([`config`]) - Analysis parameters, chain selections, thresholds,
//!   and TOML-backed configuration loading
//! - **Tasks** ([`tasks`]) - The individual analyses: gap scanning, sequence extraction,
//!   disulfide classification, chain extraction, and composition summaries
//! - **Reporting** ([`report`]) - Human-readable and CSV renderings of analysis results
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user feedback mechanisms
//! - **Error Handling** ([`error`]) - Analysis-specific error types and error propagation
//!
//! ## Key Capabilities
//!
//! - **Gap detection** over sequence numbering with completeness statistics
//! - **Sequence extraction** in plain or gap-annotated form with configurable handling
//!   of modified residues
//! - **Disulfide classification** of cysteine sulfur pairs by distance thresholds
//! - **Chain extraction** into new structures with renumbered serials and preserved bonds
//! - **Deterministic results** with stable, documented orderings for every task
//! - **Progress monitoring** with per-analysis start and finish events

pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod tasks;
