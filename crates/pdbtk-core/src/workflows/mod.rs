//! # Workflows Module
//!
//! This module provides high-level workflow implementations that orchestrate complete
//! analysis runs over macromolecular structures in PDBTK.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of PDBTK. They tie the individual
//! analyses together into a single batch over one structure, handling configuration
//! validation, progress reporting, and result collection so callers get one report
//! instead of wiring up each task by hand.
//!
//! ## Architecture
//!
//! The module is organized around specific analysis workflows:
//!
//! - **Analysis Workflow** ([`analyze`]) - Runs the requested set of analyses
//!   (summary, gap scan, sequence extraction, disulfide scan) and collects the
//!   results with per-analysis failure isolation.
//!
//! ## Key Capabilities
//!
//! - **Batch execution** of any combination of analyses over a parsed structure
//! - **Failure isolation** so one failed analysis never discards the others
//! - **Progress monitoring** with per-analysis start and finish events
//! - **Deterministic ordering** of results across repeated runs

pub mod analyze;
