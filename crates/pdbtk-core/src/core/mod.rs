//! # Core Module
//!
//! This module provides the fundamental building blocks for macromolecular
//! structure analysis in PDBTK, serving as the foundation layer of the library.
//!
//! ## Overview
//!
//! The core module implements the essential data structures and file format
//! support required for working with experimentally determined protein
//! structures. It provides a complete framework for representing structural
//! models, translating residue chemistry, and exchanging data with the file
//! formats used by structural biology pipelines.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of structure handling:
//!
//! - **Molecular Representation** ([`models`]) - Data structures for atoms, residues, chains, and structures
//! - **Residue Chemistry** ([`chem`]) - One-letter code tables and non-standard residue handling
//! - **File I/O** ([`io`]) - Reading/writing the PDB coordinate format and sequence formats
//!
//! ## Key Capabilities
//!
//! - **Complete structural model representation** with stable entity identifiers
//! - **Fixed-column PDB parsing** with strict and lenient failure policies
//! - **Chemical translation tables** covering standard and modified residues
//! - **Sequence export** in the FASTA and PIR formats consumed by modelling tools

pub mod chem;
pub mod io;
pub mod models;
