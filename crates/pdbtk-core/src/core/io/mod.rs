//! Provides input/output functionality for macromolecular file formats.
//!
//! This module contains implementations for reading and writing the file
//! formats the library works with: the PDB coordinate format and the FASTA
//! and PIR sequence formats used by alignment and comparative modelling
//! tools. It provides a unified trait-based interface for structure file
//! I/O operations.

pub mod fasta;
pub mod pdb;
pub mod pir;
pub mod traits;
