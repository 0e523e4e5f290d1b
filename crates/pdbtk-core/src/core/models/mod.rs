//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! macromolecular structures in pdbtk, providing the foundation for every
//! parsing and analysis operation in the library.
//!
//! ## Overview
//!
//! The models module defines the core abstractions for representing structural
//! models, including atoms, residues, chains, and their explicit bonds. These
//! models are designed to:
//!
//! - **Represent structural content** - Complete description of coordinates, residue identity, and connectivity
//! - **Support efficient lookup** - Slot-map storage with stable IDs and keyed index maps
//! - **Preserve file order** - Chains and residues iterate in the order the source file declared them
//! - **Maintain type safety** - Strong typing for chain, residue, and atom references
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation with coordinates and per-atom PDB fields
//! - [`residue`] - Residue identity, classification, and atom membership
//! - [`chain`] - Per-chain polymer and heterogen residue lists
//! - [`structure`] - Complete structural model with all components and relationships
//! - [`topology`] - Explicit bond records and their provenance
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! The models form the backbone of structural data representation in pdbtk.
//! Parsers build a [`structure::Structure`] and analyzers consume it.
//!
//! ```ignore
//! use pdbtk::core::models::{atom::Atom, structure::Structure};
//!
//! let mut structure = Structure::new("1abc");
//! let chain_id = structure.add_chain('A');
//! let residue_id = structure.add_residue(chain_id, 1, None, "ALA")?;
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! structure.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod structure;
pub mod topology;
