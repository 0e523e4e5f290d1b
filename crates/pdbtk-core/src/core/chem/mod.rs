//! # Chemistry Tables Module
//!
//! This module provides the static chemical knowledge the rest of the library
//! relies on: residue code tables and the policies that interpret them.
//!
//! ## Overview
//!
//! Residue names carry most of the chemical meaning in a coordinate file, and
//! every analysis needs the same small set of facts about them. This module
//! centralizes those facts as process-wide immutable tables:
//!
//! - **One-letter translation** - Canonical three-letter to one-letter residue codes
//! - **Modified residue parents** - Mapping modified residues back to their canonical parent
//! - **Water recognition** - Solvent residue names excluded from polymer analyses
//!
//! ## Key Components
//!
//! - [`tables`] - Compile-time perfect-hash tables of residue knowledge
//! - [`policy`] - Translation policies for residues outside the canonical table
//!
//! ## Usage
//!
//! The tables are compiled into the binary and never change at runtime, so
//! lookups need no locking and behave identically across threads.
//!
//! ```ignore
//! use pdbtk::core::chem::policy::{self, NonStandardPolicy};
//!
//! let code = policy::one_letter_code("MSE", NonStandardPolicy::MapToParent);
//! assert_eq!(code, 'M');
//! ```

pub mod policy;
pub mod tables;
