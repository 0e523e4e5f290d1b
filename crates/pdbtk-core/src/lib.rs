//! # PDBTK Core Library
//!
//! A library for analyzing macromolecular structures in the PDB format: gap detection,
//! sequence extraction, disulfide classification, and chain extraction over a shared
//! structural model.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear separation of concerns,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Structure`), chemical
//!   reference tables, and I/O for the PDB, FASTA, and PIR formats.
//!
//! - **[`analysis`]: The Logic Core.** This layer implements the individual analyses as
//!   independent tasks over an immutable `Structure`, together with their configuration,
//!   progress reporting, and report rendering.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer. It ties the
//!   `analysis` and `core` layers together to run a configured batch of analyses over one
//!   structure. It provides a simple and powerful entry point for end-users of the library.

pub mod analysis;
pub mod core;
pub mod workflows;
