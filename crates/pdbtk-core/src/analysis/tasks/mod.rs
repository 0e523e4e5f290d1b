//! Analyses derived from a parsed structural model.
//!
//! Each submodule implements one analysis as a pure function of a structure
//! and its configuration: gap detection, sequence extraction, disulfide
//! geometry, chain extraction, and structure summarization. Tasks never
//! mutate their input; analyses that produce a modified model return a new
//! structure instead.

pub mod disulfide;
pub mod extract;
pub mod gaps;
pub mod sequence;
pub mod summary;

use itertools::Itertools;

use crate::analysis::config::{ChainSelection, ConfigError};
use crate::analysis::error::AnalysisError;
use crate::core::models::chain::Chain;
use crate::core::models::ids::{ChainId, ResidueId};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;

/// Resolves a chain selection to chain IDs, preserving file order for
/// [`ChainSelection::All`] and the listed order otherwise.
pub(crate) fn resolve_chains(
    structure: &Structure,
    selection: &ChainSelection,
) -> Result<Vec<ChainId>, AnalysisError> {
    match selection {
        ChainSelection::All => Ok(structure.chains().map(|(id, _)| id).collect()),
        ChainSelection::List(ids) => {
            if ids.is_empty() {
                return Err(ConfigError::EmptySelection.into());
            }
            ids.iter()
                .unique()
                .map(|&requested| {
                    structure.find_chain_by_id(requested).ok_or_else(|| {
                        AnalysisError::ChainNotFound {
                            requested,
                            available: available_chain_ids(structure),
                        }
                    })
                })
                .collect()
        }
    }
}

/// Lists the structure's chain identifiers in file order, e.g. `"A, B"`.
pub(crate) fn available_chain_ids(structure: &Structure) -> String {
    structure
        .chains()
        .map(|(_, chain)| chain.id.to_string())
        .join(", ")
}

/// Collects a chain's residues sorted by (sequence number, insertion code),
/// with absent insertion codes first. Heterogens are appended to the
/// candidate set only when requested.
pub(crate) fn sorted_chain_residues<'a>(
    structure: &'a Structure,
    chain: &Chain,
    include_heterogens: bool,
) -> Vec<&'a Residue> {
    let mut ids: Vec<ResidueId> = chain.residues().to_vec();
    if include_heterogens {
        ids.extend_from_slice(chain.heterogens());
    }
    let mut residues: Vec<&Residue> = ids
        .iter()
        .filter_map(|&id| structure.residue(id))
        .collect();
    residues.sort_by_key(|residue| residue.sort_key());
    residues
}
