use itertools::Itertools;
use slotmap::SecondaryMap;
use tracing::{info, instrument};

use crate::analysis::config::ExtractSelection;
use crate::analysis::error::AnalysisError;
use crate::core::models::ids::{AtomId, ChainId, ResidueId};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;

/// Builds a new structure containing only the selected chains.
///
/// Polymer residues are filtered by the per-chain range when one is given;
/// heterogens are carried wholesale when `keep_heterogens` is set. Relative
/// residue and atom order is preserved, atom serials are renumbered from 1,
/// and bonds survive when both endpoints do.
#[instrument(skip_all, name = "chain_extraction_task")]
pub fn run(source: &Structure, selection: &ExtractSelection) -> Result<Structure, AnalysisError> {
    selection.validate()?;

    let chain_ids: Vec<(char, ChainId)> = selection
        .chains
        .iter()
        .unique()
        .map(|&requested| {
            source
                .find_chain_by_id(requested)
                .map(|id| (requested, id))
                .ok_or_else(|| AnalysisError::ChainNotFound {
                    requested,
                    available: super::available_chain_ids(source),
                })
        })
        .collect::<Result<_, _>>()?;
    info!(chains = chain_ids.len(), "Extracting selected chains.");

    let mut extracted = Structure::new(source.source());
    let mut atom_id_map: SecondaryMap<AtomId, AtomId> = SecondaryMap::new();
    let mut next_serial = 1;

    for (requested, chain_id) in chain_ids {
        let chain = source.chain(chain_id).ok_or_else(|| {
            AnalysisError::Internal("resolved chain missing from structure".to_string())
        })?;
        let range = selection.residue_ranges.get(&requested).copied();
        let new_chain = extracted.add_chain(chain.id);

        let mut kept = 0usize;
        for residue in chain.residues().iter().filter_map(|&id| source.residue(id)) {
            if let Some((start, end)) = range {
                if residue.seq_num < start || residue.seq_num > end {
                    continue;
                }
            }
            copy_residue(
                source,
                residue,
                &mut extracted,
                new_chain,
                &mut atom_id_map,
                &mut next_serial,
            )?;
            kept += 1;
        }
        if let Some((start, end)) = range {
            if kept == 0 {
                return Err(AnalysisError::ResidueRangeEmpty {
                    chain_id: requested,
                    start,
                    end,
                });
            }
        }

        if selection.keep_heterogens {
            for residue in chain
                .heterogens()
                .iter()
                .filter_map(|&id| source.residue(id))
            {
                copy_residue(
                    source,
                    residue,
                    &mut extracted,
                    new_chain,
                    &mut atom_id_map,
                    &mut next_serial,
                )?;
            }
        }
    }

    for bond in source.bonds() {
        if let (Some(&atom_a), Some(&atom_b)) = (
            atom_id_map.get(bond.atom1_id),
            atom_id_map.get(bond.atom2_id),
        ) {
            extracted.add_bond(atom_a, atom_b, bond.kind);
        }
    }

    info!(
        atoms = extracted.atoms_iter().count(),
        bonds = extracted.bonds().len(),
        "Extraction complete."
    );
    Ok(extracted)
}

fn copy_residue(
    source: &Structure,
    residue: &Residue,
    extracted: &mut Structure,
    chain_id: ChainId,
    atom_id_map: &mut SecondaryMap<AtomId, AtomId>,
    next_serial: &mut i32,
) -> Result<ResidueId, AnalysisError> {
    let new_residue = extracted
        .add_residue(chain_id, residue.seq_num, residue.insertion_code, &residue.name)
        .ok_or_else(|| {
            AnalysisError::Internal("destination chain missing during extraction".to_string())
        })?;

    for (atom_id, atom) in residue
        .atoms()
        .iter()
        .filter_map(|&id| source.atom(id).map(|atom| (id, atom)))
    {
        let mut copied = atom.clone();
        copied.serial = *next_serial;
        *next_serial += 1;
        if let Some(new_atom) = extracted.add_atom_to_residue(new_residue, copied) {
            atom_id_map.insert(atom_id, new_atom);
        }
    }
    Ok(new_residue)
}
