use tracing::{info, instrument};

use crate::core::chem::policy::is_cysteine;
use crate::core::models::chain::Chain;
use crate::core::models::structure::Structure;

/// Per-chain composition counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub chain_id: char,
    pub residue_count: usize,
    pub heterogen_count: usize,
    pub atom_count: usize,
    /// First and last polymer sequence numbers, when any are present.
    pub observed_range: Option<(i32, i32)>,
}

/// Whole-structure composition counts, chains in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSummary {
    pub source: String,
    pub chains: Vec<ChainSummary>,
    pub residue_total: usize,
    pub heterogen_total: usize,
    pub atom_total: usize,
    pub cysteine_count: usize,
    pub bond_count: usize,
}

/// Tallies chain, residue, and atom counts for a structure.
#[instrument(skip_all, name = "structure_summary_task")]
pub fn run(structure: &Structure) -> StructureSummary {
    let chains: Vec<ChainSummary> = structure
        .chains()
        .map(|(_, chain)| summarize_chain(structure, chain))
        .collect();

    let cysteine_count = structure
        .residues_iter()
        .filter(|(_, residue)| residue.category.is_polymer() && is_cysteine(&residue.name))
        .count();

    let summary = StructureSummary {
        source: structure.source().to_string(),
        residue_total: chains.iter().map(|chain| chain.residue_count).sum(),
        heterogen_total: chains.iter().map(|chain| chain.heterogen_count).sum(),
        atom_total: chains.iter().map(|chain| chain.atom_count).sum(),
        cysteine_count,
        bond_count: structure.bonds().len(),
        chains,
    };
    info!(
        chains = summary.chains.len(),
        residues = summary.residue_total,
        atoms = summary.atom_total,
        "Structure summarized."
    );
    summary
}

fn summarize_chain(structure: &Structure, chain: &Chain) -> ChainSummary {
    let polymer: Vec<_> = chain
        .residues()
        .iter()
        .filter_map(|&id| structure.residue(id))
        .collect();
    let heterogens: Vec<_> = chain
        .heterogens()
        .iter()
        .filter_map(|&id| structure.residue(id))
        .collect();

    let atom_count = polymer
        .iter()
        .chain(heterogens.iter())
        .map(|residue| residue.atoms().len())
        .sum();
    let first = polymer.iter().map(|residue| residue.seq_num).min();
    let last = polymer.iter().map(|residue| residue.seq_num).max();

    ChainSummary {
        chain_id: chain.id,
        residue_count: polymer.len(),
        heterogen_count: heterogens.len(),
        atom_count,
        observed_range: first.zip(last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn build_structure() -> Structure {
        let mut structure = Structure::new("1ABC");
        let a = structure.add_chain('A');
        for (seq, name) in [(10, "CYS"), (11, "ALA"), (12, "CYS")] {
            let residue = structure.add_residue(a, seq, None, name).unwrap();
            for atom_name in ["N", "CA"] {
                let atom = Atom::new(atom_name, residue, Point3::origin());
                structure.add_atom_to_residue(residue, atom);
            }
        }
        let water = structure.add_residue(a, 201, None, "HOH").unwrap();
        structure.add_atom_to_residue(water, Atom::new("O", water, Point3::origin()));

        structure.add_chain('B');
        structure
    }

    #[test]
    fn counts_cover_polymer_heterogens_and_atoms() {
        let structure = build_structure();

        let summary = run(&structure);

        assert_eq!(summary.source, "1ABC");
        assert_eq!(summary.chains.len(), 2);
        assert_eq!(summary.residue_total, 3);
        assert_eq!(summary.heterogen_total, 1);
        assert_eq!(summary.atom_total, 7);
        assert_eq!(summary.cysteine_count, 2);
        assert_eq!(summary.bond_count, 0);

        let chain_a = &summary.chains[0];
        assert_eq!(chain_a.chain_id, 'A');
        assert_eq!(chain_a.residue_count, 3);
        assert_eq!(chain_a.heterogen_count, 1);
        assert_eq!(chain_a.atom_count, 7);
        assert_eq!(chain_a.observed_range, Some((10, 12)));
    }

    #[test]
    fn empty_chain_reports_no_range() {
        let structure = build_structure();

        let summary = run(&structure);

        let chain_b = &summary.chains[1];
        assert_eq!(chain_b.residue_count, 0);
        assert_eq!(chain_b.observed_range, None);
    }
}
