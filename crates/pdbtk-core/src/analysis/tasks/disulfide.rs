use itertools::Itertools;
use nalgebra::Point3;
use std::fmt;
use tracing::{debug, info, instrument};

use crate::analysis::config::{DisulfideConfig, ResidueSpecifier};
use crate::analysis::error::AnalysisError;
use crate::core::chem::policy::is_cysteine;
use crate::core::chem::tables::CYSTEINE_SULFUR_GAMMA_ATOM_NAME;
use crate::core::models::chain::Chain;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::models::topology::BondKind;

/// Geometric classification of a cysteine pair, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DisulfideClass {
    /// Within the bonded distance threshold.
    Bonded,
    /// Beyond bonded but within the candidate threshold.
    Candidate,
    /// Beyond both thresholds.
    OutOfRange,
}

impl fmt::Display for DisulfideClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisulfideClass::Bonded => "bonded",
            DisulfideClass::Candidate => "candidate",
            DisulfideClass::OutOfRange => "out-of-range",
        };
        write!(f, "{}", label)
    }
}

/// One evaluated cysteine pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DisulfidePair {
    pub residue_a: ResidueSpecifier,
    pub residue_b: ResidueSpecifier,
    pub sulfur_a: AtomId,
    pub sulfur_b: AtomId,
    /// Sulfur-sulfur distance in angstroms.
    pub distance: f64,
    pub class: DisulfideClass,
}

/// Result of a disulfide scan over a whole structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisulfideScan {
    /// Pairs in canonical order: ascending by chain, number, insertion code.
    pub pairs: Vec<DisulfidePair>,
    /// Cysteines excluded from pairing because the SG atom is absent.
    pub missing_sulfur: Vec<ResidueSpecifier>,
}

struct CysteineSite {
    specifier: ResidueSpecifier,
    sulfur: AtomId,
    position: Point3<f64>,
}

/// Classifies a sulfur-sulfur distance against the configured thresholds.
pub fn classify(distance: f64, config: &DisulfideConfig) -> DisulfideClass {
    if distance <= config.bonded_max {
        DisulfideClass::Bonded
    } else if distance <= config.candidate_max {
        DisulfideClass::Candidate
    } else {
        DisulfideClass::OutOfRange
    }
}

/// Evaluates every unordered pair of cysteine residues across all chains.
///
/// Out-of-range pairs are dropped unless the config keeps them. Cysteines
/// without an SG atom never pair; they are listed in the scan instead.
#[instrument(skip_all, name = "disulfide_scan_task")]
pub fn run(structure: &Structure, config: &DisulfideConfig) -> Result<DisulfideScan, AnalysisError> {
    config.validate()?;
    let (sites, missing_sulfur) = collect_cysteine_sites(structure);
    info!(
        cysteines = sites.len(),
        missing_sulfur = missing_sulfur.len(),
        "Classifying cysteine pairs."
    );

    let pair_total = sites.len() * sites.len().saturating_sub(1) / 2;
    debug!("Evaluating {} unordered sulfur pairs.", pair_total);

    let mut pairs = Vec::new();
    for pair in sites.iter().combinations(2) {
        let (site_a, site_b) = (pair[0], pair[1]);
        let distance = (site_a.position - site_b.position).norm();
        let class = classify(distance, config);
        if class == DisulfideClass::OutOfRange && !config.include_out_of_range {
            continue;
        }
        pairs.push(DisulfidePair {
            residue_a: site_a.specifier.clone(),
            residue_b: site_b.specifier.clone(),
            sulfur_a: site_a.sulfur,
            sulfur_b: site_b.sulfur,
            distance,
            class,
        });
    }

    info!(pairs = pairs.len(), "Disulfide scan complete.");
    Ok(DisulfideScan {
        pairs,
        missing_sulfur,
    })
}

/// Returns a copy of the structure with a disulfide bond recorded for every
/// bonded or candidate pair. The input structure is left untouched.
pub fn annotate(structure: &Structure, scan: &DisulfideScan) -> Structure {
    let mut annotated = structure.clone();
    for pair in &scan.pairs {
        if pair.class == DisulfideClass::OutOfRange {
            continue;
        }
        annotated.add_bond(pair.sulfur_a, pair.sulfur_b, BondKind::Disulfide);
    }
    annotated
}

fn collect_cysteine_sites(structure: &Structure) -> (Vec<CysteineSite>, Vec<ResidueSpecifier>) {
    let mut chains: Vec<&Chain> = structure.chains().map(|(_, chain)| chain).collect();
    chains.sort_by_key(|chain| chain.id);

    let mut sites = Vec::new();
    let mut missing = Vec::new();
    for chain in chains {
        let mut residues: Vec<&Residue> = chain
            .residues()
            .iter()
            .filter_map(|&id| structure.residue(id))
            .collect();
        residues.sort_by_key(|residue| residue.sort_key());

        for residue in residues {
            if !is_cysteine(&residue.name) {
                continue;
            }
            let specifier = ResidueSpecifier {
                chain_id: chain.id,
                seq_num: residue.seq_num,
                insertion_code: residue.insertion_code,
            };
            let sulfur = residue
                .get_atom_id_by_name(CYSTEINE_SULFUR_GAMMA_ATOM_NAME)
                .and_then(|id| structure.atom(id).map(|atom| (id, atom.position)));
            match sulfur {
                Some((id, position)) => sites.push(CysteineSite {
                    specifier,
                    sulfur: id,
                    position,
                }),
                None => missing.push(specifier),
            }
        }
    }
    (sites, missing)
}
