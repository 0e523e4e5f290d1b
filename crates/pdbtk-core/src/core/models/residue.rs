use super::ids::{AtomId, ChainId};
use crate::core::chem::tables;
use std::collections::HashMap;

/// Classifies a residue by what its name says about its chemical role.
///
/// The classification is decided once, when the residue is created, from the
/// static residue tables. Polymer analyses (gaps, sequences, disulfides)
/// operate on `Standard` and `Modified` residues; `Water` and `Other` groups
/// are tracked separately on their chain and ignored unless a caller asks
/// for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueCategory {
    /// One of the tabulated amino acids with a one-letter code.
    Standard,
    /// A modified amino acid with a known parent (e.g., MSE, PCA, CYX).
    Modified,
    /// A solvent water molecule (HOH, WAT, DOD).
    Water,
    /// Any other heteroatom group (ligands, ions, glycans).
    Other,
}

impl ResidueCategory {
    /// Decides the category for a residue name using the static tables.
    pub fn classify(name: &str) -> Self {
        if tables::RESIDUE_ONE_LETTER.contains_key(name) {
            ResidueCategory::Standard
        } else if tables::MODIFIED_RESIDUE_PARENTS.contains_key(name) {
            ResidueCategory::Modified
        } else if tables::WATER_RESIDUE_NAMES.contains(name) {
            ResidueCategory::Water
        } else {
            ResidueCategory::Other
        }
    }

    /// Returns true for categories that belong to the polymer sequence.
    pub fn is_polymer(&self) -> bool {
        matches!(self, ResidueCategory::Standard | ResidueCategory::Modified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub seq_num: i32,                       // Residue sequence number from source file
    pub insertion_code: Option<char>,       // Distinguishes residues sharing a sequence number
    pub name: String,                       // Name of the residue (e.g., "ALA", "MSE")
    pub category: ResidueCategory,          // Chemical role decided from the name
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        seq_num: i32,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            seq_num,
            insertion_code,
            name: name.to_string(),
            category: ResidueCategory::classify(name),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// The identity key within a chain: sequence number, then insertion code
    /// (absent sorts before any code).
    pub fn sort_key(&self) -> (i32, Option<char>) {
        (self.seq_num, self.insertion_code)
    }

    /// Renders the sequence position for reports, e.g. `"45"` or `"45A"`.
    pub fn seq_label(&self) -> String {
        match self.insertion_code {
            Some(code) => format!("{}{}", self.seq_num, code),
            None => self.seq_num.to_string(),
        }
    }
}
