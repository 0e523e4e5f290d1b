use super::ids::AtomId;
use std::fmt;

/// Distinguishes how a bond entered the model.
///
/// `Covalent` bonds come from explicit connectivity records in the source
/// file; `Disulfide` bonds are added by the disulfide annotation step and
/// are the ones rendered as SSBOND records on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondKind {
    #[default]
    Covalent,
    Disulfide,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondKind::Covalent => write!(f, "covalent"),
            BondKind::Disulfide => write!(f, "disulfide"),
        }
    }
}

/// An explicit bond between two atoms in a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub kind: BondKind,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, kind: BondKind) -> Self {
        Self {
            atom1_id,
            atom2_id,
            kind,
        }
    }

    /// Returns true if this bond involves the given atom.
    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }
}
