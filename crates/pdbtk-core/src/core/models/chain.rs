use super::ids::ResidueId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chain {
    pub id: char,                          // Chain identifier (e.g., 'A', 'B')
    pub(crate) residues: Vec<ResidueId>,   // Polymer residues in file order
    pub(crate) heterogens: Vec<ResidueId>, // Waters and other het groups in file order
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
            heterogens: Vec::new(),
        }
    }

    /// Polymer residues in file insertion order, which may not be
    /// numerically monotonic.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    /// Non-polymer groups (waters, ligands) recorded under this chain id.
    pub fn heterogens(&self) -> &[ResidueId] {
        &self.heterogens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_residue_id(n: u64) -> ResidueId {
        ResidueId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_chain_starts_empty() {
        let chain = Chain::new('A');
        assert_eq!(chain.id, 'A');
        assert!(chain.residues().is_empty());
        assert!(chain.heterogens().is_empty());
    }

    #[test]
    fn polymer_and_heterogen_lists_are_independent() {
        let mut chain = Chain::new('B');
        chain.residues.push(dummy_residue_id(1));
        chain.heterogens.push(dummy_residue_id(2));
        chain.heterogens.push(dummy_residue_id(3));
        assert_eq!(chain.residues().len(), 1);
        assert_eq!(chain.heterogens().len(), 2);
    }
}
