use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use super::topology::{Bond, BondKind};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;

/// Represents a complete structural model parsed from a coordinate file.
///
/// This struct is the root aggregate for all analyses: it owns every chain,
/// residue, atom, and explicit bond, stored in slot maps for stable IDs and
/// cheap lookup. Once parsing finishes the model is treated as immutable;
/// analyzers take a shared reference and return new values (a filtered copy,
/// an annotated copy, or derived reports) rather than mutating it.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Source identifier, typically the PDB id code or the input file stem.
    source: String,
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// List of all explicit bonds in the model.
    bonds: Vec<Bond>,
    /// Chain IDs in file order; slot-map iteration order is not relied on.
    chain_order: Vec<ChainId>,
    /// Lookup map keyed by chain, sequence number, and insertion code.
    residue_id_map: HashMap<(ChainId, i32, Option<char>), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl Structure {
    /// Creates a new, empty structure with the given source identifier.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// The source identifier this model was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replaces the source identifier, e.g. once a parser learns the real id.
    pub(crate) fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&mut Atom)` if the atom exists, otherwise `None`.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the model.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The residue ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the model.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The chain ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Chain)` if the chain exists, otherwise `None`.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in file order.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns a slice of all explicit bonds in the model.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The character identifier of the chain.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its full identity key.
    ///
    /// Residue identity is the pair of sequence number and insertion code;
    /// two residues may share a sequence number and differ only in the code.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `seq_num` - The residue sequence number.
    /// * `insertion_code` - The insertion code, or `None` when blank.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        seq_num: i32,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, seq_num, insertion_code))
            .copied()
    }

    /// Adds a new chain to the model or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given identifier
    /// already exists, it returns the existing chain ID without creating
    /// a duplicate, which keeps chain identifiers unique within a model.
    ///
    /// # Arguments
    ///
    /// * `id` - The single-character identifier for the chain.
    ///
    /// # Return
    ///
    /// The ID of the chain (new or existing).
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&chain_id) = self.chain_id_map.get(&id) {
            return chain_id;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to the model or returns the existing one.
    ///
    /// The residue is classified from its name and appended to either the
    /// chain's polymer list or its heterogen list. This method is idempotent
    /// on the `(chain, sequence number, insertion code)` key; a repeated key
    /// returns the existing residue ID, which is how the lenient parser
    /// merges non-contiguous records for the same residue.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `seq_num` - The residue sequence number.
    /// * `insertion_code` - The insertion code, or `None` when blank.
    /// * `name` - The residue name (e.g., "ALA", "MSE", "HOH").
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (e.g., if
    /// the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        seq_num: i32,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        if !self.chains.contains_key(chain_id) {
            return None;
        }
        let key = (chain_id, seq_num, insertion_code);
        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let residue = Residue::new(seq_num, insertion_code, name, chain_id);
        let is_polymer = residue.category.is_polymer();
        let residue_id = self.residues.insert(residue);
        self.residue_id_map.insert(key, residue_id);

        let chain = self.chains.get_mut(chain_id)?;
        if is_polymer {
            chain.residues.push(residue_id);
        } else {
            chain.heterogens.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// This method inserts the atom into the model, registers it with the
    /// given residue, and initializes its bond adjacency list. The atom's
    /// parent reference is overwritten with `residue_id`.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The ID of the residue to add the atom to.
    /// * `atom` - The atom to add.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (e.g., if the
    /// residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }

        atom.residue_id = residue_id;
        let name = atom.name.clone();

        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());

        let residue = self.residues.get_mut(residue_id)?;
        residue.add_atom(&name, atom_id);

        Some(atom_id)
    }

    /// Adds an explicit bond between two atoms.
    ///
    /// This method creates a bond between the specified atoms and updates
    /// the adjacency cache. It is idempotent; adding an existing bond
    /// succeeds without creating duplicates.
    ///
    /// # Arguments
    ///
    /// * `atom1_id` - ID of the first atom.
    /// * `atom2_id` - ID of the second atom.
    /// * `kind` - How the bond was established.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (e.g., if either
    /// atom doesn't exist).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, kind: BondKind) -> Option<()> {
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return None;
        }

        if let Some(neighbors) = self.bond_adjacency.get(atom1_id) {
            if neighbors.contains(&atom2_id) {
                // Bond already exists, operation is successful (idempotent)
                return Some(());
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, kind));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Retrieves the bonded neighbors of an atom.
    ///
    /// # Arguments
    ///
    /// * `atom_id` - The ID of the atom to query.
    ///
    /// # Return
    ///
    /// Returns `Some(&[AtomId])` if the atom exists, otherwise `None`.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }
}
