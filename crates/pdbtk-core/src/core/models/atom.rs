use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents a single atom record resolved from a coordinate file.
///
/// This struct carries the experimentally observed properties of one atom:
/// its name within the residue, its position, and the crystallographic
/// bookkeeping fields (occupancy, temperature factor) needed to collapse
/// alternate locations and to write the atom back out. Atom names are unique
/// within a residue after alternate-location resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom within its residue (e.g., "CA", "N", "SG").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The atom serial number from the source file.
    pub serial: i32,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The crystallographic occupancy (defaults to 1.0 when absent).
    pub occupancy: f64,
    /// The isotropic temperature factor (defaults to 0.0 when absent).
    pub temp_factor: f64,
    /// The element symbol (e.g., "C", "N", "S"); empty when the source
    /// file omits it.
    pub element: String,
}

impl Atom {
    /// Creates a new `Atom` with default values for the optional fields.
    ///
    /// The serial defaults to 0, occupancy to 1.0, temperature factor to 0.0,
    /// and the element symbol to empty; callers fill these in as the source
    /// record provides them.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            serial: 0,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.serial, 0);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
        assert_eq!(atom.element, "");
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let residue_id = ResidueId::default();
        let mut atom1 = Atom::new("SG", residue_id, Point3::new(0.0, 0.0, 0.0));
        atom1.occupancy = 0.5;
        atom1.element = "S".to_string();
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
