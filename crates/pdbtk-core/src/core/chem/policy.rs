use super::tables::{MODIFIED_RESIDUE_PARENTS, RESIDUE_ONE_LETTER};
use serde::Deserialize;

/// One-letter code emitted for residues with no known translation.
pub const UNKNOWN_RESIDUE_CODE: char = 'X';

/// Controls how non-standard polymer residues translate to one-letter codes.
///
/// Canonical residues always translate through the standard table; this policy
/// only decides the fate of modified residues such as MSE or PTR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonStandardPolicy {
    /// Translate through the parent residue when one is known, so MSE reads
    /// as methionine ('M') rather than as an unknown.
    #[default]
    MapToParent,
    /// Emit [`UNKNOWN_RESIDUE_CODE`] for every residue outside the canonical table.
    MapToUnknown,
}

/// Translates a three-letter residue name to its one-letter code.
///
/// # Arguments
///
/// * `residue_name` - The residue name as it appears in the coordinate file.
/// * `policy` - How to treat names outside the canonical table.
///
/// # Return
///
/// The one-letter code, or [`UNKNOWN_RESIDUE_CODE`] when the name cannot be
/// translated under the given policy.
pub fn one_letter_code(residue_name: &str, policy: NonStandardPolicy) -> char {
    let name = residue_name.trim();
    if let Some(&code) = RESIDUE_ONE_LETTER.get(name) {
        return code;
    }
    match policy {
        NonStandardPolicy::MapToParent => MODIFIED_RESIDUE_PARENTS
            .get(name)
            .and_then(|parent| RESIDUE_ONE_LETTER.get(parent))
            .copied()
            .unwrap_or(UNKNOWN_RESIDUE_CODE),
        NonStandardPolicy::MapToUnknown => UNKNOWN_RESIDUE_CODE,
    }
}

/// Resolves the canonical parent name of a modified residue, if one is known.
pub fn parent_residue_name(residue_name: &str) -> Option<&'static str> {
    MODIFIED_RESIDUE_PARENTS.get(residue_name.trim()).copied()
}

/// Returns true for cysteine and for modified residues whose parent is cysteine.
pub fn is_cysteine(residue_name: &str) -> bool {
    let name = residue_name.trim();
    name == "CYS" || parent_residue_name(name) == Some("CYS")
}
