use phf::{Map, Set, phf_map, phf_set};

/// Name of the cysteine side-chain sulfur atom used for disulfide geometry.
pub const CYSTEINE_SULFUR_GAMMA_ATOM_NAME: &str = "SG";

#[rustfmt::skip]
pub static RESIDUE_ONE_LETTER: Map<&'static str, char> = phf_map! {
    // --- Canonical Amino Acids ---
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',

    // --- Rare Genetically Encoded Residues ---
    "SEC" => 'U', "PYL" => 'O',
};

#[rustfmt::skip]
pub static MODIFIED_RESIDUE_PARENTS: Map<&'static str, &'static str> = phf_map! {
    // --- Crystallographic Substitutions ---
    "MSE" => "MET", // selenomethionine

    // --- Post-Translational Modifications ---
    "SEP" => "SER", "TPO" => "THR", "PTR" => "TYR", // phosphorylated
    "HYP" => "PRO", // hydroxyproline
    "KCX" => "LYS", "MLY" => "LYS",
    "PCA" => "GLU", // pyroglutamate

    // --- Cysteine Variants ---
    "CYX" => "CYS", // disulfide-bridged naming convention
    "CSO" => "CYS", "CME" => "CYS",

    // --- Histidine Protonation-State Names (CHARMM / AMBER) ---
    "HSD" => "HIS", "HSE" => "HIS", "HSP" => "HIS",
    "HID" => "HIS", "HIE" => "HIS", "HIP" => "HIS",
};

pub static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "DOD",
};
