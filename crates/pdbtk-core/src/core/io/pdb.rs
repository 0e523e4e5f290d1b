use crate::core::chem::tables::CYSTEINE_SULFUR_GAMMA_ATOM_NAME;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::structure::Structure;
use crate::core::models::topology::BondKind;
use nalgebra::Point3;
use phf::{Set, phf_set};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Record classification for a PDB line, decided once from columns 1-6.
///
/// The set of recognized records is closed; anything outside the standard
/// vocabulary classifies as [`RecordKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Atom,
    Hetatm,
    Ter,
    Model,
    Endmdl,
    Header,
    Title,
    Ssbond,
    Conect,
    End,
    /// A standard PDB record this parser does not model (REMARK, SEQRES, ...).
    Ignored,
    /// A record name outside the standard PDB vocabulary.
    Unknown,
}

// Standard v3.3 record names with no structural content for this model.
#[rustfmt::skip]
static IGNORED_RECORD_NAMES: Set<&'static str> = phf_set! {
    "ANISOU", "AUTHOR", "CAVEAT", "CISPEP", "COMPND", "CRYST1", "DBREF",
    "DBREF1", "DBREF2", "EXPDTA", "FORMUL", "HELIX",  "HET",    "HETNAM",
    "HETSYN", "JRNL",   "KEYWDS", "LINK",   "MASTER", "MDLTYP", "MODRES",
    "MTRIX1", "MTRIX2", "MTRIX3", "NUMMDL", "OBSLTE", "ORIGX1", "ORIGX2",
    "ORIGX3", "REMARK", "REVDAT", "SCALE1", "SCALE2", "SCALE3", "SEQADV",
    "SEQRES", "SHEET",  "SIGATM", "SIGUIJ", "SITE",   "SOURCE", "SPLIT",
    "SPRSDE", "TVECT",
};

impl RecordKind {
    pub fn classify(record_name: &str) -> Self {
        match record_name {
            "ATOM" => RecordKind::Atom,
            "HETATM" => RecordKind::Hetatm,
            "TER" => RecordKind::Ter,
            "MODEL" => RecordKind::Model,
            "ENDMDL" => RecordKind::Endmdl,
            "HEADER" => RecordKind::Header,
            "TITLE" => RecordKind::Title,
            "SSBOND" => RecordKind::Ssbond,
            "CONECT" => RecordKind::Conect,
            "END" => RecordKind::End,
            name if IGNORED_RECORD_NAMES.contains(name) => RecordKind::Ignored,
            _ => RecordKind::Unknown,
        }
    }
}

/// Controls how the parser reacts to recoverable input problems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdbReadOptions {
    /// Fail on problems the default lenient mode records as diagnostics:
    /// malformed coordinate records, unknown record types, duplicate atom
    /// serials, and non-contiguous residue records.
    pub strict: bool,
}

impl PdbReadOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A non-fatal problem the lenient parser recorded instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub id_code: Option<String>,
    pub classification: Option<String>,
    pub deposition_date: Option<String>,
    pub title: Option<String>,
    /// Counts of records that were recognized but carried no structural content.
    pub ignored_records: BTreeMap<String, usize>,
    /// Problems the lenient parser skipped over; empty after a strict parse.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("Unrecognized record type '{record}'")]
    UnknownRecord { record: String },
    #[error("Residue {residue} reappears after intervening residues")]
    NonContiguousResidue { residue: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn char_at(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| *c != ' ')
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn residue_label(seq_num: i32, insertion_code: Option<char>) -> String {
    match insertion_code {
        Some(code) => format!("{}{}", seq_num, code),
        None => seq_num.to_string(),
    }
}

fn parse_int(value: &str, columns: &str) -> Result<i32, PdbParseErrorKind> {
    value.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        columns: columns.into(),
        value: value.into(),
    })
}

fn parse_float(value: &str, columns: &str) -> Result<f64, PdbParseErrorKind> {
    value.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
        columns: columns.into(),
        value: value.into(),
    })
}

struct RawCoordinate {
    serial: i32,
    name: String,
    res_name: String,
    chain: char,
    seq_num: i32,
    insertion_code: Option<char>,
    position: Point3<f64>,
    occupancy: f64,
    temp_factor: f64,
    element: String,
}

struct RawSsbond {
    chain1: char,
    seq1: i32,
    icode1: Option<char>,
    chain2: char,
    seq2: i32,
    icode2: Option<char>,
}

/// Reader and writer for the fixed-column PDB coordinate format.
pub struct PdbFile;

impl PdbFile {
    /// Reads a structural model with explicit parse options.
    ///
    /// The lenient default keeps a best-effort model and accumulates
    /// [`Diagnostic`]s in the metadata; strict mode turns those same
    /// problems into errors.
    pub fn read_from_with(
        reader: &mut impl BufRead,
        options: PdbReadOptions,
    ) -> Result<(Structure, PdbMetadata), PdbError> {
        let mut structure = Structure::new("unknown");
        let mut metadata = PdbMetadata::default();

        let mut serial_map: HashMap<i32, AtomId> = HashMap::new();
        let mut pending_ssbonds: Vec<(usize, RawSsbond)> = Vec::new();
        let mut pending_conect: Vec<(usize, i32, i32)> = Vec::new();

        let mut seen_keys: HashSet<(char, i32, Option<char>)> = HashSet::new();
        let mut last_key: Option<(char, i32, Option<char>)> = None;
        let mut saw_coordinates = false;
        let mut coordinates_closed = false;
        let mut reported_extra_models = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.trim().is_empty() {
                continue;
            }
            let record_name = slice_and_trim(&line, 0, 6);

            match RecordKind::classify(record_name) {
                RecordKind::Atom | RecordKind::Hetatm => {
                    if coordinates_closed {
                        if !reported_extra_models {
                            metadata.diagnostics.push(Diagnostic {
                                line: line_num,
                                message: "Multiple models present; only the first model was parsed"
                                    .to_string(),
                            });
                            reported_extra_models = true;
                        }
                        continue;
                    }
                    let raw = match Self::parse_coordinate_record(&line) {
                        Ok(raw) => raw,
                        Err(kind) if options.strict => {
                            return Err(PdbError::Parse {
                                line: line_num,
                                kind,
                            });
                        }
                        Err(kind) => {
                            metadata.diagnostics.push(Diagnostic {
                                line: line_num,
                                message: kind.to_string(),
                            });
                            continue;
                        }
                    };

                    let key = (raw.chain, raw.seq_num, raw.insertion_code);
                    if last_key != Some(key) {
                        if seen_keys.contains(&key) {
                            let residue = format!(
                                "{}:{}",
                                raw.chain,
                                residue_label(raw.seq_num, raw.insertion_code)
                            );
                            let kind = PdbParseErrorKind::NonContiguousResidue { residue };
                            if options.strict {
                                return Err(PdbError::Parse {
                                    line: line_num,
                                    kind,
                                });
                            }
                            metadata.diagnostics.push(Diagnostic {
                                line: line_num,
                                message: kind.to_string(),
                            });
                        }
                        seen_keys.insert(key);
                        last_key = Some(key);
                    }

                    let chain_id = structure.add_chain(raw.chain);
                    let residue_id = structure
                        .add_residue(chain_id, raw.seq_num, raw.insertion_code, &raw.res_name)
                        .ok_or_else(|| {
                            PdbError::Inconsistency(format!(
                                "Failed to register residue {}:{}",
                                raw.chain,
                                residue_label(raw.seq_num, raw.insertion_code)
                            ))
                        })?;

                    let existing = structure
                        .residue(residue_id)
                        .and_then(|residue| residue.get_atom_id_by_name(&raw.name));
                    let atom_id = match existing {
                        // Alternate location record for an atom already seen: the
                        // first-seen location wins unless this one has strictly
                        // higher occupancy.
                        Some(atom_id) => {
                            let kept_occupancy =
                                structure.atom(atom_id).map_or(0.0, |atom| atom.occupancy);
                            if raw.occupancy > kept_occupancy {
                                if let Some(atom) = structure.atom_mut(atom_id) {
                                    atom.serial = raw.serial;
                                    atom.position = raw.position;
                                    atom.occupancy = raw.occupancy;
                                    atom.temp_factor = raw.temp_factor;
                                    atom.element = raw.element;
                                }
                            }
                            atom_id
                        }
                        None => {
                            let mut atom = Atom::new(&raw.name, residue_id, raw.position);
                            atom.serial = raw.serial;
                            atom.occupancy = raw.occupancy;
                            atom.temp_factor = raw.temp_factor;
                            atom.element = raw.element;
                            structure
                                .add_atom_to_residue(residue_id, atom)
                                .ok_or_else(|| {
                                    PdbError::Inconsistency(format!(
                                        "Failed to register atom '{}' on residue {}:{}",
                                        raw.name,
                                        raw.chain,
                                        residue_label(raw.seq_num, raw.insertion_code)
                                    ))
                                })?
                        }
                    };

                    if let Some(&first) = serial_map.get(&raw.serial) {
                        if first != atom_id {
                            let message = format!("Duplicate atom serial: {}", raw.serial);
                            if options.strict {
                                return Err(PdbError::Inconsistency(message));
                            }
                            metadata.diagnostics.push(Diagnostic {
                                line: line_num,
                                message,
                            });
                        }
                    } else {
                        serial_map.insert(raw.serial, atom_id);
                    }
                    saw_coordinates = true;
                }
                RecordKind::Ter => {
                    if !coordinates_closed {
                        last_key = None;
                    }
                }
                RecordKind::Model => {
                    if saw_coordinates {
                        coordinates_closed = true;
                    }
                }
                RecordKind::Endmdl => {
                    coordinates_closed = true;
                }
                RecordKind::Header => {
                    metadata.classification = non_empty(slice_and_trim(&line, 10, 50));
                    metadata.deposition_date = non_empty(slice_and_trim(&line, 50, 59));
                    metadata.id_code = non_empty(slice_and_trim(&line, 62, 66));
                    if let Some(id_code) = &metadata.id_code {
                        structure.set_source(id_code.clone());
                    }
                }
                RecordKind::Title => {
                    let text = slice_and_trim(&line, 10, 80);
                    if !text.is_empty() {
                        match &mut metadata.title {
                            Some(title) => {
                                title.push(' ');
                                title.push_str(text);
                            }
                            None => metadata.title = Some(text.to_string()),
                        }
                    }
                }
                RecordKind::Ssbond => match Self::parse_ssbond_record(&line) {
                    Ok(raw) => pending_ssbonds.push((line_num, raw)),
                    Err(kind) if options.strict => {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind,
                        });
                    }
                    Err(kind) => metadata.diagnostics.push(Diagnostic {
                        line: line_num,
                        message: kind.to_string(),
                    }),
                },
                RecordKind::Conect => match Self::parse_conect_record(&line) {
                    Ok((base, partners)) => {
                        for partner in partners {
                            pending_conect.push((line_num, base, partner));
                        }
                    }
                    Err(kind) if options.strict => {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind,
                        });
                    }
                    Err(kind) => metadata.diagnostics.push(Diagnostic {
                        line: line_num,
                        message: kind.to_string(),
                    }),
                },
                RecordKind::End => break,
                RecordKind::Ignored => {
                    *metadata
                        .ignored_records
                        .entry(record_name.to_string())
                        .or_insert(0) += 1;
                }
                RecordKind::Unknown => {
                    let kind = PdbParseErrorKind::UnknownRecord {
                        record: record_name.to_string(),
                    };
                    if options.strict {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind,
                        });
                    }
                    metadata.diagnostics.push(Diagnostic {
                        line: line_num,
                        message: kind.to_string(),
                    });
                    *metadata
                        .ignored_records
                        .entry(record_name.to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        if !saw_coordinates {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        // SSBOND resolves before CONECT so a pair named by both keeps its
        // disulfide provenance.
        for (line_num, raw) in pending_ssbonds {
            match Self::resolve_ssbond(&structure, &raw) {
                Ok((sulfur1, sulfur2)) => {
                    structure.add_bond(sulfur1, sulfur2, BondKind::Disulfide);
                }
                Err(message) => metadata.diagnostics.push(Diagnostic {
                    line: line_num,
                    message,
                }),
            }
        }
        for (line_num, serial1, serial2) in pending_conect {
            match (serial_map.get(&serial1), serial_map.get(&serial2)) {
                (Some(&atom1), Some(&atom2)) => {
                    if atom1 != atom2 {
                        structure.add_bond(atom1, atom2, BondKind::Covalent);
                    }
                }
                _ => {
                    let missing = if serial_map.contains_key(&serial1) {
                        serial2
                    } else {
                        serial1
                    };
                    metadata.diagnostics.push(Diagnostic {
                        line: line_num,
                        message: format!("CONECT references unknown atom serial {}", missing),
                    });
                }
            }
        }

        Ok((structure, metadata))
    }

    /// Reads a structural model from a file path with explicit parse options.
    pub fn read_from_path_with<P: AsRef<Path>>(
        path: P,
        options: PdbReadOptions,
    ) -> Result<(Structure, PdbMetadata), PdbError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from_with(&mut reader, options)
    }

    fn parse_coordinate_record(line: &str) -> Result<RawCoordinate, PdbParseErrorKind> {
        if line.len() < 54 {
            return Err(PdbParseErrorKind::LineTooShort);
        }

        let serial = parse_int(slice_and_trim(line, 6, 11), "7-11")?;
        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return Err(PdbParseErrorKind::MissingRequiredField {
                columns: "13-16".into(),
            });
        }
        let res_name = slice_and_trim(line, 17, 20);
        if res_name.is_empty() {
            return Err(PdbParseErrorKind::MissingRequiredField {
                columns: "18-20".into(),
            });
        }
        let chain = char_at(line, 21).unwrap_or(' ');
        let seq_num = parse_int(slice_and_trim(line, 22, 26), "23-26")?;
        let insertion_code = char_at(line, 26);

        let x = parse_float(slice_and_trim(line, 30, 38), "31-38")?;
        let y = parse_float(slice_and_trim(line, 38, 46), "39-46")?;
        let z = parse_float(slice_and_trim(line, 46, 54), "47-54")?;

        let occupancy_str = slice_and_trim(line, 54, 60);
        let occupancy = if occupancy_str.is_empty() {
            1.0
        } else {
            parse_float(occupancy_str, "55-60")?
        };
        let temp_str = slice_and_trim(line, 60, 66);
        let temp_factor = if temp_str.is_empty() {
            0.0
        } else {
            parse_float(temp_str, "61-66")?
        };
        let element = slice_and_trim(line, 76, 78).to_string();

        Ok(RawCoordinate {
            serial,
            name: name.to_string(),
            res_name: res_name.to_string(),
            chain,
            seq_num,
            insertion_code,
            position: Point3::new(x, y, z),
            occupancy,
            temp_factor,
            element,
        })
    }

    fn parse_ssbond_record(line: &str) -> Result<RawSsbond, PdbParseErrorKind> {
        let chain1 = char_at(line, 15).ok_or(PdbParseErrorKind::MissingRequiredField {
            columns: "16".into(),
        })?;
        let seq1 = parse_int(slice_and_trim(line, 17, 21), "18-21")?;
        let icode1 = char_at(line, 21);
        let chain2 = char_at(line, 29).ok_or(PdbParseErrorKind::MissingRequiredField {
            columns: "30".into(),
        })?;
        let seq2 = parse_int(slice_and_trim(line, 31, 35), "32-35")?;
        let icode2 = char_at(line, 35);

        Ok(RawSsbond {
            chain1,
            seq1,
            icode1,
            chain2,
            seq2,
            icode2,
        })
    }

    fn parse_conect_record(line: &str) -> Result<(i32, Vec<i32>), PdbParseErrorKind> {
        let base = parse_int(slice_and_trim(line, 6, 11), "7-11")?;
        let mut partners = Vec::new();
        for (start, end, columns) in [
            (11, 16, "12-16"),
            (16, 21, "17-21"),
            (21, 26, "22-26"),
            (26, 31, "27-31"),
        ] {
            let field = slice_and_trim(line, start, end);
            if field.is_empty() {
                continue;
            }
            partners.push(parse_int(field, columns)?);
        }
        Ok((base, partners))
    }

    fn resolve_ssbond(structure: &Structure, raw: &RawSsbond) -> Result<(AtomId, AtomId), String> {
        let resolve_sulfur = |chain: char, seq: i32, icode: Option<char>| {
            let chain_id = structure
                .find_chain_by_id(chain)
                .ok_or_else(|| format!("SSBOND references unknown chain '{}'", chain))?;
            let residue_id = structure.find_residue(chain_id, seq, icode).ok_or_else(|| {
                format!(
                    "SSBOND references unknown residue {}:{}",
                    chain,
                    residue_label(seq, icode)
                )
            })?;
            structure
                .residue(residue_id)
                .and_then(|residue| residue.get_atom_id_by_name(CYSTEINE_SULFUR_GAMMA_ATOM_NAME))
                .ok_or_else(|| {
                    format!(
                        "SSBOND residue {}:{} has no {} atom",
                        chain,
                        residue_label(seq, icode),
                        CYSTEINE_SULFUR_GAMMA_ATOM_NAME
                    )
                })
        };

        let sulfur1 = resolve_sulfur(raw.chain1, raw.seq1, raw.icode1)?;
        let sulfur2 = resolve_sulfur(raw.chain2, raw.seq2, raw.icode2)?;
        Ok((sulfur1, sulfur2))
    }
}

fn pad_atom_name(name: &str) -> String {
    if name.len() < 4 {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

fn format_coordinate_line(
    record_name: &str,
    serial: i32,
    atom: &Atom,
    res_name: &str,
    chain: char,
    seq_num: i32,
    insertion_code: Option<char>,
) -> String {
    format!(
        "{:<6}{:>5} {} {:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record_name,
        serial,
        pad_atom_name(&atom.name),
        res_name,
        chain,
        seq_num,
        insertion_code.unwrap_or(' '),
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.temp_factor,
        atom.element
    )
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        Self::read_from_with(reader, PdbReadOptions::default())
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        if metadata.classification.is_some()
            || metadata.deposition_date.is_some()
            || metadata.id_code.is_some()
        {
            writeln!(
                writer,
                "HEADER    {:<40}{:<9}   {:<4}",
                metadata.classification.as_deref().unwrap_or(""),
                metadata.deposition_date.as_deref().unwrap_or(""),
                metadata.id_code.as_deref().unwrap_or("")
            )?;
        }
        if let Some(title) = &metadata.title {
            let chars: Vec<char> = title.chars().collect();
            for (index, chunk) in chars.chunks(70).enumerate() {
                let text: String = chunk.iter().collect();
                if index == 0 {
                    writeln!(writer, "TITLE     {}", text)?;
                } else {
                    writeln!(writer, "TITLE   {:>2} {}", index + 1, text)?;
                }
            }
        }

        let described = |atom_id: AtomId| {
            let atom = structure
                .atom(atom_id)
                .ok_or_else(|| PdbError::Inconsistency("Bond references unknown atom".into()))?;
            let residue = structure.residue(atom.residue_id).ok_or_else(|| {
                PdbError::Inconsistency("Atom references unknown residue".into())
            })?;
            let chain = structure
                .chain(residue.chain_id)
                .ok_or_else(|| PdbError::Inconsistency("Residue references unknown chain".into()))?;
            Ok::<_, PdbError>((atom, residue, chain))
        };

        let mut ssbond_serial = 0;
        for bond in structure.bonds() {
            if bond.kind != BondKind::Disulfide {
                continue;
            }
            let (atom1, residue1, chain1) = described(bond.atom1_id)?;
            let (atom2, residue2, chain2) = described(bond.atom2_id)?;
            ssbond_serial += 1;
            let distance = (atom1.position - atom2.position).norm();
            writeln!(
                writer,
                "SSBOND{:>4} {:>3} {} {:>4}{}   {:>3} {} {:>4}{}{:>29}{:>7} {:>5.2}",
                ssbond_serial,
                residue1.name,
                chain1.id,
                residue1.seq_num,
                residue1.insertion_code.unwrap_or(' '),
                residue2.name,
                chain2.id,
                residue2.seq_num,
                residue2.insertion_code.unwrap_or(' '),
                "1555",
                "1555",
                distance
            )?;
        }

        let mut serial_of: HashMap<AtomId, i32> = HashMap::new();
        let mut next_serial: i32 = 1;

        for (_, chain) in structure.chains() {
            let mut last_polymer = None;
            for &residue_id in chain.residues() {
                let residue = structure.residue(residue_id).ok_or_else(|| {
                    PdbError::Inconsistency("Chain references unknown residue".into())
                })?;
                for &atom_id in residue.atoms() {
                    let atom = structure.atom(atom_id).ok_or_else(|| {
                        PdbError::Inconsistency("Residue references unknown atom".into())
                    })?;
                    serial_of.insert(atom_id, next_serial);
                    writeln!(
                        writer,
                        "{}",
                        format_coordinate_line(
                            "ATOM",
                            next_serial,
                            atom,
                            &residue.name,
                            chain.id,
                            residue.seq_num,
                            residue.insertion_code,
                        )
                    )?;
                    next_serial += 1;
                }
                last_polymer = Some(residue);
            }
            if let Some(residue) = last_polymer {
                writeln!(
                    writer,
                    "TER   {:>5}      {:>3} {}{:>4}{}",
                    next_serial,
                    residue.name,
                    chain.id,
                    residue.seq_num,
                    residue.insertion_code.unwrap_or(' ')
                )?;
                next_serial += 1;
            }
        }
        for (_, chain) in structure.chains() {
            for &residue_id in chain.heterogens() {
                let residue = structure.residue(residue_id).ok_or_else(|| {
                    PdbError::Inconsistency("Chain references unknown residue".into())
                })?;
                for &atom_id in residue.atoms() {
                    let atom = structure.atom(atom_id).ok_or_else(|| {
                        PdbError::Inconsistency("Residue references unknown atom".into())
                    })?;
                    serial_of.insert(atom_id, next_serial);
                    writeln!(
                        writer,
                        "{}",
                        format_coordinate_line(
                            "HETATM",
                            next_serial,
                            atom,
                            &residue.name,
                            chain.id,
                            residue.seq_num,
                            residue.insertion_code,
                        )
                    )?;
                    next_serial += 1;
                }
            }
        }

        if !structure.bonds().is_empty() {
            let mut bond_map: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
            for bond in structure.bonds() {
                let serial1 = serial_of.get(&bond.atom1_id).ok_or_else(|| {
                    PdbError::Inconsistency("Bond references an unwritten atom".into())
                })?;
                let serial2 = serial_of.get(&bond.atom2_id).ok_or_else(|| {
                    PdbError::Inconsistency("Bond references an unwritten atom".into())
                })?;
                bond_map.entry(*serial1).or_default().push(*serial2);
                bond_map.entry(*serial2).or_default().push(*serial1);
            }
            for (serial, partners) in &mut bond_map {
                partners.sort_unstable();
                for chunk in partners.chunks(4) {
                    write!(writer, "CONECT{:>5}", serial)?;
                    for partner in chunk {
                        write!(writer, "{:>5}", partner)?;
                    }
                    writeln!(writer)?;
                }
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }

    fn write_structure_to(
        structure: &Structure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(structure, &PdbMetadata::default(), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord_line(
        record: &str,
        serial: i32,
        name: &str,
        res_name: &str,
        chain: char,
        seq: i32,
        icode: Option<char>,
        pos: [f64; 3],
        occupancy: f64,
        element: &str,
    ) -> String {
        format!(
            "{:<6}{:>5} {} {:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record,
            serial,
            pad_atom_name(name),
            res_name,
            chain,
            seq,
            icode.unwrap_or(' '),
            pos[0],
            pos[1],
            pos[2],
            occupancy,
            0.0,
            element
        )
    }

    fn two_chain_input() -> String {
        let mut lines = vec![
            "HEADER    HYDROLASE                               12-JAN-98   1ABC".to_string(),
            "TITLE     A SMALL TEST PROTEIN".to_string(),
        ];
        lines.push(coord_line(
            "ATOM",
            1,
            "N",
            "GLY",
            'A',
            1,
            None,
            [0.0, 0.0, 0.0],
            1.0,
            "N",
        ));
        lines.push(coord_line(
            "ATOM",
            2,
            "CA",
            "GLY",
            'A',
            1,
            None,
            [1.4, 0.0, 0.0],
            1.0,
            "C",
        ));
        lines.push(coord_line(
            "ATOM",
            3,
            "CA",
            "ALA",
            'A',
            2,
            None,
            [2.8, 1.1, 0.0],
            1.0,
            "C",
        ));
        lines.push("TER".to_string());
        lines.push(coord_line(
            "ATOM",
            4,
            "CA",
            "SER",
            'B',
            1,
            None,
            [5.0, 5.0, 5.0],
            1.0,
            "C",
        ));
        lines.push("TER".to_string());
        lines.push(coord_line(
            "HETATM",
            5,
            "O",
            "HOH",
            'B',
            101,
            None,
            [9.0, 9.0, 9.0],
            1.0,
            "O",
        ));
        lines.push("END".to_string());
        lines.join("\n")
    }

    mod parsing {
        use super::*;

        #[test]
        fn parses_atoms_into_chains_and_residues() {
            let input = two_chain_input();
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert_eq!(structure.chains().count(), 2);
            assert_eq!(structure.atoms_iter().count(), 5);

            let chain_a = structure.find_chain_by_id('A').unwrap();
            let chain_b = structure.find_chain_by_id('B').unwrap();
            assert_eq!(structure.chain(chain_a).unwrap().residues().len(), 2);
            assert_eq!(structure.chain(chain_b).unwrap().residues().len(), 1);
            assert_eq!(structure.chain(chain_b).unwrap().heterogens().len(), 1);

            let gly = structure.find_residue(chain_a, 1, None).unwrap();
            let gly = structure.residue(gly).unwrap();
            assert_eq!(gly.name, "GLY");
            let ca = gly.get_atom_id_by_name("CA").unwrap();
            let ca = structure.atom(ca).unwrap();
            assert!((ca.position.x - 1.4).abs() < 1e-9);
            assert_eq!(ca.element, "C");

            assert!(metadata.diagnostics.is_empty());
        }

        #[test]
        fn parses_a_real_format_line() {
            let line =
                "ATOM      1  N   THR A   2      17.047  14.099   3.625  1.00 13.79           N";
            let input = format!("{}\nEND", line);
            let (structure, _) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            let chain_id = structure.find_chain_by_id('A').unwrap();
            let residue_id = structure.find_residue(chain_id, 2, None).unwrap();
            let residue = structure.residue(residue_id).unwrap();
            assert_eq!(residue.name, "THR");
            let atom = structure.atom(residue.get_atom_id_by_name("N").unwrap()).unwrap();
            assert_eq!(atom.serial, 1);
            assert!((atom.position.y - 14.099).abs() < 1e-9);
            assert!((atom.occupancy - 1.0).abs() < 1e-9);
            assert!((atom.temp_factor - 13.79).abs() < 1e-9);
        }

        #[test]
        fn reads_header_and_title_metadata() {
            let input = two_chain_input();
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert_eq!(metadata.classification.as_deref(), Some("HYDROLASE"));
            assert_eq!(metadata.deposition_date.as_deref(), Some("12-JAN-98"));
            assert_eq!(metadata.id_code.as_deref(), Some("1ABC"));
            assert_eq!(metadata.title.as_deref(), Some("A SMALL TEST PROTEIN"));
            assert_eq!(structure.source(), "1ABC");
        }

        #[test]
        fn concatenates_title_continuation_lines() {
            let mut input = String::from("TITLE     FIRST HALF OF THE\n");
            input.push_str("TITLE    2 SECOND HALF\n");
            input.push_str(&coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let (_, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();
            assert_eq!(
                metadata.title.as_deref(),
                Some("FIRST HALF OF THE SECOND HALF")
            );
        }

        #[test]
        fn residues_with_insertion_codes_stay_distinct() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "SER",
                'A',
                82,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "CA",
                "THR",
                'A',
                82,
                Some('A'),
                [3.8, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");
            let (structure, _) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            let chain_id = structure.find_chain_by_id('A').unwrap();
            assert_eq!(structure.chain(chain_id).unwrap().residues().len(), 2);
            assert!(structure.find_residue(chain_id, 82, None).is_some());
            assert!(structure.find_residue(chain_id, 82, Some('A')).is_some());
        }

        #[test]
        fn alternate_locations_keep_highest_occupancy() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "SER",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                0.4,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "CA",
                "SER",
                'A',
                1,
                None,
                [9.0, 9.0, 9.0],
                0.6,
                "C",
            ));
            let input = lines.join("\n");
            let (structure, _) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert_eq!(structure.atoms_iter().count(), 1);
            let (_, atom) = structure.atoms_iter().next().unwrap();
            assert!((atom.position.x - 9.0).abs() < 1e-9);
            assert!((atom.occupancy - 0.6).abs() < 1e-9);
            assert_eq!(atom.serial, 2);
        }

        #[test]
        fn alternate_locations_keep_first_seen_on_equal_occupancy() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "SER",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                0.5,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "CA",
                "SER",
                'A',
                1,
                None,
                [9.0, 9.0, 9.0],
                0.5,
                "C",
            ));
            let input = lines.join("\n");
            let (structure, _) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            let (_, atom) = structure.atoms_iter().next().unwrap();
            assert!((atom.position.x - 0.0).abs() < 1e-9);
            assert_eq!(atom.serial, 1);
        }

        #[test]
        fn truncated_line_defaults_occupancy_and_temp_factor() {
            let full = coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [1.0, 2.0, 3.0],
                1.0,
                "C",
            );
            let input = full[..54].to_string();
            let (structure, _) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            let (_, atom) = structure.atoms_iter().next().unwrap();
            assert!((atom.occupancy - 1.0).abs() < 1e-9);
            assert!((atom.temp_factor - 0.0).abs() < 1e-9);
            assert_eq!(atom.element, "");
        }

        #[test]
        fn ssbond_record_becomes_a_disulfide_bond() {
            let mut lines = vec![
                "SSBOND   1 CYS A    3    CYS A    9                          1555   1555  2.03"
                    .to_string(),
            ];
            lines.push(coord_line(
                "ATOM",
                1,
                "SG",
                "CYS",
                'A',
                3,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "S",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "SG",
                "CYS",
                'A',
                9,
                None,
                [2.03, 0.0, 0.0],
                1.0,
                "S",
            ));
            let input = lines.join("\n");
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert!(metadata.diagnostics.is_empty());
            assert_eq!(structure.bonds().len(), 1);
            assert_eq!(structure.bonds()[0].kind, BondKind::Disulfide);
        }

        #[test]
        fn unresolvable_ssbond_is_reported_not_fatal() {
            let mut lines = vec![
                "SSBOND   1 CYS A    3    CYS B    9                          1555   1555  2.03"
                    .to_string(),
            ];
            lines.push(coord_line(
                "ATOM",
                1,
                "SG",
                "CYS",
                'A',
                3,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "S",
            ));
            let input = lines.join("\n");
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert!(structure.bonds().is_empty());
            assert_eq!(metadata.diagnostics.len(), 1);
            assert!(metadata.diagnostics[0].message.contains("unknown chain 'B'"));
        }

        #[test]
        fn conect_records_become_covalent_bonds() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                10,
                "C1",
                "LIG",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                11,
                "C2",
                "LIG",
                'A',
                1,
                None,
                [1.5, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push("CONECT   10   11".to_string());
            lines.push("CONECT   11   10".to_string());
            let input = lines.join("\n");
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert!(metadata.diagnostics.is_empty());
            assert_eq!(structure.bonds().len(), 1, "reciprocal CONECT is one bond");
            assert_eq!(structure.bonds()[0].kind, BondKind::Covalent);
        }

        #[test]
        fn conect_with_unknown_serial_is_reported() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "C1",
                "LIG",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push("CONECT    1  999".to_string());
            let input = lines.join("\n");
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert!(structure.bonds().is_empty());
            assert_eq!(metadata.diagnostics.len(), 1);
            assert!(metadata.diagnostics[0].message.contains("999"));
        }

        #[test]
        fn only_the_first_model_is_parsed() {
            let mut lines = vec!["MODEL        1".to_string()];
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push("ENDMDL".to_string());
            lines.push("MODEL        2".to_string());
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [9.0, 9.0, 9.0],
                1.0,
                "C",
            ));
            lines.push("ENDMDL".to_string());
            lines.push("END".to_string());
            let input = lines.join("\n");
            let (structure, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert_eq!(structure.atoms_iter().count(), 1);
            let (_, atom) = structure.atoms_iter().next().unwrap();
            assert!((atom.position.x - 0.0).abs() < 1e-9);
            assert_eq!(metadata.diagnostics.len(), 1);
            assert!(metadata.diagnostics[0].message.contains("first model"));
        }

        #[test]
        fn ignored_records_are_counted() {
            let mut lines = vec![
                "REMARK   2 RESOLUTION.    1.80 ANGSTROMS.".to_string(),
                "REMARK 465 MISSING RESIDUES".to_string(),
                "CRYST1   40.960   18.650   22.520  90.00  90.77  90.00 P 1 21 1".to_string(),
            ];
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");
            let (_, metadata) = PdbFile::read_from(&mut input.as_bytes()).unwrap();

            assert_eq!(metadata.ignored_records.get("REMARK"), Some(&2));
            assert_eq!(metadata.ignored_records.get("CRYST1"), Some(&1));
            assert!(metadata.diagnostics.is_empty());
        }

        #[test]
        fn input_without_coordinates_is_an_error() {
            let input = "HEADER    HYDROLASE                               12-JAN-98   1ABC\nEND";
            let result = PdbFile::read_from(&mut input.as_bytes());
            assert!(matches!(result, Err(PdbError::MissingRecord(_))));
        }
    }

    mod lenient_and_strict {
        use super::*;

        fn malformed_coordinate_input() -> String {
            let good = coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            );
            let bad = good.replace("   0.000", "  xx.yyy");
            format!("{}\n{}", bad, good)
        }

        #[test]
        fn lenient_skips_malformed_records_with_diagnostics() {
            let input = malformed_coordinate_input();
            let (structure, metadata) =
                PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::default()).unwrap();

            assert_eq!(structure.atoms_iter().count(), 1);
            assert_eq!(metadata.diagnostics.len(), 1);
            assert_eq!(metadata.diagnostics[0].line, 1);
        }

        #[test]
        fn strict_fails_on_malformed_coordinates() {
            let input = malformed_coordinate_input();
            let result = PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::strict());
            assert!(matches!(
                result,
                Err(PdbError::Parse {
                    line: 1,
                    kind: PdbParseErrorKind::InvalidFloat { .. }
                })
            ));
        }

        #[test]
        fn strict_rejects_unknown_record_types() {
            let mut lines = vec!["BOGUS1 something".to_string()];
            lines.push(coord_line(
                "ATOM",
                1,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");

            let strict = PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::strict());
            assert!(matches!(
                strict,
                Err(PdbError::Parse {
                    line: 1,
                    kind: PdbParseErrorKind::UnknownRecord { .. }
                })
            ));

            let (_, metadata) =
                PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::default()).unwrap();
            assert_eq!(metadata.ignored_records.get("BOGUS1"), Some(&1));
            assert_eq!(metadata.diagnostics.len(), 1);
        }

        #[test]
        fn strict_rejects_non_contiguous_residues() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "N",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "N",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "CA",
                "ALA",
                'A',
                2,
                None,
                [1.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                3,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [2.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");

            let strict = PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::strict());
            assert!(matches!(
                strict,
                Err(PdbError::Parse {
                    line: 3,
                    kind: PdbParseErrorKind::NonContiguousResidue { .. }
                })
            ));
        }

        #[test]
        fn lenient_merges_non_contiguous_residues() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                1,
                "N",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "N",
            ));
            lines.push(coord_line(
                "ATOM",
                2,
                "CA",
                "ALA",
                'A',
                2,
                None,
                [1.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            lines.push(coord_line(
                "ATOM",
                3,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [2.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");

            let (structure, metadata) =
                PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::default()).unwrap();
            let chain_id = structure.find_chain_by_id('A').unwrap();
            assert_eq!(structure.chain(chain_id).unwrap().residues().len(), 2);
            let gly_id = structure.find_residue(chain_id, 1, None).unwrap();
            assert_eq!(structure.residue(gly_id).unwrap().atoms().len(), 2);
            assert_eq!(metadata.diagnostics.len(), 1);
        }

        #[test]
        fn duplicate_serials_are_inconsistent_in_strict_mode() {
            let mut lines = Vec::new();
            lines.push(coord_line(
                "ATOM",
                7,
                "N",
                "GLY",
                'A',
                1,
                None,
                [0.0, 0.0, 0.0],
                1.0,
                "N",
            ));
            lines.push(coord_line(
                "ATOM",
                7,
                "CA",
                "GLY",
                'A',
                1,
                None,
                [1.0, 0.0, 0.0],
                1.0,
                "C",
            ));
            let input = lines.join("\n");

            let strict = PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::strict());
            assert!(matches!(strict, Err(PdbError::Inconsistency(_))));

            let (structure, metadata) =
                PdbFile::read_from_with(&mut input.as_bytes(), PdbReadOptions::default()).unwrap();
            assert_eq!(structure.atoms_iter().count(), 2);
            assert_eq!(metadata.diagnostics.len(), 1);
        }
    }

    mod writing {
        use super::*;
        use tempfile::tempdir;

        fn build_structure_with_disulfide() -> Structure {
            let mut structure = Structure::new("test");
            let chain_a = structure.add_chain('A');

            let cys3 = structure.add_residue(chain_a, 3, None, "CYS").unwrap();
            let mut sg3 = Atom::new("SG", cys3, Point3::new(0.0, 0.0, 0.0));
            sg3.element = "S".to_string();
            let sg3 = structure.add_atom_to_residue(cys3, sg3).unwrap();

            let cys9 = structure.add_residue(chain_a, 9, None, "CYS").unwrap();
            let mut sg9 = Atom::new("SG", cys9, Point3::new(2.05, 0.0, 0.0));
            sg9.element = "S".to_string();
            let sg9 = structure.add_atom_to_residue(cys9, sg9).unwrap();

            let hoh = structure.add_residue(chain_a, 101, None, "HOH").unwrap();
            let mut o = Atom::new("O", hoh, Point3::new(8.0, 8.0, 8.0));
            o.element = "O".to_string();
            structure.add_atom_to_residue(hoh, o).unwrap();

            structure.add_bond(sg3, sg9, BondKind::Disulfide).unwrap();
            structure
        }

        fn written_text(structure: &Structure) -> String {
            let mut out = Vec::new();
            PdbFile::write_structure_to(structure, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        }

        #[test]
        fn writes_coordinates_ter_and_end_in_order() {
            let text = written_text(&build_structure_with_disulfide());
            let lines: Vec<&str> = text.lines().collect();

            let atom_indices: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.starts_with("ATOM"))
                .map(|(i, _)| i)
                .collect();
            let ter_index = lines.iter().position(|l| l.starts_with("TER")).unwrap();
            let hetatm_index = lines.iter().position(|l| l.starts_with("HETATM")).unwrap();

            assert_eq!(atom_indices.len(), 2);
            assert!(atom_indices.iter().all(|&i| i < ter_index));
            assert!(ter_index < hetatm_index);
            assert_eq!(lines.last(), Some(&"END"));
        }

        #[test]
        fn writes_ssbond_before_coordinates() {
            let text = written_text(&build_structure_with_disulfide());
            let lines: Vec<&str> = text.lines().collect();

            let ssbond_index = lines.iter().position(|l| l.starts_with("SSBOND")).unwrap();
            let first_atom = lines.iter().position(|l| l.starts_with("ATOM")).unwrap();
            assert!(ssbond_index < first_atom);

            let ssbond = lines[ssbond_index];
            assert_eq!(&ssbond[11..14], "CYS");
            assert_eq!(&ssbond[15..16], "A");
            assert_eq!(slice_and_trim(ssbond, 17, 21), "3");
            assert_eq!(slice_and_trim(ssbond, 31, 35), "9");
            assert_eq!(slice_and_trim(ssbond, 73, 78), "2.05");
        }

        #[test]
        fn writes_conect_for_every_bond() {
            let text = written_text(&build_structure_with_disulfide());
            let conect_lines: Vec<&str> =
                text.lines().filter(|l| l.starts_with("CONECT")).collect();
            assert_eq!(conect_lines.len(), 2);
            assert_eq!(conect_lines[0], "CONECT    1    2");
            assert_eq!(conect_lines[1], "CONECT    2    1");
        }

        #[test]
        fn atom_names_are_padded_by_length() {
            let mut structure = Structure::new("test");
            let chain = structure.add_chain('A');
            let val = structure.add_residue(chain, 1, None, "VAL").unwrap();
            structure
                .add_atom_to_residue(val, Atom::new("CA", val, Point3::new(0.0, 0.0, 0.0)))
                .unwrap();
            structure
                .add_atom_to_residue(val, Atom::new("HG11", val, Point3::new(1.0, 0.0, 0.0)))
                .unwrap();

            let text = written_text(&structure);
            let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("ATOM")).collect();
            assert_eq!(&lines[0][12..16], " CA ");
            assert_eq!(&lines[1][12..16], "HG11");
        }

        #[test]
        fn round_trip_preserves_model_content() {
            let original = build_structure_with_disulfide();
            let text = written_text(&original);
            let (reparsed, metadata) = PdbFile::read_from(&mut text.as_bytes()).unwrap();

            assert!(metadata.diagnostics.is_empty());
            assert_eq!(reparsed.chains().count(), 1);
            assert_eq!(reparsed.atoms_iter().count(), 3);
            assert_eq!(reparsed.bonds().len(), 1);
            assert_eq!(reparsed.bonds()[0].kind, BondKind::Disulfide);

            let chain_id = reparsed.find_chain_by_id('A').unwrap();
            let chain = reparsed.chain(chain_id).unwrap();
            assert_eq!(chain.residues().len(), 2);
            assert_eq!(chain.heterogens().len(), 1);

            let cys9 = reparsed.find_residue(chain_id, 9, None).unwrap();
            let sg = reparsed.residue(cys9).unwrap().get_atom_id_by_name("SG").unwrap();
            assert!((reparsed.atom(sg).unwrap().position.x - 2.05).abs() < 1e-9);
        }

        #[test]
        fn writes_header_and_title_from_metadata() {
            let structure = build_structure_with_disulfide();
            let metadata = PdbMetadata {
                id_code: Some("1ABC".to_string()),
                classification: Some("OXIDOREDUCTASE".to_string()),
                deposition_date: Some("03-MAR-99".to_string()),
                title: Some("A TEST MODEL".to_string()),
                ..Default::default()
            };
            let mut out = Vec::new();
            PdbFile::write_to(&structure, &metadata, &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();

            let header = text.lines().next().unwrap();
            assert!(header.starts_with("HEADER    OXIDOREDUCTASE"));
            assert_eq!(slice_and_trim(header, 50, 59), "03-MAR-99");
            assert_eq!(slice_and_trim(header, 62, 66), "1ABC");
            assert!(text.lines().any(|l| l == "TITLE     A TEST MODEL"));
        }

        #[test]
        fn file_round_trip_through_paths() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("model.pdb");

            let original = build_structure_with_disulfide();
            PdbFile::write_structure_to_path(&original, &path).unwrap();
            let (reparsed, _) = PdbFile::read_from_path(&path).unwrap();

            assert_eq!(reparsed.atoms_iter().count(), 3);
            assert_eq!(reparsed.bonds().len(), 1);
        }
    }
}
