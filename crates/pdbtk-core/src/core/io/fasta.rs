use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Number of sequence characters emitted per line in FASTA output.
pub const FASTA_LINE_WIDTH: usize = 60;

/// A single FASTA entry describing one chain's sequence.
///
/// The header line is derived from the identifying fields; `gap_count`
/// greater than zero adds a trailing gap annotation so downstream tools
/// can tell a gapped alignment sequence from a plain one.
#[derive(Debug, Clone, PartialEq)]
pub struct FastaRecord {
    /// Structure identifier, typically the four-character PDB id code.
    pub id: String,
    /// Chain identifier the sequence was taken from.
    pub chain_id: char,
    /// Sequence number of the first observed residue.
    pub first_seq: i32,
    /// Sequence number of the last observed residue.
    pub last_seq: i32,
    /// Optional free-text description appended after the record label.
    pub description: Option<String>,
    /// Number of gap characters in `sequence` (zero for plain sequences).
    pub gap_count: usize,
    /// One-letter residue codes, possibly containing gap characters.
    pub sequence: String,
}

impl FastaRecord {
    /// Creates a plain record with no description and no gap annotation.
    pub fn new(
        id: impl Into<String>,
        chain_id: char,
        first_seq: i32,
        last_seq: i32,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            chain_id,
            first_seq,
            last_seq,
            description: None,
            gap_count: 0,
            sequence: sequence.into(),
        }
    }

    /// Returns the record label, e.g. `1ABC_A`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.id, self.chain_id)
    }

    fn header(&self) -> String {
        let mut header = format!(">{}", self.label());
        if let Some(description) = &self.description {
            header.push(' ');
            header.push_str(description);
        }
        header.push_str(&format!(
            " | Chain {} | Residues {}-{}",
            self.chain_id, self.first_seq, self.last_seq
        ));
        if self.gap_count > 0 {
            header.push_str(&format!(" | {} gaps", self.gap_count));
        }
        header
    }
}

/// Writes FASTA records to `writer`, wrapping sequences at
/// [`FASTA_LINE_WIDTH`] characters and separating records with a blank line.
pub fn write_records(records: &[FastaRecord], writer: &mut impl Write) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record.header())?;
        for chunk in &record.sequence.chars().chunks(FASTA_LINE_WIDTH) {
            writeln!(writer, "{}", chunk.collect::<String>())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes FASTA records to the file at `path`, creating or truncating it.
pub fn write_records_to_path(records: &[FastaRecord], path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_records(records, &mut writer)?;
    writer.flush()
}
