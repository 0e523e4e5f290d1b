use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Resolution written for entries whose experimental resolution is unknown.
pub const PIR_DEFAULT_RESOLUTION: f64 = 2.00;

/// R-factor written for entries whose refinement R-factor is unknown.
pub const PIR_DEFAULT_R_FACTOR: f64 = -1.00;

/// The PIR sequence type tag emitted on the description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PirKind {
    /// An experimentally determined structure entry (`structureX`).
    #[default]
    StructureX,
    /// A bare sequence entry with no associated coordinates (`sequence`).
    Sequence,
}

impl PirKind {
    fn tag(&self) -> &'static str {
        match self {
            PirKind::StructureX => "structureX",
            PirKind::Sequence => "sequence",
        }
    }
}

/// A single PIR entry in the layout consumed by comparative modelling tools.
#[derive(Debug, Clone, PartialEq)]
pub struct PirRecord {
    /// Structure identifier, typically the four-character PDB id code.
    pub id: String,
    /// Chain identifier the sequence was taken from.
    pub chain_id: char,
    /// Sequence number of the first observed residue.
    pub first_seq: i32,
    /// Sequence number of the last observed residue.
    pub last_seq: i32,
    /// Free-text description field (may be empty).
    pub description: String,
    /// Entry type tag.
    pub kind: PirKind,
    /// Experimental resolution in angstroms.
    pub resolution: f64,
    /// Refinement R-factor.
    pub r_factor: f64,
    /// One-letter residue codes, possibly containing gap characters.
    pub sequence: String,
}

impl PirRecord {
    /// Creates a `structureX` record with the default resolution and R-factor.
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
            description: String::new(),
            kind: PirKind::StructureX,
            resolution: PIR_DEFAULT_RESOLUTION,
            r_factor: PIR_DEFAULT_R_FACTOR,
            sequence: sequence.into(),
        }
    }

    /// Returns the record label, e.g. `1ABC_A`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.id, self.chain_id)
    }
}

/// Writes PIR records to `writer`.
///
/// Each entry is a `>P1;` header, a colon-separated description line, and
/// the sequence terminated by `*`, followed by a blank separator line.
pub fn write_records(records: &[PirRecord], writer: &mut impl Write) -> io::Result<()> {
    for record in records {
        let label = record.label();
        writeln!(writer, ">P1;{}", label)?;
        writeln!(
            writer,
            "{}:{}:{}:{}:{}:{}:{}:{:.2}:{:.2}",
            record.kind.tag(),
            label,
            record.first_seq,
            record.chain_id,
            record.last_seq,
            record.chain_id,
            record.description,
            record.resolution,
            record.r_factor
        )?;
        writeln!(writer, "{}*", record.sequence)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Writes PIR records to the file at `path`, creating or truncating it.
pub fn write_records_to_path(records: &[PirRecord], path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_records(records, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(records: &[PirRecord]) -> String {
        let mut buffer = Vec::new();
        write_records(records, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn writes_a_structure_entry_with_default_quality_fields() {
        let record = PirRecord::new("1ABC", 'A', 1, 8, "AGSKLMRT");

        let output = written(&[record]);

        assert_eq!(
            output,
            ">P1;1ABC_A\nstructureX:1ABC_A:1:A:8:A::2.00:-1.00\nAGSKLMRT*\n\n"
        );
    }

    #[test]
    fn sequence_entries_use_the_sequence_tag() {
        let record = PirRecord {
            kind: PirKind::Sequence,
            description: "SYNTHETIC".to_string(),
            ..PirRecord::new("1ABC", 'A', 1, 8, "AGSKLMRT")
        };

        let output = written(&[record]);

        assert_eq!(
            output,
            ">P1;1ABC_A\nsequence:1ABC_A:1:A:8:A:SYNTHETIC:2.00:-1.00\nAGSKLMRT*\n\n"
        );
    }

    #[test]
    fn quality_fields_are_rendered_with_two_decimals() {
        let record = PirRecord {
            resolution: 1.5,
            r_factor: 0.183,
            ..PirRecord::new("2LYZ", 'B', 5, 12, "KVFGRCEL")
        };

        let output = written(&[record]);

        assert!(output.contains(":1.50:0.18\n"));
    }

    #[test]
    fn gapped_sequences_stay_on_a_single_line() {
        let sequence: String = std::iter::repeat('A').take(70).collect();
        let record = PirRecord::new("1ABC", 'A', 1, 70, sequence.clone());

        let output = written(&[record]);

        assert!(output.contains(&format!("{}*\n", sequence)));
    }

    #[test]
    fn path_round_trip_writes_the_same_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chains.pir");
        let records = vec![PirRecord::new("1ABC", 'A', 1, 3, "AGS")];

        write_records_to_path(&records, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, written(&records));
    }
}
