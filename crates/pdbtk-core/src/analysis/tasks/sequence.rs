use tracing::{info, instrument};

use crate::analysis::config::{SequenceConfig, SequenceMode};
use crate::analysis::error::AnalysisError;
use crate::core::chem::policy::one_letter_code;
use crate::core::io::fasta::FastaRecord;
use crate::core::io::pir::PirRecord;
use crate::core::models::chain::Chain;
use crate::core::models::structure::Structure;

/// One chain's extracted sequence, ready for FASTA or PIR rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub chain_id: char,
    /// First and last observed sequence numbers; `None` when nothing was
    /// observed (e.g. a heterogen-only chain).
    pub observed_range: Option<(i32, i32)>,
    /// Number of observed residues contributing a code.
    pub observed: usize,
    /// Number of gap placeholder characters in `sequence`.
    pub gap_count: usize,
    pub sequence: String,
}

impl SequenceRecord {
    /// Converts to a FASTA record labelled `{id}_{chain}`.
    ///
    /// Returns `None` for a record with no observed residues, which has no
    /// meaningful residue range to report.
    pub fn fasta_record(&self, id: &str) -> Option<FastaRecord> {
        let (first, last) = self.observed_range?;
        Some(FastaRecord {
            id: id.to_string(),
            chain_id: self.chain_id,
            first_seq: first,
            last_seq: last,
            description: None,
            gap_count: self.gap_count,
            sequence: self.sequence.clone(),
        })
    }

    /// Converts to a PIR `structureX` record labelled `{id}_{chain}`.
    ///
    /// Returns `None` for a record with no observed residues.
    pub fn pir_record(&self, id: &str) -> Option<PirRecord> {
        let (first, last) = self.observed_range?;
        Some(PirRecord {
            sequence: self.sequence.clone(),
            ..PirRecord::new(id, self.chain_id, first, last, "")
        })
    }
}

/// Extracts one-letter sequences for the selected chains.
///
/// Residues are visited in (sequence number, insertion code) order. In
/// gapped mode the configured placeholder fills each missing position, so
/// the output length equals the observed count plus the total gap length.
#[instrument(skip_all, name = "sequence_extraction_task")]
pub fn run(
    structure: &Structure,
    config: &SequenceConfig,
) -> Result<Vec<SequenceRecord>, AnalysisError> {
    config.validate()?;
    let chain_ids = super::resolve_chains(structure, &config.chains)?;
    info!(chains = chain_ids.len(), mode = ?config.mode, "Extracting sequences.");

    let mut records = Vec::with_capacity(chain_ids.len());
    for chain_id in chain_ids {
        let chain = structure.chain(chain_id).ok_or_else(|| {
            AnalysisError::Internal("resolved chain missing from structure".to_string())
        })?;
        records.push(extract_chain(structure, chain, config));
    }

    info!(records = records.len(), "Sequence extraction complete.");
    Ok(records)
}

fn extract_chain(structure: &Structure, chain: &Chain, config: &SequenceConfig) -> SequenceRecord {
    let residues = super::sorted_chain_residues(structure, chain, config.include_heterogens);
    if residues.is_empty() {
        return SequenceRecord {
            chain_id: chain.id,
            observed_range: None,
            observed: 0,
            gap_count: 0,
            sequence: String::new(),
        };
    }

    let mut sequence = String::with_capacity(residues.len());
    let mut gap_count = 0usize;
    let mut prev_seq: Option<i32> = None;
    for residue in &residues {
        if config.mode == SequenceMode::Gapped {
            if let Some(prev) = prev_seq {
                let missing = residue.seq_num - prev - 1;
                if missing > 0 {
                    sequence.extend(std::iter::repeat(config.gap_char).take(missing as usize));
                    gap_count += missing as usize;
                }
            }
        }
        sequence.push(one_letter_code(&residue.name, config.policy));
        prev_seq = Some(residue.seq_num);
    }

    SequenceRecord {
        chain_id: chain.id,
        observed_range: Some((residues[0].seq_num, residues[residues.len() - 1].seq_num)),
        observed: residues.len(),
        gap_count,
        sequence,
    }
}
