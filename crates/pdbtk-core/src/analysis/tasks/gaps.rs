use tracing::{info, instrument};

use crate::analysis::config::GapScanConfig;
use crate::analysis::error::AnalysisError;
use crate::core::models::chain::Chain;
use crate::core::models::structure::Structure;

/// A contiguous run of missing sequence numbers between observed residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRecord {
    pub chain_id: char,
    /// First missing sequence number.
    pub start: i32,
    /// Last missing sequence number.
    pub end: i32,
    /// Number of missing positions, `end - start + 1`.
    pub length: i32,
}

/// Fraction of a chain's expected residues that are observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completeness {
    Ratio(f64),
    /// The chain has no observed residues, so no ratio exists.
    Undefined,
}

impl Completeness {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Completeness::Ratio(value) => Some(*value),
            Completeness::Undefined => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainGapReport {
    pub chain_id: char,
    /// First and last observed sequence numbers; `None` for an empty chain.
    pub observed_range: Option<(i32, i32)>,
    /// Number of observed residues, counting insertion-code variants.
    pub observed: usize,
    /// Gaps in ascending order of their start position.
    pub gaps: Vec<GapRecord>,
    /// Observed over observed plus missing.
    pub completeness: Completeness,
}

impl ChainGapReport {
    pub fn has_gaps(&self) -> bool {
        !self.gaps.is_empty()
    }

    pub fn total_gap_length(&self) -> i32 {
        self.gaps.iter().map(|gap| gap.length).sum()
    }
}

/// Scans the selected chains for discontinuities in residue numbering.
///
/// Residues are ordered by (sequence number, insertion code); a jump greater
/// than one between consecutive numbers produces a [`GapRecord`]. Unresolved
/// termini count as gaps only for chains with an expected range in the
/// config. Reports are ordered by chain identifier.
#[instrument(skip_all, name = "gap_scan_task")]
pub fn run(
    structure: &Structure,
    config: &GapScanConfig,
) -> Result<Vec<ChainGapReport>, AnalysisError> {
    config.validate()?;
    let chain_ids = super::resolve_chains(structure, &config.chains)?;
    info!(chains = chain_ids.len(), "Scanning chains for gaps.");

    let mut reports = Vec::with_capacity(chain_ids.len());
    for chain_id in chain_ids {
        let chain = structure.chain(chain_id).ok_or_else(|| {
            AnalysisError::Internal("resolved chain missing from structure".to_string())
        })?;
        reports.push(scan_chain(structure, chain, config));
    }
    reports.sort_by_key(|report| report.chain_id);

    let gapped = reports.iter().filter(|report| report.has_gaps()).count();
    info!(gapped, "Gap scan complete.");
    Ok(reports)
}

fn scan_chain(structure: &Structure, chain: &Chain, config: &GapScanConfig) -> ChainGapReport {
    let residues = super::sorted_chain_residues(structure, chain, config.include_heterogens);
    if residues.is_empty() {
        return ChainGapReport {
            chain_id: chain.id,
            observed_range: None,
            observed: 0,
            gaps: Vec::new(),
            completeness: Completeness::Undefined,
        };
    }

    let first = residues[0].seq_num;
    let last = residues[residues.len() - 1].seq_num;
    let expected_range = config.expected_ranges.get(&chain.id).copied();

    let mut gaps = Vec::new();
    if let Some((expected_start, _)) = expected_range {
        if expected_start < first {
            gaps.push(GapRecord {
                chain_id: chain.id,
                start: expected_start,
                end: first - 1,
                length: first - expected_start,
            });
        }
    }

    let mut prev = first;
    for residue in &residues[1..] {
        // Insertion-code variants share a number and never open a gap.
        if residue.seq_num > prev + 1 {
            gaps.push(GapRecord {
                chain_id: chain.id,
                start: prev + 1,
                end: residue.seq_num - 1,
                length: residue.seq_num - prev - 1,
            });
        }
        prev = residue.seq_num;
    }

    if let Some((_, expected_end)) = expected_range {
        if expected_end > last {
            gaps.push(GapRecord {
                chain_id: chain.id,
                start: last + 1,
                end: expected_end,
                length: expected_end - last,
            });
        }
    }

    let observed = residues.len();
    let total_missing: i32 = gaps.iter().map(|gap| gap.length).sum();
    let completeness =
        Completeness::Ratio(observed as f64 / (observed as f64 + f64::from(total_missing)));

    ChainGapReport {
        chain_id: chain.id,
        observed_range: Some((first, last)),
        observed,
        gaps,
        completeness,
    }
}
