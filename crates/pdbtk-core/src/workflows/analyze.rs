use crate::analysis::config::AnalysisConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::{Progress, ProgressReporter};
use crate::analysis::tasks;
use crate::analysis::tasks::disulfide::DisulfideScan;
use crate::analysis::tasks::gaps::ChainGapReport;
use crate::analysis::tasks::sequence::SequenceRecord;
use crate::analysis::tasks::summary::StructureSummary;
use crate::core::models::structure::Structure;
use tracing::{info, instrument, warn};

const SUMMARY_ANALYSIS: &str = "summary";
const GAP_ANALYSIS: &str = "gaps";
const SEQUENCE_ANALYSIS: &str = "sequence";
const DISULFIDE_ANALYSIS: &str = "disulfides";

/// One analysis that could not be completed. The rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFailure {
    pub analysis: &'static str,
    pub message: String,
}

/// Results of a full analysis batch over a single structure.
///
/// Each field is `Some` only when the corresponding analysis was requested and
/// succeeded. Failed analyses are recorded in `failures` instead.
#[derive(Debug, Clone, Default)]
pub struct StructureReport {
    pub summary: Option<StructureSummary>,
    pub gaps: Option<Vec<ChainGapReport>>,
    pub sequences: Option<Vec<SequenceRecord>>,
    pub disulfides: Option<DisulfideScan>,
    pub failures: Vec<AnalysisFailure>,
}

impl StructureReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    structure: &Structure,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<StructureReport, AnalysisError> {
    // === Phase 0: Validate the requested batch ===
    config.validate()?;
    info!("Starting analysis batch for '{}'.", structure.source());

    let mut report = StructureReport::default();

    // === Phase 1: Composition summary ===
    if config.summary {
        reporter.report(Progress::AnalysisStart {
            name: SUMMARY_ANALYSIS,
        });
        report.summary = Some(tasks::summary::run(structure));
        reporter.report(Progress::AnalysisFinish);
    }

    // === Phase 2: Gap scan ===
    if let Some(gap_config) = &config.gaps {
        reporter.report(Progress::AnalysisStart { name: GAP_ANALYSIS });
        match tasks::gaps::run(structure, gap_config) {
            Ok(chain_reports) => report.gaps = Some(chain_reports),
            Err(error) => record_failure(&mut report.failures, GAP_ANALYSIS, error),
        }
        reporter.report(Progress::AnalysisFinish);
    }

    // === Phase 3: Sequence extraction ===
    if let Some(sequence_config) = &config.sequence {
        reporter.report(Progress::AnalysisStart {
            name: SEQUENCE_ANALYSIS,
        });
        match tasks::sequence::run(structure, sequence_config) {
            Ok(records) => report.sequences = Some(records),
            Err(error) => record_failure(&mut report.failures, SEQUENCE_ANALYSIS, error),
        }
        reporter.report(Progress::AnalysisFinish);
    }

    // === Phase 4: Disulfide scan ===
    if let Some(disulfide_config) = &config.disulfides {
        reporter.report(Progress::AnalysisStart {
            name: DISULFIDE_ANALYSIS,
        });
        match tasks::disulfide::run(structure, disulfide_config) {
            Ok(scan) => report.disulfides = Some(scan),
            Err(error) => record_failure(&mut report.failures, DISULFIDE_ANALYSIS, error),
        }
        reporter.report(Progress::AnalysisFinish);
    }

    let completed = [
        report.summary.is_some(),
        report.gaps.is_some(),
        report.sequences.is_some(),
        report.disulfides.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();
    info!(
        "Analysis batch complete: {} result(s), {} failure(s).",
        completed,
        report.failures.len()
    );
    Ok(report)
}

fn record_failure(
    failures: &mut Vec<AnalysisFailure>,
    analysis: &'static str,
    error: AnalysisError,
) {
    warn!("Analysis '{}' failed: {}", analysis, error);
    failures.push(AnalysisFailure {
        analysis,
        message: error.to_string(),
    });
}
