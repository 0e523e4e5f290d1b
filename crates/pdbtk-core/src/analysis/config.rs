use crate::core::chem::policy::NonStandardPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Default upper distance bound for a confirmed disulfide bond, in angstroms.
pub const DEFAULT_BONDED_MAX_ANGSTROMS: f64 = 2.05;

/// Default upper distance bound for a strained but plausible disulfide
/// candidate, in angstroms.
pub const DEFAULT_CANDIDATE_MAX_ANGSTROMS: f64 = 2.5;

/// Default placeholder character for missing residues in gapped sequences.
pub const DEFAULT_GAP_CHARACTER: char = '-';

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid threshold '{name}': {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Chain selection is empty")]
    EmptySelection,

    #[error("Invalid residue range {start}-{end} for chain '{chain}'")]
    InvalidRange { chain: char, start: i32, end: i32 },

    #[error("Gap character '{0}' collides with one-letter residue codes")]
    GapCharacterCollision(char),

    #[error("Configuration requests no analyses")]
    NoAnalysesRequested,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Identifies a residue across the whole structure for selections and reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueSpecifier {
    pub chain_id: char,
    pub seq_num: i32,
    pub insertion_code: Option<char>,
}

impl fmt::Display for ResidueSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.seq_num)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

/// Which chains an analysis operates on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// Every chain in the structure, in file order.
    #[default]
    All,
    /// The listed chains, in the listed order.
    List(Vec<char>),
}

/// Output mode for sequence extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceMode {
    /// Observed residues only.
    #[default]
    Plain,
    /// One placeholder character per missing residue position.
    Gapped,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GapScanConfig {
    pub chains: ChainSelection,
    /// Expected full-length numbering per chain; when present, unresolved
    /// termini of that chain are reported as gaps too.
    pub expected_ranges: HashMap<char, (i32, i32)>,
    pub include_heterogens: bool,
}

impl GapScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&chain, &(start, end)) in &self.expected_ranges {
            if start > end {
                return Err(ConfigError::InvalidRange { chain, start, end });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct GapScanConfigBuilder {
    chains: Option<ChainSelection>,
    expected_ranges: HashMap<char, (i32, i32)>,
    include_heterogens: Option<bool>,
}

impl GapScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(mut self, selection: ChainSelection) -> Self {
        self.chains = Some(selection);
        self
    }
    pub fn expected_range(mut self, chain: char, start: i32, end: i32) -> Self {
        self.expected_ranges.insert(chain, (start, end));
        self
    }
    pub fn include_heterogens(mut self, include: bool) -> Self {
        self.include_heterogens = Some(include);
        self
    }

    pub fn build(self) -> Result<GapScanConfig, ConfigError> {
        let config = GapScanConfig {
            chains: self.chains.unwrap_or_default(),
            expected_ranges: self.expected_ranges,
            include_heterogens: self.include_heterogens.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceConfig {
    pub chains: ChainSelection,
    pub mode: SequenceMode,
    pub policy: NonStandardPolicy,
    pub gap_char: char,
    pub include_heterogens: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            chains: ChainSelection::All,
            mode: SequenceMode::Plain,
            policy: NonStandardPolicy::MapToParent,
            gap_char: DEFAULT_GAP_CHARACTER,
            include_heterogens: false,
        }
    }
}

impl SequenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // An alphabetic gap character would be indistinguishable from a
        // residue code in the output.
        if self.gap_char.is_ascii_alphabetic() {
            return Err(ConfigError::GapCharacterCollision(self.gap_char));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SequenceConfigBuilder {
    chains: Option<ChainSelection>,
    mode: Option<SequenceMode>,
    policy: Option<NonStandardPolicy>,
    gap_char: Option<char>,
    include_heterogens: Option<bool>,
}

impl SequenceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(mut self, selection: ChainSelection) -> Self {
        self.chains = Some(selection);
        self
    }
    pub fn mode(mut self, mode: SequenceMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn policy(mut self, policy: NonStandardPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
    pub fn gap_char(mut self, gap_char: char) -> Self {
        self.gap_char = Some(gap_char);
        self
    }
    pub fn include_heterogens(mut self, include: bool) -> Self {
        self.include_heterogens = Some(include);
        self
    }

    pub fn build(self) -> Result<SequenceConfig, ConfigError> {
        let config = SequenceConfig {
            chains: self.chains.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            policy: self.policy.unwrap_or_default(),
            gap_char: self.gap_char.unwrap_or(DEFAULT_GAP_CHARACTER),
            include_heterogens: self.include_heterogens.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisulfideConfig {
    /// Distances up to this bound classify as bonded.
    pub bonded_max: f64,
    /// Distances above `bonded_max` up to this bound classify as candidates.
    pub candidate_max: f64,
    /// Keep out-of-range pairs in the results with their measured distance.
    pub include_out_of_range: bool,
}

impl Default for DisulfideConfig {
    fn default() -> Self {
        Self {
            bonded_max: DEFAULT_BONDED_MAX_ANGSTROMS,
            candidate_max: DEFAULT_CANDIDATE_MAX_ANGSTROMS,
            include_out_of_range: false,
        }
    }
}

impl DisulfideConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bonded_max.is_nan() || self.bonded_max <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "bonded_max",
                value: self.bonded_max,
            });
        }
        if self.candidate_max.is_nan() || self.candidate_max < self.bonded_max {
            return Err(ConfigError::InvalidThreshold {
                name: "candidate_max",
                value: self.candidate_max,
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct DisulfideConfigBuilder {
    bonded_max: Option<f64>,
    candidate_max: Option<f64>,
    include_out_of_range: Option<bool>,
}

impl DisulfideConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bonded_max(mut self, angstroms: f64) -> Self {
        self.bonded_max = Some(angstroms);
        self
    }
    pub fn candidate_max(mut self, angstroms: f64) -> Self {
        self.candidate_max = Some(angstroms);
        self
    }
    pub fn include_out_of_range(mut self, include: bool) -> Self {
        self.include_out_of_range = Some(include);
        self
    }

    pub fn build(self) -> Result<DisulfideConfig, ConfigError> {
        let config = DisulfideConfig {
            bonded_max: self.bonded_max.unwrap_or(DEFAULT_BONDED_MAX_ANGSTROMS),
            candidate_max: self
                .candidate_max
                .unwrap_or(DEFAULT_CANDIDATE_MAX_ANGSTROMS),
            include_out_of_range: self.include_out_of_range.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSelection {
    /// Chains to keep, in output order.
    pub chains: Vec<char>,
    /// Optional inclusive residue-number range per chain.
    pub residue_ranges: HashMap<char, (i32, i32)>,
    /// Carry the chains' heterogen groups into the extracted structure.
    pub keep_heterogens: bool,
}

impl ExtractSelection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::EmptySelection);
        }
        for (&chain, &(start, end)) in &self.residue_ranges {
            if start > end {
                return Err(ConfigError::InvalidRange { chain, start, end });
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ExtractSelectionBuilder {
    chains: Option<Vec<char>>,
    residue_ranges: HashMap<char, (i32, i32)>,
    keep_heterogens: Option<bool>,
}

impl ExtractSelectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(mut self, chains: Vec<char>) -> Self {
        self.chains = Some(chains);
        self
    }
    pub fn residue_range(mut self, chain: char, start: i32, end: i32) -> Self {
        self.residue_ranges.insert(chain, (start, end));
        self
    }
    pub fn keep_heterogens(mut self, keep: bool) -> Self {
        self.keep_heterogens = Some(keep);
        self
    }

    pub fn build(self) -> Result<ExtractSelection, ConfigError> {
        let selection = ExtractSelection {
            chains: self
                .chains
                .ok_or(ConfigError::MissingParameter("chains"))?,
            residue_ranges: self.residue_ranges,
            keep_heterogens: self.keep_heterogens.unwrap_or(false),
        };
        selection.validate()?;
        Ok(selection)
    }
}

/// The set of analyses one workflow invocation runs over a structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    pub summary: bool,
    pub gaps: Option<GapScanConfig>,
    pub sequence: Option<SequenceConfig>,
    pub disulfides: Option<DisulfideConfig>,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.summary
            && self.gaps.is_none()
            && self.sequence.is_none()
            && self.disulfides.is_none()
        {
            return Err(ConfigError::NoAnalysesRequested);
        }
        if let Some(gaps) = &self.gaps {
            gaps.validate()?;
        }
        if let Some(sequence) = &self.sequence {
            sequence.validate()?;
        }
        if let Some(disulfides) = &self.disulfides {
            disulfides.validate()?;
        }
        Ok(())
    }

    /// Loads an analysis configuration from a TOML file.
    ///
    /// Absent sections leave the corresponding analysis disabled; absent
    /// keys within a section take the documented defaults. Unknown keys
    /// are rejected.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: AnalysisConfigFile =
            toml::from_str(&content).map_err(|e| ConfigLoadError::Toml {
                path: path.display().to_string(),
                source: e,
            })?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    summary: Option<bool>,
    gaps: Option<GapScanConfig>,
    sequence: Option<SequenceConfig>,
    disulfides: Option<DisulfideConfig>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, enabled: bool) -> Self {
        self.summary = Some(enabled);
        self
    }
    pub fn gaps(mut self, config: GapScanConfig) -> Self {
        self.gaps = Some(config);
        self
    }
    pub fn sequence(mut self, config: SequenceConfig) -> Self {
        self.sequence = Some(config);
        self
    }
    pub fn disulfides(mut self, config: DisulfideConfig) -> Self {
        self.disulfides = Some(config);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            summary: self.summary.unwrap_or(false),
            gaps: self.gaps,
            sequence: self.sequence,
            disulfides: self.disulfides,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct AnalysisConfigFile {
    summary: Option<bool>,
    gaps: Option<GapSectionFile>,
    sequence: Option<SequenceSectionFile>,
    disulfides: Option<DisulfideSectionFile>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct GapSectionFile {
    chains: Option<Vec<char>>,
    expected_ranges: Option<HashMap<char, (i32, i32)>>,
    include_heterogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct SequenceSectionFile {
    chains: Option<Vec<char>>,
    mode: Option<SequenceMode>,
    non_standard_policy: Option<NonStandardPolicy>,
    gap_char: Option<char>,
    include_heterogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct DisulfideSectionFile {
    bonded_max: Option<f64>,
    candidate_max: Option<f64>,
    include_out_of_range: Option<bool>,
}

fn selection_from_list(chains: Option<Vec<char>>) -> ChainSelection {
    match chains {
        Some(ids) => ChainSelection::List(ids),
        None => ChainSelection::All,
    }
}

impl AnalysisConfigFile {
    fn into_config(self) -> AnalysisConfig {
        AnalysisConfig {
            summary: self.summary.unwrap_or(false),
            gaps: self.gaps.map(|section| GapScanConfig {
                chains: selection_from_list(section.chains),
                expected_ranges: section.expected_ranges.unwrap_or_default(),
                include_heterogens: section.include_heterogens.unwrap_or(false),
            }),
            sequence: self.sequence.map(|section| SequenceConfig {
                chains: selection_from_list(section.chains),
                mode: section.mode.unwrap_or_default(),
                policy: section.non_standard_policy.unwrap_or_default(),
                gap_char: section.gap_char.unwrap_or(DEFAULT_GAP_CHARACTER),
                include_heterogens: section.include_heterogens.unwrap_or(false),
            }),
            disulfides: self.disulfides.map(|section| DisulfideConfig {
                bonded_max: section.bonded_max.unwrap_or(DEFAULT_BONDED_MAX_ANGSTROMS),
                candidate_max: section
                    .candidate_max
                    .unwrap_or(DEFAULT_CANDIDATE_MAX_ANGSTROMS),
                include_out_of_range: section.include_out_of_range.unwrap_or(false),
            }),
        }
    }
}
