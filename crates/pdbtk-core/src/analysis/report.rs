use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;

use super::config::ResidueSpecifier;
use super::tasks::disulfide::DisulfideScan;
use super::tasks::gaps::{ChainGapReport, Completeness};
use super::tasks::summary::StructureSummary;

const RULE_WIDTH: usize = 50;

fn header(title: &str, source: &str) -> String {
    format!("{} for: {}\n{}\n", title, source, "=".repeat(RULE_WIDTH))
}

fn position_label(specifier: &ResidueSpecifier) -> String {
    match specifier.insertion_code {
        Some(code) => format!("{}{}", specifier.seq_num, code),
        None => specifier.seq_num.to_string(),
    }
}

/// Renders a human-readable gap summary for a set of chain reports.
pub fn render_gap_report(reports: &[ChainGapReport], source: &str) -> String {
    let mut out = header("Gap Analysis Summary", source);
    let gapped = reports.iter().filter(|report| report.has_gaps()).count();
    let _ = writeln!(out, "Total chains analyzed: {}", reports.len());
    let _ = writeln!(out, "Chains with gaps: {}", gapped);

    for report in reports {
        let status = if report.has_gaps() {
            "GAPS PRESENT"
        } else if report.observed == 0 {
            "EMPTY"
        } else {
            "COMPLETE"
        };
        let _ = writeln!(out, "\nChain {}: {}", report.chain_id, status);
        if let Some((first, last)) = report.observed_range {
            let _ = writeln!(
                out,
                "  Range: {}-{} ({} residues)",
                first, last, report.observed
            );
        }
        match report.completeness {
            Completeness::Ratio(ratio) => {
                let _ = writeln!(out, "  Completeness: {:.1}%", ratio * 100.0);
            }
            Completeness::Undefined => {
                let _ = writeln!(out, "  Completeness: undefined");
            }
        }
        if report.has_gaps() {
            let _ = writeln!(out, "  Gaps: {} region(s)", report.gaps.len());
            for gap in &report.gaps {
                let _ = writeln!(
                    out,
                    "    - {}-{} ({} residues)",
                    gap.start, gap.end, gap.length
                );
            }
        }
    }
    out
}

/// Renders a human-readable table of classified cysteine pairs.
pub fn render_disulfide_report(scan: &DisulfideScan, source: &str) -> String {
    let mut out = header("Disulfide Analysis", source);
    let _ = writeln!(out, "Cysteine pairs reported: {}\n", scan.pairs.len());

    if scan.pairs.is_empty() {
        let _ = writeln!(out, "No disulfide bonds or candidates found.");
    }
    for pair in &scan.pairs {
        let _ = writeln!(
            out,
            "CYS {} {:>4} - CYS {} {:>4}: {:>6.2} Å [{}]",
            pair.residue_a.chain_id,
            position_label(&pair.residue_a),
            pair.residue_b.chain_id,
            position_label(&pair.residue_b),
            pair.distance,
            pair.class
        );
    }

    if !scan.missing_sulfur.is_empty() {
        let _ = writeln!(out, "\nSkipped cysteines (no SG atom):");
        for specifier in &scan.missing_sulfur {
            let _ = writeln!(out, "  {}", specifier);
        }
    }
    out
}

/// Renders a human-readable composition summary.
pub fn render_summary(summary: &StructureSummary) -> String {
    let mut out = header("Structure Summary", &summary.source);
    let _ = writeln!(out, "Chains: {}", summary.chains.len());
    let _ = writeln!(out, "Polymer residues: {}", summary.residue_total);
    let _ = writeln!(out, "Heterogens: {}", summary.heterogen_total);
    let _ = writeln!(out, "Atoms: {}", summary.atom_total);
    let _ = writeln!(out, "Cysteines: {}", summary.cysteine_count);
    let _ = writeln!(out, "Bonds: {}\n", summary.bond_count);

    for chain in &summary.chains {
        let range = match chain.observed_range {
            Some((first, last)) => format!(" ({}-{})", first, last),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "Chain {}: {} residues{}, {} heterogens, {} atoms",
            chain.chain_id, chain.residue_count, range, chain.heterogen_count, chain.atom_count
        );
    }
    out
}

#[derive(Serialize)]
struct GapRow {
    chain: char,
    start: i32,
    end: i32,
    length: i32,
}

/// Writes one CSV row per gap, with a `chain,start,end,length` header.
pub fn write_gap_csv<W: Write>(reports: &[ChainGapReport], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        for gap in &report.gaps {
            csv_writer.serialize(GapRow {
                chain: gap.chain_id,
                start: gap.start,
                end: gap.end,
                length: gap.length,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct DisulfideRow {
    chain_a: char,
    residue_a: i32,
    icode_a: Option<char>,
    chain_b: char,
    residue_b: i32,
    icode_b: Option<char>,
    distance: f64,
    classification: String,
}

/// Writes one CSV row per classified pair, distances rounded to 0.01 angstrom.
pub fn write_disulfide_csv<W: Write>(scan: &DisulfideScan, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for pair in &scan.pairs {
        csv_writer.serialize(DisulfideRow {
            chain_a: pair.residue_a.chain_id,
            residue_a: pair.residue_a.seq_num,
            icode_a: pair.residue_a.insertion_code,
            chain_b: pair.residue_b.chain_id,
            residue_b: pair.residue_b.seq_num,
            icode_b: pair.residue_b.insertion_code,
            distance: (pair.distance * 100.0).round() / 100.0,
            classification: pair.class.to_string(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
