use anyhow::{anyhow, Result};
use log::warn;
use serde::Serialize;

use crate::metrics;

use super::{FAILURE_SECTION_MARKER, ID_TAG_OPEN, MOBILE_TAG_OPEN, URL_TAG_OPEN};

/// One title line after decoding. Carries only the minimum rank the encoder
/// recorded; the full per-snapshot rank set does not round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTitle {
    pub title: String,
    pub rank: u32,
    pub url: Option<String>,
    pub mobile_url: Option<String>,
}

/// One decoded source section, in file order.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedSection {
    pub alias: String,
    /// Present when the header carries an "(ID: ...)" tag; legacy files that
    /// only persisted the display alias decode with None here.
    pub source_id: Option<String>,
    pub titles: Vec<ParsedTitle>,
}

impl DecodedSection {
    pub fn get(&self, title: &str) -> Option<&ParsedTitle> {
        self.titles.iter().find(|t| t.title == title)
    }
}

/// All sections of one snapshot file, in file order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DecodedSnapshot {
    pub sections: Vec<DecodedSection>,
}

impl DecodedSnapshot {
    pub fn section(&self, alias: &str) -> Option<&DecodedSection> {
        self.sections.iter().find(|s| s.alias == alias)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn title_count(&self) -> usize {
        self.sections.iter().map(|s| s.titles.len()).sum()
    }

    /// Re-shape a decoded file into a FetchBatch so it can feed the
    /// frequency engine as the title source. A section without an embedded
    /// id falls back to its alias; failure sections do not round-trip.
    pub fn to_batch(&self, time_label: &str) -> crate::model::FetchBatch {
        let mut batch = crate::model::FetchBatch::default();
        for section in &self.sections {
            let id = section.source_id.as_deref().unwrap_or(&section.alias);
            let mut snap = crate::model::SourceSnapshot::new(id, &section.alias, time_label);
            for parsed in &section.titles {
                snap.record(
                    &parsed.title,
                    parsed.rank,
                    parsed.url.as_deref(),
                    parsed.mobile_url.as_deref(),
                );
            }
            batch.snapshots.push(snap);
        }
        batch
    }
}

/// A skipped line, reported instead of aborting the file.
#[derive(Debug, Clone, Serialize)]
pub struct LineDiagnostic {
    /// 1-based line number within the decoded text.
    pub line_no: usize,
    pub reason: String,
}

/// Decode snapshot text (grammar in mod.rs). Bad lines are warned, counted
/// and skipped; the failure section and under-sized sections are ignored.
pub fn decode(text: &str) -> (DecodedSnapshot, Vec<LineDiagnostic>) {
    let mut snapshot = DecodedSnapshot::default();
    let mut diagnostics = Vec::new();
    let mut parsed_lines = 0u64;

    let mut section: Vec<(usize, &str)> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            flush_section(&mut section, &mut snapshot, &mut diagnostics, &mut parsed_lines);
        } else {
            section.push((line_no, raw));
        }
    }
    flush_section(&mut section, &mut snapshot, &mut diagnostics, &mut parsed_lines);

    metrics::record_decode(
        snapshot.sections.len() as u64,
        parsed_lines,
        diagnostics.len() as u64,
    );
    (snapshot, diagnostics)
}

fn flush_section(
    lines: &mut Vec<(usize, &str)>,
    snapshot: &mut DecodedSnapshot,
    diagnostics: &mut Vec<LineDiagnostic>,
    parsed_lines: &mut u64,
) {
    let section = std::mem::take(lines);
    if section.len() < 2 {
        return;
    }
    if section[0].1.contains(FAILURE_SECTION_MARKER) {
        return;
    }

    let (alias, source_id) = split_header(section[0].1);
    let mut decoded = DecodedSection {
        alias,
        source_id,
        titles: Vec::new(),
    };

    for &(line_no, line) in &section[1..] {
        match parse_title_line(line) {
            Ok(parsed) => {
                *parsed_lines += 1;
                decoded.titles.push(parsed);
            }
            Err(e) => {
                warn!("decode: skip line {}: {} ({:?})", line_no, e, line);
                diagnostics.push(LineDiagnostic {
                    line_no,
                    reason: e.to_string(),
                });
            }
        }
    }

    snapshot.sections.push(decoded);
}

/// Split a section header into (alias, optional source id).
fn split_header(line: &str) -> (String, Option<String>) {
    if line.ends_with(')') {
        if let Some(pos) = line.rfind(ID_TAG_OPEN) {
            let id = &line[pos + ID_TAG_OPEN.len()..line.len() - 1];
            return (line[..pos].to_string(), Some(id.to_string()));
        }
    }
    (line.to_string(), None)
}

/// Parse one title line right-to-left: MOBILE tag, URL tag, rank prefix.
fn parse_title_line(line: &str) -> Result<ParsedTitle> {
    let (rest, mobile_url) = peel_tag(line, MOBILE_TAG_OPEN);
    let (rest, url) = peel_tag(rest, URL_TAG_OPEN);
    let (rank, title) = peel_rank(rest)?;
    if title.is_empty() {
        return Err(anyhow!("empty title after peeling tags"));
    }
    Ok(ParsedTitle {
        title: title.to_string(),
        rank,
        url,
        mobile_url,
    })
}

/// Peel a trailing " [TAG:...]" off the line. The peel is greedy to the end
/// of the line; tag syntax inside titles is not escaped (lossy by design).
fn peel_tag<'a>(line: &'a str, open: &str) -> (&'a str, Option<String>) {
    if line.ends_with(']') {
        if let Some(pos) = line.rfind(open) {
            let inner = &line[pos + open.len()..line.len() - 1];
            return (&line[..pos], Some(inner.to_string()));
        }
    }
    (line, None)
}

/// Peel the "<digits>. " rank prefix. A first ". "-delimited token that is
/// not purely digits means no rank is peeled: the whole line is the title
/// with an implicit rank of 1.
fn peel_rank(line: &str) -> Result<(u32, &str)> {
    if let Some((tok, rest)) = line.split_once(". ") {
        if !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit()) {
            let rank = tok
                .parse::<u32>()
                .map_err(|_| anyhow!("rank out of range: {}", tok))?;
            return Ok((rank, rest));
        }
    }
    Ok((1, line))
}
