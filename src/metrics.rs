//! Lightweight global metrics for trendlog.
//!
//! Atomic counters for the subsystems:
//! - codec (decode diagnostics)
//! - store (files read / snapshots written)
//! - matching (titles matched / vetoed by filter words)
//! - new-title detection

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Codec -----
static DECODE_SECTIONS: AtomicU64 = AtomicU64::new(0);
static DECODE_LINES_PARSED: AtomicU64 = AtomicU64::new(0);
static DECODE_LINES_SKIPPED: AtomicU64 = AtomicU64::new(0);

// ----- Store -----
static FILES_READ: AtomicU64 = AtomicU64::new(0);
static SNAPSHOTS_WRITTEN: AtomicU64 = AtomicU64::new(0);

// ----- Matching -----
static TITLES_MATCHED: AtomicU64 = AtomicU64::new(0);
static TITLES_FILTERED: AtomicU64 = AtomicU64::new(0);

// ----- New-title detection -----
static NEW_TITLES_FOUND: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub decode_sections: u64,
    pub decode_lines_parsed: u64,
    pub decode_lines_skipped: u64,

    pub files_read: u64,
    pub snapshots_written: u64,

    pub titles_matched: u64,
    pub titles_filtered: u64,

    pub new_titles_found: u64,
}

impl MetricsSnapshot {
    /// Share of decoded lines that had to be skipped.
    pub fn line_skip_ratio(&self) -> f64 {
        let total = self.decode_lines_parsed + self.decode_lines_skipped;
        if total == 0 {
            0.0
        } else {
            self.decode_lines_skipped as f64 / total as f64
        }
    }
}

// ----- Recorders -----

pub fn record_decode(sections: u64, lines_parsed: u64, lines_skipped: u64) {
    DECODE_SECTIONS.fetch_add(sections, Ordering::Relaxed);
    DECODE_LINES_PARSED.fetch_add(lines_parsed, Ordering::Relaxed);
    DECODE_LINES_SKIPPED.fetch_add(lines_skipped, Ordering::Relaxed);
}

pub fn record_file_read() {
    FILES_READ.fetch_add(1, Ordering::Relaxed);
}

pub fn record_snapshot_written() {
    SNAPSHOTS_WRITTEN.fetch_add(1, Ordering::Relaxed);
}

pub fn record_title_matched() {
    TITLES_MATCHED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_title_filtered() {
    TITLES_FILTERED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_new_titles(count: u64) {
    NEW_TITLES_FOUND.fetch_add(count, Ordering::Relaxed);
}

/// Read a consistent-enough snapshot of all counters.
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        decode_sections: DECODE_SECTIONS.load(Ordering::Relaxed),
        decode_lines_parsed: DECODE_LINES_PARSED.load(Ordering::Relaxed),
        decode_lines_skipped: DECODE_LINES_SKIPPED.load(Ordering::Relaxed),

        files_read: FILES_READ.load(Ordering::Relaxed),
        snapshots_written: SNAPSHOTS_WRITTEN.load(Ordering::Relaxed),

        titles_matched: TITLES_MATCHED.load(Ordering::Relaxed),
        titles_filtered: TITLES_FILTERED.load(Ordering::Relaxed),

        new_titles_found: NEW_TITLES_FOUND.load(Ordering::Relaxed),
    }
}
