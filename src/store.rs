//! SnapshotStore — day-scoped directory of flat-text snapshot files.
//!
//! Layout: <output_root>/<YYYY年MM月DD日>/txt/<HH时MM分>.txt, one file per
//! fetch cycle. File labels are zero-padded, so a lexicographic sort of file
//! stems is chronological.
//!
//! The store only ever reads prior files and writes one new file per run
//! (tmp + rename). A missing day directory is not an error: every read
//! operation returns an empty collection.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codec::{self, DecodedSnapshot};
use crate::config::Config;
use crate::metrics;
use crate::model::{FailedSource, SourceSnapshot};
use crate::util;

const SNAPSHOT_SUBDIR: &str = "txt";
const SNAPSHOT_EXT: &str = "txt";

pub struct SnapshotStore {
    root: PathBuf,
    date_folder: String,
}

impl SnapshotStore {
    /// Store for today's directory in the configured timezone.
    pub fn for_today(cfg: &Config) -> Self {
        let now = util::now_in(cfg.timezone);
        Self::for_date(cfg, &util::date_folder(&now))
    }

    /// Store for an explicit day-directory name ("2026年08月07日").
    pub fn for_date(cfg: &Config, date_folder: &str) -> Self {
        Self {
            root: cfg.output_root.clone(),
            date_folder: date_folder.to_string(),
        }
    }

    pub fn date_folder(&self) -> &str {
        &self.date_folder
    }

    pub fn day_dir(&self) -> PathBuf {
        self.root.join(&self.date_folder).join(SNAPSHOT_SUBDIR)
    }

    /// Snapshot file stems for the day, sorted chronologically.
    /// Missing directory => empty list.
    pub fn list_labels(&self) -> Result<Vec<String>> {
        let dir = self.day_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut labels = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("read_dir {}", dir.display()))? {
            let path = entry?.path();
            if path.extension().map(|ext| ext == SNAPSHOT_EXT).unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    labels.push(stem.to_string());
                }
            }
        }
        // Zero-padded hour/minute labels: lexicographic == chronological.
        labels.sort();
        Ok(labels)
    }

    pub fn snapshot_path(&self, time_label: &str) -> PathBuf {
        self.day_dir().join(format!("{}.{}", time_label, SNAPSHOT_EXT))
    }

    /// Decode one snapshot file by its time label.
    pub fn read_snapshot(&self, time_label: &str) -> Result<DecodedSnapshot> {
        let path = self.snapshot_path(time_label);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("read snapshot {}", path.display()))?;
        metrics::record_file_read();

        let (snapshot, diagnostics) = codec::decode(&text);
        if !diagnostics.is_empty() {
            warn!(
                "store: {} skipped line(s) while decoding {}",
                diagnostics.len(),
                path.display()
            );
        }
        Ok(snapshot)
    }

    /// All snapshots of the day in chronological order.
    pub fn list_chronological(&self) -> Result<Vec<(String, DecodedSnapshot)>> {
        let mut out = Vec::new();
        for label in self.list_labels()? {
            let snapshot = self.read_snapshot(&label)?;
            out.push((label, snapshot));
        }
        Ok(out)
    }

    /// The most recent snapshot of the day, or None when none exist.
    pub fn read_latest(&self) -> Result<Option<(String, DecodedSnapshot)>> {
        match self.list_labels()?.pop() {
            Some(label) => {
                let snapshot = self.read_snapshot(&label)?;
                Ok(Some((label, snapshot)))
            }
            None => Ok(None),
        }
    }

    /// Encode and persist one fetch cycle as <time_label>.txt (tmp + rename).
    /// Two runs racing on the same label resolve last-writer-wins.
    pub fn write_snapshot(
        &self,
        time_label: &str,
        snapshots: &[SourceSnapshot],
        failures: &[FailedSource],
    ) -> Result<PathBuf> {
        let dir = self.day_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("create day dir {}", dir.display()))?;
        }

        let path = self.snapshot_path(time_label);
        let tmp = path.with_extension("tmp");
        let text = codec::encode(snapshots, failures);
        {
            let mut f = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)
                .with_context(|| format!("open tmp snapshot {}", tmp.display()))?;
            f.write_all(text.as_bytes())?;
            f.flush()?;
        }
        fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;

        metrics::record_snapshot_written();
        debug!(
            "store: wrote snapshot {} ({} source(s), {} failure(s))",
            path.display(),
            snapshots.len(),
            failures.len()
        );
        Ok(path)
    }
}

/// Ensure a directory exists (used by the CLI for ad-hoc output paths).
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| format!("create dir {}", path.display()))?;
    }
    Ok(())
}
