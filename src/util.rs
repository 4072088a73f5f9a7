//! util — time-label helpers shared by the store and the CLI.
//!
//! All labels are computed in a configured timezone (default Asia/Shanghai,
//! see config.rs). The folder/file formats are fixed:
//! - date folder: "YYYY年MM月DD日"
//! - time label:  "HH时MM分" (zero-padded, so lexicographic order == chronological)

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in the given timezone.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Day-directory name for a timestamp ("2026年08月07日").
pub fn date_folder(t: &DateTime<Tz>) -> String {
    t.format("%Y年%m月%d日").to_string()
}

/// Snapshot file label for a timestamp ("09时05分"). Zero-padded on purpose:
/// the store sorts file names lexicographically.
pub fn time_label(t: &DateTime<Tz>) -> String {
    t.format("%H时%M分").to_string()
}

/// Human-readable timestamp for report headers.
pub fn display_time(t: &DateTime<Tz>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}
