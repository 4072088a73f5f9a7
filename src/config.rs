//! Centralized configuration for trendlog.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - Config::from_env() reads TL_* env vars; builder-style setters override.
//! - The config value is threaded explicitly into each component entry point;
//!   no component reads ambient process-wide state.
//!
//! Tunables:
//! - output_root: base directory for day-scoped snapshot files.
//! - rank_threshold: ranks at or below this are highlighted in rank spans.
//! - min_titles_for_percentage: below this total, percentages stay 0.
//! - timezone: IANA name; all date folders and time labels use it.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

pub const DEFAULT_OUTPUT_ROOT: &str = "output";
pub const DEFAULT_RANK_THRESHOLD: u32 = 5;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Shanghai;

/// Top-level configuration consumed by the store, the frequency engine and
/// the report renderer.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base directory for snapshot output.
    /// Env: TL_OUTPUT_ROOT (default "output")
    pub output_root: PathBuf,

    /// Rank highlight threshold for rank spans.
    /// Env: TL_RANK_THRESHOLD (default 5)
    pub rank_threshold: u32,

    /// Minimum total observed titles before percentages are computed.
    /// Env: TL_MIN_TITLES_FOR_PCT (default 1)
    pub min_titles_for_percentage: usize,

    /// Timezone for day folders and time labels.
    /// Env: TL_TIMEZONE (IANA name, default "Asia/Shanghai")
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            rank_threshold: DEFAULT_RANK_THRESHOLD,
            min_titles_for_percentage: 1,
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Unparsable values keep
    /// the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("TL_OUTPUT_ROOT") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.output_root = PathBuf::from(s);
            }
        }

        if let Ok(v) = std::env::var("TL_RANK_THRESHOLD") {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.rank_threshold = n;
            }
        }

        if let Ok(v) = std::env::var("TL_MIN_TITLES_FOR_PCT") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.min_titles_for_percentage = n;
            }
        }

        if let Ok(v) = std::env::var("TL_TIMEZONE") {
            if let Ok(tz) = Tz::from_str(v.trim()) {
                cfg.timezone = tz;
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_output_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_rank_threshold(mut self, threshold: u32) -> Self {
        self.rank_threshold = threshold;
        self
    }

    pub fn with_min_titles_for_percentage(mut self, min: usize) -> Self {
        self.min_titles_for_percentage = min;
        self
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ output_root: {}, rank_threshold: {}, min_titles_for_percentage: {}, timezone: {} }}",
            self.output_root.display(),
            self.rank_threshold,
            self.min_titles_for_percentage,
            self.timezone.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builder_overrides() {
        let cfg = Config::default();
        assert_eq!(cfg.output_root, PathBuf::from("output"));
        assert_eq!(cfg.rank_threshold, 5);
        assert_eq!(cfg.min_titles_for_percentage, 1);
        assert_eq!(cfg.timezone, chrono_tz::Asia::Shanghai);

        let cfg = Config::default()
            .with_output_root("/tmp/tl")
            .with_rank_threshold(3)
            .with_min_titles_for_percentage(10)
            .with_timezone(chrono_tz::UTC);
        assert_eq!(cfg.output_root, PathBuf::from("/tmp/tl"));
        assert_eq!(cfg.rank_threshold, 3);
        assert_eq!(cfg.min_titles_for_percentage, 10);
        assert_eq!(cfg.timezone, chrono_tz::UTC);
    }
}
