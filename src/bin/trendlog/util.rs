use std::path::PathBuf;

use trendlog::config::Config;
use trendlog::store::SnapshotStore;

/// Env-based config with an optional --root override on top.
pub fn resolve_config(root: Option<PathBuf>) -> Config {
    let cfg = Config::from_env();
    match root {
        Some(root) => cfg.with_output_root(root),
        None => cfg,
    }
}

/// Store for an explicit day-directory name, or today's.
pub fn resolve_store(cfg: &Config, date: Option<&str>) -> SnapshotStore {
    match date {
        Some(date) => SnapshotStore::for_date(cfg, date),
        None => SnapshotStore::for_today(cfg),
    }
}

/// Minimal JSON string escaping for hand-printed status objects.
pub fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out
}
