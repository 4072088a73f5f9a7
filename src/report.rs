//! Plain-text report over the engine's output tuple. Consumes exactly the
//! (stats, total) pair plus the failure list, and nothing else.
//!
//! Highlighted rank spans get a trailing '*'; transports and styling live
//! outside this crate.

use crate::codec::FAILURE_SECTION_MARKER;
use crate::config::Config;
use crate::model::FailedSource;
use crate::stats::{rank_span, FrequencyStat};

pub fn render_text(
    stats: &[FrequencyStat],
    total: usize,
    failures: &[FailedSource],
    cfg: &Config,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("热点词频统计 (标题总数: {})\n", total));

    for stat in stats {
        out.push('\n');
        out.push_str(&format!(
            "{} (出现次数: {}, 占比: {}%)\n",
            stat.group_key, stat.count, stat.percentage
        ));
        for hit in &stat.titles {
            let span = match rank_span(&hit.ranks, cfg.rank_threshold) {
                Some(span) if span.highlighted => format!("{}*", span.render()),
                Some(span) => span.render(),
                None => "[-]".to_string(),
            };
            out.push_str(&format!("  {} {} — 来源：{}", span, hit.title, hit.source_alias));
            if !hit.time_span.is_empty() {
                out.push_str(&format!(" ({}, {}次)", hit.time_span, hit.occurrences));
            }
            if hit.is_new {
                out.push_str(" [新]");
            }
            out.push('\n');
        }
    }

    if !failures.is_empty() {
        out.push('\n');
        out.push_str(FAILURE_SECTION_MARKER);
        out.push('\n');
        for f in failures {
            out.push_str(&format!("{} (ID: {})\n", f.alias, f.source_id));
        }
    }

    out
}
