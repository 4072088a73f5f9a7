//! Ingest boundary — the fetch shell's output as a JSON feed document.
//!
//! Feed format (one document per fetch cycle):
//!
//! {
//!   "sources": [
//!     {"id": "soccer", "alias": "足球频道",
//!      "items": [{"title": "...", "url": "...", "mobileUrl": "..."}]}
//!   ],
//!   "failed": [{"id": "saijia"}]
//! }
//!
//! Items are ranked 1-based in list order; a repeated title collects the
//! extra rank instead of a second record. A source with no alias displays
//! under its id. Fetching itself (retries, backoff, transports) is out of
//! scope; this module only accepts what the fetcher produced.

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::model::{FailedSource, FetchBatch, SourceSnapshot};

#[derive(Debug, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub sources: Vec<FeedSource>,
    #[serde(default)]
    pub failed: Vec<FeedFailure>,
}

#[derive(Debug, Deserialize)]
pub struct FeedSource {
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
pub struct FeedItem {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "mobileUrl")]
    pub mobile_url: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedFailure {
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
}

pub fn load_feed(path: &Path, time_label: &str) -> Result<FetchBatch> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read feed {}", path.display()))?;
    parse_feed(&text, time_label).with_context(|| format!("parse feed {}", path.display()))
}

pub fn parse_feed(text: &str, time_label: &str) -> Result<FetchBatch> {
    let doc: FeedDocument = serde_json::from_str(text).context("parse feed json")?;
    let mut batch = FetchBatch::default();

    for source in doc.sources {
        let alias = source.alias.unwrap_or_else(|| source.id.clone());
        let mut snapshot = SourceSnapshot::new(&source.id, &alias, time_label);

        for (index, item) in source.items.iter().enumerate() {
            let title = item.title.trim();
            if title.is_empty() {
                warn!(
                    "ingest: source {:?} item #{} has an empty title; skipped",
                    source.id,
                    index + 1
                );
                continue;
            }
            snapshot.record(
                title,
                (index + 1) as u32,
                Some(item.url.as_str()),
                Some(item.mobile_url.as_str()),
            );
        }

        batch.snapshots.push(snapshot);
    }

    for failure in doc.failed {
        let alias = failure.alias.unwrap_or_else(|| failure.id.clone());
        batch.failures.push(FailedSource {
            source_id: failure.id,
            alias,
        });
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_ranks_items_and_collects_duplicates() {
        let batch = parse_feed(
            r#"{
                "sources": [{
                    "id": "soccer",
                    "alias": "足球频道",
                    "items": [
                        {"title": "甲", "url": "https://a", "mobileUrl": "https://m"},
                        {"title": "乙"},
                        {"title": "甲"}
                    ]
                }],
                "failed": [{"id": "saijia"}]
            }"#,
            "09时05分",
        )
        .unwrap();

        assert_eq!(batch.snapshots.len(), 1);
        let snap = &batch.snapshots[0];
        assert_eq!(snap.alias, "足球频道");
        assert_eq!(snap.time_label, "09时05分");
        assert_eq!(snap.titles.len(), 2);
        assert_eq!(snap.get("甲").unwrap().ranks, vec![1, 3]);
        assert_eq!(snap.get("甲").unwrap().url.as_deref(), Some("https://a"));
        assert_eq!(snap.get("乙").unwrap().url, None);

        assert_eq!(batch.failures.len(), 1);
        // a failure with no alias displays under its id
        assert_eq!(batch.failures[0].alias, "saijia");

        let aliases = batch.alias_map();
        assert_eq!(aliases.get("soccer").map(String::as_str), Some("足球频道"));
        assert_eq!(aliases.get("saijia").map(String::as_str), Some("saijia"));
    }
}
