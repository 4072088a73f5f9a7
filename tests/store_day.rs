use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use trendlog::config::Config;
use trendlog::model::{FailedSource, SourceSnapshot};
use trendlog::rules::RuleSet;
use trendlog::store::SnapshotStore;
use trendlog::{aggregate, detect, ingest, report, stats};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("trendlog-{}-{}-{}", prefix, pid, t))
}

fn test_config(root: &PathBuf) -> Config {
    Config::default().with_output_root(root.clone())
}

const DAY: &str = "2026年08月07日";

fn snapshot_of(alias: &str, id: &str, label: &str, titles: &[&str]) -> SourceSnapshot {
    let mut snap = SourceSnapshot::new(id, alias, label);
    for (i, title) in titles.iter().enumerate() {
        snap.record(title, (i + 1) as u32, None, None);
    }
    snap
}

#[test]
fn write_then_list_in_chronological_order() -> Result<()> {
    let root = unique_root("order");
    let cfg = test_config(&root);
    let store = SnapshotStore::for_date(&cfg, DAY);

    // written out of order on purpose
    store.write_snapshot("10时00分", &[snapshot_of("频道", "c", "10时00分", &["乙"])], &[])?;
    store.write_snapshot("09时05分", &[snapshot_of("频道", "c", "09时05分", &["甲"])], &[])?;

    let labels = store.list_labels()?;
    assert_eq!(labels, vec!["09时05分", "10时00分"]);

    let snapshots = store.list_chronological()?;
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].0, "09时05分");
    assert!(snapshots[0].1.sections[0].get("甲").is_some());

    let (label, latest) = store.read_latest()?.unwrap();
    assert_eq!(label, "10时00分");
    assert!(latest.sections[0].get("乙").is_some());

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn missing_day_directory_reads_as_empty() -> Result<()> {
    let root = unique_root("empty");
    let cfg = test_config(&root);
    let store = SnapshotStore::for_date(&cfg, DAY);

    assert!(store.list_labels()?.is_empty());
    assert!(store.list_chronological()?.is_empty());
    assert!(store.read_latest()?.is_none());
    Ok(())
}

#[test]
fn failures_are_persisted_but_not_decoded_back() -> Result<()> {
    let root = unique_root("failures");
    let cfg = test_config(&root);
    let store = SnapshotStore::for_date(&cfg, DAY);

    let failures = vec![FailedSource {
        source_id: "saijia".to_string(),
        alias: "赛加频道".to_string(),
    }];
    let path = store.write_snapshot(
        "09时00分",
        &[snapshot_of("频道", "c", "09时00分", &["甲", "乙"])],
        &failures,
    )?;

    let text = fs::read_to_string(&path)?;
    assert!(text.contains("==== 以下ID请求失败 ===="));

    let snapshot = store.read_snapshot("09时00分")?;
    assert_eq!(snapshot.sections.len(), 1);
    assert!(snapshot.section("赛加频道").is_none());

    fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn feed_to_report_pipeline() -> Result<()> {
    let root = unique_root("pipeline");
    let cfg = test_config(&root).with_rank_threshold(5);
    let store = SnapshotStore::for_date(&cfg, DAY);

    // cycle 1
    let batch = ingest::parse_feed(
        r#"{"sources": [{"id": "soccer", "alias": "足球频道", "items": [
            {"title": "世界杯预选赛开打", "url": "https://a"},
            {"title": "联赛积分榜更新"}
        ]}]}"#,
        "09时00分",
    )?;
    store.write_snapshot("09时00分", &batch.snapshots, &batch.failures)?;

    // cycle 2: one carried-over title, one new, one failed source
    let batch = ingest::parse_feed(
        r#"{"sources": [{"id": "soccer", "alias": "足球频道", "items": [
            {"title": "世界杯预选赛开打", "url": "https://a"},
            {"title": "足球转会窗口关闭"}
        ]}],
        "failed": [{"id": "saijia", "alias": "赛加频道"}]}"#,
        "10时30分",
    )?;
    store.write_snapshot("10时30分", &batch.snapshots, &batch.failures)?;

    let snapshots = store.list_chronological()?;
    assert_eq!(snapshots.len(), 2);

    let day = aggregate::aggregate(&snapshots);
    let info = day.info("足球频道", "世界杯预选赛开打").unwrap();
    assert_eq!(info.occurrences, 2);
    assert_eq!(info.time_span(), "09时00分 ~ 10时30分");

    let new_titles = detect::detect_new(&snapshots);
    assert!(detect::is_new(&new_titles, "足球频道", "足球转会窗口关闭"));
    assert!(!detect::is_new(&new_titles, "足球频道", "世界杯预选赛开打"));

    let rules = RuleSet::from_json_str(
        r#"{"groups": [
            {"normal": ["世界杯"], "key": "世界杯"},
            {"required": ["足球"], "normal": ["转会", "赛事"], "key": "足球动态"}
        ]}"#,
    )?;

    let (label, latest) = snapshots.last().unwrap();
    let latest_batch = latest.to_batch(label);
    let (frequency, total) = stats::compute_stats(
        &latest_batch,
        &rules,
        Some(&day),
        Some(&new_titles),
        &cfg,
    );

    assert_eq!(total, 2);
    assert_eq!(frequency[0].group_key, "世界杯");
    assert_eq!(frequency[0].count, 1);
    assert_eq!(frequency[1].group_key, "足球动态");
    assert_eq!(frequency[1].count, 1);

    let text = report::render_text(&frequency, total, &latest_batch.failures, &cfg);
    assert!(text.contains("标题总数: 2"));
    assert!(text.contains("世界杯 (出现次数: 1, 占比: 50%)"));
    assert!(text.contains("[1]* 世界杯预选赛开打 — 来源：足球频道"));
    assert!(text.contains("[新]"));

    fs::remove_dir_all(&root)?;
    Ok(())
}
