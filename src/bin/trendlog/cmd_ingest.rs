use anyhow::Result;
use log::info;
use std::path::PathBuf;

use trendlog::ingest;
use trendlog::store::SnapshotStore;
use trendlog::util::{now_in, time_label};

use crate::util::{escape_json, resolve_config};

pub fn exec(root: Option<PathBuf>, feed: PathBuf, json: bool) -> Result<()> {
    let cfg = resolve_config(root);
    let now = now_in(cfg.timezone);
    let label = time_label(&now);

    let batch = ingest::load_feed(&feed, &label)?;
    let store = SnapshotStore::for_today(&cfg);
    let path = store.write_snapshot(&label, &batch.snapshots, &batch.failures)?;

    info!(
        "ingest: {} source(s), {} failure(s), {} title(s) -> {}",
        batch.snapshots.len(),
        batch.failures.len(),
        batch.title_count(),
        path.display()
    );

    if json {
        print!("{{");
        print!("\"path\":\"{}\",", escape_json(&path.display().to_string()));
        print!("\"time_label\":\"{}\",", escape_json(&label));
        print!("\"sources\":{},", batch.snapshots.len());
        print!("\"failures\":{},", batch.failures.len());
        print!("\"titles\":{}", batch.title_count());
        println!("}}");
        return Ok(());
    }

    println!("snapshot {}", path.display());
    println!("  time_label = {}", label);
    println!("  sources    = {}", batch.snapshots.len());
    println!("  failures   = {}", batch.failures.len());
    println!("  titles     = {}", batch.title_count());
    Ok(())
}
