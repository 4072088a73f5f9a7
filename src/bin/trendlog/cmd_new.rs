use anyhow::Result;
use std::path::PathBuf;

use trendlog::detect;

use crate::util::{resolve_config, resolve_store};

pub fn exec(root: Option<PathBuf>, date: Option<String>, json: bool) -> Result<()> {
    let cfg = resolve_config(root);
    let store = resolve_store(&cfg, date.as_deref());

    let snapshots = store.list_chronological()?;
    let new_titles = detect::detect_new(&snapshots);

    if json {
        println!("{}", serde_json::to_string_pretty(&new_titles)?);
        return Ok(());
    }

    if new_titles.is_empty() {
        println!("no snapshots for {}", store.date_folder());
        return Ok(());
    }

    for (alias, titles) in &new_titles {
        println!("{} - {} new title(s)", alias, titles.len());
        for title in titles {
            println!("  {}", title);
        }
    }
    Ok(())
}
