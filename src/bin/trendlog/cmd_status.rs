use anyhow::Result;
use std::path::PathBuf;

use trendlog::metrics;

use crate::util::{escape_json, resolve_config, resolve_store};

/// JSON-aware status (when json=true prints one JSON object).
pub fn exec(root: Option<PathBuf>, date: Option<String>, json: bool) -> Result<()> {
    let cfg = resolve_config(root);
    let store = resolve_store(&cfg, date.as_deref());

    let labels = store.list_labels()?;
    let latest = match labels.last() {
        Some(label) => Some((label.clone(), store.read_snapshot(label)?)),
        None => None,
    };

    if json {
        let ms = metrics::snapshot();

        print!("{{");
        print!("\"date_folder\":\"{}\",", escape_json(store.date_folder()));
        print!("\"day_dir\":\"{}\",", escape_json(&store.day_dir().display().to_string()));
        print!("\"snapshots\":{},", labels.len());

        print!("\"latest\":");
        match &latest {
            Some((label, snapshot)) => {
                print!("{{");
                print!("\"time_label\":\"{}\",", escape_json(label));
                print!("\"sections\":{},", snapshot.sections.len());
                print!("\"titles\":{}", snapshot.title_count());
                print!("}},");
            }
            None => print!("null,"),
        }

        print!("\"metrics\":{{");
        print!("\"decode_sections\":{},", ms.decode_sections);
        print!("\"decode_lines_parsed\":{},", ms.decode_lines_parsed);
        print!("\"decode_lines_skipped\":{},", ms.decode_lines_skipped);
        print!("\"line_skip_ratio\":{:.4},", ms.line_skip_ratio());
        print!("\"files_read\":{},", ms.files_read);
        print!("\"snapshots_written\":{},", ms.snapshots_written);
        print!("\"titles_matched\":{},", ms.titles_matched);
        print!("\"titles_filtered\":{},", ms.titles_filtered);
        print!("\"new_titles_found\":{}", ms.new_titles_found);
        print!("}}");

        println!("}}");
        return Ok(());
    }

    println!("Day {} at {}", store.date_folder(), store.day_dir().display());
    println!("  config     = {}", cfg);
    println!("  snapshots  = {}", labels.len());
    if let Some(first) = labels.first() {
        // labels are sorted, so first/last describe the covered window
        println!("  first      = {}", first);
    }
    if let Some(last) = labels.last() {
        println!("  last       = {}", last);
    }

    match &latest {
        Some((label, snapshot)) => {
            println!("Latest snapshot ({}):", label);
            for section in &snapshot.sections {
                match &section.source_id {
                    Some(id) => println!(
                        "  {} (ID: {}) - {} title(s)",
                        section.alias,
                        id,
                        section.titles.len()
                    ),
                    None => println!("  {} - {} title(s)", section.alias, section.titles.len()),
                }
            }
        }
        None => println!("Latest snapshot: none"),
    }

    let ms = metrics::snapshot();
    println!("Metrics snapshot:");
    println!("  decode_sections      = {}", ms.decode_sections);
    println!("  decode_lines_parsed  = {}", ms.decode_lines_parsed);
    println!("  decode_lines_skipped = {}", ms.decode_lines_skipped);
    println!("  line_skip_ratio      = {:.2}%", ms.line_skip_ratio() * 100.0);
    println!("  files_read           = {}", ms.files_read);
    println!("  snapshots_written    = {}", ms.snapshots_written);
    println!("  titles_matched       = {}", ms.titles_matched);
    println!("  titles_filtered      = {}", ms.titles_filtered);
    println!("  new_titles_found     = {}", ms.new_titles_found);

    Ok(())
}
