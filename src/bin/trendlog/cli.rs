use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI over the trendlog snapshot/statistics engine
#[derive(Parser, Debug)]
#[command(
    name = "trendlog",
    version,
    about = "Append-only hot-title snapshot log with keyword-frequency statistics",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Persist one fetch cycle from a JSON feed document as today's next
    /// snapshot file
    ///
    /// Feed format (produced by the external fetcher):
    ///   {"sources": [{"id": "soccer", "alias": "足球频道",
    ///                 "items": [{"title": "...", "url": "...", "mobileUrl": "..."}]}],
    ///    "failed": [{"id": "saijia"}]}
    Ingest {
        /// Output root (overrides TL_OUTPUT_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// JSON feed document
        #[arg(long)]
        feed: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Merge all of a day's snapshots into per-source title histories
    Aggregate {
        /// Output root (overrides TL_OUTPUT_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Day-directory name ("2026年08月07日"); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// JSON output
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Diff the latest snapshot against the day's history per source
    NewTitles {
        /// Output root (overrides TL_OUTPUT_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Day-directory name; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// JSON output
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Keyword-frequency statistics over the latest snapshot, annotated
    /// with the day aggregate and new-title flags
    Stats {
        /// Output root (overrides TL_OUTPUT_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Keyword rules document (JSON)
        #[arg(long)]
        rules: PathBuf,
        /// Day-directory name; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// JSON output
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print day/store/metrics summary
    ///
    /// Examples:
    ///   trendlog status --root ./output
    ///   trendlog status --root ./output --json
    Status {
        /// Output root (overrides TL_OUTPUT_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Day-directory name; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
