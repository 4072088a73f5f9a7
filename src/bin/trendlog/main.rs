use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_ingest;
mod cmd_aggregate;
mod cmd_new;
mod cmd_stats;
mod cmd_status;

fn init_logger() {
    // Level comes from RUST_LOG, default info.
    // Example: RUST_LOG=debug ./trendlog ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Ingest { root, feed, json } =>
            cmd_ingest::exec(root, feed, json),

        cli::Cmd::Aggregate { root, date, json } =>
            cmd_aggregate::exec(root, date, json),

        cli::Cmd::NewTitles { root, date, json } =>
            cmd_new::exec(root, date, json),

        cli::Cmd::Stats { root, rules, date, json } =>
            cmd_stats::exec(root, rules, date, json),

        cli::Cmd::Status { root, date, json } =>
            cmd_status::exec(root, date, json),
    }
}
