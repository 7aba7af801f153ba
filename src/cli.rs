use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, CommandReport};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "daylog",
    version,
    about = "Move completed tasks out of markdown daily logs into tracker, logger and opportunity files"
)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). DAYLOG_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start today's daily file from the newest one, without completed tasks
    Carryover {
        /// Overwrite today's file without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Append completed items of the newest daily file to the tracker
    Track {
        #[arg(long)]
        dry_run: bool,
    },
    /// Move checked tracker items into the logger
    Log {
        #[arg(long)]
        dry_run: bool,
    },
    /// Append completed opportunity activities to each opportunity's file
    Oplog {
        #[arg(long)]
        dry_run: bool,
    },
    /// Show resolved vault paths and configuration problems
    Status,
}

fn render(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let state = if report.ok { "ok" } else { "failed" };
    println!("{}: {state}", report.command);
    for detail in &report.details {
        println!("  - {detail}");
    }
    for issue in &report.issues {
        println!("  ! {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let report = match cli.command {
        Command::Carryover { yes } => {
            commands::carryover::run(&commands::carryover::CarryoverOptions { assume_yes: yes })?
        }
        Command::Track { dry_run } => {
            commands::track::run(&commands::track::TrackOptions { dry_run })?
        }
        Command::Log { dry_run } => commands::log::run(&commands::log::LogOptions { dry_run })?,
        Command::Oplog { dry_run } => {
            commands::oplog::run(&commands::oplog::OplogOptions { dry_run })?
        }
        Command::Status => commands::status::run()?,
    };

    render(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!(
            "{} failed with {} issue(s)",
            report.command,
            report.issues.len()
        );
    }
    Ok(())
}
