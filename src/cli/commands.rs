use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::member::Status;

#[derive(Parser)]
#[command(name = "pulse", about = concat!("team pulse v", env!("CARGO_PKG_VERSION"), " - who's working on what"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./pulse.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed profile file, overriding [seed] file
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 time instead of the system clock
    #[arg(long, global = true, value_parser = parse_time)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Status distribution, roster distribution and headline counts
    Summary,
    /// List team members with their active task counts
    Members(MembersArgs),
    /// Show a member's tasks
    Tasks(TasksArgs),
    /// Apply a JSON script of actions to the seeded state
    Replay(ReplayArgs),
    /// Print the seeded members as JSON
    Seed,
    /// Show or change the stored theme
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct MembersArgs {
    /// Only members with this status (working, break, meeting, offline)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    /// Ordering
    #[arg(long, value_enum, default_value_t = SortOrder::Active)]
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Most active tasks first
    Active,
    /// Roster order
    #[value(name = "none")]
    Unsorted,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Member ID
    pub member: String,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Path to a JSON array of actions
    pub script: PathBuf,
    /// Print the summary instead of the full state
    #[arg(long)]
    pub summary: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New theme (omit to show the current one)
    #[arg(value_enum)]
    pub value: Option<ThemeChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time '{}': {}", s, e))
}

fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| format!("unknown status '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pulse",
            "members",
            "--status",
            "working",
            "--sort",
            "none",
            "--json",
            "--now",
            "2025-05-01T09:00:00Z",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.now.is_some());
        match cli.command {
            Some(Commands::Members(args)) => {
                assert_eq!(args.status, Some(Status::Working));
                assert_eq!(args.sort, SortOrder::Unsorted);
            }
            _ => panic!("expected members"),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Cli::try_parse_from(["pulse", "members", "--status", "away"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["pulse"]).unwrap();
        assert!(cli.command.is_none());
    }
}
