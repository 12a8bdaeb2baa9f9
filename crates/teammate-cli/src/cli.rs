use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "TeamMate Contributors",
    version,
    about = "TeamMate CLI - Form balanced teams for gaming clubs from a participant roster.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Append logs to a file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Form balanced teams from a participant roster and export them as CSV.
    Form(FormArgs),
    /// Show a summary of the participant roster.
    Stats(StatsArgs),
    /// Register a new participant from survey answers and append them to the roster.
    Register(RegisterArgs),
}

/// Arguments for the `form` subcommand.
#[derive(Args, Debug)]
pub struct FormArgs {
    // --- Core Arguments ---
    /// Path to the participant roster (CSV).
    #[arg(short, long, value_name = "PATH", default_value = "participants.csv")]
    pub input: PathBuf,

    /// Path for the exported teams (CSV).
    #[arg(short, long, value_name = "PATH", default_value = "formed_teams.csv")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Formation Overrides ---
    /// Number of members per team. 0 falls back to the default of 5.
    #[arg(short = 's', long, value_name = "INT")]
    pub team_size: Option<usize>,

    /// Form exactly this many teams at most instead of as many as possible.
    #[arg(short = 'n', long, value_name = "INT")]
    pub team_count: Option<usize>,

    /// Only keep teams filled to at least this fraction of the team size.
    /// Without a value the ratio defaults to 0.8.
    #[arg(long, value_name = "RATIO", num_args = 0..=1)]
    pub min_fill: Option<Option<f64>>,

    // --- Search Overrides ---
    /// Number of parallel team building attempts.
    #[arg(short, long, value_name = "INT")]
    pub attempts: Option<usize>,

    /// Deadline for the parallel search in seconds.
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seed for reproducible team building attempts.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.attempts=8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to the participant roster (CSV).
    #[arg(short, long, value_name = "PATH", default_value = "participants.csv")]
    pub input: PathBuf,
}

/// Arguments for the `register` subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Path to the participant roster (CSV). Created if it does not exist.
    #[arg(short, long, value_name = "PATH", default_value = "participants.csv")]
    pub input: PathBuf,

    /// Display name of the new participant.
    #[arg(long, required = true)]
    pub name: String,

    /// Contact email of the new participant.
    #[arg(long, required = true)]
    pub email: String,

    /// Preferred game (FIFA, Valorant, CS:GO, DOTA 2, Basketball, Chess, Badminton).
    #[arg(long, required = true)]
    pub game: String,

    /// Preferred role (Strategist, Attacker, Defender, Supporter, Coordinator).
    #[arg(long, required = true)]
    pub role: String,

    /// Self-assessed skill level from 1 to 10.
    #[arg(long, required = true, value_name = "1-10")]
    pub skill: u8,

    /// Five comma-separated survey answers from 1 (strongly disagree) to 5 (strongly agree).
    #[arg(long, required = true, value_name = "A,B,C,D,E")]
    pub answers: String,
}
