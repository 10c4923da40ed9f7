use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use courtside_core::rsvp::{AttendanceStatus, BucketFilter, RsvpChoice};
use courtside_infrastructure::{ConfigOverrides, ConfigService};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;

use commands::Context;

#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(version, about = "Courtside - weekly badminton session RSVP client", long_about = None)]
struct Cli {
    /// Booking service endpoint [env: COURTSIDE_API_BASE]
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Admin endpoint, if different [env: COURTSIDE_ADMIN_API_BASE]
    #[arg(long, global = true)]
    admin_api_base: Option<String>,

    /// Admin key; never written to disk
    #[arg(long, global = true, env = "COURTSIDE_ADMIN_KEY", hide_env_values = true)]
    admin_key: Option<String>,

    /// Config file (default: <config dir>/courtside/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List open sessions
    Sessions,
    /// Show confirmed players and the waitlist of a session
    Show {
        /// Session id (default: the closest upcoming open session)
        #[arg(long)]
        session: Option<String>,
    },
    /// Submit your attendance
    Rsvp {
        #[arg(long)]
        name: String,
        /// yes, no or maybe (maybe is never submitted)
        #[arg(long)]
        status: RsvpChoice,
        /// Party size
        #[arg(long)]
        pax: Option<u32>,
        #[arg(long, default_value = "")]
        note: String,
        #[arg(long)]
        session: Option<String>,
    },
    /// Organiser commands (require --admin-key)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
    /// Inspect or edit the local config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List sessions
    Sessions {
        /// Include closed sessions
        #[arg(long)]
        show_closed: bool,
        /// Print as JSON (accepted by `admin bulk-update`)
        #[arg(long)]
        json: bool,
    },
    /// Create one session (the date is moved to the next Sunday)
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long, default_value = "")]
        note: String,
        /// Open for RSVPs
        #[arg(long)]
        open: bool,
        /// Close every other session
        #[arg(long)]
        only_open: bool,
    },
    /// Create one session per Sunday
    Generate {
        /// First date (default: the coming Sunday)
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        weeks: Option<u32>,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        /// Leave only the first generated session open
        #[arg(long)]
        only_first_open: bool,
    },
    /// Edit a session
    Update {
        #[arg(long)]
        session: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        capacity: Option<u32>,
        #[arg(long)]
        note: Option<String>,
        /// true to open, false to close
        #[arg(long)]
        open: Option<bool>,
    },
    /// Save several sessions from a JSON file
    BulkUpdate {
        /// JSON array of sessions, as printed by `admin sessions --json`
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a session and all of its bookings
    Delete {
        #[arg(long)]
        session: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Open one session and close all others
    OnlyOpen {
        #[arg(long)]
        session: String,
    },
    /// Show the current RSVPs of a session
    Rsvps {
        #[arg(long)]
        session: String,
        /// all, confirmed, waitlist, no or overflow
        #[arg(long, default_value = "all")]
        filter: BucketFilter,
    },
    /// Overwrite someone's RSVP
    UpdateRsvp {
        #[arg(long)]
        session: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        status: AttendanceStatus,
        #[arg(long, default_value_t = 1)]
        pax: u32,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove someone's RSVP rows
    DeleteRsvp {
        #[arg(long)]
        session: String,
        #[arg(long)]
        name: String,
    },
    /// Print the bilingual announcement for a session
    Announce {
        #[arg(long)]
        session: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Change stored values
    Set {
        #[arg(long)]
        api_base: Option<String>,
        #[arg(long)]
        admin_api_base: Option<String>,
        #[arg(long)]
        public_url: Option<String>,
        #[arg(long)]
        waitlist_limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("{err:#}").red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let flags = ConfigOverrides {
        api_base: cli.api_base.clone(),
        admin_api_base: cli.admin_api_base.clone(),
    };
    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new()?,
    }
    .with_overrides(ConfigOverrides::from_env().merge(flags));

    let config = config_service
        .get_config()
        .with_context(|| format!("failed to load {}", config_service.path().display()))?;
    logging::init(cli.verbose, &config.log_level);
    tracing::debug!(path = %config_service.path().display(), api_base = %config.api_base, "config loaded");

    let ctx = Context::new(config, cli.admin_key.clone());

    match cli.command {
        Commands::Sessions => commands::public::sessions(&ctx).await,
        Commands::Show { session } => commands::public::show(&ctx, session).await,
        Commands::Rsvp {
            name,
            status,
            pax,
            note,
            session,
        } => {
            commands::public::rsvp(
                &ctx,
                commands::public::RsvpArgs {
                    name,
                    choice: status,
                    pax,
                    note,
                    session,
                },
            )
            .await
        }
        Commands::Admin { action } => commands::admin::run(&ctx, action).await,
        Commands::Config { action } => commands::config::run(&config_service, action),
    }
}
