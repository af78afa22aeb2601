//! toxictl — command-line client for a Toxiproxy-compatible admin API.
//!
//! Commands:
//! - `list`    — List all proxies
//! - `inspect` — Show one proxy and its toxics
//! - `toggle`  — Enable or disable a proxy
//! - `create`  — Create a proxy
//! - `delete`  — Delete a proxy
//! - `toxic`   — Add, update, or remove toxics

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use toxictl_client::HttpAdminClient;
use toxictl_config::AppConfig;
use toxictl_core::AdminService;

mod commands;
mod console;
mod render;

use commands::toxic::{AddArgs, RemoveArgs, UpdateArgs};
use console::{Console, Terminal};

const TOXIC_HELP: &str = "\
Default toxics:
  latency:     delay all data +/- jitter
               latency=<ms>,jitter=<ms>

  bandwidth:   limit to max KB/s
               rate=<KB/s>

  slow_close:  delay from closing
               delay=<ms>

  timeout:     stop all data and close after timeout
               timeout=<ms>

  slicer:      slice data into bits with optional delay
               average_size=<bytes>,size_variation=<bytes>,delay=<microseconds>

Examples:
  toxictl toxic add myProxy -t latency -n myToxic -f latency=100,jitter=50
  toxictl toxic update myProxy -n myToxic -f jitter=25
  toxictl toxic remove myProxy -n myToxic";

#[derive(Parser)]
#[command(
    name = "toxictl",
    about = "toxictl — Simulate network and system conditions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Address of the admin API (overrides config and TOXIPROXY_URL)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all proxies
    #[command(visible_aliases = ["l", "li", "ls"])]
    List,

    /// Inspect a single proxy
    #[command(visible_aliases = ["i", "ins"])]
    Inspect {
        /// Name of the proxy
        name: Option<String>,
    },

    /// Toggle enabled status on a proxy
    #[command(visible_alias = "tog")]
    Toggle {
        /// Name of the proxy
        name: Option<String>,
    },

    /// Create a new proxy
    #[command(visible_aliases = ["c", "new"])]
    Create {
        /// Name of the proxy
        name: Option<String>,

        /// Proxy will listen on this address
        #[arg(short, long)]
        listen: Option<String>,

        /// Proxy will forward to this address
        #[arg(short, long)]
        upstream: Option<String>,
    },

    /// Delete a proxy
    #[command(visible_alias = "d")]
    Delete {
        /// Name of the proxy
        name: Option<String>,
    },

    /// Add, remove or update a toxic
    #[command(visible_alias = "t", after_help = TOXIC_HELP)]
    Toxic {
        #[command(subcommand)]
        command: ToxicCommands,
    },
}

#[derive(Subcommand)]
enum ToxicCommands {
    /// Add a new toxic
    #[command(visible_alias = "a")]
    Add(AddArgs),

    /// Update an enabled toxic
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Remove an enabled toxic
    #[command(visible_aliases = ["r", "delete", "d"])]
    Remove(RemoveArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&*e, &mut Terminal);
            ExitCode::FAILURE
        }
    }
}

/// Print a failed command's error, with a usage hint when the input was at fault.
fn report(err: &(dyn std::error::Error + 'static), console: &mut dyn Console) {
    console.err(&format!("{} {err}\n", "error:".red().bold()));
    if err.downcast_ref::<toxictl_core::Error>().is_some_and(|e| e.is_input()) {
        console.err(&render::hint("see `toxictl help <command>` for usage"));
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(host) = cli.host {
        config = config.with_host(host)?;
    }
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }
    tracing::debug!(host = %config.host, "Using admin API");

    let client = HttpAdminClient::from_config(&config)?;
    let admin: &dyn AdminService = &client;
    let console = &mut Terminal;

    match cli.command {
        Commands::List => commands::list::run(admin, console).await?,
        Commands::Inspect { name } => commands::inspect::run(admin, console, &name).await?,
        Commands::Toggle { name } => commands::toggle::run(admin, console, &name).await?,
        Commands::Create {
            name,
            listen,
            upstream,
        } => commands::create::run(admin, console, &name, &listen, &upstream).await?,
        Commands::Delete { name } => commands::delete::run(admin, console, &name).await?,
        Commands::Toxic { command } => match command {
            ToxicCommands::Add(args) => commands::toxic::add(admin, console, &args).await?,
            ToxicCommands::Update(args) => commands::toxic::update(admin, console, &args).await?,
            ToxicCommands::Remove(args) => commands::toxic::remove(admin, console, &args).await?,
        },
    }

    Ok(())
}
