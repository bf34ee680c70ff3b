//! Shelfcart CLI - borrowing cart for a library client.
//!
//! Commands:
//! - `shelfcart list` - Show the cart
//! - `shelfcart add` - Add a book
//! - `shelfcart add-json` - Add a raw catalog item
//! - `shelfcart remove` - Remove a book
//! - `shelfcart clear` - Empty the cart
//! - `shelfcart status` - Show cart phase and remaining capacity
//! - `shelfcart submit` - Submit the cart as a borrow request
//! - `shelfcart requests` - List borrow requests
//! - `shelfcart request` - Approve, reject, cancel or return a request

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, AddJsonArgs, RemoveArgs, RequestArgs, RequestsArgs, SubmitArgs};

/// Shelfcart - gather books and submit borrow requests
#[derive(Parser)]
#[command(name = "shelfcart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the borrowing cart
    List,

    /// Add a book to the cart
    Add(AddArgs),

    /// Add a catalog item given as JSON
    AddJson(AddJsonArgs),

    /// Remove a book from the cart
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Show cart phase and remaining capacity
    Status,

    /// Submit the cart as a borrow request
    Submit(SubmitArgs),

    /// List borrow requests
    Requests(RequestsArgs),

    /// Change the status of a borrow request
    Request(RequestArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.data_dir, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&ctx.config.log.level, cli.verbose);
    tracing::debug!(dir = %ctx.store.dir().display(), "using storage");

    let result = match cli.command {
        Commands::List => commands::cart::list(&ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::AddJson(args) => commands::cart::add_json(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Clear => commands::cart::clear(&ctx),
        Commands::Status => commands::cart::status(&ctx),
        Commands::Submit(args) => commands::request::submit(args, &ctx),
        Commands::Requests(args) => commands::request::list(args, &ctx),
        Commands::Request(args) => commands::request::update(args, &ctx),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
