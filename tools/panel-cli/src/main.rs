//! Panel CLI - Quote cut-to-length panels and manage the cart.
//!
//! Commands:
//! - `panel prices` - List the priced variants of a product
//! - `panel quote` - Price a set of cut lengths without touching the cart
//! - `panel cart` - Show and edit the persisted cart

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, PricesArgs, QuoteArgs};

/// Panel CLI - Quote and order cut-to-length metal panels
#[derive(Parser)]
#[command(name = "panel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List color/gauge variants and prices for a product
    Prices(PricesArgs),

    /// Price cut lengths without adding them to the cart
    Quote(QuoteArgs),

    /// Show or edit the cart
    Cart(CartArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    logging::init(&ctx.config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Prices(args) => commands::prices::run(args, &ctx).await,
        Commands::Quote(args) => commands::quote::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
