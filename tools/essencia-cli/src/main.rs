//! Essência CLI - Browse and validate the storefront catalog.
//!
//! Commands:
//! - `essencia categories` - List categories
//! - `essencia category` - Show a category and its products
//! - `essencia products` - List, filter and sort products
//! - `essencia product` - Show a product by slug or id
//! - `essencia testimonials` - List customer testimonials
//! - `essencia stats` - Summarize the dataset
//! - `essencia validate` - Check a dataset against the catalog invariants
//! - `essencia config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CategoryArgs, ConfigArgs, ProductArgs, ProductsArgs, ValidateArgs};

/// Essência CLI - Browse the handmade goods catalog
#[derive(Parser)]
#[command(name = "essencia")]
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

    /// Catalog dataset to read instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all categories
    Categories,

    /// Show a category and its products
    Category(CategoryArgs),

    /// List products, optionally filtered and sorted
    Products(ProductsArgs),

    /// Show a single product
    Product(ProductArgs),

    /// List customer testimonials
    Testimonials,

    /// Show dataset counts
    Stats,

    /// Validate a catalog dataset
    Validate(ValidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.data.as_deref(), output)?;

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("Logging disabled: {:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Categories => commands::categories::list(&ctx),
        Commands::Category(args) => commands::categories::show(args, &ctx),
        Commands::Products(args) => commands::products::list(args, &ctx),
        Commands::Product(args) => commands::products::show(args, &ctx),
        Commands::Testimonials => commands::testimonials::run(&ctx),
        Commands::Stats => commands::stats::run(&ctx),
        Commands::Validate(args) => commands::validate::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
