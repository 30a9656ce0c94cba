//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod products;
pub mod stats;
pub mod testimonials;
pub mod validate;

use clap::{Args, Subcommand};

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category slug.
    pub slug: String,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products in this category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Only featured (true) or non-featured (false) products.
    #[arg(long)]
    pub featured: Option<bool>,

    /// Only in-stock (true) or sold-out (false) products.
    #[arg(long)]
    pub in_stock: Option<bool>,

    /// Case-insensitive text to look for in product names.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: relevance, price-asc, price-desc, name.
    #[arg(long, default_value = "relevance")]
    pub sort: String,

    /// Show at most this many products.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Raw filter parameter as key=value (repeatable).
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug.
    #[arg(required_unless_present = "id")]
    pub slug: Option<String>,

    /// Look the product up by identifier instead of slug.
    #[arg(long, conflicts_with = "slug")]
    pub id: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Dataset to validate (default: the configured catalog).
    pub path: Option<String>,

    /// Drop invalid records instead of failing on the first one.
    #[arg(long)]
    pub lenient: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
