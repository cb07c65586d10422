use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storefront::category::Category;

/// Load a storefront catalog and render it
#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Load the product catalog, inspect entries and render the storefront page", long_about = None)]
pub struct Cli {
    /// Content root to fetch JSON resources from (overrides config)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Read JSON resources from a local directory instead of HTTP
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "base_url")]
    pub dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every category and print where its data came from
    Load,
    /// Print one product's detail view
    Show {
        category: Category,
        id: String,
    },
    /// Write the storefront page as static HTML
    Render {
        /// Output file; stdout when absent
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Open a product's modal in the rendered page, as `<category>/<id>`
        #[arg(long, value_name = "CATEGORY/ID")]
        open: Option<String>,
    },
}
