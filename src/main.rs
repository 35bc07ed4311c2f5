//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Load and inspect portfolio blogs and testimonials", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Content root: a directory or an http(s) URL (overrides _config.yml)
    #[arg(short, long, global = true, env = "FOLIO_CONTENT_ROOT")]
    root: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    #[command(alias = "l")]
    List {
        /// Type of content to list (blog, testimonial, tag, category)
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Show a single blog post
    Show {
        /// Slug of the post (file name without extension)
        slug: String,

        /// Print rendered HTML instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Export blogs and testimonials as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let mut folio = folio_rs::Folio::new(&base_dir)?;
    if let Some(root) = cli.root {
        folio = folio.with_content_root(root);
    }
    tracing::debug!("Content root: {}", folio.config.content_root);

    match cli.command {
        Commands::List { r#type } => {
            folio_rs::commands::list::run(&folio, &r#type).await?;
        }

        Commands::Show { slug, html } => {
            folio_rs::commands::show::run(&folio, &slug, html).await?;
        }

        Commands::Export { output } => {
            folio_rs::commands::export::run(&folio, output.as_deref()).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
