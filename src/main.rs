//! CLI entry point for markblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use markblog::commands::list::ListFormat;

#[derive(Parser)]
#[command(name = "markblog")]
#[command(version)]
#[command(about = "A small markdown blog: posts with front-matter rendered to HTML", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static site
    #[command(alias = "b")]
    Build,

    /// Serve pages straight from the posts directory
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts
    List {
        /// Print only slugs
        #[arg(long, conflicts_with = "json")]
        slugs: bool,

        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove the output directory
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "markblog=debug,info"
    } else {
        "markblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build => {
            let blog = markblog::Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            blog.build()?;
            println!("Generated successfully!");
        }

        Commands::Serve { port, ip } => {
            let blog = markblog::Blog::new(&base_dir)?;
            tracing::info!("Serving posts from {:?}", blog.posts_dir);
            markblog::server::start(&blog, &ip, port).await?;
        }

        Commands::List { slugs, json } => {
            let blog = markblog::Blog::new(&base_dir)?;
            let format = if slugs {
                ListFormat::Slugs
            } else if json {
                ListFormat::Json
            } else {
                ListFormat::Table
            };
            markblog::commands::list::run(&blog, format)?;
        }

        Commands::New { title, slug } => {
            let blog = markblog::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            let blog = markblog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("markblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
