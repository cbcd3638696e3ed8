use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use atelier_cli::{init_tracing, render, run_server, Config};
use atelier_storage::PoolConfig;
use atelier_taxonomy::DbState;

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Atelier - taxonomy manager for the content dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the taxonomy API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file (overrides DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Print the taxonomy tree with effective colors
    Tree {
        /// SQLite database file (overrides DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Show the HSV value and contrast color of a hex color
    Color {
        /// Color as RRGGBB or #RRGGBB
        hex: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { port, database } => {
            let config = Config::from_env()?.with_overrides(port, database)?;
            init_tracing();
            run_server(config).await?;
        }
        Commands::Tree { database } => {
            let config = Config::from_env()?.with_overrides(None, database)?;
            print_tree(&config).await?;
        }
        Commands::Color { hex } => match render::describe_color(&hex) {
            Some(description) => print!("{}", description),
            None => bail!("Invalid color '{}': expected RRGGBB or #RRGGBB", hex),
        },
    }
    Ok(())
}

async fn print_tree(config: &Config) -> Result<()> {
    let db = DbState::init_with_path(&config.database_path, &PoolConfig::default())
        .await
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    let project_types = db.project_type_storage.list_project_types().await?;
    let global_tag_types = db.tag_type_storage.list_tag_types(None).await?;

    print!("{}", render::render_tree(&project_types, &global_tag_types));
    Ok(())
}
