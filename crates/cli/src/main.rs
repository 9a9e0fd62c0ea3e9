mod cmd;
mod local_source;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dropblog",
    version,
    about = "Markdown posts from a synced folder to a sanitized article store"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Parse one local Markdown file, store it and rebuild the index
    Ingest(IngestArgs),

    /// Apply the contents of a local folder as the owner's synced tree
    Sync(SyncArgs),

    /// Rebuild the article index of an owner
    Reindex(OwnerArgs),

    /// Print the article index of an owner, most recent first
    List(ListArgs),

    /// Print one stored article
    Show(ShowArgs),

    /// Delete every article of an owner together with the index
    Purge(OwnerArgs),
}

#[derive(Debug, Args)]
pub struct OwnerArgs {
    /// Owner identifier (account email)
    #[arg(long)]
    pub owner: String,
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Markdown file to ingest
    pub file: PathBuf,

    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Path the file is stored under (default: <published_dir><file name>)
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Folder standing in for the synced tree
    pub dir: PathBuf,

    #[command(flatten)]
    pub owner: OwnerArgs,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Path of the article, e.g. /published/hello_world.md
    pub path: String,

    #[command(flatten)]
    pub owner: OwnerArgs,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Ingest(args) => cmd::ingest::run(config, profile, &args),
        Commands::Sync(args) => cmd::sync::run(config, profile, &args),
        Commands::Reindex(args) => cmd::reindex::run(config, profile, &args),
        Commands::List(args) => cmd::list::run(config, profile, &args),
        Commands::Show(args) => cmd::show::run(config, profile, &args),
        Commands::Purge(args) => cmd::purge::run(config, profile, &args),
    }

    logging::shutdown();
}
