use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use blockswap::config::{BlockswapConfig, LOCAL_CONFIG_FILE};
use blockswap::patch::Patch;
use blockswap::runner::{run_chain, RunOptions, RunReport};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./blockswap.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct TargetArgs {
    /// Directory to scan (defaults to the config's target_dir, "src")
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// File extension to patch (defaults to the config's extension, "cpp")
    #[arg(short, long)]
    ext: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the named patches in order
    Apply {
        /// Patch names
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Apply every patch in order: built-ins first, then config patches
    Chain {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List available patches
    List,

    /// Print a patch's old and new blocks
    Show {
        /// Patch name
        name: String,
    },

    /// Write a starter config file
    Init {
        /// Where to write it; the format follows the extension
        #[arg(default_value = LOCAL_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn run_options(config: &BlockswapConfig, target: TargetArgs) -> RunOptions {
    RunOptions::new(
        target.dir.unwrap_or_else(|| config.resolved_target_dir()),
        target.ext.unwrap_or_else(|| config.extension.clone()),
    )
}

fn execute(patches: &[Patch], options: &RunOptions) -> Result<Vec<RunReport>> {
    run_chain(
        patches,
        options,
        |patch, report| println!("[{}] {}", patch.name, report),
        |summary| println!("{}", summary),
    )
    .with_context(|| format!("Failed to patch {}", options.target_dir.display()))
}

fn load_config(explicit: Option<&Path>) -> Result<BlockswapConfig> {
    BlockswapConfig::discover(explicit).context("Failed to load configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    blockswap::init_logging(cli.verbose);
    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Apply { names, target } => {
            let config = load_config(explicit)?;
            let patches = names
                .iter()
                .map(|name| config.resolve_patch(name))
                .collect::<Result<Vec<_>, _>>()?;
            execute(&patches, &run_options(&config, target))?;
        }
        Commands::Chain { target } => {
            let config = load_config(explicit)?;
            let patches = config.all_patches()?;
            info!("Chaining {} patches", patches.len());
            execute(&patches, &run_options(&config, target))?;
        }
        Commands::List => {
            for patch in load_config(explicit)?.all_patches()? {
                match &patch.description {
                    Some(description) => println!("{:<16} {}", patch.name, description),
                    None => println!("{}", patch.name),
                }
            }
        }
        Commands::Show { name } => {
            let patch = load_config(explicit)?.resolve_patch(&name)?;
            println!("--- old ({})", patch.name);
            print!("{}", patch.old_text);
            if patch.is_deletion() {
                println!("--- new: (deleted)");
            } else {
                println!("--- new");
                print!("{}", patch.new_text);
            }
        }
        // Does not load the existing config, so a broken one can be replaced
        Commands::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            BlockswapConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
