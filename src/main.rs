mod catalog;
mod commands;
mod config;
mod context;
mod currency;
mod error;
mod output;
mod session;
mod template;
mod test_helpers;
mod token;
mod traits;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{CatalogCommand, GenerateCommand, TokenCommand};
use config::{ConfigOverrides, ProvisionerConfig};
use context::Context;
use session::ReplicaCount;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cachecraft")]
#[command(about = "Interactive generator for ElastiCache CloudFormation templates", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogSource {
    /// Node type catalog (JSON map of node type name to Memory/SSD/Price)
    #[arg(short, long, env = "CACHECRAFT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Locale used for currency formatting (e.g. en_US.UTF-8)
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a node type interactively and write <project>.cf.yaml
    Generate {
        #[command(flatten)]
        source: CatalogSource,

        /// CloudFormation template containing the placeholders
        #[arg(short, long, env = "CACHECRAFT_TEMPLATE")]
        template: Option<PathBuf>,

        /// Banner shown before the first prompt
        #[arg(long)]
        banner: Option<PathBuf>,

        /// Directory the generated template is written to
        #[arg(short, long, env = "CACHECRAFT_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// List node types ranked by capacity with monthly cost projections
    Catalog {
        #[command(flatten)]
        source: CatalogSource,

        /// Number of replicas to price (0-5)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        replicas: i64,
    },

    /// Print a freshly generated authentication token
    Token,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new();

    match cli.command {
        Commands::Generate {
            source,
            template,
            banner,
            output_dir,
        } => {
            let config = ProvisionerConfig::load(
                &*ctx.fs,
                ConfigOverrides {
                    catalog: source.catalog,
                    template,
                    banner,
                    output_dir,
                    locale: source.locale,
                },
            )?;
            GenerateCommand::execute(&ctx, &config)?;
        }
        Commands::Catalog { source, replicas } => {
            let replicas = ReplicaCount::new(replicas)?;
            let config = ProvisionerConfig::load(
                &*ctx.fs,
                ConfigOverrides {
                    catalog: source.catalog,
                    locale: source.locale,
                    ..Default::default()
                },
            )?;
            CatalogCommand::execute(&ctx, &config, replicas)?;
        }
        Commands::Token => {
            TokenCommand::execute(&ctx)?;
        }
    }

    Ok(())
}
