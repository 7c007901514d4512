use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kwok_catalog::catalog::{self, CatalogSummary};
use kwok_catalog::config::{self, CatalogConfig};
use kwok_catalog::error::CatalogError;
use kwok_catalog::exit_codes::exit_code_for_anyhow;
use kwok_catalog::instance_table::ResourceTable;
use kwok_catalog::{sink, validation};

#[derive(Parser)]
#[command(name = "kwok-catalog")]
#[command(
    about = "Generate the synthetic instance-type catalog for the KWOK cloud provider",
    long_about = "kwok-catalog expands a fixed set of instance families, sizes, architectures and zones into\ninstance type descriptors with on-demand offerings, and prints them as JSON.\n\nRunning without a subcommand is the same as 'kwok-catalog generate'."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for lookup and summary
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the catalog as JSON
    Generate {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show capacity and price of one instance type
    Lookup {
        /// Instance type (c5.4xlarge) or family (c5)
        instance_type: String,
        /// Size, when the first argument is a family
        size: Option<String>,
    },
    /// Table of every generated instance type
    Summary,
    /// Write the default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = config::LOCAL_CONFIG_FILE)]
        path: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    name: String,
    cpu: u32,
    memory_gib: u32,
    storage_gib: u32,
    max_pods: u32,
    price: f64,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries only the document
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for_anyhow(&e));
    }
}

fn load_config(path: Option<&Path>) -> Result<CatalogConfig> {
    let config = CatalogConfig::load(path).context("Failed to load config")?;
    validation::validate_config(&config)?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Generate { out: None }) {
        Commands::Generate { out } => {
            let config = load_config(config_path)?;
            let catalog = catalog::build_with(&config);
            sink::emit(&catalog, out.as_deref())?;
        }
        Commands::Lookup {
            instance_type,
            size,
        } => {
            lookup(&instance_type, size.as_deref(), cli.output)?;
        }
        Commands::Summary => {
            let config = load_config(config_path)?;
            let catalog = catalog::build_with(&config);
            let summary = CatalogSummary::from_catalog(&catalog);
            if cli.output == OutputFormat::Json {
                println!("{}", sink::to_json_string(&summary)?);
            } else {
                println!("{}", sink::render_table(&catalog));
                println!();
                println!("{}", sink::render_summary(&summary));
            }
        }
        Commands::Init { path } => {
            config::init_config(&path)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
        }
    }

    Ok(())
}

fn lookup(instance_type: &str, size: Option<&str>, output: OutputFormat) -> Result<()> {
    let (family, size) = match size {
        Some(size) => (instance_type, size),
        None => validation::validate_instance_type_name(instance_type)?,
    };

    let spec = ResourceTable::global().lookup(family, size).ok_or_else(|| {
        CatalogError::validation(
            "instance_type",
            format!("Unknown instance type: {}.{}", family, size),
        )
    })?;

    let result = LookupResult {
        name: format!("{}.{}", family, size),
        cpu: spec.cpu_count,
        memory_gib: spec.memory_gib,
        storage_gib: spec.storage_gib,
        max_pods: spec.max_pods,
        price: catalog::price_for(&spec),
    };

    if output == OutputFormat::Json {
        println!("{}", sink::to_json_string(&result)?);
    } else {
        println!("{}", result.name);
        println!("  cpu:               {}", result.cpu);
        println!("  memory:            {}Gi", result.memory_gib);
        println!("  ephemeral-storage: {}Gi", result.storage_gib);
        println!("  pods:              {}", result.max_pods);
        println!("  price:             ${:.4}/hr", result.price);
    }

    Ok(())
}
