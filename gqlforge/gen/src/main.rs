//! gqlforge CLI
//!
//! Scaffolds projects, compiles `gqlforge.yaml` into a graphql-codegen plan,
//! and prints cache-utils modules and READMEs.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use gqlforge_define::{CodegenOptions, ConfigError, ServiceGroups};
use gqlforge_gen::compiler::compile;
use gqlforge_gen::docs::render_readme;
use gqlforge_gen::errors::GeneratorError;
use gqlforge_gen::output::{PlanFormat, write_plan};
use gqlforge_gen::scaffold::{SetupOptions, setup};
use gqlforge_gen::utils_module::{render_cache_utils_module, render_with_groups};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// gqlforge - multi-endpoint GraphQL codegen and cache utilities
#[derive(Parser, Debug)]
#[command(name = "gqlforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold gqlforge.yaml and a starter document
    Setup {
        /// Gateway URL of the GraphQL API
        #[arg(long)]
        endpoint: String,

        /// API key sent as the x-api-key header
        #[arg(long)]
        api_key: Option<String>,

        /// Application name, also used as the endpoint name
        #[arg(long, default_value = "app")]
        app_name: String,

        /// Directory to scaffold into
        #[arg(long, default_value = ".")]
        target: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Print files without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Compile gqlforge.yaml into a codegen plan
    Plan {
        /// Options file (.yaml, .yml or .json)
        #[arg(short, long, default_value = "gqlforge.yaml")]
        config: PathBuf,

        /// Plan file to write
        #[arg(short, long, default_value = "codegen.yml")]
        output: PathBuf,

        /// Write JSON regardless of the output extension
        #[arg(long)]
        json: bool,

        /// Print the plan without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the cache-utils module for a list of operations
    Utils {
        /// Endpoint the operations belong to
        #[arg(long)]
        endpoint: String,

        /// JSON file with explicit {service: [operation, ...]} groups
        #[arg(long, value_name = "FILE")]
        groups: Option<PathBuf>,

        /// Operation names, e.g. GetUser UpdateUser
        #[arg(value_name = "OPS")]
        operations: Vec<String>,
    },

    /// Print the README for a list of operations
    Docs {
        /// Options file (.yaml, .yml or .json)
        #[arg(short, long, default_value = "gqlforge.yaml")]
        config: PathBuf,

        /// Operation names, e.g. GetUser UpdateUser
        #[arg(value_name = "OPS")]
        operations: Vec<String>,
    },
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,gqlforge_gen=info".to_string(),
            2 => "info,gqlforge_gen=debug,gqlforge_define=debug".to_string(),
            _ => "debug,gqlforge_gen=trace,gqlforge_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn load_options(path: &Path) -> Result<CodegenOptions, GeneratorError> {
    CodegenOptions::check_env()?;
    Ok(CodegenOptions::from_path(path)?)
}

fn load_groups(path: &Path) -> Result<ServiceGroups, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let groups = serde_json::from_str(&content).map_err(ConfigError::from)?;
    Ok(groups)
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Setup {
            endpoint,
            api_key,
            app_name,
            target,
            force,
            dry_run,
        } => {
            let options = SetupOptions {
                endpoint,
                api_key,
                app_name,
                target,
                force,
                dry_run,
            };
            let files = setup(&options)?;

            for file in &files {
                if dry_run {
                    println!("{}", format!("# {}", file.path.display()).bold());
                    println!("{}", file.content);
                } else {
                    eprintln!("{} {}", "created".green().bold(), file.path.display());
                }
            }
        }

        Commands::Plan {
            config,
            output,
            json,
            dry_run,
        } => {
            let options = load_options(&config)?;
            let plan = compile(&options);
            let format = if json {
                PlanFormat::Json
            } else {
                PlanFormat::from_path(&output)
            };

            let content = write_plan(&plan, &output, format, dry_run)?;

            if dry_run {
                print!("{content}");
            } else {
                eprintln!(
                    "{} {} ({} targets)",
                    "wrote".green().bold(),
                    output.display(),
                    plan.len()
                );
            }
        }

        Commands::Utils {
            endpoint,
            groups,
            operations,
        } => {
            let source = match groups {
                Some(path) => render_with_groups(&endpoint, &load_groups(&path)?),
                None => render_cache_utils_module(&endpoint, &operations),
            };
            print!("{source}");
        }

        Commands::Docs { config, operations } => {
            let options = load_options(&config)?;
            let groups = ServiceGroups::infer(&operations);
            print!(
                "{}",
                render_readme(&options.app_name, &options.endpoints, &groups)
            );
        }
    }

    Ok(())
}
