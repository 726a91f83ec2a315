//! # gqlgen-cli
//!
//! Command-line front end for the gqlgen schema language.
//!
//! Reads a schema from a file or standard input, parses it, and runs one of
//! the generators over the tree: Go structs for output types, Go structs for
//! inputs and resolver arguments, a JSON resolver manifest, or a plain list
//! of type names.

mod codegen;
mod config;
mod errors;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gqlgen_syntax::{DocumentNode, parse_str};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use codegen::GoOptions;
use config::Config;
use errors::{enhance_error, enhance_parse_error};

#[derive(Parser)]
#[command(name = "gqlgen")]
#[command(about = "Schema parser and Go code generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of .gqlgenrc.toml / .gqlgenrc
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directive marking resolver-backed fields
    #[arg(long, global = true, value_name = "NAME")]
    resolve_directive: Option<String>,

    /// Log parser and generator activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SchemaInput {
    /// Schema file to read; standard input when omitted
    #[arg(value_name = "SCHEMA")]
    schema: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate Go structs for output types")]
    Types {
        #[command(flatten)]
        input: SchemaInput,
        /// Go package name (falls back to $GOPACKAGE, then the config file)
        #[arg(short, long)]
        package: Option<String>,
    },
    #[command(about = "Generate Go structs for inputs, resolver links and arguments")]
    Inputs {
        #[command(flatten)]
        input: SchemaInput,
        /// Go package name (falls back to $GOPACKAGE, then the config file)
        #[arg(short, long)]
        package: Option<String>,
    },
    #[command(about = "Print a JSON manifest of resolver-backed fields")]
    Manifest {
        #[command(flatten)]
        input: SchemaInput,
    },
    #[command(about = "List the names of all type definitions")]
    List {
        #[command(flatten)]
        input: SchemaInput,
        /// Sort names alphabetically
        #[arg(short, long)]
        sort: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        enhance_error(e).display();
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    let sort = matches!(cli.command, Commands::List { sort: true, .. });
    config.merge_cli_args(sort, cli.resolve_directive);

    let output = match cli.command {
        Commands::Types { input, package } => {
            let doc = load_schema(&input)?;
            let package = config.resolve_package(package.as_deref(), gopackage_env())?;
            codegen::generate_types(&doc, &go_options(&config, &package))?
        }
        Commands::Inputs { input, package } => {
            let doc = load_schema(&input)?;
            let package = config.resolve_package(package.as_deref(), gopackage_env())?;
            codegen::generate_inputs(&doc, &go_options(&config, &package))?
        }
        Commands::Manifest { input } => {
            let doc = load_schema(&input)?;
            let manifest = codegen::generate_manifest(&doc, &config.resolve_directive)
                .context("Failed to serialize resolver manifest")?;
            format!("{}\n", manifest)
        }
        Commands::List { input, .. } => {
            let doc = load_schema(&input)?;
            codegen::generate_list(&doc, config.sort)
        }
    };

    print!("{}", output);
    Ok(())
}

fn gopackage_env() -> Option<String> {
    std::env::var("GOPACKAGE").ok().filter(|value| !value.is_empty())
}

fn go_options<'a>(config: &'a Config, package: &'a str) -> GoOptions<'a> {
    GoOptions {
        package,
        root_types: &config.root_types,
        resolve_directive: &config.resolve_directive,
    }
}

/// Reads and parses the schema. A syntax error is reported against the
/// source and ends the process.
fn load_schema(input: &SchemaInput) -> Result<DocumentNode> {
    let (source, file) = match &input.schema {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema from {}", path.display()))?;
            (source, Some(path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read schema from stdin")?;
            (source, None)
        }
    };

    tracing::debug!(bytes = source.len(), "read schema");

    match parse_str(&source) {
        Ok(doc) => Ok(doc),
        Err(parse_error) => {
            enhance_parse_error(&parse_error, file, &source).display();
            std::process::exit(1);
        }
    }
}
