//! Shape CLI - inspect catalogs, validate records and preview bound requests

mod error;
mod output;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use shape::binder::bind_request;
use shape::registry::ModelKind;
use shape::define::Catalog;
use shape::{Registry, Request};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;
use crate::output::Format;

#[derive(Parser)]
#[command(name = "shape")]
#[command(version, about = "Inspect SDK model catalogs, validate records and preview requests", long_about = None)]
struct Cli {
    /// Extra catalog documents (JSON or YAML) merged into the bundled catalog
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    catalogs: Vec<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List enum sets, or the canonical values of one
    Enums {
        #[arg(value_name = "NAME")]
        name: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// List models, or the fields of one
    Models {
        #[arg(value_name = "NAME")]
        name: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// List operations
    Operations {
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },

    /// Decode a JSON document as MODEL and report enum violations
    ///
    /// Exits with status 1 when any violation is found.
    Validate {
        #[arg(value_name = "MODEL")]
        model: String,

        /// Input document (reads stdin when absent or "-")
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Bind a JSON request document to OPERATION and print the HTTP request
    Bind {
        #[arg(value_name = "OPERATION")]
        operation: String,

        /// Input document keyed by wire name (reads stdin when absent or "-")
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Extra header, repeatable (-H opc-request-id:abc)
        #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,
    },
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,shape=info,shape_cli=info".to_string(),
            2 => "info,shape=debug,shape_cli=debug".to_string(),
            _ => "debug,shape=trace,shape_cli=trace".to_string(),
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

fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let text = read_input(Some(path))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let parsed = if is_json {
        Catalog::from_json_str(&text)
    } else {
        Catalog::from_yaml_str(&text)
    };
    parsed.map_err(|source| CliError::Catalog {
        path: path.display().to_string(),
        source,
    })
}

fn build_registry(extra: &[PathBuf]) -> Result<Registry, CliError> {
    let mut catalog = shape_definitions::core_catalog();
    for path in extra {
        let loaded = load_catalog(path)?;
        tracing::debug!(path = %path.display(), definitions = loaded.len(), "loaded catalog");
        catalog.merge(loaded);
    }
    Ok(Registry::new(catalog)?)
}

fn parse_header(arg: &str) -> Result<(&str, &str), CliError> {
    arg.split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| CliError::HeaderArg(arg.to_string()))
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let registry = build_registry(&cli.catalogs)?;

    match cli.command {
        Commands::Enums { name, format } => match (format, name.as_deref()) {
            (Format::Json, name) => {
                let json = output::enums_json(&registry, name)?;
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            (Format::Text, Some(name)) => {
                for value in registry.values(name)? {
                    println!("{value}");
                }
            }
            (Format::Text, None) => {
                for line in output::enum_index(&registry) {
                    println!("{line}");
                }
            }
        },

        Commands::Models { name, format } => match name {
            Some(name) => {
                let model = registry.model(&name)?;
                let fields: Vec<_> = model.fields().iter().map(|f| f.descriptor()).collect();
                match format {
                    Format::Json => println!("{}", serde_json::to_string_pretty(&fields)?),
                    Format::Text => {
                        let kind = match model.kind() {
                            ModelKind::Model => "(model)",
                            ModelKind::Request => "(request)",
                        };
                        println!("{} {}", model.name().bold(), kind.dimmed());
                        for row in output::field_rows(fields.into_iter()) {
                            println!("{row}");
                        }
                    }
                }
            }
            None => {
                let unions: Vec<_> = registry.union_names().collect();
                match format {
                    Format::Json => {
                        let models: Vec<_> = registry.model_names().collect();
                        let json = serde_json::json!({ "models": models, "unions": unions });
                        println!("{}", serde_json::to_string_pretty(&json)?);
                    }
                    Format::Text => {
                        for name in registry.model_names() {
                            println!("{name}");
                        }
                        for name in unions {
                            println!("{} {}", name, "(union)".dimmed());
                        }
                    }
                }
            }
        },

        Commands::Operations { format } => match format {
            Format::Json => {
                let ops: Vec<_> = registry.operations().collect();
                println!("{}", serde_json::to_string_pretty(&ops)?);
            }
            Format::Text => {
                for op in registry.operations() {
                    println!("{:<52} {:<7} {}", op.id.bold(), op.method.to_string().green(), op.path);
                }
            }
        },

        Commands::Validate { model, file } => {
            let text = read_input(file.as_deref())?;
            let record = registry.unmarshal(&model, &text)?;
            let violations = record.validate_enums();
            if violations.had_errors() {
                tracing::info!(model = %model, count = violations.len(), "enum violations found");
                for line in output::violations(&violations) {
                    println!("{line}");
                }
                return Ok(ExitCode::FAILURE);
            }
            println!("{} {model} is valid", "✓".green());
        }

        Commands::Bind {
            operation,
            file,
            headers,
        } => {
            let op = registry.operation(&operation)?;
            let text = read_input(file.as_deref())?;
            let record = registry.unmarshal(&op.request, &text)?;
            let mut request = Request::from(record);
            for arg in &headers {
                let (name, value) = parse_header(arg)?;
                request = request.with_header(name, value);
            }
            let template = bind_request(op, &request)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&output::template_json(&template))?
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}
