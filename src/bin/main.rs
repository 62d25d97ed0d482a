//! relalg CLI - Translate SQL SELECT queries to relational algebra
//!
//! Usage:
//!   relalg translate <query> [--format algebra|tree|json|flow] [--pretty|--compact]
//!   relalg validate <query>
//!   relalg tables
//!   relalg describe <table>
//!
//! Examples:
//!   relalg translate "SELECT Nome FROM Cliente WHERE idCliente = 1"
//!   relalg translate "SELECT * FROM Produto p JOIN Categoria c ON p.Categoria_idCategoria = c.idCategoria" --format tree
//!   relalg describe Pedido

use clap::{Parser, Subcommand, ValueEnum};
use relalg::catalog::builtin;
use relalg::config::{OutputFormat, Settings};
use relalg::translate::{self, Translation};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "relalg")]
#[command(about = "relalg - Translate SQL SELECT queries to relational algebra")]
#[command(version)]
struct Cli {
    /// Path to a relalg.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a query to relational algebra
    Translate {
        /// The SQL query
        query: String,

        /// Output format (defaults to the configured format)
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// Pretty-print JSON output
        #[arg(long, overrides_with = "compact")]
        pretty: bool,

        /// Single-line JSON output
        #[arg(long, overrides_with = "pretty")]
        compact: bool,
    },

    /// Validate a query without printing the algebra
    Validate {
        /// The SQL query
        query: String,
    },

    /// List the tables in the catalog
    Tables,

    /// Show the columns of a table
    Describe {
        /// Table name
        table: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Infix algebra string
    Algebra,
    /// Labeled tree as JSON
    Tree,
    /// Parsed query, algebra and tree as JSON
    Json,
    /// Clause flow graph
    Flow,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Algebra => OutputFormat::Algebra,
            FormatArg::Tree => OutputFormat::Tree,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Flow => OutputFormat::Flow,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load_from(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match cli.command {
        Commands::Translate {
            query,
            format,
            pretty,
            compact,
        } => cmd_translate(&settings, &query, format, pretty_flag(pretty, compact)),
        Commands::Validate { query } => cmd_validate(&settings, &query),
        Commands::Tables => cmd_tables(),
        Commands::Describe { table } => cmd_describe(&table),
    }
}

/// `RUST_LOG` wins over the configured filter. Logs go to stderr.
fn init_logging(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

/// `None` when neither flag is given, so the configured default applies.
fn pretty_flag(pretty: bool, compact: bool) -> Option<bool> {
    match (pretty, compact) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn cmd_translate(
    settings: &Settings,
    query: &str,
    format: Option<FormatArg>,
    pretty: Option<bool>,
) -> ExitCode {
    let options = settings.translate_options();
    let format = format.map(OutputFormat::from).unwrap_or(settings.output.format);
    let pretty = pretty.unwrap_or(settings.output.pretty);

    let translation = match translate::translate(query, builtin(), &options) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{} error: {}", e.kind(), e);
            return ExitCode::FAILURE;
        }
    };

    match render(&translation, format, pretty) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn render(
    translation: &Translation,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Algebra => Ok(translation.algebra.clone()),
        OutputFormat::Tree => to_json(&translation.tree, pretty),
        OutputFormat::Json => to_json(translation, pretty),
        OutputFormat::Flow => Ok(translation.flow().to_string().trim_end().to_string()),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn cmd_validate(settings: &Settings, query: &str) -> ExitCode {
    let options = settings.translate_options();

    match translate::validate(query, builtin(), &options) {
        Ok(_) => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} error: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_tables() -> ExitCode {
    println!("Tables:");
    for table in builtin().tables() {
        println!("  - {} ({} columns)", table.name, table.columns.len());
    }
    ExitCode::SUCCESS
}

fn cmd_describe(table: &str) -> ExitCode {
    let Some(schema) = builtin().table(table) else {
        eprintln!("Table '{}' does not exist in the schema.", table);
        return ExitCode::FAILURE;
    };

    println!("{}:", schema.name);
    for column in &schema.columns {
        println!("  - {} {}", column.name, column.ty);
    }
    ExitCode::SUCCESS
}
