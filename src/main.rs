use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use structprobe::config::Config;
use structprobe::document::node::Value;
use structprobe::document::parser::{parse_json, to_json};
use structprobe::file::loader::{load_file, load_from_stdin};
use structprobe::path::{self, Parser as PathParser};
use structprobe::search::{find_by_value_report, find_key_match, Comparator};

/// structprobe - Schema-free path resolution, key lookup and value search
#[derive(Parser)]
#[command(name = "structprobe")]
#[command(version)]
#[command(about = "Resolve paths, find keys and locate values in JSON/YAML documents", long_about = None)]
struct Cli {
    /// Output format (default from config, otherwise json)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a path expression into tokens
    Tokens {
        /// Path expression, e.g. 'users[0].address["zip-code"]'
        expr: String,
    },
    /// Print the value at a path
    Get {
        /// JSON or YAML file (`-` for stdin)
        file: String,
        /// Path expression
        path: String,
        /// JSON value printed when the path does not resolve
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Print the value of the shallowest field with the given name
    FindKey {
        /// JSON or YAML file (`-` for stdin)
        file: String,
        /// Field name
        key: String,
        /// Also print the path and depth of the field
        #[arg(long)]
        with_path: bool,
    },
    /// Print the paths of every occurrence of a value
    FindValue {
        /// JSON or YAML file (`-` for stdin)
        file: String,
        /// Value to look for, as JSON (e.g. 3, '"text"', '{"a": 1}')
        value: String,
        /// Comparator: strict or structural (default from config)
        #[arg(short, long)]
        compare: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Whether a command produced output; `NotFound` exits with status 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Found,
    NotFound,
}

struct Printer {
    format: OutputFormat,
    pretty: bool,
}

impl Printer {
    fn print(&self, value: &serde_json::Value) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Json if self.pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
        };
        println!("{}", rendered);
        Ok(())
    }
}

fn init_logging(verbose: u8, default_level: &str) {
    let level = match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_document(file: &str) -> Result<Value> {
    if file == "-" {
        load_from_stdin()
    } else {
        load_file(file)
    }
}

/// Parses the `--default` argument; no argument means `Value::Absent`.
fn parse_default(default: Option<&str>) -> Result<Value> {
    Ok(default
        .map(parse_json)
        .transpose()
        .context("--default must be a JSON value")?
        .unwrap_or(Value::Absent))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The logger needs the configured level, so config errors are reported
    // once it is up.
    let loaded = Config::try_load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(cli.verbose, &config.log_level);
    if let Err(err) = &loaded {
        log::warn!("ignoring config file: {:#}", err);
    }

    let format = cli.format.unwrap_or(match config.output_format.as_str() {
        "yaml" => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    });
    let printer = Printer {
        format,
        pretty: config.pretty,
    };

    Ok(match run(cli.command, &config, &printer)? {
        Status::Found => ExitCode::SUCCESS,
        Status::NotFound => ExitCode::FAILURE,
    })
}

fn run(command: Command, config: &Config, printer: &Printer) -> Result<Status> {
    match command {
        Command::Tokens { expr } => {
            let outcome = PathParser::parse_with_recoveries(&expr);
            printer.print(&serde_json::json!(outcome.path.tokens()))?;
            Ok(Status::Found)
        }
        Command::Get {
            file,
            path: expr,
            default,
        } => {
            let fallback = parse_default(default.as_deref())?;
            let root = load_document(&file)?;
            let value = path::resolve(&root, expr.as_str(), fallback);
            if value.is_absent() {
                return Ok(Status::NotFound);
            }
            printer.print(&to_json(&value))?;
            Ok(Status::Found)
        }
        Command::FindKey {
            file,
            key,
            with_path,
        } => {
            let root = load_document(&file)?;
            let Some(found) = find_key_match(&root, &key)? else {
                return Ok(Status::NotFound);
            };
            if with_path {
                printer.print(&serde_json::json!({
                    "path": found.path,
                    "depth": found.depth,
                    "value": to_json(&found.value),
                }))?;
            } else {
                printer.print(&to_json(&found.value))?;
            }
            Ok(Status::Found)
        }
        Command::FindValue {
            file,
            value,
            compare,
        } => {
            let comparator: Comparator = compare
                .as_deref()
                .unwrap_or(&config.comparator)
                .parse()?;
            let target = parse_json(&value).context("search value must be JSON")?;
            let root = load_document(&file)?;
            let report = find_by_value_report(&root, &target, Some(&comparator));
            if report.paths.is_empty() {
                return Ok(Status::NotFound);
            }
            printer.print(&serde_json::json!(report.paths))?;
            Ok(Status::Found)
        }
    }
}
