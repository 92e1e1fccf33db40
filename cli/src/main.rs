mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mounttab_core::{Table, WELL_KNOWN_MOUNT_FLAGS, decode_options};
use mounttab_source::{ParserConfig, TableSource, load_table, read_table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, format_options, format_row, format_rows};

#[derive(Debug, Parser)]
#[command(name = "mounttab")]
#[command(about = "Inspect fstab-style mount tables")]
#[command(version)]
struct Cli {
    /// Log parser progress to stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a table and print every row.
    Parse(ParseArgs),
    /// Print the row owning a key (the mount point, for fstab).
    Lookup(LookupArgs),
    /// Decode a single option list.
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Table file to read (stdin when omitted).
    #[arg(long)]
    input: Option<PathBuf>,
    /// YAML parser configuration (defaults to /etc/fstab layout).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct LookupArgs {
    /// Key column value to look up.
    key: String,
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct OptionsArgs {
    /// Comma-separated option list, e.g. "rw,nfsvers=3".
    options: String,
    /// Do not add the well-known mount flags.
    #[arg(long)]
    no_defaults: bool,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Lookup(args) => run_lookup(args),
        Command::Options(args) => run_options(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "mounttab_core=debug,mounttab_source=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let table = load_input(&args.input)?;
    emit(&format_rows(table.rows(), args.input.format)?);
    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<(), String> {
    let table = load_input(&args.input)?;
    let Some(column) = table.key_column() else {
        return Err("configuration has no key column".to_string());
    };
    let row = table
        .get(&args.key)
        .ok_or_else(|| format!("no row with {column} '{}'", args.key))?;
    emit(&format_row(row, args.input.format)?);
    Ok(())
}

fn run_options(args: OptionsArgs) -> Result<(), String> {
    let mut options = decode_options(&args.options);
    if !args.no_defaults {
        options = options.with_defaults(WELL_KNOWN_MOUNT_FLAGS);
    }
    emit(&format_options(&options, args.format)?);
    Ok(())
}

fn emit(out: &str) {
    if out.is_empty() || out.ends_with('\n') {
        print!("{out}");
    } else {
        println!("{out}");
    }
}

fn load_input(args: &InputArgs) -> Result<Table, String> {
    let config = match &args.config {
        Some(path) => ParserConfig::load(path).map_err(|e| e.to_string())?,
        None => ParserConfig::fstab(),
    };

    match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "Loading table");
            load_table(&TableSource::file(path), &config).map_err(|e| e.to_string())
        }
        None => read_table(std::io::stdin().lock(), &config).map_err(|e| e.to_string()),
    }
}
