//! sheetmap - Extract JSON from spreadsheet reports using a cell mapping schema

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sheetmap_core::storage::{SourceFormat, sheet_names};
use sheetmap_core::{Config, Report, load_config, load_schema};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetmap")]
#[command(
    author,
    version,
    about = "Extract JSON from spreadsheet reports using a cell mapping schema"
)]
struct Cli {
    /// Config file (default: config.toml in the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract values from a spreadsheet and print them as JSON
    Extract {
        /// Input spreadsheet (csv, tsv, xlsx, xlsm, xlsb, xls, ods)
        input: PathBuf,

        /// Mapping schema (JSON); defaults to `schema` from the config file
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Workbook sheet to read (default: the first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check that every notation in a mapping schema resolves
    Check {
        /// Mapping schema (JSON); defaults to `schema` from the config file
        schema: Option<PathBuf>,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Extract {
            input,
            schema,
            sheet,
            output,
            pretty,
        } => extract(
            &config,
            &input,
            schema.as_deref(),
            sheet,
            output.as_deref(),
            pretty || config.pretty,
        ),
        Commands::Check { schema } => check(&config, schema.as_deref()),
        Commands::Sheets { input } => list_sheets(&config, &input),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn schema_path<'a>(config: &'a Config, schema: Option<&'a Path>) -> Result<&'a Path> {
    match schema.or(config.schema.as_deref()) {
        Some(path) => Ok(path),
        None => bail!("No mapping schema given (use --schema or set `schema` in the config file)"),
    }
}

fn extract(
    config: &Config,
    input: &Path,
    schema: Option<&Path>,
    sheet: Option<String>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let schema = schema_path(config, schema)?;
    log::debug!("using schema {}", schema.display());
    let mut options = config.load_options();
    if sheet.is_some() {
        options.sheet = sheet;
    }

    let report = Report::open(input, schema, &options)
        .with_context(|| format!("Failed to load '{}'", input.display()))?;
    let extraction = report
        .extract()
        .with_context(|| format!("Failed to extract '{}'", input.display()))?;

    let mut json = if pretty {
        serde_json::to_string_pretty(&extraction)?
    } else {
        serde_json::to_string(&extraction)?
    };
    json.push('\n');

    if let Some(output_path) = output {
        std::fs::write(output_path, &json)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        io::stdout()
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn check(config: &Config, schema: Option<&Path>) -> Result<()> {
    let path = schema_path(config, schema)?;
    let plan = load_schema(path, config.max_file_bytes)?
        .compile()
        .with_context(|| format!("Invalid mapping in '{}'", path.display()))?;

    println!(
        "{}: {} cells, {} ranges, {} repeat groups",
        path.display(),
        plan.cells.len(),
        plan.ranges.len(),
        plan.groups.len()
    );
    Ok(())
}

fn list_sheets(config: &Config, input: &Path) -> Result<()> {
    if SourceFormat::from_path(input)? != SourceFormat::Workbook {
        bail!("'{}' is not a workbook", input.display());
    }
    let names = sheet_names(input, config.max_file_bytes)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in names.iter().enumerate() {
        println!("{}: {}", i, name);
    }
    Ok(())
}
