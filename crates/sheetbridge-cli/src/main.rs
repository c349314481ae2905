//! sheetbridge CLI - keep DOCX tables in step with spreadsheet ranges

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sheetbridge::config::{RangeSpec, RecordId, SourceLocation, SyncMode, TableFont};
use sheetbridge::prelude::*;
use sheetbridge::{JobSummary, StoredRecord};
use sheetbridge_xlsx::XlsxReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetbridge")]
#[command(
    author,
    version,
    about = "Synchronize spreadsheet ranges into tables of DOCX documents"
)]
struct Cli {
    /// Configuration store (JSON)
    #[arg(long, global = true, default_value = "sheetbridge.json")]
    store: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every stored job
    Run,

    /// Run one stored job
    Sync {
        /// Job id, as shown by `config list`
        id: RecordId,
    },

    /// Run one stored job, inserting a new table after its anchor
    Build {
        /// Job id, as shown by `config list`
        id: RecordId,
    },

    /// Print the range detected from a start cell of a local workbook
    Detect {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Sheet name
        #[arg(short, long)]
        sheet: String,

        /// Start cell, e.g. B2
        #[arg(long, default_value = "A1")]
        start: String,
    },

    /// Manage stored jobs
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Store a new job and print its id
    Add(RecordArgs),

    /// List stored jobs
    List,

    /// Print one job as JSON
    Show { id: RecordId },

    /// Replace a stored job
    Update {
        id: RecordId,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// Delete a stored job
    Delete { id: RecordId },
}

#[derive(Args)]
struct RecordArgs {
    /// Local XLSX workbook to read
    #[arg(long, conflicts_with = "spreadsheet", required_unless_present = "spreadsheet")]
    workbook: Option<PathBuf>,

    /// Remote spreadsheet id to read
    #[arg(long)]
    spreadsheet: Option<String>,

    /// Sheet name
    #[arg(long)]
    sheet: String,

    /// Range to read, e.g. B2:L14
    #[arg(long, conflicts_with = "detect_from", required_unless_present = "detect_from")]
    range: Option<String>,

    /// Detect the range from this start cell instead (local workbooks only)
    #[arg(long)]
    detect_from: Option<String>,

    /// Document holding the table
    #[arg(long)]
    target: PathBuf,

    /// Text of the paragraph above the table
    #[arg(long)]
    anchor: String,

    /// Save to this path instead of overwriting the target
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma-separated 1-based money columns, e.g. 2,3
    #[arg(long)]
    money_columns: Option<String>,

    /// Header rows left out of money formatting (default 1)
    #[arg(long)]
    header_rows: Option<usize>,

    /// Insert a new table after the anchor instead of rewriting the existing one
    #[arg(long)]
    build: bool,

    /// Copy source cell formats into the table
    #[arg(long)]
    transfer_format: bool,

    /// Font family for every cell of the table
    #[arg(long, requires = "font_size")]
    font_family: Option<String>,

    /// Font size in points for every cell of the table
    #[arg(long, requires = "font_family")]
    font_size: Option<f64>,

    /// Single black borders around and inside the table
    #[arg(long)]
    grid_borders: bool,
}

impl RecordArgs {
    fn into_record(self) -> Result<ConfigurationRecord> {
        let source = match (self.workbook, self.spreadsheet) {
            (Some(path), _) => SourceLocation::Workbook { path },
            (None, Some(spreadsheet_id)) => SourceLocation::Remote { spreadsheet_id },
            (None, None) => bail!("either --workbook or --spreadsheet is required"),
        };
        let range = match (self.range, self.detect_from) {
            (Some(range), _) => RangeSpec::Explicit(range),
            (None, Some(start)) => RangeSpec::DetectFrom(start),
            (None, None) => bail!("either --range or --detect-from is required"),
        };

        let mut record = ConfigurationRecord::new(source, self.sheet, range, self.target, self.anchor);
        record.output = self.output;
        record.money_columns = self.money_columns;
        record.header_rows = self.header_rows;
        record.mode = if self.build {
            SyncMode::Build
        } else {
            SyncMode::Reconcile
        };
        record.transfer_format = self.transfer_format;
        record.table_font = self
            .font_family
            .zip(self.font_size)
            .map(|(family, size)| TableFont { family, size });
        record.grid_borders = self.grid_borders;
        Ok(record)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Run => run_all(&cli.store),
        Commands::Sync { id } => sync_one(&cli.store, id, None),
        Commands::Build { id } => sync_one(&cli.store, id, Some(SyncMode::Build)),
        Commands::Detect {
            input,
            sheet,
            start,
        } => detect(&input, &sheet, &start),
        Commands::Config(command) => config(&cli.store, command),
    }
}

fn open_store(path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(path).with_context(|| format!("Failed to open store '{}'", path.display()))
}

fn run_all(store_path: &Path) -> Result<()> {
    let store = open_store(store_path)?;
    let report = run_batch(&store).context("Failed to read stored jobs")?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(summary) => println!("{}\t{}\t{}", outcome.id, outcome.anchor, describe(summary)),
            Err(err) => {
                log::warn!("job {} ('{}') failed: {}", outcome.id, outcome.anchor, err);
                println!("{}\t{}\tFAILED: {}", outcome.id, outcome.anchor, err);
            }
        }
    }
    log::info!("{} succeeded, {} failed", report.succeeded(), report.failed());

    if report.failed() > 0 {
        bail!("{} of {} jobs failed", report.failed(), report.outcomes.len());
    }
    Ok(())
}

fn sync_one(store_path: &Path, id: RecordId, mode: Option<SyncMode>) -> Result<()> {
    let store = open_store(store_path)?;
    let mut record = store.get(id)?;
    if let Some(mode) = mode {
        record.mode = mode;
    }
    log::debug!("running job {} in {:?} mode", id, record.mode);
    let summary = run_job(&record).with_context(|| format!("Job {} ('{}') failed", id, record.anchor))?;
    log::info!("job {} ('{}') done", id, record.anchor);
    println!("{}", describe(&summary));
    Ok(())
}

fn describe(summary: &JobSummary) -> String {
    let mut text = format!(
        "{}x{} -> {}",
        summary.rows,
        summary.columns,
        summary.output.display()
    );
    if let Some(report) = &summary.reconcile {
        text.push_str(&format!(
            " (+{} -{} rows, {} merged skipped)",
            report.rows_appended, report.rows_removed, report.rows_skipped
        ));
    }
    if let Some(reason) = &summary.degraded {
        text.push_str(&format!(" [placeholders: {}]", reason));
    }
    text
}

fn detect(input: &Path, sheet_name: &str, start: &str) -> Result<()> {
    let start = CellAddress::parse(start).with_context(|| format!("Bad start cell '{}'", start))?;
    let workbook = XlsxReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let sheet = workbook.worksheet_by_name(sheet_name)?;

    println!("{}", detect_range(sheet, start));
    Ok(())
}

fn config(store_path: &Path, command: ConfigCommand) -> Result<()> {
    let mut store = open_store(store_path)?;
    match command {
        ConfigCommand::Add(args) => {
            let id = store.create(args.into_record()?)?;
            println!("{}", id);
        }
        ConfigCommand::List => {
            for StoredRecord { id, record } in store.list()? {
                println!(
                    "{}\t{}\t{}\t{}!{}\t{}",
                    id,
                    record.anchor,
                    source_label(&record.source),
                    record.sheet,
                    range_label(&record.range),
                    record.target.display()
                );
            }
        }
        ConfigCommand::Show { id } => {
            let record = store.get(id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ConfigCommand::Update { id, record } => {
            store.update(id, record.into_record()?)?;
            log::info!("Updated job {}", id);
        }
        ConfigCommand::Delete { id } => {
            store.delete(id)?;
            log::info!("Deleted job {}", id);
        }
    }
    Ok(())
}

fn source_label(source: &SourceLocation) -> String {
    match source {
        SourceLocation::Workbook { path } => path.display().to_string(),
        SourceLocation::Remote { spreadsheet_id } => format!("remote:{}", spreadsheet_id),
    }
}

fn range_label(range: &RangeSpec) -> String {
    match range {
        RangeSpec::Explicit(range) => range.clone(),
        RangeSpec::DetectFrom(start) => format!("{}..", start),
    }
}
