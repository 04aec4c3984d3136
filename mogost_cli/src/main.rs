use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mogost_common::{load_config, load_config_from, DiffKind};
use mogost_core::csv_view::DEFAULT_PREVIEW_ROWS;
use mogost_core::{CsvViewer, DiffRecord, TextDiffEngine};
use mogost_server::MogostServer;
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mogost")]
#[command(author = "Mogost Toolkit Contributors")]
#[command(version)]
#[command(about = "File comparison and CSV preview toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind, overrides the config file
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Path to a mogost.toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Look for the config file next to the binary
        #[arg(long)]
        portable: bool,
    },

    /// Compare two text files line by line
    Diff {
        /// Left (original) file
        left: PathBuf,

        /// Right (modified) file
        right: PathBuf,

        /// Output the comparison as JSON
        #[arg(long)]
        json: bool,

        /// Output the character-level HTML rendering
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Disable ANSI colors in output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the contents of a CSV file
    Csv {
        /// CSV file path
        file: PathBuf,

        /// Show only the header and the first rows
        #[arg(short, long)]
        preview: bool,

        /// Number of data rows shown in preview mode
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: usize,

        /// Output the view as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing to stderr (so JSON output can go cleanly to stdout)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            bind,
            config,
            portable,
        } => run_serve(bind, config, portable),
        Commands::Diff {
            left,
            right,
            json,
            html,
            no_color,
        } => run_diff(&left, &right, json, html, no_color),
        Commands::Csv {
            file,
            preview,
            rows,
            json,
        } => run_csv(&file, preview, rows, json),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run_serve(bind: Option<SocketAddr>, config_path: Option<PathBuf>, portable: bool) -> Result<()> {
    let loaded = match config_path {
        Some(path) => load_config_from(&path)?,
        None => load_config(portable)?,
    };

    if loaded.exists {
        info!("Loaded config from {}", loaded.path.display());
    } else {
        info!("No config at {}, using defaults", loaded.path.display());
    }

    let mut config = loaded.config.server;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(MogostServer::new(config).serve())?;
    Ok(())
}

fn run_diff(left: &Path, right: &Path, json: bool, html: bool, no_color: bool) -> Result<()> {
    info!("Comparing:");
    info!("  Left:  {}", left.display());
    info!("  Right: {}", right.display());

    let engine = TextDiffEngine::new();
    let comparison = engine
        .compare_files(left, right)
        .with_context(|| format!("failed to compare {} and {}", left.display(), right.display()))?;

    if html {
        println!("{}", comparison.diff_html);
        return Ok(());
    }

    if json {
        let report = comparison.into_report(&display_name(left), &display_name(right));
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let use_color = !no_color && std::io::stdout().is_terminal();
    let stats = comparison.stats();

    println!("\n{}", "=".repeat(80));
    println!("Line Comparison: {} vs {}", left.display(), right.display());
    println!("{}", "=".repeat(80));

    for record in &comparison.diff_lines {
        println!("{}", format_record(record, use_color));
    }

    println!("\n{}", "=".repeat(80));
    println!("Summary:");
    println!("  Lines (left):    {}", comparison.lines1.len());
    println!("  Lines (right):   {}", comparison.lines2.len());
    println!("  Equal:           {}", stats.equal);
    println!("  Deleted:         {}", stats.delete);
    println!("  Inserted:        {}", stats.insert);
    println!("{}", "=".repeat(80));

    Ok(())
}

fn run_csv(file: &Path, preview: bool, rows: usize, json: bool) -> Result<()> {
    let view = CsvViewer::new()
        .with_preview_rows(rows)
        .view_file(file, preview)
        .with_context(|| format!("failed to read {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("CSV: {}", view.file_name);
    println!("{}", "=".repeat(80));

    for row in &view.preview_rows {
        println!("{}", row.join(" | "));
    }

    println!("\n{}", "=".repeat(80));
    println!("Summary:");
    println!("  Rows:            {}", view.total_rows);
    println!("  Columns:         {}", view.total_columns);
    if preview {
        println!("  Shown:           {}", view.preview_rows.len().saturating_sub(1));
    }
    println!("{}", "=".repeat(80));

    Ok(())
}

/// One side-by-side listing row: left number, right number, marker, text
fn format_record(record: &DiffRecord, use_color: bool) -> String {
    let number = |n: Option<usize>| n.map(|n| n.to_string()).unwrap_or_default();

    let (marker, color, text) = match record.kind() {
        DiffKind::Equal => (' ', "", record.text_a()),
        DiffKind::Delete => ('-', "\x1b[31m", record.text_a()), // Red
        DiffKind::Insert => ('+', "\x1b[32m", record.text_b()), // Green
    };

    let (color, reset) = if use_color && !color.is_empty() {
        (color, "\x1b[0m")
    } else {
        ("", "")
    };

    format!(
        "{:>6} {:>6} {}{} {}{}",
        number(record.line_num_a()),
        number(record.line_num_b()),
        color,
        marker,
        text.unwrap_or_default(),
        reset
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
