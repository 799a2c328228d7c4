use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jellyfish::api::{classify_columns, DEFAULT_BASE_URL, DEFAULT_LAYER};
use rustyline::DefaultEditor;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod fetch;
mod offsets;
mod provenance;
mod table;
mod terminal;

use fetch::CutoutFetcher;
use provenance::Payload;
use table::Columns;
use terminal::TerminalClassifier;

#[derive(Parser)]
#[command(name = "jellyfish-cli")]
#[command(about = "Classify jellyfish galaxies and measure tail offsets from the BCG")]
struct Cmd {
    /// Classifier initials; suffix of every derived column
    #[arg(long, default_value = "JC")]
    initials: String,

    #[command(flatten)]
    columns: ColumnArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct ColumnArgs {
    #[arg(long, default_value = "RA")]
    ra_col: String,
    #[arg(long, default_value = "Dec")]
    dec_col: String,
    #[arg(long, default_value = "BCGRA")]
    bcg_ra_col: String,
    #[arg(long, default_value = "BCGDec")]
    bcg_dec_col: String,
}

#[derive(Subcommand)]
enum Action {
    /// Classify every galaxy of a CSV table interactively
    Classify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, default_value = DEFAULT_LAYER)]
        layer: String,
        /// Where fetched cutouts are saved for viewing
        #[arg(long, default_value = "cutouts")]
        cutout_dir: PathBuf,
    },
    /// Append BCG bearing and tail offset columns to a classified table
    Offsets {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the tail alignment histogram of a post-processed table as JSON
    Figure {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    let cols = Columns {
        ra: cmd.columns.ra_col,
        dec: cmd.columns.dec_col,
        bcg_ra: cmd.columns.bcg_ra_col,
        bcg_dec: cmd.columns.bcg_dec_col,
        initials: cmd.initials,
    };
    match cmd.action {
        Action::Classify {
            input,
            out,
            base_url,
            layer,
            cutout_dir,
        } => classify(&cols, &input, &out, base_url, layer, cutout_dir),
        Action::Offsets { input, out } => offsets(&cols, &input, &out),
        Action::Figure { from, out } => figure(&cols, &from, &out),
        Action::Report => report(&cols),
    }
}

fn classify(
    cols: &Columns,
    input: &Path,
    out: &Path,
    base_url: String,
    layer: String,
    cutout_dir: PathBuf,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), layer, "classify");
    let mut df = table::read_csv(input)?;
    let ra = table::f64_column(&df, &cols.ra)?;
    let dec = table::f64_column(&df, &cols.dec)?;
    table::ensure_absent(&df, &cols.classification_outputs())?;

    let fetcher = CutoutFetcher::new(base_url.as_str(), cutout_dir)?;
    println!("Cutouts are saved under {}", fetcher.cache_dir().display());
    let editor = DefaultEditor::new().context("initializing terminal prompt")?;
    let mut classifier = TerminalClassifier::new(editor, fetcher, layer.as_str(), ra.len());
    println!(
        "Classifying {} galaxies. Results stay in memory until exported at the end.",
        ra.len()
    );
    let results = classify_columns(&ra, &dec, &mut classifier)
        .context("classification stopped; results of this session were discarded")?;
    table::append_classifications(&mut df, &results, cols)?;

    if !classifier.confirm_export(&out.display().to_string())? {
        tracing::warn!(
            rows = results.len(),
            "classifications were not exported and are lost when this process exits"
        );
        return Ok(());
    }
    table::write_csv(&mut df, out)?;
    provenance::write_sidecar(
        out,
        Payload::new(json!({
            "input": input,
            "base_url": base_url,
            "layer": layer,
        }))
        .classifier(&cols.initials)
        .rows(results.len()),
    )?;
    Ok(())
}

fn offsets(cols: &Columns, input: &Path, out: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "offsets");
    let mut df = table::read_csv(input)?;
    let derived = offsets::compute(&df, cols)?;
    offsets::append(&mut df, cols, &derived)?;
    table::write_csv(&mut df, out)?;
    provenance::write_sidecar(
        out,
        Payload::new(json!({
            "input": input,
            "bcg_columns": [cols.bcg_ra, cols.bcg_dec],
        }))
        .classifier(&cols.initials)
        .rows(df.height()),
    )?;
    if let Some(hist) = &derived.histogram {
        offsets::print_histogram(hist);
    }
    Ok(())
}

#[derive(Serialize)]
struct HistogramArtifact {
    quantity: &'static str,
    edges: Vec<f64>,
    counts: Vec<usize>,
    undefined: usize,
}

fn figure(cols: &Columns, from: &Path, out: &Path) -> Result<()> {
    tracing::info!(from = %from.display(), out = %out.display(), "figure");
    let df = table::read_csv(from)?;
    let hist = offsets::histogram_from_table(&df, cols)?;
    offsets::print_histogram(&hist);
    let artifact = HistogramArtifact {
        quantity: "tail_offset_from_bcg_deg",
        edges: hist.edges,
        counts: hist.counts,
        undefined: hist.undefined,
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&artifact)?)
        .with_context(|| format!("writing {}", out.display()))?;
    provenance::write_sidecar(
        out,
        Payload::new(json!({ "from": from })).classifier(&cols.initials),
    )?;
    Ok(())
}

fn report(cols: &Columns) -> Result<()> {
    let payload = Payload::new(json!({
        "columns": {
            "ra": cols.ra,
            "dec": cols.dec,
            "bcg_ra": cols.bcg_ra,
            "bcg_dec": cols.bcg_dec,
        }
    }))
    .classifier(&cols.initials);
    println!("{}", provenance::report(payload)?);
    Ok(())
}
