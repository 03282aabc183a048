use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use credit_extract::batch::{process_record, process_records, read_records, write_records, OutputOptions};
use credit_extract::models::TrackInput;
use credit_extract::progress::{format_duration, set_log_only};
use credit_extract::safety::validate_output_path;

#[derive(Parser)]
#[command(name = "credit-extract")]
#[command(about = "Extract title and role-annotated artist credits from upload titles")]
struct Args {
    /// Raw upload title to extract from (single-title mode)
    title: Option<String>,

    /// Uploader name, used when the title names no artist
    #[arg(long, default_value = "")]
    user: String,

    /// JSON-lines input with {"title", "username"} records (batch mode)
    #[arg(long, requires = "output")]
    input: Option<PathBuf>,

    /// JSON-lines output path (batch mode)
    #[arg(long, requires = "input")]
    output: Option<PathBuf>,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide progress bars and log progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Extension for composed file names
    #[arg(long, default_value = "mp3")]
    ext: String,

    /// Transliterate composed file names to ASCII
    #[arg(long)]
    ascii_filenames: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let options = OutputOptions {
        ext: args.ext.clone(),
        ascii_filenames: args.ascii_filenames,
    };

    match (&args.title, &args.input, &args.output) {
        (Some(title), None, None) => run_single(title, &args.user, &options),
        (None, Some(input), Some(output)) => run_batch(input, output, &options),
        _ => bail!("Pass either a TITLE or both --input and --output"),
    }
}

fn run_single(title: &str, user: &str, options: &OutputOptions) -> Result<()> {
    let record = TrackInput {
        title: title.to_string(),
        username: user.to_string(),
    };
    let output = process_record(&record, options);
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn run_batch(input: &Path, output: &Path, options: &OutputOptions) -> Result<()> {
    validate_output_path(output, &[input])?;
    let start = Instant::now();

    info!("Reading records: {:?}", input);
    let file = File::open(input).with_context(|| format!("Failed to open {:?}", input))?;
    let (records, skipped) = read_records(BufReader::new(file))?;
    info!("Loaded {} records ({} malformed lines skipped)", records.len(), skipped);

    let (outputs, mut stats) = process_records(&records, options);
    stats.skipped_lines = skipped;

    info!("Writing output: {:?}", output);
    let file = File::create(output).with_context(|| format!("Failed to create {:?}", output))?;
    write_records(BufWriter::new(file), &outputs)?;

    info!("{:=<60}", "");
    info!("Extraction complete!");
    info!("  Records: {}", stats.records);
    info!("  Skipped lines: {}", stats.skipped_lines);
    info!("  Uploader fallbacks: {}", stats.uploader_fallbacks);
    info!("  Remix credits: {}", stats.remixes);
    info!("  Elapsed: {}", format_duration(start.elapsed()));
    info!("{:=<60}", "");

    Ok(())
}
