//! Batch extraction over JSON-lines records.
//!
//! Records are processed in parallel with rayon; output order matches input.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use crate::compose::{display_artists, display_title, file_name};
use crate::extract::extract;
use crate::models::{TrackInput, TrackOutput};
use crate::progress::{create_progress_bar, log_progress};

/// Progress log interval in log-only mode.
const LOG_INTERVAL: u64 = 10_000;

/// Options shared by single and batch runs.
#[derive(Clone, Debug)]
pub struct OutputOptions {
    pub ext: String,
    pub ascii_filenames: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            ext: "mp3".to_string(),
            ascii_filenames: false,
        }
    }
}

/// Summary counters for a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub records: usize,
    pub skipped_lines: usize,
    pub uploader_fallbacks: usize,
    pub remixes: usize,
}

/// Extract and compose one record.
pub fn process_record(input: &TrackInput, options: &OutputOptions) -> TrackOutput {
    let result = extract(&input.title, &input.username);
    TrackOutput {
        source_title: input.title.clone(),
        username: input.username.clone(),
        display_title: display_title(&result),
        display_artists: display_artists(&result),
        file_name: file_name(&result, &options.ext, options.ascii_filenames),
        result,
    }
}

/// Parse JSON-lines input. Blank lines are ignored; malformed lines are
/// logged and counted, not fatal.
pub fn read_records<R: BufRead>(reader: R) -> Result<(Vec<TrackInput>, usize)> {
    let mut records = Vec::new();
    let mut skipped = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read input line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TrackInput>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "skipping malformed record");
                skipped += 1;
            }
        }
    }
    Ok((records, skipped))
}

/// Run the pipeline over every record in parallel.
pub fn process_records(records: &[TrackInput], options: &OutputOptions) -> (Vec<TrackOutput>, BatchStats) {
    let total = records.len() as u64;
    let pb = create_progress_bar(total, "Extracting credits");
    let done = AtomicU64::new(0);

    let outputs: Vec<TrackOutput> = records
        .par_iter()
        .map(|record| {
            let output = process_record(record, options);
            let current = done.fetch_add(1, Ordering::Relaxed) + 1;
            pb.inc(1);
            log_progress("extract", current, total, LOG_INTERVAL);
            output
        })
        .collect();
    pb.finish_and_clear();

    let stats = BatchStats {
        records: outputs.len(),
        skipped_lines: 0,
        uploader_fallbacks: outputs.iter().filter(|o| o.result.uploader_fallback).count(),
        remixes: outputs
            .iter()
            .filter(|o| o.result.remix_type().is_some())
            .count(),
    };
    (outputs, stats)
}

/// Write outputs as JSON lines.
pub fn write_records<W: Write>(mut writer: W, outputs: &[TrackOutput]) -> Result<()> {
    for output in outputs {
        serde_json::to_writer(&mut writer, output).context("Failed to serialize record")?;
        writer.write_all(b"\n").context("Failed to write record")?;
    }
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
