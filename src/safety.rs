//! Safety checks run before a batch writes its output file.
//!
//! A batch overwrites its output unconditionally, so the path is checked
//! against the inputs first.

use anyhow::{bail, Result};
use std::path::Path;

/// Extensions a batch output may carry.
const OUTPUT_EXTENSIONS: &[&str] = &["jsonl", "json"];

/// Validates that an output path is safe to overwrite.
///
/// Checks:
/// - Output must end in `.jsonl` or `.json`
/// - Output must not be an existing directory
/// - Output cannot be the same as any of the provided source paths
pub fn validate_output_path(output: &Path, source_paths: &[&Path]) -> Result<()> {
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !OUTPUT_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "Safety check failed: output file '{}' must end in .jsonl or .json",
            output.display()
        );
    }

    if output.is_dir() {
        bail!(
            "Safety check failed: output '{}' is a directory",
            output.display()
        );
    }

    for source in source_paths {
        if output == *source || same_file(output, source) {
            bail!(
                "Safety check failed: output '{}' cannot be the same as source '{}'",
                output.display(),
                source.display()
            );
        }
    }

    Ok(())
}

/// Both paths resolve to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
