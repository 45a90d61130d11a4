pub mod parallel;

use anyhow::bail;
use glob::glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expand file paths and glob patterns into CSS files, in the order given.
/// A file matched twice is kept once.
pub fn collect_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        if Path::new(pattern).is_file() {
            let path = PathBuf::from(pattern);
            if seen.insert(path.clone()) {
                files.push(path);
            }
            continue;
        }

        let mut matched = 0usize;
        for entry in glob(pattern)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        if matched == 0 {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
    }

    if files.is_empty() {
        bail!("no input files");
    }
    Ok(files)
}
