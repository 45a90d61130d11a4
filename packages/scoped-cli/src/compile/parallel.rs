use anyhow::Context;
use rayon::prelude::*;
use single_spa_scoped::Scoper;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One scoped style sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedFile {
    pub path: PathBuf,
    pub css: String,
}

/// Read and scope one file.
pub fn scope_file(path: &Path, scoper: &Scoper) -> anyhow::Result<ScopedFile> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file = path.to_string_lossy();
    let css = scoper.process_css(&source, Some(file.as_ref()))?;
    Ok(ScopedFile {
        path: path.to_path_buf(),
        css,
    })
}

/// Scope `files` on the rayon pool. Every file is its own run; results come
/// back in input order.
pub fn parallel_scope(files: &[PathBuf], scoper: &Scoper) -> Vec<anyhow::Result<ScopedFile>> {
    let start = Instant::now();
    tracing::info!("Scoping {} files in parallel...", files.len());

    let results: Vec<_> = files
        .par_iter()
        .map(|path| scope_file(path, scoper))
        .collect();

    tracing::info!("Scoping finished in {:?}", start.elapsed());
    results
}

/// Deepest directory containing every input; empty when the inputs share
/// no leading component.
fn common_base(files: &[ScopedFile]) -> Option<PathBuf> {
    let mut base: Option<PathBuf> = None;
    for file in files {
        let dir = file.path.parent().unwrap_or(Path::new(""));
        base = Some(match base {
            None => dir.to_path_buf(),
            Some(current) => current
                .components()
                .zip(dir.components())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }
    base.filter(|base| files.iter().all(|file| file.path.starts_with(base)))
}

/// Write each file into `out_dir`, keeping its path relative to the
/// directory all inputs share. Two inputs that would land on the same
/// output path are an error.
pub fn write_outputs(files: &[ScopedFile], out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let base = common_base(files);
    let mut destinations = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for file in files {
        let relative = base
            .as_deref()
            .and_then(|base| file.path.strip_prefix(base).ok())
            .filter(|relative| relative.is_relative() && relative.file_name().is_some());
        let relative = match relative {
            Some(relative) => relative,
            None => match file.path.file_name() {
                Some(name) => Path::new(name),
                None => anyhow::bail!("{} has no file name", file.path.display()),
            },
        };
        let dest = out_dir.join(relative);
        if !seen.insert(dest.clone()) {
            anyhow::bail!(
                "{} would overwrite another output at {}",
                file.path.display(),
                dest.display()
            );
        }
        destinations.push(dest);
    }

    for (file, dest) in files.iter().zip(&destinations) {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(dest, &file.css).with_context(|| format!("failed to write {}", dest.display()))?;
        tracing::debug!(from = %file.path.display(), to = %dest.display(), "wrote scoped css");
    }
    Ok(destinations)
}
