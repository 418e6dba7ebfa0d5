//! Knowledge directory scanner.
//!
//! Walks the configured directory and yields one [`KnowledgeDoc`] per
//! matching UTF-8 text file. The file stem becomes the document name, which
//! is both the identity for idempotent re-ingestion and the input for
//! destination tag inference. Results are sorted by name for deterministic
//! ingestion order.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A source document read from disk, before chunking.
#[derive(Debug, Clone)]
pub struct KnowledgeDoc {
    pub name: String,
    pub path: PathBuf,
    pub body: String,
}

/// Scan `dir` for documents matching the include/exclude globs.
///
/// An absent directory yields an empty list (the caller seeds defaults in
/// that case) rather than an error. Files that are not valid UTF-8 are
/// skipped with a warning.
pub fn scan_knowledge_dir(
    dir: &Path,
    include_globs: &[String],
    exclude_globs: &[String],
) -> Result<Vec<KnowledgeDoc>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let include_set = build_globset(include_globs)?;
    let exclude_set = build_globset(exclude_globs)?;

    let mut docs = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        let body = match std::fs::read_to_string(path) {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable document");
                continue;
            }
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| rel_str.clone());

        docs.push(KnowledgeDoc {
            name,
            path: path.to_path_buf(),
            body,
        });
    }

    docs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(docs)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
