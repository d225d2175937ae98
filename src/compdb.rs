//! Compilation database loading and entry matching.
//!
//! A `compile_commands.json` indexes translation units only, so headers are
//! matched through a chain of fallbacks: exact path, basename, a source that
//! textually includes the header, a source in the same directory, and finally
//! whatever entry comes first.

use crate::{AppError, AppResult};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

pub const DATABASE_FILE_NAME: &str = "compile_commands.json";

/// Extensions treated as headers.
pub const HEADER_EXTENSIONS: [&str; 5] = ["h", "hh", "hpp", "hxx", "h++"];

/// One entry of a compilation database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompileCommand {
    /// Working directory of the original compile.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Translation unit this entry compiles.
    #[serde(default)]
    pub file: PathBuf,
    #[serde(default)]
    pub arguments: Option<Vec<String>>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl CompileCommand {
    fn has_file(&self) -> bool {
        !self.file.as_os_str().is_empty()
    }

    /// Reads the translation unit's contents, trying the path relative to
    /// `directory` first and then as written. Unreadable sources yield `None`.
    fn read_source(&self) -> Option<String> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(dir) = self.directory.as_ref().filter(|_| self.file.is_relative()) {
            candidates.push(dir.join(&self.file));
        }
        candidates.push(self.file.clone());

        candidates.into_iter().find_map(|path| match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                trace!(path = %path.display(), %err, "skipping unreadable source");
                None
            }
        })
    }

    fn includes_header(&self, header_name: &str) -> bool {
        let quoted = format!("#include \"{}\"", header_name);
        let angled = format!("#include <{}>", header_name);
        self.read_source()
            .is_some_and(|content| content.contains(&quoted) || content.contains(&angled))
    }
}

/// Loads `compile_commands.json` from `build_dir`.
///
/// A missing file is not an error: the result is simply empty and callers
/// decide what "no database" means for them. Malformed JSON is fatal.
pub fn load_compile_commands(build_dir: &Path) -> AppResult<Vec<CompileCommand>> {
    let path = build_dir.join(DATABASE_FILE_NAME);
    if !path.exists() {
        debug!(path = %path.display(), "compilation database not present");
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entries: Vec<CompileCommand> =
        serde_json::from_str(&raw).map_err(|source| AppError::Database {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), entries = entries.len(), "loaded compilation database");
    Ok(entries)
}

/// Whether `path` has one of the [`HEADER_EXTENSIONS`].
pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

/// Resolves `path` to an absolute path without failing: canonical when the
/// path exists, otherwise joined onto the current directory and normalised.
pub fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Picks the entry whose flags should be used to analyze `target`.
pub fn find_entry_for_file<'a>(
    entries: &'a [CompileCommand],
    target: &Path,
) -> Option<&'a CompileCommand> {
    let target_abs = absolute(target);
    if let Some(entry) = entries
        .iter()
        .find(|e| e.has_file() && absolute(&e.file) == target_abs)
    {
        debug!(file = %entry.file.display(), "exact match");
        return Some(entry);
    }

    let target_name = target.file_name();
    if let Some(entry) = entries
        .iter()
        .find(|e| target_name.is_some() && e.file.file_name() == target_name)
    {
        debug!(file = %entry.file.display(), "basename match");
        return Some(entry);
    }

    if !is_header(target) {
        return None;
    }

    if let Some(header_name) = target_name.map(|n| n.to_string_lossy()) {
        if let Some(entry) = entries.iter().find(|e| e.includes_header(&header_name)) {
            debug!(file = %entry.file.display(), header = %header_name, "source includes header");
            return Some(entry);
        }
    }

    if let Some(entry) = entries.iter().find(|e| e.file.parent() == target.parent()) {
        debug!(file = %entry.file.display(), "same-directory fallback");
        return Some(entry);
    }

    let first = entries.first();
    if let Some(entry) = first {
        debug!(file = %entry.file.display(), "first-entry fallback");
    }
    first
}
