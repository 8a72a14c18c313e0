//! Deterministic file discovery with directory pruning.
//!
//! Two walks are made over the project:
//! - the candidate walk yields source files that may be unused
//! - the corpus walk yields every file that may reference a candidate
//!
//! Missing directories are skipped, as are entries that cannot be read.
//! Subtrees are pruned via `WalkDir::filter_entry` before iteration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::{
    ScanConfig, CANDIDATE_EXTENSIONS, CORPUS_EXTENSIONS, DEPENDENCY_MARKER, TESTS_MARKER,
    TEST_FILE_MARKERS,
};

/// A source file considered for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path on disk (project root joined)
    pub path: PathBuf,
    /// Path relative to the project root, `/` separated
    pub relative: String,
}

impl Candidate {
    /// Base filename with its last extension stripped; the key searched for in the corpus.
    pub fn name_no_ext(&self) -> String {
        self.path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Path of `path` relative to `root`, with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Checks if a directory entry should be pruned because its relative path contains `marker`.
#[inline]
fn is_pruned_dir(entry: &DirEntry, root: &Path, marker: &str) -> bool {
    entry.file_type().is_dir() && relative_path(root, entry.path()).contains(marker)
}

/// Walks `root/dir` and yields regular files, skipping pruned subtrees.
///
/// Within a directory, files come before subdirectories and both are
/// ordered by name.
fn walk_files<'a>(
    root: &'a Path,
    dir: &str,
    pruned_marker: &'a str,
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root.join(dir))
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(move |e| !is_pruned_dir(e, root, pruned_marker))
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.contains(&ext))
}

/// Checks whether a file name passes the candidate filters.
pub fn is_candidate_file(file_name: &str, config: &ScanConfig) -> bool {
    !file_name.starts_with('.')
        && !config.is_ignored_candidate_file(file_name)
        && !TEST_FILE_MARKERS.iter().any(|m| file_name.contains(*m))
        && has_extension(Path::new(file_name), CANDIDATE_EXTENSIONS)
}

/// Checks whether a file name passes the corpus filters.
pub fn is_corpus_file(file_name: &str, config: &ScanConfig) -> bool {
    !file_name.starts_with('.')
        && !config.is_ignored_search_file(file_name)
        && has_extension(Path::new(file_name), CORPUS_EXTENSIONS)
}

/// Collects deletion candidates from the configured candidate directories.
///
/// Candidates whose name matches an ignore pattern are dropped. Order is the
/// walk order of each directory, directories in configured order.
pub fn collect_candidates(root: &Path, config: &ScanConfig) -> Vec<Candidate> {
    let mut out = Vec::new();

    for dir in &config.candidate_dirs {
        if !root.join(dir).exists() {
            continue;
        }

        for entry in walk_files(root, dir, TESTS_MARKER) {
            let file_name = entry.file_name().to_string_lossy();
            if !is_candidate_file(&file_name, config) {
                continue;
            }

            let candidate = Candidate {
                path: entry.path().to_path_buf(),
                relative: relative_path(root, entry.path()),
            };
            if config.is_ignored_name(&candidate.name_no_ext()) {
                continue;
            }
            out.push(candidate);
        }
    }

    out
}

/// Builds the set of files searched for references.
///
/// Root files are included whenever they exist, regardless of extension.
/// A search directory of `.` is skipped; the root is covered by the root files.
pub fn build_corpus(root: &Path, config: &ScanConfig) -> BTreeSet<PathBuf> {
    let mut corpus: BTreeSet<PathBuf> = config
        .root_files
        .iter()
        .map(|f| root.join(f))
        .filter(|p| p.exists())
        .collect();

    for dir in &config.search_dirs {
        if dir == "." || !root.join(dir).exists() {
            continue;
        }

        corpus.extend(
            walk_files(root, dir, DEPENDENCY_MARKER)
                .filter(|e| is_corpus_file(&e.file_name().to_string_lossy(), config))
                .map(|e| e.into_path()),
        );
    }

    corpus
}
