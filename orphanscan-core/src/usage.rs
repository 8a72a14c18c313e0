//! Reference detection: does any other corpus file mention a candidate by name?
//!
//! A candidate counts as referenced when its base filename (extension
//! stripped) appears in another corpus file as a whole word, compared
//! case-insensitively. `Tab` is found in `<Tab />` or `"tab"`, but not in
//! `TabBarIcon`.
//!
//! Files that cannot be read are treated as containing no match. Invalid
//! UTF-8 is replaced rather than rejected.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ScanError, ScanResult};
use crate::scan::Candidate;

/// Case-insensitive whole-word pattern for one candidate name.
#[derive(Debug, Clone)]
pub struct UsagePattern {
    key: String,
    regex: Regex,
}

impl UsagePattern {
    /// Compiles `\b<key>\b` with regex metacharacters in `key` escaped.
    pub fn new(key: &str) -> ScanResult<Self> {
        let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(key)))
            .case_insensitive(true)
            .build()
            .map_err(|e| ScanError::pattern(key, e.to_string()))?;

        Ok(Self {
            key: key.to_string(),
            regex,
        })
    }

    /// Pattern for a candidate's name without extension.
    pub fn for_candidate(candidate: &Candidate) -> ScanResult<Self> {
        Self::new(&candidate.name_no_ext())
    }

    /// The literal name being searched for.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Reads a file as text, replacing invalid UTF-8. `None` if the read fails.
pub fn read_lossy(path: &Path) -> Option<String> {
    fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Absolute form of a path without resolving symlinks; the path itself if that fails.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Checks whether any corpus file other than `own_path` matches `pattern`.
///
/// Stops at the first matching file. Read failures count as no match.
pub fn is_referenced_by(
    pattern: &UsagePattern,
    own_path: &Path,
    corpus: &BTreeSet<PathBuf>,
) -> bool {
    let own = absolute(own_path);

    corpus
        .iter()
        .filter(|file| absolute(file) != own)
        .any(|file| read_lossy(file).is_some_and(|content| pattern.is_match(&content)))
}

/// Checks whether `candidate` is referenced anywhere else in the corpus.
///
/// Fails only if the candidate's name cannot be compiled into a pattern.
pub fn is_referenced(candidate: &Candidate, corpus: &BTreeSet<PathBuf>) -> ScanResult<bool> {
    let pattern = UsagePattern::for_candidate(candidate)?;
    Ok(is_referenced_by(&pattern, &candidate.path, corpus))
}
