//! Scan settings and configuration loading from orphanscan.toml.
//!
//! [`ScanConfig`] holds the resolved settings a scan runs with. It starts
//! from the built-in defaults and is overlaid with an optional
//! [`OrphanscanConfig`] read from the project root.

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{IoResultExt, ScanError, ScanResult};

/// Name of the optional configuration file in the project root.
pub const CONFIG_FILE: &str = "orphanscan.toml";

/// Default report file, relative to the project root.
pub const DEFAULT_REPORT_FILE: &str = "unused_files.txt";

/// Directories whose files are considered for deletion.
pub const DEFAULT_CANDIDATE_DIRS: &[&str] = &["components", "hooks", "utils", "state", "api"];

/// Directories whose files may reference a candidate.
pub const DEFAULT_SEARCH_DIRS: &[&str] = &[
    "app",
    "components",
    "hooks",
    "utils",
    "state",
    "api",
    "constants",
    "context",
    "services",
    "types",
];

/// Root-level entry and config files always included in the corpus.
pub const DEFAULT_ROOT_FILES: &[&str] = &[
    "app.json",
    "app.config.js",
    "babel.config.js",
    "metro.config.js",
    "App.tsx",
    "App.js",
    "index.js",
    "package.json",
];

/// Extensions a candidate file may have.
pub const CANDIDATE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Extensions a corpus file may have.
pub const CORPUS_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "json"];

/// Directories whose path contains this marker hold tests and are never candidates.
pub const TESTS_MARKER: &str = "__tests__";

/// Directories whose path contains this marker are never searched.
pub const DEPENDENCY_MARKER: &str = "node_modules";

/// Filename fragments that mark test files.
pub const TEST_FILE_MARKERS: &[&str] = &[".test.", ".spec."];

/// Entry-point files that are never candidates.
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// Main configuration structure for orphanscan.toml.
#[derive(Debug, Deserialize, Default)]
pub struct OrphanscanConfig {
    /// Directories whose files are deletion candidates.
    pub candidate_dirs: Option<Vec<String>>,
    /// Directories searched for references.
    pub search_dirs: Option<Vec<String>>,
    /// Root-level files always searched for references.
    pub root_files: Option<Vec<String>>,
    /// Candidate names or patterns to ignore.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Report file, relative to the project root.
    pub file: Option<String>,
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Loads configuration from orphanscan.toml if it exists.
pub fn load_config(root: &Path) -> Result<Option<OrphanscanConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content)
        .map_err(|e| ScanError::config(&path, format!("Invalid {}: {}", CONFIG_FILE, e)))?;
    Ok(Some(cfg))
}

/// Validates a report path so the report stays inside the project root.
///
/// Rejects absolute paths, `..` components and null bytes.
pub fn validate_report_path(path: &str) -> ScanResult<PathBuf> {
    if path.contains('\0') {
        return Err(ScanError::invalid_argument(
            "Report path contains null bytes",
        ));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() || p.has_root() {
        return Err(ScanError::invalid_argument(format!(
            "Report path must be relative, not absolute: {}",
            path
        )));
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ScanError::invalid_argument(format!(
            "Path traversal (..) not allowed in report path: {}",
            path
        )));
    }

    Ok(p)
}

/// Resolved settings for a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub candidate_dirs: Vec<String>,
    pub search_dirs: Vec<String>,
    pub root_files: Vec<String>,
    /// Patterns matched against a candidate's name without extension.
    pub ignore_patterns: Vec<String>,
    pub report_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            candidate_dirs: to_owned(DEFAULT_CANDIDATE_DIRS),
            search_dirs: to_owned(DEFAULT_SEARCH_DIRS),
            root_files: to_owned(DEFAULT_ROOT_FILES),
            ignore_patterns: Vec::new(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

impl ScanConfig {
    /// Overlays values present in a config file onto these settings.
    ///
    /// Directory and root file lists replace the defaults; ignore patterns
    /// are appended.
    pub fn apply(&mut self, file: OrphanscanConfig) {
        if let Some(dirs) = file.candidate_dirs {
            self.candidate_dirs = dirs;
        }
        if let Some(dirs) = file.search_dirs {
            self.search_dirs = dirs;
        }
        if let Some(files) = file.root_files {
            self.root_files = files;
        }
        if let Some(patterns) = file.ignore {
            self.ignore_patterns.extend(patterns);
        }
        if let Some(report) = file.output.and_then(|o| o.file) {
            self.report_file = report;
        }
    }

    /// Checks settings that would make the scan write outside the root.
    pub fn validate(&self) -> ScanResult<()> {
        validate_report_path(&self.report_file).map(|_| ())
    }

    /// File name of the report, without any leading directories.
    pub fn report_file_name(&self) -> &str {
        Path::new(&self.report_file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.report_file)
    }

    /// Files that are never deletion candidates: index files and the tool's own files.
    pub fn is_ignored_candidate_file(&self, file_name: &str) -> bool {
        INDEX_FILES.contains(&file_name) || self.is_tool_file(file_name)
    }

    /// Files that are never searched for references.
    pub fn is_ignored_search_file(&self, file_name: &str) -> bool {
        file_name == ".DS_Store" || self.is_tool_file(file_name)
    }

    fn is_tool_file(&self, file_name: &str) -> bool {
        file_name == CONFIG_FILE || file_name == self.report_file_name()
    }

    /// Check if a candidate name matches any ignore pattern.
    ///
    /// `prefix*` and `*suffix` anchor the match; any other pattern matches
    /// on equality or containment.
    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|pattern| {
            if let Some(prefix) = pattern.strip_suffix('*') {
                name.starts_with(prefix)
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                name.ends_with(suffix)
            } else {
                name == pattern || name.contains(pattern.as_str())
            }
        })
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
