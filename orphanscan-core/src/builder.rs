//! Builder pattern API for running a scan.
//!
//! ```rust,ignore
//! use orphanscan_core::prelude::*;
//!
//! let outcome = Scanner::new(".")
//!     .candidate_dirs(["components", "hooks"])
//!     .ignore_patterns(["Legacy*"])
//!     .run(OutputFormat::Plain)?;
//!
//! println!("{} unused of {}", outcome.unused.len(), outcome.total_candidates);
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::logging::{log_info, log_scan_summary, log_warn};
use crate::report::{print_unused, write_report, OutputFormat};
use crate::scan::{build_corpus, collect_candidates};
use crate::usage::is_referenced;

/// Builder for configuring and running an unused file scan.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Project root; all configured directories are relative to it
    root: PathBuf,

    /// Resolved scan settings
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner for the given root with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ScanConfig::default(),
        }
    }

    /// Replace all settings at once.
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the directories whose files are deletion candidates.
    pub fn candidate_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.candidate_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the directories searched for references.
    pub fn search_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.search_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the root-level files always searched for references.
    pub fn root_files(mut self, files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.root_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Add patterns for candidate names to ignore.
    pub fn ignore_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config
            .ignore_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the report file, relative to the root.
    pub fn report_file(mut self, file: impl Into<String>) -> Self {
        self.config.report_file = file.into();
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Path the report is written to.
    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.config.report_file)
    }

    /// Find unused candidates without writing anything.
    ///
    /// The corpus is built once; each candidate re-reads it from disk.
    pub fn analyze(&self) -> ScanOutcome {
        // 1. Collect candidates and corpus
        let candidates = collect_candidates(&self.root, &self.config);
        let corpus = build_corpus(&self.root, &self.config);
        log_info(&format!(
            "checking {} candidates against {} corpus files",
            candidates.len(),
            corpus.len()
        ));

        // 2. Check each candidate independently, keeping collector order
        let unused: Vec<String> = candidates
            .iter()
            .filter(|c| match is_referenced(c, &corpus) {
                Ok(found) => !found,
                Err(e) => {
                    // Never suggest deleting a file we could not check
                    log_warn(&format!("{}: {}", c.relative, e));
                    false
                }
            })
            .map(|c| c.relative.clone())
            .collect();

        let outcome = ScanOutcome {
            total_candidates: candidates.len(),
            corpus_files: corpus.len(),
            unused,
        };
        log_scan_summary(
            outcome.total_candidates,
            outcome.corpus_files,
            outcome.unused.len(),
            outcome.unused_percentage(),
        );
        outcome
    }

    /// Scan, write the report file and print unused files to stdout.
    pub fn run(&self, format: OutputFormat) -> ScanResult<ScanOutcome> {
        let stdout = io::stdout();
        self.run_with_output(format, &mut stdout.lock())
    }

    /// Scan, write the report file and print unused files to `out`.
    ///
    /// Fails if the report path leaves the root or the report cannot be
    /// written. A failed print is only logged.
    pub fn run_with_output<W: Write>(
        &self,
        format: OutputFormat,
        out: &mut W,
    ) -> ScanResult<ScanOutcome> {
        self.config.validate()?;

        let outcome = self.analyze();
        let unused = outcome.unused_refs();

        write_report(&self.report_path(), &unused)?;
        if let Err(e) = print_unused(out, &unused, format) {
            log_warn(&format!("failed to print unused files: {}", e));
        }

        Ok(outcome)
    }
}

/// Result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Number of deletion candidates found
    pub total_candidates: usize,

    /// Number of files searched for references
    pub corpus_files: usize,

    /// Candidates with no reference, relative to the root, in collector order
    pub unused: Vec<String>,
}

impl ScanOutcome {
    /// Unused paths as string slices, for the report functions.
    pub fn unused_refs(&self) -> Vec<&str> {
        self.unused.iter().map(|s| s.as_str()).collect()
    }

    /// Get percentage of candidates that are unused.
    pub fn unused_percentage(&self) -> f64 {
        if self.total_candidates == 0 {
            0.0
        } else {
            (self.unused.len() as f64 / self.total_candidates as f64) * 100.0
        }
    }
}
