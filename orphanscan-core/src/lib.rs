//! orphanscan-core: unused source file detection for JavaScript/TypeScript projects
//!
//! Finds source files that are never mentioned by name anywhere else in the
//! project, so they can be reviewed for deletion.
//!
//! # Pipeline
//!
//! 1. **Candidates**: source files under the candidate directories
//!    (`components`, `hooks`, `utils`, `state`, `api` by default)
//! 2. **Corpus**: every file that may reference a candidate, from the search
//!    directories plus root config files
//! 3. **Usage check**: a candidate is used when its name without extension
//!    appears as a whole word, case-insensitively, in another corpus file
//! 4. **Report**: unused candidates are written to `unused_files.txt` and
//!    printed as `DELETE: <path>`
//!
//! The check is textual. It does not resolve imports, so a file referenced
//! only through a computed path is reported as unused.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use orphanscan_core::prelude::*;
//!
//! let outcome = Scanner::new(".").run(OutputFormat::Plain)?;
//! println!("{} unused files", outcome.unused.len());
//! ```
//!
//! # Module Organization
//!
//! - [`config`]: Defaults and orphanscan.toml loading
//! - [`scan`]: Candidate collection and corpus building
//! - [`usage`]: Whole-word reference checking
//! - [`report`]: Report file and stdout output
//! - [`builder`]: Fluent builder API that runs the pipeline
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod usage;

// Error types
pub use error::{IoResultExt, ScanError, ScanResult};

// Builder API
pub use builder::{ScanOutcome, Scanner};

// Configuration
pub use config::{load_config, validate_report_path, OrphanscanConfig, OutputConfig, ScanConfig};

// Logging
pub use logging::{init_structured_logging, log_event, log_info, log_scan_summary, log_warn};

// Reporting
pub use report::{print_json, print_plain, print_unused, write_report, OutputFormat};

// File scanning
pub use scan::{build_corpus, collect_candidates, Candidate};

// Usage checking
pub use usage::{is_referenced, is_referenced_by, UsagePattern};

#[cfg(test)]
mod tests;
