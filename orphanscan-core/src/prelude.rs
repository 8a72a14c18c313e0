//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use orphanscan_core::prelude::*;
//! ```

// Error types
pub use crate::error::{ScanError, ScanResult};

// Pipeline stages
pub use crate::scan::{build_corpus, collect_candidates, Candidate};
pub use crate::usage::{is_referenced, UsagePattern};

// Configuration
pub use crate::config::{load_config, ScanConfig};

// Output
pub use crate::report::OutputFormat;

// Builder API
pub use crate::builder::{ScanOutcome, Scanner};
