//! Output: the report file plus plaintext or JSON on stdout.

use serde_json::json;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{IoResultExt, ScanResult};

/// Prefix printed before each unused file on stdout.
pub const DELETE_PREFIX: &str = "DELETE: ";

/// How unused files are echoed to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    /// Parses "plain" or "json", ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Renders the report body: one path per line, each newline terminated.
pub fn render_report(unused: &[&str]) -> String {
    unused.iter().map(|u| format!("{}\n", u)).collect()
}

/// Writes the report, replacing any previous content.
///
/// An empty list still creates an empty file.
pub fn write_report(path: &Path, unused: &[&str]) -> ScanResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, render_report(unused)).with_path(path)
}

/// Writes one `DELETE: <path>` line per unused file. Nothing for an empty list.
pub fn print_plain<W: Write>(out: &mut W, unused: &[&str]) -> io::Result<()> {
    for u in unused {
        writeln!(out, "{}{}", DELETE_PREFIX, u)?;
    }
    Ok(())
}

/// Writes unused files as a pretty-printed `{"unused": [...]}` object.
pub fn print_json<W: Write>(out: &mut W, unused: &[&str]) -> io::Result<()> {
    match serde_json::to_string_pretty(&json!({ "unused": unused })) {
        Ok(json) => writeln!(out, "{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            writeln!(out, "{{\"unused\": {:?}}}", unused)
        }
    }
}

/// Writes unused files in the chosen format and flushes.
pub fn print_unused<W: Write>(out: &mut W, unused: &[&str], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => print_plain(out, unused)?,
        OutputFormat::Json => print_json(out, unused)?,
    }
    out.flush()
}
