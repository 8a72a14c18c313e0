//! orphanscan CLI - finds JavaScript/TypeScript source files nothing refers to.
//!
//! Run from a project root with no arguments to scan with the defaults and
//! write `unused_files.txt`. Settings can be adjusted in `orphanscan.toml`
//! or with flags; flags take precedence.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use orphanscan_core::{
    init_structured_logging, load_config, log_event, log_warn, OutputFormat, ScanConfig, Scanner,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Finds source files that are never referenced by name")]
pub struct Cli {
    /// Path to the root of the project
    #[arg(default_value = ".")]
    path: String,

    /// Print unused files as JSON instead of DELETE lines
    #[arg(long)]
    json: bool,

    /// Candidate names or patterns to ignore (prefix*, *suffix, or substring)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Report file, relative to the project root
    #[arg(long, value_name = "FILE")]
    output: Option<String>,
}

/// Merges defaults, orphanscan.toml and CLI flags into scan settings and an output format.
///
/// A config file that fails to load is reported and otherwise ignored. The
/// merged report path must stay inside the root, whichever source set it.
fn resolve_settings(root: &Path, cli: &Cli) -> Result<(ScanConfig, OutputFormat)> {
    let mut config = ScanConfig::default();
    let mut format = OutputFormat::Plain;

    match load_config(root) {
        Ok(Some(file)) => {
            if let Some(name) = file.output.as_ref().and_then(|o| o.format.as_deref()) {
                match OutputFormat::parse(name) {
                    Some(f) => format = f,
                    None => log_warn(&format!("unknown output format '{}', using plain", name)),
                }
            }
            config.apply(file);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("[WARN] config load failed: {:#}", e);
            log_event("CONFIG_INVALID", &format!("{:#}", e));
        }
    }

    config.ignore_patterns.extend(cli.ignore.iter().cloned());

    if let Some(ref output) = cli.output {
        config.report_file = output.clone();
    }

    if let Err(e) = config.validate() {
        log_event("REPORT_PATH_REJECTED", &e.to_string());
        return Err(e).context("Refusing to write the report outside the project root");
    }

    if cli.json {
        format = OutputFormat::Json;
    }

    Ok((config, format))
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] orphanscan internal error: {}", info);
    }));

    // Structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();
    let root = PathBuf::from(&cli.path);

    let (config, format) = resolve_settings(&root, &cli)?;
    let scanner = Scanner::new(&root).with_config(config);

    // The report write is the only failure that ends the run
    if let Err(e) = scanner.run(format) {
        log_event("REPORT_FAILED", &e.to_string());
        return Err(e).with_context(|| {
            format!("Failed to write report to {}", scanner.report_path().display())
        });
    }

    Ok(())
}
