use std::fs;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use windlass::config::{Cli, Config};
use windlass::error::ConfigError;
use windlass::loader::resolve_chain;
use windlass::scanner::{build_matcher, scan_content, ScanStats};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    // Validate project root
    if !config.project_root.exists() {
        bail!("project root not found: {}", config.project_root.display());
    }

    // Setup Ctrl+C handler
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    // Configure Rayon thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build_global()
        .ok();

    if config.verbose {
        eprintln!("Merging {} fragment(s):", config.fragments.len());
        for path in &config.fragments {
            eprintln!("  {}", path.display());
        }
    }

    // Resolve the fragment chain
    let resolved = resolve_chain(&config.fragments).context("Failed to resolve configuration")?;

    // Compile the matcher up front so --check catches glob syntax errors too
    build_matcher(&resolved.content).context("Failed to compile content globs")?;

    if config.print {
        let json = serde_json::to_string_pretty(&resolved)
            .context("Failed to serialize resolved configuration")?;
        println!("{json}");
    }

    if let Some(ref out_path) = config.out {
        let json = serde_json::to_string_pretty(&resolved)
            .context("Failed to serialize resolved configuration")?;
        fs::write(out_path, json)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        if config.verbose {
            eprintln!("Wrote resolved configuration to {}", out_path.display());
        }
    }

    if config.check {
        println!(
            "Configuration OK: {} content glob(s), {} color token(s), {} font stack(s), {} plugin(s)",
            resolved.content.len(),
            resolved.theme.extend.colors.len(),
            resolved.theme.extend.font_family.len(),
            resolved.plugins.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    if config.verbose {
        eprintln!(
            "Scanning {} with {} pattern(s) and {} worker(s)",
            config.project_root.display(),
            resolved.content.len(),
            config.jobs
        );
    }

    let start = Instant::now();
    let stats = ScanStats::new();

    // Spinner only in verbose mode; the scan itself is a single pass
    let spinner = if config.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Scanning content...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let report = match scan_content(&config.project_root, &resolved.content, &shutdown, &stats) {
        Ok(report) => report,
        Err(ConfigError::Cancelled) => {
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            eprintln!("\nScan cancelled");
            return Ok(ExitCode::from(130));
        }
        Err(e) => return Err(e).context("Content scan failed"),
    };

    if let Some(pb) = spinner {
        pb.finish_with_message("Complete");
    }

    let duration = start.elapsed();
    let files_seen = stats.files_seen.0.load(Ordering::Relaxed);
    let files_matched = stats.files_matched.0.load(Ordering::Relaxed);
    let throughput = if duration.as_secs_f64() > 0.0 {
        files_seen as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    // Print summary
    println!(
        "Matched {} of {} files in {:.2}s ({:.0} files/sec)",
        files_matched,
        files_seen,
        duration.as_secs_f64(),
        throughput
    );

    // Per-pattern breakdown
    for (pattern, count) in resolved.content.iter().zip(&report.per_pattern) {
        println!("  {}: {} file(s)", pattern, count);
    }

    if config.verbose {
        for path in &report.matched {
            eprintln!("  match: {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
