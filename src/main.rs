//! claudeshelf - Claude configuration file manager
//!
//! Command-line front end over the scanner, cleanup analysis, watcher and
//! file operations.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use claudeshelf::catalog::{Category, Index, ScanReport};
use claudeshelf::cleanup::{analyze, grouped};
use claudeshelf::config::DEFAULT_DEBOUNCE_MS;
use claudeshelf::fileops::{
    create_file, delete_file, delete_files, save_file, trash_file, trash_files,
};
use claudeshelf::observability::init_tracing;
use claudeshelf::scanner::Scanner;
use claudeshelf::watcher::FileWatcher;
use claudeshelf::{Config, Error};

/// claudeshelf - find, review and tidy Claude configuration files
#[derive(Parser, Debug)]
#[command(name = "claudeshelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Home directory used for built-in roots and scope detection
    #[arg(long, env = "CLAUDESHELF_HOME", global = true)]
    home: Option<PathBuf>,

    /// Additional directories to scan
    #[arg(
        short,
        long = "root",
        env = "CLAUDESHELF_ROOTS",
        value_delimiter = ',',
        global = true
    )]
    roots: Vec<PathBuf>,

    /// Skip the built-in roots under the home directory
    #[arg(long, global = true)]
    no_defaults: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CLAUDESHELF_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "CLAUDESHELF_LOG_JSON", global = true)]
    log_json: bool,

    /// Quiet interval before a burst of changes triggers a rescan
    #[arg(long, env = "CLAUDESHELF_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS, global = true)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan and list discovered files
    Scan {
        /// Only list this category (e.g. agents, project-config)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,

        /// Case-insensitive match on name, path or project
        #[arg(long, default_value = "")]
        search: String,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan and list cleanup candidates grouped by reason
    Cleanup {
        /// Print candidates as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan, then rescan whenever watched files change
    Watch,

    /// Move files to the trash
    Trash {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Permanently delete files
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Create a new file readable only by its owner
    Create {
        path: PathBuf,

        #[arg(long, default_value = "")]
        content: String,
    },

    /// Replace the content of an existing file
    Save {
        path: PathBuf,

        #[arg(long)]
        content: String,
    },
}

fn parse_category(tag: &str) -> Result<Category, String> {
    Category::from_tag(tag).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{tag}', expected one of: {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json)?;

    let defaults = Config::default();
    let config = Config {
        home_dir: cli.home.unwrap_or(defaults.home_dir),
        roots: cli.roots,
        include_defaults: !cli.no_defaults,
        log_level: cli.log_level,
        log_json: cli.log_json,
        debounce_ms: cli.debounce_ms,
    };

    tracing::debug!(?config, "Configuration loaded");
    config.validate()?;

    let scanner = Scanner::new(&config.home_dir);

    match cli.command {
        Command::Scan {
            category,
            search,
            json,
        } => {
            let report = run_scan(&scanner, &config).await?;
            let mut index = Index::new();
            index.replace(&report);
            let entries = index.filtered(category, &search);

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!(
                        "{:<16} {:<8} {:>9}  {}  {}",
                        entry.category.as_str(),
                        entry.scope.as_str(),
                        entry.size,
                        entry.display_name,
                        entry.path.display()
                    );
                }
                print_summary(&report);
            }
        }
        Command::Cleanup { json } => {
            let report = run_scan(&scanner, &config).await?;
            let candidates = analyze(&report.entries);

            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                for (reason, group) in grouped(&candidates) {
                    println!("{reason} ({})", group.len());
                    for candidate in group {
                        println!(
                            "  {}  {}",
                            candidate.entry.path.display(),
                            candidate.detail
                        );
                    }
                }
            }
        }
        Command::Watch => watch(&scanner, &config).await?,
        Command::Trash { paths } => {
            let result = match paths.as_slice() {
                [path] => trash_file(path).map(|()| 1),
                _ => trash_files(&paths),
            };
            report_bulk("Moved to trash", result)?;
        }
        Command::Delete { paths } => {
            let result = match paths.as_slice() {
                [path] => delete_file(path).map(|()| 1),
                _ => delete_files(&paths),
            };
            report_bulk("Deleted", result)?;
        }
        Command::Create { path, content } => {
            create_file(&path, &content)?;
            println!("Created {}", path.display());
        }
        Command::Save { path, content } => {
            save_file(&path, &content)?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

async fn run_scan(scanner: &Scanner, config: &Config) -> anyhow::Result<ScanReport> {
    scanner
        .scan(config.scan_roots().enabled_paths())
        .await?
        .context("another scan is already running")
}

async fn watch(scanner: &Scanner, config: &Config) -> anyhow::Result<()> {
    let report = run_scan(scanner, config).await?;
    print_summary(&report);

    let roots = config.scan_roots().enabled_paths();
    let rescan_scanner = scanner.clone();
    let rescan_roots = roots.clone();

    let mut watcher = FileWatcher::new(config.debounce());
    let count = watcher.start(&roots, move || {
        let scanner = rescan_scanner.clone();
        let roots = rescan_roots.clone();
        async move {
            match scanner.scan(roots).await {
                Ok(Some(report)) => print_summary(&report),
                Ok(None) => {}
                Err(e) => tracing::error!("Rescan failed: {e}"),
            }
        }
    })?;
    if count == 0 {
        anyhow::bail!("none of the scan roots exist, nothing to watch");
    }

    tracing::info!(dirs = count, "Watching for changes, press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    watcher.stop();
    Ok(())
}

fn print_summary(report: &ScanReport) {
    println!(
        "{} file(s), {} error(s) in {} ms",
        report.entries.len(),
        report.errors.len(),
        report.duration.as_millis()
    );
    for error in &report.errors {
        eprintln!("  {error}");
    }
}

fn report_bulk(action: &str, result: claudeshelf::Result<usize>) -> anyhow::Result<()> {
    match result {
        Ok(count) => {
            println!("{action}: {count} file(s)");
            Ok(())
        }
        Err(Error::FileOp(e)) => {
            for failure in e.failures() {
                eprintln!("  {failure}");
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
