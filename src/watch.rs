//! File watcher: runs `check` on startup, then re-runs on documentation changes.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config;
use crate::error;
use crate::scanner::{self, ScannedDocs};

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// Collect the parent directories of every scanned documentation file.
fn collect_watch_dirs(docs: &ScannedDocs, root: &std::path::Path) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    dirs.insert(root.to_path_buf());
    for decl in &docs.declarations {
        if let Some(parent) = decl.source.parent() {
            dirs.insert(root.join(parent));
        }
    }
    for reference in &docs.references {
        if let Some(parent) = reference.source.parent() {
            dirs.insert(root.join(parent));
        }
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::WatchFailed { reason: e.to_string() };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial check, then watches the documentation directories and
/// re-checks on changes.
///
/// # Errors
///
/// Returns errors from config loading, scanning, or watcher setup.
pub fn run() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");

    eprintln!("watch: initial check");
    let mut last_code = run_check();

    let config = config::Config::load(&root)?;
    let docs = scanner::scan(&root, &config)?;
    let watch_dirs = collect_watch_dirs(&docs, &root);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if dir.exists() {
            let _ = watcher.watch(dir, RecursiveMode::NonRecursive);
        }
    }

    let dir_count = watch_dirs.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-checking...");
        last_code = run_check();
    }

    return Ok(last_code);
}

/// Run check once and print result. Returns the exit code from check.
fn run_check() -> ExitCode {
    return match commands::check() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(3_u8)
        },
    };
}
