use crate::audit;
use anyhow::{Context, Result};
use audit_core::config::AppConfig;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::{info, warn};

/// Re-runs the audit every time the meetings file changes.
///
/// Watches the containing directory so saves that replace the file by rename
/// keep firing.
pub async fn watch_meetings(cfg: AppConfig, meetings_path: PathBuf, json: bool) -> Result<()> {
    let file_name = meetings_path
        .file_name()
        .with_context(|| format!("not a file path: {}", meetings_path.display()))?
        .to_os_string();
    let dir = watch_dir(&meetings_path);

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher = Watcher::new(
        tx,
        notify::Config::default().with_poll_interval(Duration::from_secs(2)),
    )?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!(path = %meetings_path.display(), dir = %dir.display(), "watching meetings file");
    if let Err(e) = audit::run_audit(&cfg, &meetings_path, json).await {
        warn!(error = %e, "initial audit failed");
    }
    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if !touches_file(&event, &file_name) {
                    continue;
                }
                if let Err(e) = audit::run_audit(&cfg, &meetings_path, json).await {
                    warn!(error = %e, "audit failed");
                }
            }
            Ok(Err(e)) => warn!(error = %e, "watch error"),
            Err(_) => return Ok(()),
        }
    }
}

fn watch_dir(meetings_path: &Path) -> PathBuf {
    match meetings_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches_file(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}
