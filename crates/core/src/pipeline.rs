use crate::config::AppConfig;
use crate::models::{CategoryRule, Meeting};
use crate::store::RuleStore;
use crate::summary::{self, AuditSummary};
use crate::{reconcile, rules};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub rule_count: usize,
    pub meetings: Vec<Meeting>,
    pub summary: AuditSummary,
}

/// Reads a JSON array of meetings as produced by the import step.
pub fn load_meetings(path: &Path) -> anyhow::Result<Vec<Meeting>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read meetings from {}", path.display()))?;
    let meetings: Vec<Meeting> = serde_json::from_str(&content)
        .with_context(|| format!("parse meetings in {}", path.display()))?;
    debug!(count = meetings.len(), "loaded meetings");
    Ok(meetings)
}

/// Stored rules first (newest first), then rules from the configured directory.
pub async fn effective_rules(
    config: &AppConfig,
    store: &RuleStore,
) -> anyhow::Result<Vec<CategoryRule>> {
    let mut all = store.load_rules().await?;
    if let Some(dir) = &config.rules.path {
        let from_files = rules::load_rules_from_dir(&PathBuf::from(dir))
            .with_context(|| format!("load rules from {}", dir))?;
        debug!(count = from_files.len(), dir = %dir, "loaded file rules");
        all.extend(from_files);
    }
    Ok(all)
}

pub async fn run_audit(config: &AppConfig, meetings: Vec<Meeting>) -> anyhow::Result<AuditReport> {
    let store = RuleStore::open(&config.database.path).await?;
    let rules = effective_rules(config, &store).await?;
    Ok(audit_with_rules(config, &meetings, &rules))
}

pub fn audit_with_rules(
    config: &AppConfig,
    meetings: &[Meeting],
    rules: &[CategoryRule],
) -> AuditReport {
    info!(
        meetings = meetings.len(),
        rules = rules.len(),
        "categorizing meetings"
    );
    let meetings = reconcile::recategorize_all(meetings, rules);
    let summary = summary::summarize(&meetings, &config.palette());
    AuditReport {
        rule_count: rules.len(),
        meetings,
        summary,
    }
}
