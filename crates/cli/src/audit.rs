use anyhow::Result;
use audit_core::config::AppConfig;
use audit_core::pipeline::{self, AuditReport};
use audit_core::summary::{AuditSummary, SourceCounts};
use std::path::Path;

pub async fn run_audit(cfg: &AppConfig, meetings_path: &Path, json: bool) -> Result<AuditReport> {
    let meetings = pipeline::load_meetings(meetings_path)?;
    let report = pipeline::run_audit(cfg, meetings).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_meetings(&report);
        print_summary(&report.summary);
    }
    Ok(report)
}

pub async fn run_summary(cfg: &AppConfig, meetings_path: &Path, json: bool) -> Result<()> {
    let meetings = pipeline::load_meetings(meetings_path)?;
    let report = pipeline::run_audit(cfg, meetings).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        print_summary(&report.summary);
    }
    Ok(())
}

fn print_meetings(report: &AuditReport) {
    println!("{} meeting(s), {} rule(s)", report.meetings.len(), report.rule_count);
    for m in &report.meetings {
        println!(
            "{:<40} {:<14} {:<5} {}",
            truncate(&m.title, 40),
            m.category.as_deref().unwrap_or("-"),
            m.confidence.map(|c| c.as_str()).unwrap_or("-"),
            m.category_source.map(|s| s.as_str()).unwrap_or("-"),
        );
    }
}

fn print_summary(summary: &AuditSummary) {
    println!(
        "{} meeting(s), {:.1}h total",
        summary.total_meetings,
        summary.total_minutes as f64 / 60.0
    );
    for c in &summary.categories {
        println!(
            "{:<14} {:>3} mtg {:>6.1}h  low:{}",
            c.name,
            c.meetings,
            c.minutes as f64 / 60.0,
            c.low_confidence
        );
    }
    println!("{}", format_sources(&summary.sources));
}

fn format_sources(sources: &SourceCounts) -> String {
    format!(
        "sources: user={} rule={} suggested={} unset={}",
        sources.user, sources.rule, sources.suggested, sources.unset
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_line_accounts_for_every_meeting() {
        let sources = SourceCounts {
            user: 2,
            rule: 1,
            suggested: 3,
            unset: 1,
        };
        assert_eq!(
            format_sources(&sources),
            "sources: user=2 rule=1 suggested=3 unset=1"
        );
    }

    #[test]
    fn long_titles_are_cut_with_ellipsis() {
        assert_eq!(truncate("Roadmap", 40), "Roadmap");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
