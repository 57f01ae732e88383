use crate::models::{CategoryRule, Confidence, Meeting, RuleField};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Category used when nothing else applies.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Title tokens kept when a rule is remembered from a meeting.
pub const REMEMBERED_TITLE_TOKENS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule pattern is empty")]
    EmptyPattern,
    #[error("rule category name is empty")]
    EmptyCategory,
    #[error("unknown rule field: {0}")]
    UnknownField(String),
    #[error("unknown confidence: {0}")]
    UnknownConfidence(String),
}

#[derive(Debug, Default, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<CategoryRule>,
}

pub fn matches(rule: &CategoryRule, meeting: &Meeting) -> bool {
    if rule.pattern.trim().is_empty() {
        return false;
    }
    let pattern = rule.pattern.to_lowercase();
    match rule.field {
        RuleField::Title => meeting.title.to_lowercase().contains(&pattern),
        RuleField::AttendeeEmail => meeting
            .attendees
            .iter()
            .any(|a| a.to_lowercase().contains(&pattern)),
        // Both checks are kept: rules exist authored as "acme.com" and as ".acme.com".
        RuleField::AttendeeDomain => {
            let at_domain = format!("@{}", pattern);
            meeting.attendees.iter().any(|a| {
                let lower = a.to_lowercase();
                lower.contains(&at_domain) || lower.ends_with(&pattern)
            })
        }
    }
}

/// First rule in list order that matches the meeting.
pub fn first_match<'a>(rules: &'a [CategoryRule], meeting: &Meeting) -> Option<&'a CategoryRule> {
    rules.iter().find(|r| matches(r, meeting))
}

/// Derives a title rule from an already categorized meeting ("remember this").
pub fn rule_from_meeting(meeting: &Meeting) -> CategoryRule {
    let pattern = meeting
        .title
        .split_whitespace()
        .take(REMEMBERED_TITLE_TOKENS)
        .collect::<Vec<_>>()
        .join(" ");
    let category = meeting
        .category
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    CategoryRule::new(pattern, RuleField::Title, category, Confidence::High)
}

/// New rules take precedence over older ones.
pub fn prepend(rules: &mut Vec<CategoryRule>, rule: CategoryRule) {
    rules.insert(0, rule);
}

pub fn validate(rule: &CategoryRule) -> Result<(), RuleError> {
    if rule.pattern.trim().is_empty() {
        return Err(RuleError::EmptyPattern);
    }
    if rule.category_name.trim().is_empty() {
        return Err(RuleError::EmptyCategory);
    }
    Ok(())
}

/// Reads `*.toml` rule files in file-name order. Each file holds a `[[rules]]` array.
pub fn load_rules_from_dir(dir: &Path) -> anyhow::Result<Vec<CategoryRule>> {
    let mut rules = Vec::new();
    if !dir.exists() {
        return Ok(rules);
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("toml")
        {
            paths.push(entry.path());
        }
    }
    paths.sort();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let file: RuleFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid rule file {}: {}", path.display(), e))?;
        rules.extend(file.rules);
    }
    Ok(rules)
}
