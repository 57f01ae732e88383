//! Per-category time totals for an audited meeting set.

use crate::categories::color_for;
use crate::models::{Category, CategorySource, Confidence, Meeting};
use crate::rules::DEFAULT_CATEGORY;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub color: String,
    pub meetings: usize,
    pub minutes: i64,
    pub low_confidence: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub user: usize,
    pub rule: usize,
    pub suggested: usize,
    pub unset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total_meetings: usize,
    pub total_minutes: i64,
    pub categories: Vec<CategoryTotal>,
    pub sources: SourceCounts,
}

pub fn summarize(meetings: &[Meeting], palette: &[Category]) -> AuditSummary {
    let mut groups: BTreeMap<&str, CategoryTotal> = BTreeMap::new();
    let mut summary = AuditSummary::default();

    for meeting in meetings {
        let name = meeting.category.as_deref().unwrap_or(DEFAULT_CATEGORY);
        let minutes = meeting.duration_minutes();
        let entry = groups.entry(name).or_insert_with(|| CategoryTotal {
            name: name.to_string(),
            color: color_for(palette, name).to_string(),
            meetings: 0,
            minutes: 0,
            low_confidence: 0,
        });
        entry.meetings += 1;
        entry.minutes += minutes;
        if meeting.confidence == Some(Confidence::Low) {
            entry.low_confidence += 1;
        }

        match meeting.category_source {
            Some(CategorySource::User) => summary.sources.user += 1,
            Some(CategorySource::Rule) => summary.sources.rule += 1,
            Some(CategorySource::Suggested) => summary.sources.suggested += 1,
            None => summary.sources.unset += 1,
        }
        summary.total_meetings += 1;
        summary.total_minutes += minutes;
    }

    let mut categories: Vec<CategoryTotal> = groups.into_values().collect();
    categories.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));
    summary.categories = categories;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::default_categories;
    use chrono::{TimeZone, Utc};

    fn timed(title: &str, category: Option<&str>, minutes: i64) -> Meeting {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        Meeting {
            title: title.into(),
            start_time: Some(start),
            end_time: Some(start + chrono::Duration::minutes(minutes)),
            category: category.map(str::to_string),
            category_source: category.map(|_| CategorySource::Suggested),
            confidence: category.map(|_| Confidence::Low),
            ..Meeting::default()
        }
    }

    #[test]
    fn groups_sorted_by_minutes_then_name() {
        let meetings = vec![
            timed("a", Some("Admin"), 60),
            timed("b", Some("Project"), 30),
            timed("c", Some("Admin"), 15),
            timed("d", Some("Hiring"), 30),
            timed("e", None, 0),
        ];
        let s = summarize(&meetings, &default_categories());
        let order: Vec<&str> = s.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["Admin", "Hiring", "Other", "Project"]);
        assert_eq!(s.categories[0].minutes, 75);
        assert_eq!(s.categories[0].meetings, 2);
        assert_eq!(s.categories[0].low_confidence, 2);
        assert_eq!(s.total_minutes, 165);
        assert_eq!(s.total_meetings, 5);
        assert_eq!(s.sources.suggested, 4);
        assert_eq!(s.sources.unset, 1);
    }

    #[test]
    fn empty_set_summarizes_to_zero() {
        assert_eq!(summarize(&[], &default_categories()), AuditSummary::default());
    }
}
