//! Meeting categorization: user rules first, then an ordered heuristic chain.
//!
//! Both phases are first-match-wins. The heuristic chain is a static table so
//! its precedence can be read (and tested) entry by entry.

use crate::models::{Categorization, CategoryRule, CategorySource, Confidence, Meeting};
use crate::rules::{self, DEFAULT_CATEGORY};

pub const ONE_ON_ONE_KEYWORDS: &[&str] = &[
    "1:1",
    "1-1",
    "one on one",
    "check-in",
    "check in",
    "catch up",
    "sync",
];
pub const HIRING_KEYWORDS: &[&str] = &["interview", "candidate", "debrief", "hiring", "recruiting"];
pub const EXTERNAL_KEYWORDS: &[&str] = &["external", "client", "vendor", "partner", "customer"];
pub const TEAM_KEYWORDS: &[&str] = &[
    "team",
    "all hands",
    "standup",
    "stand-up",
    "weekly",
    "staff",
];
pub const FOCUS_KEYWORDS: &[&str] = &["focus", "blocked", "do not book", "heads down", "deep work"];
pub const ADMIN_KEYWORDS: &[&str] = &["admin", "expense", "review", "approval", "budget"];
pub const PROJECT_KEYWORDS: &[&str] = &["project", "sprint", "planning", "kickoff", "retro"];

/// Meetings with at most this many attendees (and at least one) lean 1:1.
pub const SMALL_GROUP_MAX: usize = 2;

#[derive(Debug, Clone, Copy)]
pub enum Signal {
    /// 1-2 attendees and the title carries one of the keywords.
    SmallGroupTitle(&'static [&'static str]),
    /// 1-2 attendees, whatever the title.
    SmallGroup,
    TitleContains(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Heuristic {
    pub signal: Signal,
    pub category: &'static str,
    pub confidence: Confidence,
}

const fn heuristic(signal: Signal, category: &'static str, confidence: Confidence) -> Heuristic {
    Heuristic {
        signal,
        category,
        confidence,
    }
}

/// Evaluated top to bottom. Earlier entries win.
pub const HEURISTICS: &[Heuristic] = &[
    heuristic(Signal::SmallGroupTitle(ONE_ON_ONE_KEYWORDS), "1:1", Confidence::High),
    heuristic(Signal::SmallGroup, "1:1", Confidence::Low),
    heuristic(Signal::TitleContains(HIRING_KEYWORDS), "Hiring", Confidence::High),
    heuristic(Signal::TitleContains(EXTERNAL_KEYWORDS), "External", Confidence::High),
    heuristic(Signal::TitleContains(TEAM_KEYWORDS), "Team Meeting", Confidence::High),
    heuristic(Signal::TitleContains(FOCUS_KEYWORDS), "Focus Time", Confidence::High),
    heuristic(Signal::TitleContains(ADMIN_KEYWORDS), "Admin", Confidence::Low),
    heuristic(Signal::TitleContains(PROJECT_KEYWORDS), "Project", Confidence::Low),
];

impl Signal {
    fn fires(&self, title_lower: &str, attendee_count: usize) -> bool {
        let small_group = (1..=SMALL_GROUP_MAX).contains(&attendee_count);
        match self {
            Signal::SmallGroupTitle(keywords) => small_group && contains_any(title_lower, keywords),
            Signal::SmallGroup => small_group,
            Signal::TitleContains(keywords) => contains_any(title_lower, keywords),
        }
    }
}

/// Assigns a category to a meeting. Never fails: missing data falls through to `Other`.
pub fn categorize(meeting: &Meeting, rules: &[CategoryRule]) -> Categorization {
    if let Some(rule) = rules::first_match(rules, meeting) {
        return Categorization {
            category: rule.category_name.clone(),
            confidence: rule.confidence,
            source: CategorySource::Rule,
        };
    }
    suggest(meeting)
}

/// Heuristic phase only.
pub fn suggest(meeting: &Meeting) -> Categorization {
    let title_lower = meeting.title.to_lowercase();
    let attendee_count = meeting.attendee_count();

    let (category, confidence) = HEURISTICS
        .iter()
        .find(|h| h.signal.fires(&title_lower, attendee_count))
        .map(|h| (h.category, h.confidence))
        .unwrap_or((DEFAULT_CATEGORY, Confidence::Low));

    Categorization {
        category: category.to_string(),
        confidence,
        source: CategorySource::Suggested,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
