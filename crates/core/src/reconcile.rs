//! Re-categorization pass over the working set.
//!
//! Computed output only fills fields that are currently absent. A populated
//! field is never overwritten, and user-set meetings are not evaluated at all.

use crate::classifier;
use crate::models::{CategoryRule, CategorySource, Confidence, Meeting};

pub fn recategorize(meeting: &Meeting, rules: &[CategoryRule]) -> Meeting {
    if meeting.is_user_categorized() {
        return meeting.clone();
    }
    if meeting.category.is_some() && meeting.confidence.is_some() && meeting.category_source.is_some()
    {
        return meeting.clone();
    }

    let computed = classifier::categorize(meeting, rules);
    let mut out = meeting.clone();
    out.category = meeting.category.clone().or(Some(computed.category));
    out.confidence = meeting.confidence.or(Some(computed.confidence));
    out.category_source = meeting.category_source.or(Some(computed.source));
    out
}

pub fn recategorize_all(meetings: &[Meeting], rules: &[CategoryRule]) -> Vec<Meeting> {
    meetings.iter().map(|m| recategorize(m, rules)).collect()
}

/// Explicit user choice. Sticky across every later pass.
pub fn assign_user_category(meeting: &mut Meeting, category: impl Into<String>) {
    meeting.category = Some(category.into());
    meeting.category_source = Some(CategorySource::User);
    meeting.confidence = Some(Confidence::High);
}

/// Forgets the current assignment so the next pass recomputes it from scratch.
pub fn clear_category(meeting: &mut Meeting) {
    meeting.category = None;
    meeting.category_source = None;
    meeting.confidence = None;
}
