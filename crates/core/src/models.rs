use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rules::RuleError;

/// Meetings with no usable time range count as half an hour.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Confidence::High),
            "low" => Ok(Confidence::Low),
            other => Err(RuleError::UnknownConfidence(other.to_string())),
        }
    }
}

/// Provenance of a meeting's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySource {
    /// Set by hand. Never recomputed.
    User,
    Rule,
    Suggested,
}

impl CategorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySource::User => "user",
            CategorySource::Rule => "rule",
            CategorySource::Suggested => "suggested",
        }
    }
}

impl fmt::Display for CategorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleField {
    Title,
    AttendeeEmail,
    AttendeeDomain,
}

impl RuleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleField::Title => "title",
            RuleField::AttendeeEmail => "attendeeEmail",
            RuleField::AttendeeDomain => "attendeeDomain",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleField {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(RuleField::Title),
            "attendeeEmail" => Ok(RuleField::AttendeeEmail),
            "attendeeDomain" => Ok(RuleField::AttendeeDomain),
            other => Err(RuleError::UnknownField(other.to_string())),
        }
    }
}

/// One calendar event under audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_count: Option<usize>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_source: Option<CategorySource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Meeting {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Explicit count when the import provided one, otherwise the attendee list length.
    pub fn attendee_count(&self) -> usize {
        self.attendee_count.unwrap_or(self.attendees.len())
    }

    pub fn duration_minutes(&self) -> i64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let minutes = (end - start).num_minutes();
                if minutes > 0 {
                    minutes
                } else {
                    DEFAULT_DURATION_MINUTES
                }
            }
            _ => DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn is_user_categorized(&self) -> bool {
        self.category_source == Some(CategorySource::User)
    }
}

/// A user-authored pattern-to-category mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub pattern: String,
    pub field: RuleField,
    pub category_name: String,
    pub confidence: Confidence,
}

impl CategoryRule {
    pub fn new(
        pattern: impl Into<String>,
        field: RuleField,
        category_name: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            id: None,
            pattern: pattern.into(),
            field,
            category_name: category_name.into(),
            confidence,
        }
    }
}

/// Output of the categorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: String,
    pub confidence: Confidence,
    pub source: CategorySource,
}

/// A named bucket with a display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
}
