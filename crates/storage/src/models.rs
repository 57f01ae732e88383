use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RuleRow {
    pub id: i64,
    pub position: i64,
    pub pattern: String,
    pub field: String,
    pub category_name: String,
    pub confidence: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewRule {
    pub pattern: String,
    pub field: String,
    pub category_name: String,
    pub confidence: String,
}

/// Where a new rule lands in the ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Front,
    Back,
}
