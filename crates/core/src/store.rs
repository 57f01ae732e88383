//! Rule persistence on top of the storage crate.

use crate::models::{CategoryRule, Meeting};
use crate::rules;
use anyhow::Context;
use sqlx::SqlitePool;
use storage::models::{NewRule, Placement, RuleRow};
use tracing::{info, warn};

#[derive(Clone)]
pub struct RuleStore {
    pool: SqlitePool,
}

impl RuleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects and applies migrations.
    pub async fn open(database_url: &str) -> anyhow::Result<Self> {
        let pool = storage::connect(database_url)
            .await
            .context("db connect")?;
        storage::migrate(&pool).await.context("db migrate")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Stored rules in list order. Rows that no longer parse are skipped.
    pub async fn load_rules(&self) -> anyhow::Result<Vec<CategoryRule>> {
        let rows = storage::load_rules(&self.pool).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match rule_from_row(row) {
                    Ok(rule) => Some(rule),
                    Err(e) => {
                        warn!(id, error = %e, "skipping unreadable rule");
                        None
                    }
                }
            })
            .collect())
    }

    pub async fn create_rule(
        &self,
        rule: &CategoryRule,
        placement: Placement,
    ) -> anyhow::Result<CategoryRule> {
        rules::validate(rule)?;
        let new_rule = NewRule {
            pattern: rule.pattern.clone(),
            field: rule.field.to_string(),
            category_name: rule.category_name.clone(),
            confidence: rule.confidence.to_string(),
        };
        let row = storage::insert_rule(&self.pool, &new_rule, placement).await?;
        info!(
            id = row.id,
            pattern = %row.pattern,
            category = %row.category_name,
            "created rule"
        );
        Ok(rule_from_row(row)?)
    }

    pub async fn delete_rule(&self, id: i64) -> anyhow::Result<()> {
        storage::delete_rule(&self.pool, id).await?;
        info!(id, "deleted rule");
        Ok(())
    }

    /// "Remember this": turns a categorized meeting into a rule ahead of all others.
    pub async fn remember(&self, meeting: &Meeting) -> anyhow::Result<CategoryRule> {
        let rule = rules::rule_from_meeting(meeting);
        self.create_rule(&rule, Placement::Front).await
    }
}

fn rule_from_row(row: RuleRow) -> Result<CategoryRule, rules::RuleError> {
    Ok(CategoryRule {
        id: Some(row.id),
        field: row.field.parse()?,
        confidence: row.confidence.parse()?,
        pattern: row.pattern,
        category_name: row.category_name,
    })
}
