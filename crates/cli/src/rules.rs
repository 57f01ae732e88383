use anyhow::Result;
use audit_core::config::AppConfig;
use audit_core::models::{CategoryRule, Confidence, Meeting, RuleField};
use audit_core::store::RuleStore;
use storage::models::Placement;

pub async fn list_rules(cfg: &AppConfig, json: bool) -> Result<Vec<CategoryRule>> {
    let store = RuleStore::open(&cfg.database.path).await?;
    let rules = store.load_rules().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
    } else if rules.is_empty() {
        println!("No rules.");
    } else {
        for r in &rules {
            println!(
                "{:>4}  {:<15} {:<30} -> {} ({})",
                r.id.unwrap_or_default(),
                r.field.as_str(),
                r.pattern,
                r.category_name,
                r.confidence
            );
        }
    }
    Ok(rules)
}

pub async fn add_rule(
    cfg: &AppConfig,
    pattern: &str,
    field: &str,
    category: &str,
    confidence: &str,
    append: bool,
) -> Result<CategoryRule> {
    let field: RuleField = field.parse()?;
    let confidence: Confidence = confidence.parse()?;
    let placement = if append {
        Placement::Back
    } else {
        Placement::Front
    };
    let store = RuleStore::open(&cfg.database.path).await?;
    let rule = store
        .create_rule(
            &CategoryRule::new(pattern, field, category, confidence),
            placement,
        )
        .await?;
    println!("Added rule {}", rule.id.unwrap_or_default());
    Ok(rule)
}

pub async fn delete_rule(cfg: &AppConfig, id: i64) -> Result<()> {
    let store = RuleStore::open(&cfg.database.path).await?;
    store.delete_rule(id).await?;
    println!("Deleted rule {}", id);
    Ok(())
}

pub async fn remember(cfg: &AppConfig, title: &str, category: &str) -> Result<CategoryRule> {
    let mut meeting = Meeting::new(title);
    meeting.category = Some(category.to_string());
    let store = RuleStore::open(&cfg.database.path).await?;
    let rule = store.remember(&meeting).await?;
    println!(
        "Remembered \"{}\" -> {} (rule {})",
        rule.pattern,
        rule.category_name,
        rule.id.unwrap_or_default()
    );
    Ok(rule)
}
