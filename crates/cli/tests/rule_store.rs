use audit_core::config::{AppConfig, DatabaseConfig, RuleConfig};
use audit_core::models::{CategoryRule, CategorySource, Confidence, Meeting, RuleField};
use audit_core::pipeline;
use audit_core::store::RuleStore;
use std::fs;
use storage::models::Placement;
use tempfile::tempdir;

fn config_for(dir: &std::path::Path, rules_dir: Option<&std::path::Path>) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            path: dir.join("audit.db").to_string_lossy().into_owned(),
        },
        rules: RuleConfig {
            path: rules_dir.map(|p| p.to_string_lossy().into_owned()),
        },
        categories: None,
    }
}

#[tokio::test]
async fn remembered_rule_takes_precedence() {
    let store = RuleStore::open("sqlite::memory:").await.unwrap();
    store
        .create_rule(
            &CategoryRule::new("weekly", RuleField::Title, "Team Meeting", Confidence::High),
            Placement::Back,
        )
        .await
        .unwrap();

    let mut m = Meeting::new("Weekly Board Prep session");
    m.category = Some("Admin".into());
    let remembered = store.remember(&m).await.unwrap();
    assert_eq!(remembered.pattern, "Weekly Board Prep");
    assert!(remembered.id.is_some());

    let rules = store.load_rules().await.unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].category_name, "Admin");

    let result = audit_core::categorize(&Meeting::new("weekly board prep session"), &rules);
    assert_eq!(result.category, "Admin");
    assert_eq!(result.source, CategorySource::Rule);
}

#[tokio::test]
async fn invalid_rules_are_rejected_and_missing_ids_reported() {
    let store = RuleStore::open("sqlite::memory:").await.unwrap();
    let blank = CategoryRule::new("  ", RuleField::Title, "Admin", Confidence::High);
    assert!(store.create_rule(&blank, Placement::Front).await.is_err());
    assert!(store.delete_rule(42).await.is_err());
    assert!(store.load_rules().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_rows_are_skipped() {
    let store = RuleStore::open("sqlite::memory:").await.unwrap();
    insert_unparseable_row(&store).await;
    store
        .create_rule(
            &CategoryRule::new("acme.com", RuleField::AttendeeDomain, "External", Confidence::High),
            Placement::Back,
        )
        .await
        .unwrap();

    let rules = store.load_rules().await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].field, RuleField::AttendeeDomain);
}

async fn insert_unparseable_row(store: &RuleStore) {
    storage::insert_rule(
        store.pool(),
        &storage::models::NewRule {
            pattern: "x".into(),
            field: "location".into(),
            category_name: "Other".into(),
            confidence: "high".into(),
        },
        Placement::Front,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn audit_combines_stored_and_file_rules() {
    let temp = tempdir().unwrap();
    let rules_dir = temp.path().join("rules");
    fs::create_dir_all(&rules_dir).unwrap();
    fs::write(
        rules_dir.join("10-clients.toml"),
        r#"
        [[rules]]
        pattern = "acme.com"
        field = "attendeeDomain"
        categoryName = "External"
        confidence = "high"

        [[rules]]
        pattern = "board"
        field = "title"
        categoryName = "Board"
        confidence = "low"
        "#,
    )
    .unwrap();

    let meetings_path = temp.path().join("meetings.json");
    fs::write(
        &meetings_path,
        r#"[
          {"title": "Board prep", "attendees": ["a@co.com", "b@co.com", "c@co.com"],
           "startTime": "2024-05-06T09:00:00Z", "endTime": "2024-05-06T10:30:00Z"},
          {"title": "Roadmap", "attendees": ["me@co.com", "x@acme.com", "y@co.com"]},
          {"title": "Deep work", "attendeeCount": 0, "category": "Focus Time", "categorySource": "user"},
          {"title": "Lunch", "attendeeCount": 6}
        ]"#,
    )
    .unwrap();

    let cfg = config_for(temp.path(), Some(&rules_dir));
    cli::rules::add_rule(&cfg, "board", "title", "Admin", "high", false)
        .await
        .unwrap();

    let report = cli::audit::run_audit(&cfg, &meetings_path, true).await.unwrap();
    assert_eq!(report.rule_count, 3);

    let categories: Vec<&str> = report
        .meetings
        .iter()
        .map(|m| m.category.as_deref().unwrap())
        .collect();
    // stored "board" rule beats the file rule of the same pattern
    assert_eq!(categories, vec!["Admin", "External", "Focus Time", "Other"]);
    assert_eq!(report.meetings[2].category_source, Some(CategorySource::User));
    assert_eq!(report.summary.total_minutes, 90 + 30 + 30 + 30);
    assert_eq!(report.summary.sources.rule, 2);
    assert_eq!(report.summary.sources.user, 1);
    assert_eq!(report.summary.sources.suggested, 1);

    let reloaded = pipeline::load_meetings(&meetings_path).unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[0].category, None);
}

#[tokio::test]
async fn cli_rule_commands_round_trip_through_the_database() {
    let temp = tempdir().unwrap();
    let cfg = config_for(temp.path(), None);

    let first = cli::rules::add_rule(&cfg, "standup", "title", "Team Meeting", "low", true)
        .await
        .unwrap();
    cli::rules::remember(&cfg, "Interview loop backend senior", "Hiring")
        .await
        .unwrap();
    assert!(cli::rules::add_rule(&cfg, "x", "location", "Other", "high", false)
        .await
        .is_err());

    let rules = cli::rules::list_rules(&cfg, false).await.unwrap();
    let patterns: Vec<&str> = rules.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["Interview loop backend", "standup"]);

    cli::rules::delete_rule(&cfg, first.id.unwrap()).await.unwrap();
    assert_eq!(cli::rules::list_rules(&cfg, true).await.unwrap().len(), 1);
}
