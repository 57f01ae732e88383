use crate::categories::default_categories;
use crate::models::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

impl AppConfig {
    /// Configured palette, or the built-in one.
    pub fn palette(&self) -> Vec<Category> {
        self.categories.clone().unwrap_or_else(default_categories)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "calendar-audit.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Directory of TOML rule files, evaluated after stored rules.
    pub path: Option<String>,
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("AUDIT")
            .prefix_separator("_")
            .separator("__"),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("audit.toml");
        fs::write(
            &file,
            r##"
            [database]
            path = "/tmp/audit-test.db"

            [rules]
            path = "rules"

            [[categories]]
            name = "Board"
            color = "#000000"
            "##,
        )
        .unwrap();

        let cfg = load(Some(file.to_str().unwrap())).unwrap();
        assert_eq!(cfg.database.path, "/tmp/audit-test.db");
        assert_eq!(cfg.rules.path.as_deref(), Some("rules"));
        assert_eq!(cfg.palette().len(), 1);
    }

    #[test]
    fn empty_config_uses_built_in_palette() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.database.path, "calendar-audit.db");
        assert_eq!(cfg.palette(), default_categories());
    }
}
