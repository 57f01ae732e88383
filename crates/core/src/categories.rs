use crate::models::Category;

/// Color for categories that only exist in user rules.
pub const FALLBACK_COLOR: &str = "#9ca3af";

const DEFAULT_PALETTE: &[(&str, &str)] = &[
    ("1:1", "#6366f1"),
    ("Hiring", "#f59e0b"),
    ("External", "#ef4444"),
    ("Team Meeting", "#10b981"),
    ("Focus Time", "#3b82f6"),
    ("Admin", "#8b5cf6"),
    ("Project", "#ec4899"),
    ("Other", FALLBACK_COLOR),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_PALETTE
        .iter()
        .map(|(name, color)| Category {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

pub fn color_for<'a>(palette: &'a [Category], name: &str) -> &'a str {
    palette
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_every_heuristic_category() {
        let palette = default_categories();
        for h in crate::classifier::HEURISTICS {
            assert!(palette.iter().any(|c| c.name == h.category), "{}", h.category);
        }
        assert!(palette.iter().any(|c| c.name == crate::rules::DEFAULT_CATEGORY));
    }

    #[test]
    fn unknown_category_gets_fallback_color() {
        let palette = default_categories();
        assert_eq!(color_for(&palette, "Hiring"), "#f59e0b");
        assert_eq!(color_for(&palette, "Board prep"), FALLBACK_COLOR);
    }
}
