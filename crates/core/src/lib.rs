//! Core library: meeting categorization rules, heuristics, and audit summaries.

pub mod categories;
pub mod classifier;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod reconcile;
pub mod rules;
pub mod store;
pub mod summary;

pub use classifier::categorize;
pub use models::{
    Categorization, Category, CategoryRule, CategorySource, Confidence, Meeting, RuleField,
};
