//! Public library modules for the CLI crate
pub mod audit;
pub mod rules;
pub mod watch;
