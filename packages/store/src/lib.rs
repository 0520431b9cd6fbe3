// ABOUTME: Lead store for Leadstage
// ABOUTME: Loads leads from a pluggable source and serves filtered views, stats, and stage updates

pub mod config;
pub mod seed;
pub mod source;
pub mod store;
pub mod views;

pub use config::{ConfigError, StoreConfig};
pub use seed::example_leads;
pub use source::{JsonFileSource, LeadSource, SeedSource, SourceError, StaticSource};
pub use store::{LeadStore, StoreError};
pub use views::{group_stats, stage_stats, LeadFilters, Scope};
