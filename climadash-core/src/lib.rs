//! Climadash Core — dataset loading, the single-entry table cache, and views.
//!
//! This crate contains everything the dashboard and CLI share:
//! - Dataset sources (HTTP, local file, seeded synthetic) behind one trait
//! - CSV ingest restricted to one category, with a documented row policy
//! - `TableCache`: lazy-init-once, read-many, injected rather than global
//! - Year-range `View` and its four projections (two line charts, one
//!   dual-axis chart, one newest-first table)
//! - TOML configuration with defaults for every field

pub mod config;
pub mod data;
pub mod indicators;
pub mod view;

pub use config::{ConfigError, DashboardConfig};
pub use data::{DataError, Table, TableCache};
pub use view::{render, Rendered, YearRange};
