//! finsight - personal finance tracking and analytics
//!
//! This library provides the core of the finsight application: income and
//! expense transactions, categories, budgets and savings goals stored as
//! local JSON files, and the analytics computed from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, budgets, goals, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `analytics`: KPIs, comparisons, trends, category insights and health score
//! - `audit`: Audit logging system
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight::config::paths::FinsightPaths;
//! use finsight::services::AnalyticsService;
//! use finsight::storage::Storage;
//!
//! let mut storage = Storage::new(FinsightPaths::new()?)?;
//! storage.load_all()?;
//! let kpis = AnalyticsService::new(&storage).kpis(range)?;
//! ```

pub mod analytics;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinsightError, FinsightResult};
