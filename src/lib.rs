//! household-budget - monthly household budget reconciliation
//!
//! Two pure calculators sit at the core of this crate: the currency limit
//! aggregator, which classifies each budget category against its
//! per-currency limits, and the budget availability calculator, which turns
//! planned and actual figures into "available for planning" and "actually
//! available". Everything else feeds them snapshots or renders their output.
//!
//! # Architecture
//!
//! - `models`: money, currencies, periods and the budget snapshot types
//! - `services`: the calculators, memoization and the dashboard loop
//! - `api`: the data source contract and its file-backed implementation
//! - `reports`, `display`, `export`: terminal and file output
//! - `config`, `storage`: paths, settings and atomic JSON files
//! - `cli`: command handlers for the `hbudget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use household_budget::api::SnapshotApi;
//! use household_budget::config::BudgetPaths;
//! use household_budget::models::BudgetPeriod;
//! use household_budget::services::BudgetDashboard;
//!
//! let api = SnapshotApi::new(BudgetPaths::new()?);
//! let mut dashboard = BudgetDashboard::load(api, BudgetPeriod::current_month())?;
//! println!("{}", dashboard.stats().actually_available);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
