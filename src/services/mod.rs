//! Service layer for household-budget
//!
//! The two reconciliation computations (currency limit aggregation and the
//! availability calculator), the helpers they share, their memoization and
//! the dashboard that feeds them fetched snapshots.

pub mod dashboard;
pub mod grouping;
pub mod limits;
pub mod memo;
pub mod stats;

pub use dashboard::{BudgetDashboard, CategoryBudgetRow, Collection};
pub use grouping::{actual_by_category, sum_by_currency, CategoryCurrencyIndex};
pub use limits::{
    CategoryLimitInput, CategoryLimitStatus, CurrencyLimitRow, CurrencyTotal, CurrencyTotals,
};
pub use memo::{Snapshot, StatsMemo};
pub use stats::{BudgetStats, StatsInputs};
