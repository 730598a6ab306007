//! Currency limit aggregation
//!
//! Reduces one category's base-currency limit and its per-currency breakdown
//! into the shape the budget tables render, and classifies it as over or
//! under budget. Everything here is a pure function of the snapshot.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::AddAssign;

use super::grouping::sum_by_currency;
use crate::models::{BudgetItem, CurrencyCode, CurrencyLimit, Money};

/// What the aggregator needs to know about one category
#[derive(Debug, Clone, Copy)]
pub struct CategoryLimitInput<'a> {
    /// Real spend in the base currency
    pub actual_amount: Money,
    /// Limit in the base currency
    pub total_limit: Money,
    pub currency_limits: &'a [CurrencyLimit],
}

impl<'a> CategoryLimitInput<'a> {
    pub fn new(actual_amount: Money, total_limit: Money, currency_limits: &'a [CurrencyLimit]) -> Self {
        Self {
            actual_amount,
            total_limit,
            currency_limits,
        }
    }

    /// Join a budget item with the category's real spend
    pub fn from_item(item: &'a BudgetItem, actual_amount: Money) -> Self {
        Self::new(actual_amount, item.total_limit, &item.currency_limits)
    }
}

/// Over/under budget classification of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLimitStatus {
    /// Currencies with a plan or with spend, in input order
    pub active_currency_limits: Vec<CurrencyLimit>,
    pub has_multi_currency: bool,
    pub has_over_budget_currency: bool,
    pub is_over_budget: bool,
    pub is_under_budget: bool,
    /// `round(actual / limit * 100)`; `None` without a positive limit
    pub progress_percent: Option<i64>,
    /// Base-currency `total_limit - actual_amount`, unclamped
    pub remaining: Money,
}

impl CategoryLimitStatus {
    pub fn analyze(input: &CategoryLimitInput<'_>) -> Self {
        let active_currency_limits: Vec<CurrencyLimit> = input
            .currency_limits
            .iter()
            .filter(|l| l.is_active())
            .cloned()
            .collect();
        let has_multi_currency = !active_currency_limits.is_empty();

        // Without a breakdown only the base pair below decides overspend
        let has_over_budget_currency =
            has_multi_currency && active_currency_limits.iter().any(|l| l.is_overspent());

        let remaining = input.total_limit - input.actual_amount;
        let has_limit = input.total_limit.is_positive();

        let is_over_budget = (has_limit && remaining.is_negative()) || has_over_budget_currency;
        let is_under_budget =
            has_limit && remaining.is_positive() && input.actual_amount.is_positive();

        Self {
            active_currency_limits,
            has_multi_currency,
            has_over_budget_currency,
            is_over_budget,
            is_under_budget,
            progress_percent: input.actual_amount.percent_of(input.total_limit),
            remaining,
        }
    }

    /// Progress for display; no limit reads as zero
    pub fn progress_or_zero(&self) -> i64 {
        self.progress_percent.unwrap_or(0)
    }

    /// Rows for each active currency
    pub fn currency_rows(&self) -> Vec<CurrencyLimitRow> {
        self.active_currency_limits
            .iter()
            .map(CurrencyLimitRow::from_limit)
            .collect()
    }
}

/// One rendered per-currency line under a category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyLimitRow {
    pub currency: CurrencyCode,
    pub total_limit: Money,
    pub actual_amount: Money,
    pub remaining: Money,
    /// Bar width, clamped to 0..=100
    pub progress_width: f64,
    /// Decided by the unclamped remaining, never by the bar width
    pub is_overspent: bool,
}

impl CurrencyLimitRow {
    pub fn from_limit(limit: &CurrencyLimit) -> Self {
        Self {
            currency: limit.currency.clone(),
            total_limit: limit.total_limit,
            actual_amount: limit.actual_amount,
            remaining: limit.remaining,
            progress_width: limit.progress_width(),
            is_overspent: limit.is_overspent(),
        }
    }
}

/// Totals for one currency across every budget item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    pub total_limit: Money,
    pub actual_amount: Money,
    pub remaining: Money,
}

impl CurrencyTotal {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

impl From<&CurrencyLimit> for CurrencyTotal {
    fn from(limit: &CurrencyLimit) -> Self {
        Self {
            total_limit: limit.total_limit,
            actual_amount: limit.actual_amount,
            remaining: limit.remaining,
        }
    }
}

impl AddAssign for CurrencyTotal {
    fn add_assign(&mut self, other: Self) {
        self.total_limit += other.total_limit;
        self.actual_amount += other.actual_amount;
        self.remaining += other.remaining;
    }
}

/// Per-currency totals over the active currency limits of all items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CurrencyTotals(BTreeMap<CurrencyCode, CurrencyTotal>);

impl CurrencyTotals {
    /// Sum limits, spend and supplied remaining balances per currency
    pub fn aggregate(items: &[BudgetItem]) -> Self {
        Self(sum_by_currency(
            items
                .iter()
                .flat_map(|item| item.currency_limits.iter())
                .filter(|l| l.is_active())
                .map(|l| (&l.currency, CurrencyTotal::from(l))),
        ))
    }

    pub fn get(&self, currency: &CurrencyCode) -> Option<&CurrencyTotal> {
        self.0.get(currency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyTotal)> {
        self.0.iter()
    }

    pub fn any_over_budget(&self) -> bool {
        self.0.values().any(CurrencyTotal::is_over_budget)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
