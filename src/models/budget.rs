//! Budget, budget item and per-currency limit models
//!
//! These are read-only snapshots of what the budget API returns for one
//! month. The aggregator and calculator read them; nothing mutates them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::currency::CurrencyCode;
use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::nullable::{deserialize_amount, deserialize_amount_or_zero};
use super::period::BudgetPeriod;

/// Treat an explicit JSON `null` collection the same as a missing one
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A category's limit in one currency
///
/// `total_limit == planned_amount + buffer_amount` and
/// `remaining == total_limit - actual_amount` when built through
/// [`CurrencyLimit::new`]. Values supplied by the API are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CurrencyLimitWire", rename_all = "camelCase")]
pub struct CurrencyLimit {
    pub currency: CurrencyCode,
    pub planned_amount: Money,
    pub buffer_amount: Money,
    pub total_limit: Money,
    pub actual_amount: Money,
    pub remaining: Money,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyLimitWire {
    currency: CurrencyCode,
    #[serde(default)]
    planned_amount: Money,
    #[serde(default)]
    buffer_amount: Money,
    #[serde(default)]
    total_limit: Option<Money>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    actual_amount: Option<Money>,
    #[serde(default)]
    remaining: Option<Money>,
}

impl From<CurrencyLimitWire> for CurrencyLimit {
    fn from(wire: CurrencyLimitWire) -> Self {
        let total_limit = wire
            .total_limit
            .unwrap_or(wire.planned_amount + wire.buffer_amount);
        let actual_amount = wire.actual_amount.unwrap_or_default();
        Self {
            currency: wire.currency,
            planned_amount: wire.planned_amount,
            buffer_amount: wire.buffer_amount,
            total_limit,
            actual_amount,
            remaining: wire.remaining.unwrap_or(total_limit - actual_amount),
        }
    }
}

impl CurrencyLimit {
    /// Build a limit, deriving the total and the remaining balance
    pub fn new(currency: CurrencyCode, planned: Money, buffer: Money, actual: Money) -> Self {
        let total_limit = planned + buffer;
        Self {
            currency,
            planned_amount: planned,
            buffer_amount: buffer,
            total_limit,
            actual_amount: actual,
            remaining: total_limit - actual,
        }
    }

    /// A currency with a plan or with spend; inactive ones are not shown
    pub fn is_active(&self) -> bool {
        self.total_limit.is_positive() || self.actual_amount.is_positive()
    }

    /// Overspent in this currency (unclamped remaining below zero)
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Progress bar width in percent, clamped to 100
    ///
    /// With no limit set, any spend fills the bar and no spend leaves it empty.
    pub fn progress_width(&self) -> f64 {
        match self.actual_amount.ratio_percent(self.total_limit) {
            Some(pct) => pct.clamp(0.0, 100.0),
            None if self.actual_amount.is_positive() => 100.0,
            None => 0.0,
        }
    }

    /// Whether the stored figures satisfy the limit invariants
    pub fn is_consistent(&self) -> bool {
        self.total_limit == self.planned_amount + self.buffer_amount
            && self.remaining == self.total_limit - self.actual_amount
    }
}

impl fmt::Display for CurrencyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: limit {} | spent {} | remaining {}",
            self.currency, self.total_limit, self.actual_amount, self.remaining
        )
    }
}

/// A category's monthly plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BudgetItemWire", rename_all = "camelCase")]
pub struct BudgetItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,
    pub category_id: CategoryId,
    pub category_name: String,
    /// Discretionary plan for the category, in the base currency
    pub planned_amount: Money,
    /// Total limit in the base currency
    pub total_limit: Money,
    /// Part of the limit auto-calculated from planned expenses
    pub planned_expenses_sum: Money,
    pub currency_limits: Vec<CurrencyLimit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetItemWire {
    #[serde(default)]
    budget_id: Option<BudgetId>,
    category_id: CategoryId,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    planned_amount: Option<Money>,
    #[serde(default)]
    total_limit: Money,
    #[serde(default)]
    planned_expenses_sum: Money,
    #[serde(default, deserialize_with = "null_as_empty")]
    currency_limits: Vec<CurrencyLimit>,
}

impl From<BudgetItemWire> for BudgetItem {
    fn from(wire: BudgetItemWire) -> Self {
        Self {
            budget_id: wire.budget_id,
            category_id: wire.category_id,
            category_name: wire.category_name,
            planned_amount: wire.planned_amount.unwrap_or(wire.total_limit),
            total_limit: wire.total_limit,
            planned_expenses_sum: wire.planned_expenses_sum,
            currency_limits: wire.currency_limits,
        }
    }
}

impl BudgetItem {
    /// Create a base-currency-only item whose plan equals its limit
    pub fn new(category_id: CategoryId, name: impl Into<String>, total_limit: Money) -> Self {
        Self {
            budget_id: None,
            category_id,
            category_name: name.into(),
            planned_amount: total_limit,
            total_limit,
            planned_expenses_sum: Money::zero(),
            currency_limits: Vec::new(),
        }
    }

    /// Sum of buffer amounts across currency limits
    pub fn buffer_total(&self) -> Money {
        self.currency_limits.iter().map(|l| l.buffer_amount).sum()
    }

    /// `total_limit == planned_expenses_sum + Σ buffer_amount` when currency
    /// limits are present; items without them always hold
    pub fn limit_invariant_holds(&self) -> bool {
        self.currency_limits.is_empty()
            || self.total_limit == self.planned_expenses_sum + self.buffer_total()
    }
}

/// One fund's share of the month's income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDistribution {
    pub fund_name: String,
    #[serde(default)]
    pub expected_amount: Money,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub actual_amount: Option<Money>,
}

/// Money earmarked to flow from income into savings funds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDistributionSummary {
    #[serde(default)]
    pub total_expected_distribution: Money,
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub total_actual_distribution: Money,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub funds: Vec<FundDistribution>,
}

impl FundDistributionSummary {
    /// Build a summary whose totals are the sums over the funds
    ///
    /// A fund without an actual distribution contributes nothing to the
    /// actual total.
    pub fn from_funds(funds: Vec<FundDistribution>) -> Self {
        Self {
            total_expected_distribution: funds.iter().map(|f| f.expected_amount).sum(),
            total_actual_distribution: funds.iter().filter_map(|f| f.actual_amount).sum(),
            funds,
        }
    }
}

/// A monthly household budget record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    #[serde(default)]
    pub name: String,
    pub period: BudgetPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<CurrencyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_summary: Option<FundDistributionSummary>,
}

impl Budget {
    pub fn new(name: impl Into<String>, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            period,
            base_currency: None,
            distribution_summary: None,
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.period)
        } else {
            write!(f, "{} ({})", self.name, self.period)
        }
    }
}
