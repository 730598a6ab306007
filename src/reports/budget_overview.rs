//! Budget Overview Report
//!
//! Headline availability figures, one row per budget category with its
//! per-currency breakdown, spend outside any budget item and per-currency
//! totals. Hidden categories drop out of the category and unbudgeted rows
//! only; every total still includes them.

use serde::Serialize;

use crate::api::BudgetApi;
use crate::display::{
    format_balance, format_bar, format_percentage, left_align, right_align, separator, truncate,
};
use crate::models::{format_money, BudgetPeriod, CategoryId, CurrencyCode, HiddenCategories, Money};
use crate::services::{BudgetDashboard, BudgetStats, CategoryBudgetRow, CurrencyTotals};

const WIDTH: usize = 80;
const BAR_WIDTH: usize = 10;

/// Spend in a category that has no budget item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbudgetedRow {
    pub category_id: CategoryId,
    pub actual_amount: Money,
}

/// Budget Overview Report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverviewReport {
    pub budget_name: Option<String>,
    pub period: BudgetPeriod,
    pub base_currency: CurrencyCode,
    pub stats: BudgetStats,
    /// Visible category rows
    pub categories: Vec<CategoryBudgetRow>,
    pub hidden_count: usize,
    pub unbudgeted: Vec<UnbudgetedRow>,
    pub currency_totals: CurrencyTotals,
}

impl BudgetOverviewReport {
    /// Generate the report from the dashboard's current snapshot
    ///
    /// The budget's own base currency wins over `default_currency`.
    pub fn generate<A: BudgetApi>(
        dashboard: &mut BudgetDashboard<A>,
        default_currency: &CurrencyCode,
        hidden: &HiddenCategories,
    ) -> Self {
        let (budget_name, base_currency) = match dashboard.budget() {
            Some(budget) => (
                Some(budget.name.clone()),
                budget
                    .base_currency
                    .clone()
                    .unwrap_or_else(|| default_currency.clone()),
            ),
            None => (None, default_currency.clone()),
        };

        let stats = dashboard.stats().clone();
        let (categories, hidden_rows): (Vec<_>, Vec<_>) = dashboard
            .category_statuses()
            .into_iter()
            .partition(|row| !hidden.is_hidden(&row.category_id));
        let unbudgeted = dashboard
            .unbudgeted_spend()
            .into_iter()
            .filter(|(category_id, _)| !hidden.is_hidden(category_id))
            .map(|(category_id, actual_amount)| UnbudgetedRow {
                category_id,
                actual_amount,
            })
            .collect();

        Self {
            budget_name,
            period: dashboard.period().clone(),
            base_currency,
            stats,
            categories,
            hidden_count: hidden_rows.len(),
            unbudgeted,
            currency_totals: dashboard.currency_totals(),
        }
    }

    fn money(&self, amount: Money) -> String {
        format_money(amount, &self.base_currency)
    }

    fn title(&self) -> String {
        match &self.budget_name {
            Some(name) if !name.is_empty() => format!("{} ({})", name, self.period),
            _ => self.period.to_string(),
        }
    }

    /// Headline figures and supporting subtotals
    pub fn format_summary(&self) -> String {
        let s = &self.stats;
        let mut output = String::new();

        output.push_str(&format!("Budget Overview - {}\n", self.title()));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<26}{}\n",
            "Available for planning:",
            format_balance(s.available_for_planning, &self.base_currency)
        ));
        output.push_str(&format!(
            "{:<26}{}\n\n",
            "Actually available:",
            format_balance(s.actually_available, &self.base_currency)
        ));

        output.push_str(&format!(
            "{:<12}expected {}  received {}  pending {}\n",
            "Income",
            self.money(s.expected_income),
            self.money(s.received_income),
            self.money(s.pending_income)
        ));
        output.push_str(&format!(
            "{:<12}total {}  pending {}  confirmed {}\n",
            "Planned",
            self.money(s.total_planned_expenses),
            self.money(s.pending_planned),
            self.money(s.confirmed_planned)
        ));
        output.push_str(&format!(
            "{:<12}expected {}  actual {}\n",
            "Funds",
            self.money(s.expected_fund_distributions),
            self.money(s.actual_fund_distributions)
        ));
        output.push_str(&format!(
            "{:<12}planned {}  actual {}  variance {}{}\n",
            "Categories",
            self.money(s.total_planned),
            self.money(s.total_actual),
            self.money(s.variance),
            if s.is_over_budget { "  OVER BUDGET" } else { "" }
        ));

        output
    }

    /// Category rows with per-currency lines and currency totals
    pub fn format_limits(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} {} {} {}\n",
            left_align("Category", 26),
            right_align("Limit", 12),
            right_align("Spent", 12),
            right_align("Remaining", 12),
            "Progress"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("  No budget categories\n");
        }

        for row in &self.categories {
            let status = &row.status;
            let percent = status.progress_or_zero();
            let marker = if status.is_over_budget { " !" } else { "" };
            output.push_str(&format!(
                "{} {} {} {} {} {}{}\n",
                left_align(&truncate(&row.category_name, 26), 26),
                right_align(&row.total_limit.to_string(), 12),
                right_align(&row.actual_amount.to_string(), 12),
                right_align(&status.remaining.to_string(), 12),
                format_bar(percent as f64, 100.0, BAR_WIDTH),
                right_align(&format!("{}%", percent), 4),
                marker
            ));

            for currency_row in status.currency_rows() {
                let marker = if currency_row.is_overspent { " !" } else { "" };
                output.push_str(&format!(
                    "{} {} {} {} {} {}{}\n",
                    left_align(&format!("    {}", currency_row.currency), 26),
                    right_align(&currency_row.total_limit.to_string(), 12),
                    right_align(&currency_row.actual_amount.to_string(), 12),
                    right_align(&currency_row.remaining.to_string(), 12),
                    format_bar(currency_row.progress_width, 100.0, BAR_WIDTH),
                    right_align(&format_percentage(currency_row.progress_width), 4),
                    marker
                ));
            }
        }

        if !self.unbudgeted.is_empty() {
            output.push_str("\nSpend outside budget categories\n");
            for row in &self.unbudgeted {
                output.push_str(&format!(
                    "  {} {}\n",
                    left_align(&row.category_id.short(), 24),
                    right_align(&row.actual_amount.to_string(), 12)
                ));
            }
        }

        if !self.currency_totals.is_empty() {
            output.push_str("\nCurrency totals\n");
            for (currency, total) in self.currency_totals.iter() {
                let marker = if total.is_over_budget() { " !" } else { "" };
                output.push_str(&format!(
                    "  {:<6} limit {}  spent {}  remaining {}{}\n",
                    currency.as_str(),
                    format_money(total.total_limit, currency),
                    format_money(total.actual_amount, currency),
                    format_money(total.remaining, currency),
                    marker
                ));
            }
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str("! = Over budget");
        if self.hidden_count > 0 {
            output.push_str(&format!("   ({} hidden categories)", self.hidden_count));
        }
        output.push('\n');

        output
    }

    /// Format the full report for terminal display
    pub fn format_terminal(&self) -> String {
        format!("{}\n{}", self.format_summary(), self.format_limits())
    }

    /// Categories classified as over budget
    pub fn over_budget_categories(&self) -> Vec<&CategoryBudgetRow> {
        self.categories
            .iter()
            .filter(|c| c.status.is_over_budget)
            .collect()
    }
}
