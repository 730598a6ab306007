//! Actual expense transactions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A real spending transaction, in the base currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    pub fn new(category_id: CategoryId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            category_id,
            amount,
            date,
            description: String::new(),
        }
    }
}
