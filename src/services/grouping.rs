//! Grouping helpers shared by the aggregator and the calculator

use std::collections::{BTreeMap, HashMap};
use std::ops::AddAssign;

use crate::models::{BudgetItem, CategoryId, CurrencyCode, CurrencyLimit, Expense, Money};

/// Real spend per category, summed from expense rows
pub fn actual_by_category(expenses: &[Expense]) -> HashMap<CategoryId, Money> {
    let mut totals: HashMap<CategoryId, Money> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category_id).or_default() += expense.amount;
    }
    totals
}

/// Sum values per currency, ordered by currency code
pub fn sum_by_currency<'a, T, I>(pairs: I) -> BTreeMap<CurrencyCode, T>
where
    T: Default + AddAssign,
    I: IntoIterator<Item = (&'a CurrencyCode, T)>,
{
    let mut totals: BTreeMap<CurrencyCode, T> = BTreeMap::new();
    for (currency, amount) in pairs {
        *totals.entry(currency.clone()).or_default() += amount;
    }
    totals
}

/// Lookup table over one snapshot of budget items
///
/// When a category or a (category, currency) pair appears more than once the
/// first occurrence wins, the same answer a front-to-back scan would give.
#[derive(Debug)]
pub struct CategoryCurrencyIndex<'a> {
    items: &'a [BudgetItem],
    by_category: HashMap<CategoryId, usize>,
    by_currency: HashMap<(CategoryId, CurrencyCode), (usize, usize)>,
}

impl<'a> CategoryCurrencyIndex<'a> {
    pub fn build(items: &'a [BudgetItem]) -> Self {
        let mut by_category = HashMap::with_capacity(items.len());
        let mut by_currency = HashMap::new();

        for (item_pos, item) in items.iter().enumerate() {
            by_category.entry(item.category_id).or_insert(item_pos);
            for (limit_pos, limit) in item.currency_limits.iter().enumerate() {
                by_currency
                    .entry((item.category_id, limit.currency.clone()))
                    .or_insert((item_pos, limit_pos));
            }
        }

        Self {
            items,
            by_category,
            by_currency,
        }
    }

    pub fn item(&self, category_id: &CategoryId) -> Option<&'a BudgetItem> {
        self.by_category.get(category_id).map(|&pos| &self.items[pos])
    }

    pub fn limit(&self, category_id: &CategoryId, currency: &CurrencyCode) -> Option<&'a CurrencyLimit> {
        self.by_currency
            .get(&(*category_id, currency.clone()))
            .map(|&(item_pos, limit_pos)| &self.items[item_pos].currency_limits[limit_pos])
    }

    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn test_actual_by_category() {
        let food = CategoryId::new();
        let rent = CategoryId::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let expenses = vec![
            Expense::new(food, Money::from_units(1000), date),
            Expense::new(rent, Money::from_units(30000), date),
            Expense::new(food, Money::from_cents(2550), date),
        ];

        let totals = actual_by_category(&expenses);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&food], Money::from_cents(102550));
        assert_eq!(totals[&rent], Money::from_units(30000));
        assert!(actual_by_category(&[]).is_empty());
    }

    #[test]
    fn test_sum_by_currency() {
        let usd = code("USD");
        let eur = code("EUR");
        let totals = sum_by_currency([
            (&usd, Money::from_units(10)),
            (&eur, Money::from_units(5)),
            (&usd, Money::from_units(7)),
        ]);

        let keys: Vec<&str> = totals.keys().map(|c| c.as_str()).collect();
        assert_eq!(keys, vec!["EUR", "USD"]);
        assert_eq!(totals[&usd], Money::from_units(17));
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let usd = code("USD");
        let eur = code("EUR");
        let mut travel = BudgetItem::new(CategoryId::new(), "Travel", Money::from_units(500));
        travel.currency_limits = vec![
            CurrencyLimit::new(usd.clone(), Money::from_units(200), Money::from_units(50), Money::zero()),
            CurrencyLimit::new(eur.clone(), Money::from_units(100), Money::zero(), Money::zero()),
        ];
        let food = BudgetItem::new(CategoryId::new(), "Food", Money::from_units(300));
        let items = vec![travel.clone(), food.clone()];

        let index = CategoryCurrencyIndex::build(&items);
        assert_eq!(index.len(), 2);
        assert_eq!(index.item(&food.category_id), Some(&items[1]));

        let linear = items
            .iter()
            .find(|i| i.category_id == travel.category_id)
            .and_then(|i| i.currency_limits.iter().find(|l| l.currency == eur));
        assert_eq!(index.limit(&travel.category_id, &eur), linear);
        assert!(index.limit(&food.category_id, &usd).is_none());
        assert!(index.item(&CategoryId::new()).is_none());
    }
}
