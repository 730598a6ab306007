//! Category CLI commands
//!
//! Hiding a category only removes its row from the terminal report and
//! exports. Totals keep counting it.

use clap::Subcommand;

use super::selection::BudgetSelection;
use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetItem, CategoryId, HiddenCategories};

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Hide a category from reports
    Hide {
        /// Category name or ID
        category: String,
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// Show a hidden category again
    Unhide {
        /// Category name or ID
        category: String,
        #[command(flatten)]
        selection: BudgetSelection,
    },

    /// List hidden categories
    Hidden {
        #[command(flatten)]
        selection: BudgetSelection,
    },
}

/// Handle category commands
pub fn handle_category_command(
    paths: &BudgetPaths,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BudgetResult<()> {
    let file = paths.hidden_categories_file();
    let mut hidden = HiddenCategories::load(&file)?;

    match cmd {
        CategoryCommands::Hide {
            category,
            selection,
        } => {
            let dashboard = selection.open(paths, settings)?;
            let id = resolve_category(dashboard.items(), &category)?;
            if hidden.hide(id) {
                hidden.save(&file)?;
                println!("Hidden category: {}", category);
            } else {
                println!("Category '{}' is already hidden", category);
            }
        }
        CategoryCommands::Unhide {
            category,
            selection,
        } => {
            let dashboard = selection.open(paths, settings)?;
            let id = resolve_category(dashboard.items(), &category)?;
            if hidden.unhide(id) {
                hidden.save(&file)?;
                println!("Category '{}' is visible again", category);
            } else {
                println!("Category '{}' was not hidden", category);
            }
        }
        CategoryCommands::Hidden { selection } => {
            if hidden.is_empty() {
                println!("No hidden categories.");
                return Ok(());
            }
            let dashboard = selection.open(paths, settings)?;
            for id in hidden.iter() {
                let name = dashboard
                    .items()
                    .iter()
                    .find(|item| item.category_id == *id)
                    .map(|item| item.category_name.as_str())
                    .unwrap_or("(not in this budget)");
                println!("{}  {}", id, name);
            }
        }
    }

    Ok(())
}

/// Find a category by ID, or by name among the budget's items
///
/// A well-formed ID is accepted even when no item carries it, so categories
/// of other budgets can be hidden too.
fn resolve_category(items: &[BudgetItem], identifier: &str) -> BudgetResult<CategoryId> {
    if let Ok(id) = CategoryId::parse(identifier.trim()) {
        return Ok(id);
    }

    let matches: Vec<&BudgetItem> = items
        .iter()
        .filter(|item| item.category_name.eq_ignore_ascii_case(identifier.trim()))
        .collect();

    match matches.as_slice() {
        [item] => Ok(item.category_id),
        [] => Err(BudgetError::NotFound {
            entity_type: "Category",
            identifier: identifier.to_string(),
        }),
        _ => Err(BudgetError::Validation(format!(
            "Category name '{}' is ambiguous, use its ID",
            identifier
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_resolve_by_name_or_id() {
        let rent = BudgetItem::new(CategoryId::new(), "Rent", Money::from_units(900));
        let food = BudgetItem::new(CategoryId::new(), "Food", Money::from_units(400));
        let items = vec![rent.clone(), food];

        assert_eq!(resolve_category(&items, "rent").unwrap(), rent.category_id);
        assert_eq!(
            resolve_category(&items, &rent.category_id.to_string()).unwrap(),
            rent.category_id
        );
        assert!(resolve_category(&items, "Travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_ambiguous_name() {
        let items = vec![
            BudgetItem::new(CategoryId::new(), "Gifts", Money::from_units(50)),
            BudgetItem::new(CategoryId::new(), "gifts", Money::from_units(70)),
        ];
        assert!(resolve_category(&items, "Gifts").unwrap_err().is_validation());
    }
}
