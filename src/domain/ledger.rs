use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Cents, Transaction};

/// Aggregate figures derived from a transaction snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub revenues: Cents,
    pub expenses: Cents,
    pub balance: Cents,
}

/// Total expense magnitude for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Cents,
}

/// Compute revenues, expenses and balance.
/// Revenues = sum of positive amounts, expenses = sum of |negative amounts|.
/// Zero amounts count on neither side. Totals saturate at the `Cents` bounds.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let (revenues, expenses) =
        transactions
            .iter()
            .fold((0 as Cents, 0 as Cents), |(revenues, expenses), transaction| {
                if transaction.amount > 0 {
                    (revenues.saturating_add(transaction.amount), expenses)
                } else if transaction.amount < 0 {
                    (revenues, expenses.saturating_add(transaction.amount.saturating_abs()))
                } else {
                    (revenues, expenses)
                }
            });

    FinancialSummary {
        revenues,
        expenses,
        balance: revenues.saturating_sub(expenses),
    }
}

/// Group expense magnitudes by category, largest first.
/// Equal totals keep the order in which their category was first seen.
pub fn group_expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        match index.get(transaction.category.as_str()) {
            Some(&i) => {
                totals[i].amount = totals[i]
                    .amount
                    .saturating_add(transaction.amount.saturating_abs())
            }
            None => {
                index.insert(transaction.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    amount: transaction.amount.saturating_abs(),
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// Expense totals keyed by category, the shape used by the `/summary` endpoint.
pub fn category_map(transactions: &[Transaction]) -> BTreeMap<String, Cents> {
    group_expenses_by_category(transactions)
        .into_iter()
        .map(|total| (total.category, total.amount))
        .collect()
}
