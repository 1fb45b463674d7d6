use serde::{Deserialize, Serialize};

use crate::domain::{
    CategoryTotal, Cents, FinancialSummary, Transaction, group_expenses_by_category, summarize,
};

/// Colors assigned to pie chart slices, cycled by slice position.
pub const CHART_PALETTE: [&str; 8] = [
    "#e74c3c", "#3498db", "#f39c12", "#2ecc71", "#9b59b6", "#1abc9c", "#34495e", "#e67e22",
];

pub fn chart_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub summary: FinancialSummary,
    pub categories: Vec<CategoryTotal>,
    pub chart: Vec<ChartSlice>,
}

/// One slice of the expense pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub category: String,
    pub amount: Cents,
    /// Share of total expenses, 0-100
    pub percentage: f64,
    pub color: String,
}

impl FinancialReport {
    pub fn has_expenses(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// Summary, category breakdown and chart data for a snapshot.
pub fn build_report(transactions: &[Transaction]) -> FinancialReport {
    let summary = summarize(transactions);
    let categories = group_expenses_by_category(transactions);

    let chart = categories
        .iter()
        .enumerate()
        .map(|(index, total)| ChartSlice {
            category: total.category.clone(),
            amount: total.amount,
            percentage: if summary.expenses > 0 {
                (total.amount as f64 / summary.expenses as f64) * 100.0
            } else {
                0.0
            },
            color: chart_color(index).to_string(),
        })
        .collect();

    FinancialReport {
        summary,
        categories,
        chart,
    }
}
