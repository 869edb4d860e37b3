//! Filtering and aggregates over a snapshot of expenses
//!
//! Pure functions, nothing here touches storage.

use chrono::{Duration, Local, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Category, Expense};

/// Category part of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    #[serde(untagged)]
    Only(Category),
}

/// Time window relative to the start of today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl Period {
    /// Earliest date still inside the window, `None` for no bound
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::Today => Some(today),
            Period::Week => Some(today - Duration::days(7)),
            // Day-of-month is clamped to the end of the previous month
            Period::Month => Some(today.checked_sub_months(Months::new(1)).unwrap_or(today)),
        }
    }
}

/// UI-side filter choice; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub period: Period,
    /// Case-insensitive substring of the description; empty matches everything
    #[serde(default)]
    pub search: String,
}

impl FilterSpec {
    pub fn category(mut self, category: Category) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Totals for the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: Decimal,
    pub count: usize,
    /// Zero when there are no expenses
    pub average: Decimal,
}

/// Visible subset relative to the local calendar day
pub fn apply(expenses: &[Expense], spec: &FilterSpec) -> Vec<Expense> {
    apply_on(expenses, spec, Local::now().date_naive())
}

/// Visible subset relative to `today`
///
/// Category, then period, then search. Order is preserved.
pub fn apply_on(expenses: &[Expense], spec: &FilterSpec, today: NaiveDate) -> Vec<Expense> {
    let cutoff = spec.period.cutoff(today);
    let needle = spec.search.to_lowercase();

    expenses
        .iter()
        .filter(|e| match spec.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => e.category == category,
        })
        .filter(|e| cutoff.map_or(true, |from| e.date >= from))
        .filter(|e| needle.is_empty() || e.description.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Sums saturate at `Decimal::MAX` instead of overflowing
pub fn aggregate(expenses: &[Expense]) -> Summary {
    let total = expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount));
    let count = expenses.len();
    let average = if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    };
    Summary {
        total,
        count,
        average,
    }
}

/// Sum per category, every listed category present
///
/// The chart is fed the full, unfiltered list while the stats panel uses
/// the filtered one. That mismatch is existing behavior and is kept.
pub fn category_totals(
    expenses: &[Expense],
    categories: &[Category],
) -> BTreeMap<Category, Decimal> {
    let mut totals: BTreeMap<Category, Decimal> =
        categories.iter().map(|c| (*c, Decimal::ZERO)).collect();
    for expense in expenses {
        if let Some(sum) = totals.get_mut(&expense.category) {
            *sum = sum.saturating_add(expense.amount);
        }
    }
    totals
}
