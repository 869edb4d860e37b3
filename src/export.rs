//! CSV export of the visible expense list

use chrono::NaiveDate;

use crate::constants::ERR_NOTHING_TO_EXPORT;
use crate::error::{LedgerError, Result};
use crate::models::Expense;

const HEADERS: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// Render expenses as CSV, one row each in the given order
pub fn to_csv(expenses: &[Expense]) -> Result<String> {
    if expenses.is_empty() {
        return Err(LedgerError::InvalidInput(ERR_NOTHING_TO_EXPORT.to_string()));
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for expense in expenses {
        writer.write_record([
            format_date(expense.date),
            expense.description.clone(),
            expense.category.label().to_string(),
            format!("{:.2}", expense.amount),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Io(e.into_error()))?;
    tracing::info!("Exported {} expenses", expenses.len());
    String::from_utf8(bytes).map_err(|e| LedgerError::InvalidInput(e.to_string()))
}

/// Download name for an export made on `date`
pub fn file_name(date: NaiveDate) -> String {
    format!("expenses-{}.csv", date.format("%Y-%m-%d"))
}

/// `5 Jan 2024`
fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}
