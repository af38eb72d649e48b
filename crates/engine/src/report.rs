//! Aggregated text views over ledger data.
//!
//! Every function here is a pure function of the records it receives;
//! the caller decides beforehand whether the user has any sequence at
//! all (the "no recorded expenses" case never reaches this module).

use crate::{Expense, Limit};

/// Line-per-record listing for a single category, or an explicit
/// "none found" when the user has records but none match.
pub fn category_view(category: &str, records: &[&Expense]) -> String {
    if records.is_empty() {
        return format!("No expenses found for category {category}.");
    }

    let mut out = format!("Expenses for category {category}:\n\n");
    for expense in records {
        out.push_str(&format!(
            "ID: {}, Amount: {}, Description: {}\n",
            expense.id, expense.amount, expense.description
        ));
    }
    out
}

/// Line-per-record listing for a single "YYYY-MM" period.
pub fn month_view(period: &str, records: &[&Expense]) -> String {
    if records.is_empty() {
        return format!("No expenses found for {period}.");
    }

    let mut out = format!("Expenses for {period}:\n\n");
    for expense in records {
        out.push_str(&format!(
            "ID: {}, Amount: {}, Category: {}, Description: {}\n",
            expense.id, expense.amount, expense.category, expense.description
        ));
    }
    out
}

/// Per-period, per-category totals over all of a user's records.
///
/// Periods appear in first-encountered order, categories in
/// first-encountered order within their period. Nothing is sorted.
pub fn monthly_report(records: &[Expense]) -> String {
    let mut out = String::from("Monthly Expense Report:\n\n");

    let mut periods: Vec<&str> = Vec::new();
    for expense in records {
        if !periods.contains(&expense.period.as_str()) {
            periods.push(&expense.period);
        }
    }

    for period in periods {
        out.push_str(&format!("Month: {period}\n"));

        let mut totals: Vec<(&str, f64)> = Vec::new();
        for expense in records.iter().filter(|e| e.period == period) {
            match totals
                .iter_mut()
                .find(|(category, _)| *category == expense.category)
            {
                Some((_, total)) => *total += expense.amount,
                None => totals.push((&expense.category, expense.amount)),
            }
        }

        for (category, total) in totals {
            out.push_str(&format!("{category}: {total}\n"));
        }
        out.push('\n');
    }

    out
}

/// All category limits in insertion order, or "none set."
pub fn limits_view(limits: &[Limit]) -> String {
    if limits.is_empty() {
        return "No category limits set.".to_string();
    }

    let mut out = String::from("Current category limits:\n");
    for limit in limits {
        out.push_str(&format!("{}: {}\n", limit.category, limit.amount));
    }
    out
}
