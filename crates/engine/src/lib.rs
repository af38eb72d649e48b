//! In-memory expense ledger.
//!
//! The ledger owns two pieces of process-lifetime state: the per-user
//! sequence of [`Expense`] records and the per-category spending limits.
//! Everything here is synchronous; callers serialize access.
//!
//! A user's sequence is created on first insertion. [`Ledger::clear`]
//! empties the sequence in place but keeps the map entry, so
//! "present but empty" and "never recorded anything" stay distinct.
//! [`Ledger::total`] exposes that distinction through its `Option`.
use std::collections::HashMap;

pub use entry::{Expense, period_key};
pub use error::ExportError;

mod entry;
mod error;
pub mod report;

/// A per-category ceiling. Exceeding it warns the user, never blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct Limit {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Default)]
pub struct Ledger {
    expenses: HashMap<u64, Vec<Expense>>,
    limits: Vec<Limit>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new expense to the user's sequence, creating the
    /// sequence if absent. Returns the generated record id.
    pub fn add(
        &mut self,
        user_id: u64,
        amount: f64,
        category: &str,
        description: &str,
        frequency: Option<&str>,
    ) -> String {
        let expense = Expense::new(
            amount,
            category.to_string(),
            description.to_string(),
            frequency.map(str::to_string),
        );
        let id = expense.id.clone();
        self.expenses.entry(user_id).or_default().push(expense);
        id
    }

    /// Remove the record with the given id. Returns whether a record
    /// was found; an absent user or unknown id is not an error.
    pub fn delete(&mut self, user_id: u64, expense_id: &str) -> bool {
        let Some(records) = self.expenses.get_mut(&user_id) else {
            return false;
        };
        match records.iter().position(|expense| expense.id == expense_id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the user's sequence in place. The map entry survives, so a
    /// cleared user still counts as having a (zero-sum) sequence.
    pub fn clear(&mut self, user_id: u64) {
        if let Some(records) = self.expenses.get_mut(&user_id) {
            records.clear();
        }
    }

    /// Whether the user has a sequence at all, empty or not.
    pub fn contains_user(&self, user_id: u64) -> bool {
        self.expenses.contains_key(&user_id)
    }

    /// All records of a user, in insertion order. Empty for absent users.
    pub fn expenses(&self, user_id: u64) -> &[Expense] {
        self.expenses
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records whose category matches exactly (case-sensitive).
    pub fn by_category(&self, user_id: u64, category: &str) -> Vec<&Expense> {
        self.expenses(user_id)
            .iter()
            .filter(|expense| expense.category == category)
            .collect()
    }

    /// Records whose period matches the given "YYYY-MM" key exactly.
    pub fn by_month(&self, user_id: u64, period: &str) -> Vec<&Expense> {
        self.expenses(user_id)
            .iter()
            .filter(|expense| expense.period == period)
            .collect()
    }

    /// Sum of all of the user's amounts. `None` when the user has no
    /// sequence at all; `Some(0.0)` when the sequence exists but is empty.
    pub fn total(&self, user_id: u64) -> Option<f64> {
        self.expenses
            .get(&user_id)
            .map(|records| records.iter().map(|expense| expense.amount).sum())
    }

    /// Insert or overwrite the limit for a category. An overwrite keeps
    /// the category's original position in the limits listing.
    pub fn set_limit(&mut self, category: &str, amount: f64) {
        match self
            .limits
            .iter_mut()
            .find(|limit| limit.category == category)
        {
            Some(limit) => limit.amount = amount,
            None => self.limits.push(Limit {
                category: category.to_string(),
                amount,
            }),
        }
    }

    /// All limits, in insertion order.
    pub fn limits(&self) -> &[Limit] {
        &self.limits
    }

    /// True iff a limit exists for the category and the amount strictly
    /// exceeds it.
    pub fn exceeds_limit(&self, category: &str, amount: f64) -> bool {
        self.limits
            .iter()
            .any(|limit| limit.category == category && amount > limit.amount)
    }

    /// Serialize all of a user's records as CSV with the header
    /// `ID,Amount,Category,Description,Month,Frequency`. The artifact is
    /// regenerated in full on every call.
    pub fn export_csv(&self, user_id: u64) -> Result<Vec<u8>, ExportError> {
        // The header is written by hand so a cleared-but-present user
        // still gets a well-formed (header-only) file.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record([
            "ID",
            "Amount",
            "Category",
            "Description",
            "Month",
            "Frequency",
        ])?;
        for expense in self.expenses(user_id) {
            writer.serialize(expense)?;
        }
        writer.into_inner().map_err(|_| ExportError::Flush)
    }
}
