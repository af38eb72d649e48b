//! The module contains the `Expense` type representing a recorded expense.
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// A single recorded expense. Immutable once stored.
///
/// The serde renames match the CSV export header:
/// `ID,Amount,Category,Description,Month,Frequency`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expense {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Year-month key ("YYYY-MM") derived from the clock at insertion.
    #[serde(rename = "Month")]
    pub period: String,
    /// Present only for recurring expenses.
    #[serde(rename = "Frequency")]
    pub frequency: Option<String>,
}

impl Expense {
    pub fn new(
        amount: f64,
        category: String,
        description: String,
        frequency: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            category,
            description,
            period: Utc::now().format("%Y-%m").to_string(),
            frequency,
        }
    }
}

/// Build the "YYYY-MM" period key used for month queries and report
/// grouping. The month is always zero-padded to two digits.
pub fn period_key(year: i32, month: u32) -> String {
    format!("{year}-{month:02}")
}
