//! Per-user dialogue state and the shared stores behind the dispatcher.
//!
//! A dialogue collects the fields of one logical action across several
//! messages, one field per message, in fixed order. Nothing touches the
//! ledger until the final field arrives; cancelling or aborting simply
//! drops the state.

use std::{collections::HashMap, sync::Arc};

use engine::Ledger;
use tokio::sync::{Mutex, MutexGuard};

/// Fields collected so far by an expense dialogue.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpenseDraft {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// One in-progress multi-step dialogue. At most one per user.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Dialogue {
    /// `/add`: amount -> category -> description.
    Expense(ExpenseDraft),
    /// `/addrecurring`: amount -> category -> description -> frequency.
    Recurring(ExpenseDraft),
    /// `/setlimit`: category -> amount.
    Limit { category: Option<String> },
}

/// Outcome of feeding one message into a dialogue.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DialogueStep {
    /// More fields to collect: updated state plus the next prompt.
    Next(Dialogue, &'static str),
    /// All expense fields collected; commit in a single ledger call.
    CommitExpense {
        amount: f64,
        category: String,
        description: String,
        frequency: Option<String>,
    },
    /// Both limit fields collected.
    CommitLimit { category: String, amount: f64 },
    /// The amount failed to parse; the whole dialogue is dropped.
    InvalidAmount,
}

impl Dialogue {
    pub(crate) fn start_expense() -> (Self, &'static str) {
        (
            Dialogue::Expense(ExpenseDraft::default()),
            "Please enter the expense amount:",
        )
    }

    pub(crate) fn start_recurring() -> (Self, &'static str) {
        (
            Dialogue::Recurring(ExpenseDraft::default()),
            "Please enter the recurring expense amount:",
        )
    }

    pub(crate) fn start_limit() -> (Self, &'static str) {
        (
            Dialogue::Limit { category: None },
            "Please enter the category for the limit:",
        )
    }

    /// Consume one message and move to the next state. `self` is taken
    /// by value: the caller re-inserts the state only on
    /// [`DialogueStep::Next`], so commits and aborts leave nothing
    /// behind.
    pub(crate) fn advance(self, input: &str) -> DialogueStep {
        let input = input.trim();
        match self {
            Dialogue::Expense(draft) => match draft {
                ExpenseDraft { amount: None, .. } => match input.parse::<f64>() {
                    Ok(amount) => DialogueStep::Next(
                        Dialogue::Expense(ExpenseDraft {
                            amount: Some(amount),
                            ..ExpenseDraft::default()
                        }),
                        "Please enter the expense category:",
                    ),
                    Err(_) => DialogueStep::InvalidAmount,
                },
                ExpenseDraft {
                    amount: Some(amount),
                    category: None,
                    ..
                } => DialogueStep::Next(
                    Dialogue::Expense(ExpenseDraft {
                        amount: Some(amount),
                        category: Some(input.to_string()),
                        description: None,
                    }),
                    "Please enter the expense description:",
                ),
                ExpenseDraft {
                    amount: Some(amount),
                    category: Some(category),
                    ..
                } => DialogueStep::CommitExpense {
                    amount,
                    category,
                    description: input.to_string(),
                    frequency: None,
                },
            },
            Dialogue::Recurring(draft) => match draft {
                ExpenseDraft { amount: None, .. } => match input.parse::<f64>() {
                    Ok(amount) => DialogueStep::Next(
                        Dialogue::Recurring(ExpenseDraft {
                            amount: Some(amount),
                            ..ExpenseDraft::default()
                        }),
                        "Please enter the recurring expense category:",
                    ),
                    Err(_) => DialogueStep::InvalidAmount,
                },
                ExpenseDraft {
                    amount: Some(amount),
                    category: None,
                    ..
                } => DialogueStep::Next(
                    Dialogue::Recurring(ExpenseDraft {
                        amount: Some(amount),
                        category: Some(input.to_string()),
                        description: None,
                    }),
                    "Please enter the recurring expense description:",
                ),
                ExpenseDraft {
                    amount: Some(amount),
                    category: Some(category),
                    description: None,
                } => DialogueStep::Next(
                    Dialogue::Recurring(ExpenseDraft {
                        amount: Some(amount),
                        category: Some(category),
                        description: Some(input.to_string()),
                    }),
                    "Please enter the recurring expense frequency:",
                ),
                ExpenseDraft {
                    amount: Some(amount),
                    category: Some(category),
                    description: Some(description),
                } => DialogueStep::CommitExpense {
                    amount,
                    category,
                    description,
                    frequency: Some(input.to_string()),
                },
            },
            Dialogue::Limit { category: None } => DialogueStep::Next(
                Dialogue::Limit {
                    category: Some(input.to_string()),
                },
                "Please enter the limit amount:",
            ),
            Dialogue::Limit {
                category: Some(category),
            } => match input.parse::<f64>() {
                Ok(amount) => DialogueStep::CommitLimit { category, amount },
                Err(_) => DialogueStep::InvalidAmount,
            },
        }
    }
}

/// The in-memory ledger shared across handler invocations.
#[derive(Clone, Default)]
pub(crate) struct LedgerStore {
    inner: Arc<Mutex<Ledger>>,
}

impl LedgerStore {
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().await
    }
}

/// In-progress dialogues keyed by telegram user id.
#[derive(Clone, Default)]
pub(crate) struct DialogueStore {
    inner: Arc<Mutex<HashMap<u64, Dialogue>>>,
}

impl DialogueStore {
    pub(crate) async fn lock(&self) -> MutexGuard<'_, HashMap<u64, Dialogue>> {
        self.inner.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(step: DialogueStep) -> (Dialogue, &'static str) {
        match step {
            DialogueStep::Next(dialogue, prompt) => (dialogue, prompt),
            other => panic!("expected Next, got {other:?}"),
        }
    }

    #[test]
    fn expense_dialogue_visits_fields_in_order() {
        let (dialogue, prompt) = Dialogue::start_expense();
        assert_eq!(prompt, "Please enter the expense amount:");

        let (dialogue, prompt) = next(dialogue.advance("12.5"));
        assert_eq!(prompt, "Please enter the expense category:");

        let (dialogue, prompt) = next(dialogue.advance("food"));
        assert_eq!(prompt, "Please enter the expense description:");

        assert_eq!(
            dialogue.advance("lunch at work"),
            DialogueStep::CommitExpense {
                amount: 12.5,
                category: "food".to_string(),
                description: "lunch at work".to_string(),
                frequency: None,
            }
        );
    }

    #[test]
    fn recurring_dialogue_adds_a_frequency_step() {
        let (dialogue, _) = Dialogue::start_recurring();
        let (dialogue, _) = next(dialogue.advance("9.99"));
        let (dialogue, _) = next(dialogue.advance("media"));
        let (dialogue, prompt) = next(dialogue.advance("streaming"));
        assert_eq!(prompt, "Please enter the recurring expense frequency:");

        assert_eq!(
            dialogue.advance("monthly"),
            DialogueStep::CommitExpense {
                amount: 9.99,
                category: "media".to_string(),
                description: "streaming".to_string(),
                frequency: Some("monthly".to_string()),
            }
        );
    }

    #[test]
    fn limit_dialogue_collects_category_then_amount() {
        let (dialogue, prompt) = Dialogue::start_limit();
        assert_eq!(prompt, "Please enter the category for the limit:");

        let (dialogue, prompt) = next(dialogue.advance("food"));
        assert_eq!(prompt, "Please enter the limit amount:");

        assert_eq!(
            dialogue.advance("40"),
            DialogueStep::CommitLimit {
                category: "food".to_string(),
                amount: 40.0,
            }
        );
    }

    #[test]
    fn bad_amount_aborts_the_dialogue() {
        let (dialogue, _) = Dialogue::start_expense();
        assert_eq!(dialogue.advance("a lot"), DialogueStep::InvalidAmount);

        let (dialogue, _) = Dialogue::start_limit();
        let (dialogue, _) = next(dialogue.advance("food"));
        assert_eq!(dialogue.advance("cheap"), DialogueStep::InvalidAmount);
    }
}
