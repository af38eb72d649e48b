//! Transport-free command dispatch.
//!
//! One inbound message becomes zero or more replies. The router owns
//! the command-to-operation mapping and the dialogue lifecycle; it
//! knows nothing about Telegram. Single-shot commands and completed
//! dialogues funnel into the same commit helpers, so both shapes
//! produce identical confirmations and limit warnings.

use std::collections::HashMap;

use engine::{Ledger, period_key, report};

use crate::{
    commands::{self, Command, CommandError},
    state::{Dialogue, DialogueStep},
};

const NO_EXPENSES: &str = "You have no recorded expenses.";

/// One outbound message.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Reply {
    Text(String),
    /// Text delivered together with the command keyboard.
    Menu(String),
    /// File artifact, handed to the transport as an in-memory document.
    Document { file_name: String, bytes: Vec<u8> },
}

/// Handle one inbound message for `user_id` and return the replies in
/// sending order. An empty vector means the message is ignored
/// (non-command text outside a dialogue).
pub(crate) fn dispatch(
    ledger: &mut Ledger,
    dialogues: &mut HashMap<u64, Dialogue>,
    user_id: u64,
    text: &str,
) -> Vec<Reply> {
    let command = commands::parse_command(text);

    // A pending dialogue consumes free text. A command aborts it first:
    // /cancel silently, anything else with a notice before the command
    // itself is processed.
    if let Some(dialogue) = dialogues.remove(&user_id) {
        match command {
            None => return advance_dialogue(ledger, dialogues, user_id, dialogue, text),
            Some(Command::Cancel) => {
                tracing::info!("User {user_id} cancelled the current operation");
                return vec![text_reply("Operation cancelled.")];
            }
            Some(command) => {
                tracing::info!("User {user_id} aborted a dialogue by sending another command");
                let mut replies = vec![text_reply("Operation cancelled.")];
                replies.extend(handle_command(ledger, dialogues, user_id, command));
                return replies;
            }
        }
    }

    match command {
        Some(command) => handle_command(ledger, dialogues, user_id, command),
        None => Vec::new(),
    }
}

fn handle_command(
    ledger: &mut Ledger,
    dialogues: &mut HashMap<u64, Dialogue>,
    user_id: u64,
    command: Command,
) -> Vec<Reply> {
    match command {
        Command::Start => {
            tracing::info!("User {user_id} started the bot");
            vec![Reply::Menu(
                "Welcome to the Expense Tracker Bot!".to_string(),
            )]
        }
        Command::Help => {
            tracing::info!("User {user_id} requested help");
            vec![text_reply(help_text())]
        }
        Command::Add { args } if args.is_empty() => {
            start_dialogue(dialogues, user_id, Dialogue::start_expense())
        }
        Command::Add { args } => match commands::parse_add(&args) {
            Ok(add) => commit_add(ledger, user_id, add),
            Err(err) => usage_reply(user_id, "/add", err),
        },
        Command::AddRecurring { args } if args.is_empty() => {
            start_dialogue(dialogues, user_id, Dialogue::start_recurring())
        }
        Command::AddRecurring { args } => match commands::parse_add_recurring(&args) {
            Ok(add) => commit_add(ledger, user_id, add),
            Err(err) => usage_reply(user_id, "/addrecurring", err),
        },
        Command::SetLimit { args } if args.is_empty() => {
            start_dialogue(dialogues, user_id, Dialogue::start_limit())
        }
        Command::SetLimit { args } => match commands::parse_set_limit(&args) {
            Ok((category, limit)) => commit_limit(ledger, user_id, category, limit),
            Err(err) => usage_reply(user_id, "/setlimit", err),
        },
        Command::Delete { args } => match commands::parse_delete(&args) {
            Ok(expense_id) => delete_expense(ledger, user_id, expense_id),
            Err(err) => usage_reply(user_id, "/delete", err),
        },
        Command::Total => match ledger.total(user_id) {
            Some(total) => {
                tracing::info!("User {user_id} viewed total expenses: {total}");
                vec![text_reply(format!("Your total expenses: {total}"))]
            }
            None => empty_state(user_id, "view total expenses"),
        },
        Command::Category { args } => match commands::parse_category(&args) {
            Ok(category) => {
                if !ledger.contains_user(user_id) {
                    return empty_state(user_id, "view category expenses");
                }
                tracing::info!("User {user_id} viewed expenses for category {category}");
                let records = ledger.by_category(user_id, category);
                vec![text_reply(report::category_view(category, &records))]
            }
            Err(err) => usage_reply(user_id, "/category", err),
        },
        Command::Month { args } => match commands::parse_month(&args) {
            Ok((month, year)) => {
                if !ledger.contains_user(user_id) {
                    return empty_state(user_id, "view month expenses");
                }
                let period = period_key(year, month);
                tracing::info!("User {user_id} viewed expenses for month {period}");
                let records = ledger.by_month(user_id, &period);
                vec![text_reply(report::month_view(&period, &records))]
            }
            Err(err) => usage_reply(user_id, "/month", err),
        },
        Command::Clear => {
            if !ledger.contains_user(user_id) {
                return empty_state(user_id, "clear expenses");
            }
            ledger.clear(user_id);
            tracing::info!("User {user_id} cleared all expenses");
            vec![text_reply("All expenses cleared.")]
        }
        Command::Report => {
            if !ledger.contains_user(user_id) {
                return empty_state(user_id, "generate a report");
            }
            tracing::info!("User {user_id} generated an expense report");
            vec![text_reply(report::monthly_report(ledger.expenses(user_id)))]
        }
        Command::Limits => {
            tracing::info!("User {user_id} viewed category limits");
            vec![text_reply(report::limits_view(ledger.limits()))]
        }
        Command::Export => {
            if !ledger.contains_user(user_id) {
                return empty_state(user_id, "export expenses");
            }
            match ledger.export_csv(user_id) {
                Ok(bytes) => {
                    tracing::info!("User {user_id} exported expenses");
                    vec![Reply::Document {
                        file_name: format!("expenses_{user_id}.csv"),
                        bytes,
                    }]
                }
                Err(err) => {
                    tracing::error!("CSV export failed for user {user_id}: {err}");
                    vec![text_reply("Failed to export expenses. Try again later!")]
                }
            }
        }
        Command::Cancel => {
            // No dialogue pending; dispatch() already handled the other case.
            vec![text_reply("No operation in progress.")]
        }
        Command::Unknown => {
            tracing::warn!("User {user_id} sent an unknown command");
            vec![text_reply(
                "Sorry, I didn't understand that command. Use /help to see available commands.",
            )]
        }
    }
}

fn advance_dialogue(
    ledger: &mut Ledger,
    dialogues: &mut HashMap<u64, Dialogue>,
    user_id: u64,
    dialogue: Dialogue,
    input: &str,
) -> Vec<Reply> {
    match dialogue.advance(input) {
        DialogueStep::Next(next, prompt) => {
            dialogues.insert(user_id, next);
            vec![text_reply(prompt)]
        }
        DialogueStep::CommitExpense {
            amount,
            category,
            description,
            frequency,
        } => commit_add(
            ledger,
            user_id,
            commands::AddArgs {
                amount,
                category,
                description,
                frequency,
            },
        ),
        DialogueStep::CommitLimit { category, amount } => {
            commit_limit(ledger, user_id, &category, amount)
        }
        DialogueStep::InvalidAmount => {
            tracing::error!("User {user_id} provided an invalid amount, dialogue aborted");
            vec![text_reply("Invalid amount format. Operation cancelled.")]
        }
    }
}

/// The single commit point for both command shapes.
fn commit_add(ledger: &mut Ledger, user_id: u64, add: commands::AddArgs) -> Vec<Reply> {
    let commands::AddArgs {
        amount,
        category,
        description,
        frequency,
    } = add;

    let id = ledger.add(user_id, amount, &category, &description, frequency.as_deref());

    let confirmation = match &frequency {
        Some(frequency) => {
            tracing::info!("User {user_id} added a recurring expense {id}");
            format!(
                "Recurring expense of {amount} for {description} in category {category} \
                 added with frequency {frequency}."
            )
        }
        None => {
            tracing::info!("User {user_id} added an expense {id}");
            format!("Expense of {amount} for {description} in category {category} added.")
        }
    };

    let mut replies = vec![Reply::Text(confirmation)];
    if ledger.exceeds_limit(&category, amount) {
        tracing::warn!("User {user_id} exceeded the limit for category {category}");
        replies.push(text_reply(format!(
            "Warning: Expense exceeds the limit for category {category}!"
        )));
    }
    replies
}

fn commit_limit(ledger: &mut Ledger, user_id: u64, category: &str, limit: f64) -> Vec<Reply> {
    ledger.set_limit(category, limit);
    tracing::info!("User {user_id} set a limit of {limit} for category {category}");
    vec![text_reply(format!(
        "Limit for category {category} set to {limit}."
    ))]
}

fn delete_expense(ledger: &mut Ledger, user_id: u64, expense_id: &str) -> Vec<Reply> {
    if !ledger.contains_user(user_id) {
        return empty_state(user_id, "delete an expense");
    }
    if ledger.delete(user_id, expense_id) {
        tracing::info!("User {user_id} deleted expense {expense_id}");
        vec![text_reply(format!("Expense with ID {expense_id} deleted."))]
    } else {
        tracing::warn!("User {user_id} tried to delete non-existent expense {expense_id}");
        vec![text_reply(format!(
            "Expense with ID {expense_id} not found."
        ))]
    }
}

fn start_dialogue(
    dialogues: &mut HashMap<u64, Dialogue>,
    user_id: u64,
    (dialogue, prompt): (Dialogue, &'static str),
) -> Vec<Reply> {
    dialogues.insert(user_id, dialogue);
    vec![text_reply(prompt)]
}

fn empty_state(user_id: u64, action: &str) -> Vec<Reply> {
    tracing::warn!("User {user_id} tried to {action} but has no recorded expenses");
    vec![text_reply(NO_EXPENSES)]
}

fn usage_reply(user_id: u64, command: &str, err: CommandError) -> Vec<Reply> {
    tracing::error!("User {user_id} provided invalid arguments for {command} command");
    vec![text_reply(err.to_string())]
}

fn text_reply(text: impl Into<String>) -> Reply {
    Reply::Text(text.into())
}

fn help_text() -> &'static str {
    "Available commands:\n\
     /add <amount> <category> <description> - Add an expense\n\
     /addrecurring <amount> <category> <description> <frequency> - Add a recurring expense\n\
     /delete <expense_id> - Delete an expense\n\
     /total - Get total of all expenses\n\
     /category <category> - View expenses for a specific category\n\
     /month <month> <year> - View expenses for a specific month\n\
     /clear - Clear all expenses\n\
     /report - Generate a monthly expense report\n\
     /setlimit <category> <limit> - Set a limit for a category\n\
     /limits - View current limits for each category\n\
     /export - Export your expenses as a CSV file\n\
     /cancel - Cancel the operation in progress"
}
