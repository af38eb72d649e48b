//! Command surface and message parsing.
//!
//! A message is either a `/command` (possibly with positional
//! arguments) or free text. Free text is only meaningful while a
//! dialogue is collecting fields; the router decides that.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Start,
    Help,
    Add { args: Vec<String> },
    AddRecurring { args: Vec<String> },
    Delete { args: Vec<String> },
    Total,
    Category { args: Vec<String> },
    Month { args: Vec<String> },
    Clear,
    Report,
    SetLimit { args: Vec<String> },
    Limits,
    Export,
    Cancel,
    Unknown,
}

/// Invalid argument shapes, reported to the user as a usage string.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum CommandError {
    #[error("Invalid command format. Use {0}")]
    Usage(&'static str),
}

/// Fields of a fully specified add, shared by both command shapes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AddArgs {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub frequency: Option<String>,
}

/// Returns `None` for anything that is not a slash command.
pub(crate) fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let name = tokens.next().unwrap_or("");
    // Strip the "@botname" suffix Telegram appends in group chats.
    let name = name.split('@').next().unwrap_or(name);
    let args: Vec<String> = tokens.map(str::to_string).collect();

    match name {
        "/start" => Some(Command::Start),
        "/help" => Some(Command::Help),
        "/add" => Some(Command::Add { args }),
        "/addrecurring" => Some(Command::AddRecurring { args }),
        "/delete" => Some(Command::Delete { args }),
        "/total" => Some(Command::Total),
        "/category" => Some(Command::Category { args }),
        "/month" => Some(Command::Month { args }),
        "/clear" => Some(Command::Clear),
        "/report" => Some(Command::Report),
        "/setlimit" => Some(Command::SetLimit { args }),
        "/limits" => Some(Command::Limits),
        "/export" => Some(Command::Export),
        "/cancel" => Some(Command::Cancel),
        _ => Some(Command::Unknown),
    }
}

/// `/add <amount> <category> <description...>`; the description is the
/// remainder joined with spaces and may be empty.
pub(crate) fn parse_add(args: &[String]) -> Result<AddArgs, CommandError> {
    const USAGE: &str = "/add <amount> <category> <description>";

    let (amount, category) = match args {
        [amount, category, ..] => (amount, category),
        _ => return Err(CommandError::Usage(USAGE)),
    };
    let amount: f64 = amount.parse().map_err(|_| CommandError::Usage(USAGE))?;

    Ok(AddArgs {
        amount,
        category: category.clone(),
        description: args[2..].join(" "),
        frequency: None,
    })
}

/// `/addrecurring <amount> <category> <description...> <frequency>`;
/// the frequency is the last token, the description spans the tokens
/// between category and frequency.
pub(crate) fn parse_add_recurring(args: &[String]) -> Result<AddArgs, CommandError> {
    const USAGE: &str = "/addrecurring <amount> <category> <description> <frequency>";

    let [amount, category, middle @ ..] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    let Some((frequency, description)) = middle.split_last() else {
        return Err(CommandError::Usage(USAGE));
    };
    let amount: f64 = amount.parse().map_err(|_| CommandError::Usage(USAGE))?;

    Ok(AddArgs {
        amount,
        category: category.clone(),
        description: description.join(" "),
        frequency: Some(frequency.clone()),
    })
}

/// `/delete <expense_id>`
pub(crate) fn parse_delete(args: &[String]) -> Result<&str, CommandError> {
    match args.first() {
        Some(id) => Ok(id),
        None => Err(CommandError::Usage("/delete <expense_id>")),
    }
}

/// `/category <category>`
pub(crate) fn parse_category(args: &[String]) -> Result<&str, CommandError> {
    match args.first() {
        Some(category) => Ok(category),
        None => Err(CommandError::Usage("/category <category>")),
    }
}

/// `/month <month> <year>`
pub(crate) fn parse_month(args: &[String]) -> Result<(u32, i32), CommandError> {
    const USAGE: &str = "/month <month> <year>";

    let [month, year] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    let month: u32 = month.parse().map_err(|_| CommandError::Usage(USAGE))?;
    let year: i32 = year.parse().map_err(|_| CommandError::Usage(USAGE))?;
    Ok((month, year))
}

/// `/setlimit <category> <limit>`
pub(crate) fn parse_set_limit(args: &[String]) -> Result<(&str, f64), CommandError> {
    const USAGE: &str = "/setlimit <category> <limit>";

    let [category, limit] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    let limit: f64 = limit.parse().map_err(|_| CommandError::Usage(USAGE))?;
    Ok((category, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn non_command_text_is_not_parsed() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("12.5 food lunch"), None);
    }

    #[test]
    fn unknown_slash_command_is_recognized_as_such() {
        assert_eq!(parse_command("/frobnicate"), Some(Command::Unknown));
    }

    #[test]
    fn bot_name_suffix_is_stripped() {
        assert_eq!(parse_command("/total@expense_bot"), Some(Command::Total));
    }

    #[test]
    fn add_collects_args() {
        assert_eq!(
            parse_command("/add 12.5 food lunch at work"),
            Some(Command::Add {
                args: args(&["12.5", "food", "lunch", "at", "work"])
            })
        );
    }

    #[test]
    fn parse_add_joins_the_description() {
        let parsed = parse_add(&args(&["12.5", "food", "lunch", "at", "work"])).unwrap();
        assert_eq!(parsed.amount, 12.5);
        assert_eq!(parsed.category, "food");
        assert_eq!(parsed.description, "lunch at work");
        assert_eq!(parsed.frequency, None);
    }

    #[test]
    fn parse_add_allows_an_empty_description() {
        let parsed = parse_add(&args(&["12.5", "food"])).unwrap();
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn parse_add_rejects_a_non_numeric_amount() {
        let err = parse_add(&args(&["abc", "food", "lunch"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid command format. Use /add <amount> <category> <description>"
        );
    }

    #[test]
    fn parse_add_rejects_a_missing_category() {
        assert!(parse_add(&args(&["12.5"])).is_err());
    }

    #[test]
    fn parse_add_recurring_splits_description_and_frequency() {
        let parsed =
            parse_add_recurring(&args(&["9.99", "media", "video", "streaming", "monthly"]))
                .unwrap();
        assert_eq!(parsed.description, "video streaming");
        assert_eq!(parsed.frequency.as_deref(), Some("monthly"));
    }

    #[test]
    fn parse_add_recurring_accepts_an_empty_description() {
        let parsed = parse_add_recurring(&args(&["9.99", "media", "monthly"])).unwrap();
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.frequency.as_deref(), Some("monthly"));
    }

    #[test]
    fn parse_add_recurring_requires_a_frequency_token() {
        assert!(parse_add_recurring(&args(&["9.99", "media"])).is_err());
    }

    #[test]
    fn parse_month_reads_month_then_year() {
        assert_eq!(parse_month(&args(&["5", "2024"])).unwrap(), (5, 2024));
        assert!(parse_month(&args(&["may", "2024"])).is_err());
        assert!(parse_month(&args(&["5"])).is_err());
    }

    #[test]
    fn parse_set_limit_reads_category_then_amount() {
        assert_eq!(
            parse_set_limit(&args(&["food", "40"])).unwrap(),
            ("food", 40.0)
        );
        assert!(parse_set_limit(&args(&["food", "cheap"])).is_err());
    }
}
