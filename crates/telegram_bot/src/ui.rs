//! Reply keyboard shown on /start.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub(crate) fn command_keyboard() -> KeyboardMarkup {
    let rows = [
        ["/add", "/addrecurring"],
        ["/delete", "/total"],
        ["/category", "/month"],
        ["/report", "/setlimit"],
        ["/limits", "/clear"],
        ["/export", "/help"],
    ];

    KeyboardMarkup::new(
        rows.iter()
            .map(|row| row.iter().map(|label| KeyboardButton::new(*label))),
    )
    .resize_keyboard()
}
