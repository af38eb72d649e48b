//! Teloxide endpoint: bridges Telegram updates to the command router.

use teloxide::{
    prelude::*,
    types::{InputFile, User},
};

use crate::{
    ConfigParameters,
    router::{self, Reply},
    ui,
};

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, msg.from.as_ref()) {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let user_id = from.id.0;

    // Both locks are held across the whole dispatch, so each inbound
    // command is handled to completion before the next one touches the
    // ledger or the dialogue state.
    let replies = {
        let mut ledger = cfg.ledger.lock().await;
        let mut dialogues = cfg.dialogues.lock().await;
        router::dispatch(&mut ledger, &mut dialogues, user_id, text)
    };

    for reply in replies {
        match reply {
            Reply::Text(text) => {
                bot.send_message(msg.chat.id, text).await?;
            }
            Reply::Menu(text) => {
                bot.send_message(msg.chat.id, text)
                    .reply_markup(ui::command_keyboard())
                    .await?;
            }
            Reply::Document { file_name, bytes } => {
                bot.send_document(msg.chat.id, InputFile::memory(bytes).file_name(file_name))
                    .await?;
            }
        }
    }

    Ok(())
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    }
}
