//! Telegram bot.
//!
//! Thin transport layer: it turns inbound Telegram messages into
//! dispatches against the in-memory expense ledger and carries the
//! reply texts (and CSV documents) back. All command logic lives in
//! the transport-free [`router`] module.

use teloxide::prelude::*;

pub use teloxide::types::UserId;

use crate::state::{DialogueStore, LedgerStore};

mod commands;
mod handlers;
mod router;
mod state;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    ledger: LedgerStore,
    dialogues: DialogueStore,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
}

impl Bot {
    pub fn new(token: &str, allowed_users: Option<Vec<UserId>>) -> Self {
        Self {
            token: token.to_string(),
            allowed_users,
        }
    }

    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            ledger: LedgerStore::default(),
            dialogues: DialogueStore::default(),
        };

        let handler = Update::filter_message().endpoint(handlers::handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn allowed_users(mut self, allowed_users: Vec<UserId>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users);
        }
        self
    }

    pub fn build(self) -> Bot {
        tracing::info!("Initializing telegram bot...");
        Bot {
            token: self.token,
            allowed_users: self.allowed_users,
        }
    }
}
