use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*};

use doorman_core::{config::Config, moderation::Moderator};

use crate::handlers;
use crate::TelegramModerationApi;

pub struct AppState {
    pub moderator: Moderator,
}

/// Build the dispatcher and run long polling until shutdown.
///
/// Chat-member transitions and join/left service messages go to the
/// moderation pipeline; everything else is ignored apart from `/ping`.
pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("doorman started: @{} (id {})", me.username(), cfg.bot_id.0);
    }

    let api = Arc::new(TelegramModerationApi::new(bot.clone()));
    let state = Arc::new(AppState {
        moderator: Moderator::new(cfg.bot_id, api, cfg.retry_delay),
    });

    let handler = dptree::entry()
        .branch(Update::filter_chat_member().endpoint(handlers::handle_status_change))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    // Ctrl-c shuts the listener down and lets in-flight calls finish.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error from the update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
