use teloxide::prelude::*;
use tracing::debug;

/// Fixed-reply liveness check. Fire-and-forget: a failed send only logs.
pub async fn handle_ping(bot: Bot, msg: Message) -> ResponseResult<()> {
    if let Err(e) = bot.send_message(msg.chat.id, "pong").await {
        debug!("[{}] ping reply failed: {e}", msg.chat.id.0);
    }
    respond(())
}
