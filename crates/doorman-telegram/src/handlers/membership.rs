use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatMemberUpdated;

use crate::normalize;
use crate::router::AppState;

pub async fn handle_status_change(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let event = normalize::from_status_update(&upd);
    state.moderator.handle(&event).await;
    respond(())
}

pub async fn handle_service_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(event) = normalize::from_service_message(&msg) {
        state.moderator.handle(&event).await;
    }
    respond(())
}
