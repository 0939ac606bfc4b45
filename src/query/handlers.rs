/// 조회 핸들러
// region:    --- Imports
use crate::auction::model::Item;
use crate::auction::state::ItemState;
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::store::{ItemFilter, Page};
use serde::Serialize;
use tracing::info;
// endregion: --- Imports

// region:    --- Query Handlers
/// 아이템 조회
pub async fn get_item(ctx: &BotContext, item_id: i64) -> Result<Item, AuctionError> {
    info!("{:<12} --> 아이템 조회 id: {}", "Query", item_id);
    ctx.store
        .find_item(item_id)
        .await?
        .ok_or(AuctionError::NotFound { item_id })
}

/// 사용자 아이템 목록 조회
pub async fn list_user_items(
    ctx: &BotContext,
    user_id: i64,
    filter: ItemFilter,
    page: Page,
) -> Result<Vec<Item>, AuctionError> {
    info!("{:<12} --> 사용자 아이템 목록 조회 id: {}", "Query", user_id);
    let page = Page {
        limit: page.limit.clamp(1, 100),
        offset: page.offset.max(0),
    };
    Ok(ctx.store.list_user_items(user_id, filter, page).await?)
}

/// 운영 현황
#[derive(Debug, Serialize)]
pub struct StatusOverview {
    pub store_ok: bool,
    pub pending_items: i64,
    pub approved_items: i64,
    pub ended_items: i64,
    pub active_bans: i64,
}

/// 운영 현황 조회. 저장소 장애 시에도 응답은 내려간다.
pub async fn status_overview(ctx: &BotContext) -> StatusOverview {
    info!("{:<12} --> 운영 현황 조회", "Query");
    let store_ok = ctx.store.ping().await.is_ok();
    StatusOverview {
        store_ok,
        pending_items: ctx
            .store
            .count_items_in_state(ItemState::Pending)
            .await
            .unwrap_or(-1),
        approved_items: ctx
            .store
            .count_items_in_state(ItemState::Approved)
            .await
            .unwrap_or(-1),
        ended_items: ctx
            .store
            .count_items_in_state(ItemState::Ended)
            .await
            .unwrap_or(-1),
        active_bans: ctx.store.count_bans().await.unwrap_or(-1),
    }
}
// endregion: --- Query Handlers
