/// 심사 게이트
/// 승인/거절/강제 종료와 전역 밴, 아이템 제거를 처리한다.
/// 같은 전이를 두 관리자가 동시에 누르면 상태 가드 CAS 가 한쪽만 통과시키고
/// 다른 쪽은 `AlreadyProcessed` 를 받는다 — 게시/알림이 중복되지 않는다.
// region:    --- Imports
use crate::auction::model::{GlobalBan, Item};
use crate::auction::state::ItemState;
use crate::config::BotConfig;
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::messaging::texts;
use crate::settlement::{self, EndReason};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Admin Check
/// 소유자 혹은 관리자 여부
pub fn is_admin(cfg: &BotConfig, user_id: i64) -> bool {
    user_id == cfg.owner_id || cfg.admins.contains(&user_id)
}

fn ensure_admin(cfg: &BotConfig, user_id: i64) -> Result<(), AuctionError> {
    if is_admin(cfg, user_id) {
        Ok(())
    } else {
        Err(AuctionError::Permission(
            "소유자 또는 관리자만 사용할 수 있습니다".into(),
        ))
    }
}
// endregion: --- Admin Check

// region:    --- Approve / Reject
/// 승인: pending → approved. 마감을 설정하고 게시/고정/통지를 수행한다.
pub async fn handle_approve(
    ctx: &Arc<BotContext>,
    item_id: i64,
    admin_id: i64,
) -> Result<Item, AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;
    info!(
        "{:<12} --> 승인 요청: 아이템 {} (관리자 {})",
        "Moderation", item_id, admin_id
    );

    let deadline = Utc::now() + ctx.cfg.auction_duration;
    match ctx.store.approve_pending(item_id, deadline).await? {
        Some(item) => {
            let item = publish_item(ctx, item).await;

            // 제출자 통지 (최선 노력)
            if let Err(e) = ctx
                .chat
                .send_photo(
                    item.owner_id,
                    &item.photo_id,
                    &texts::approval_notice(&item),
                    None,
                )
                .await
            {
                warn!("{:<12} --> 승인 통지 실패: {}", "Moderation", e);
            }
            Ok(item)
        }
        None => Err(transition_refused(ctx, item_id, "승인").await?),
    }
}

/// 거절: pending → rejected. 게시하지 않고 제출자에게만 알린다.
pub async fn handle_reject(
    ctx: &Arc<BotContext>,
    item_id: i64,
    admin_id: i64,
) -> Result<Item, AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;
    info!(
        "{:<12} --> 거절 요청: 아이템 {} (관리자 {})",
        "Moderation", item_id, admin_id
    );

    match ctx.store.reject_pending(item_id).await? {
        Some(item) => {
            if let Err(e) = ctx
                .chat
                .send_photo(
                    item.owner_id,
                    &item.photo_id,
                    &texts::rejection_notice(&item),
                    None,
                )
                .await
            {
                warn!("{:<12} --> 거절 통지 실패: {}", "Moderation", e);
            }
            Ok(item)
        }
        None => Err(transition_refused(ctx, item_id, "거절").await?),
    }
}

/// 가드에 막힌 전이의 원인 판별
async fn transition_refused(
    ctx: &BotContext,
    item_id: i64,
    action: &'static str,
) -> Result<AuctionError, AuctionError> {
    let latest = ctx
        .store
        .find_item(item_id)
        .await?
        .ok_or(AuctionError::NotFound { item_id })?;
    Ok(match latest.state {
        ItemState::Draft => AuctionError::InvalidState {
            current: latest.state,
            action,
        },
        current => AuctionError::AlreadyProcessed { current },
    })
}

/// 승인된 아이템을 그룹/채널에 게시하고 참조를 기록한다.
/// 게시 실패는 승인 자체를 되돌리지 않는다.
async fn publish_item(ctx: &Arc<BotContext>, mut item: Item) -> Item {
    let caption = texts::post_caption(&item);
    let mut refs = item.published.clone();

    // 1. 그룹 게시 + 고정
    match ctx
        .chat
        .send_photo(ctx.cfg.group_id, &item.photo_id, &caption, None)
        .await
    {
        Ok(group_msg) => {
            refs.group_message_id = Some(group_msg.message_id);
            if let Err(e) = ctx
                .chat
                .pin_message(ctx.cfg.group_id, group_msg.message_id)
                .await
            {
                warn!("{:<12} --> 그룹 고정 실패: {}", "Moderation", e);
            }
            schedule_unpin(ctx, group_msg.message_id);
        }
        Err(e) => warn!("{:<12} --> 그룹 게시 실패: {}", "Moderation", e),
    }

    // 2. 채널 게시 (입찰 버튼 포함)
    match ctx
        .chat
        .send_photo(
            ctx.cfg.channel_id,
            &item.photo_id,
            &caption,
            Some(texts::bid_markup(&ctx.cfg, item.id)),
        )
        .await
    {
        Ok(channel_msg) => {
            refs.channel_id = Some(ctx.cfg.channel_id);
            refs.channel_message_id = Some(channel_msg.message_id);
        }
        Err(e) => warn!("{:<12} --> 채널 게시 실패: {}", "Moderation", e),
    }

    // 3. 참조 저장
    if let Err(e) = ctx.store.set_published_refs(item.id, refs.clone()).await {
        warn!("{:<12} --> 게시물 참조 저장 실패: {}", "Moderation", e);
    }
    item.published = refs;
    item
}

/// 고정 해제 예약
fn schedule_unpin(ctx: &Arc<BotContext>, message_id: i64) {
    let chat = Arc::clone(&ctx.chat);
    let group_id = ctx.cfg.group_id;
    let delay = ctx.cfg.unpin_delay;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = chat.unpin_message(group_id, message_id).await {
            warn!("{:<12} --> 고정 해제 실패 ({}): {}", "Moderation", message_id, e);
        }
    });
}
// endregion: --- Approve / Reject

// region:    --- Force End
/// 강제 종료. 마감을 기다리지 않고 스위퍼와 같은 정산 경로를 바로 탄다.
pub async fn handle_force_end(
    ctx: &BotContext,
    item_id: i64,
    admin_id: i64,
) -> Result<Item, AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;
    info!(
        "{:<12} --> 강제 종료 요청: 아이템 {} (관리자 {})",
        "Moderation", item_id, admin_id
    );
    settlement::settle_item(ctx, item_id, EndReason::Forced { admin_id }).await
}
// endregion: --- Force End

// region:    --- Global Ban
/// 전역 밴 등록
pub async fn handle_ban_user(
    ctx: &BotContext,
    user_id: i64,
    admin_id: i64,
    reason: String,
) -> Result<(), AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;

    if user_id == admin_id {
        return Err(AuctionError::Validation("자기 자신은 밴할 수 없습니다".into()));
    }
    if is_admin(&ctx.cfg, user_id) {
        return Err(AuctionError::Permission(
            "다른 관리자/소유자는 밴할 수 없습니다".into(),
        ));
    }

    let inserted = ctx
        .store
        .insert_ban(GlobalBan {
            user_id,
            reason: reason.clone(),
            banned_by: admin_id,
            timestamp: Utc::now(),
        })
        .await?;
    if !inserted {
        return Err(AuctionError::Validation(
            "이미 전역 밴된 사용자입니다".into(),
        ));
    }

    info!(
        "{:<12} --> 전역 밴 등록: 사용자 {} (관리자 {})",
        "Moderation", user_id, admin_id
    );
    if ctx.cfg.log_group_id != 0 {
        if let Err(e) = ctx
            .chat
            .send_message(ctx.cfg.log_group_id, &texts::ban_log(user_id, admin_id, &reason))
            .await
        {
            warn!("{:<12} --> 밴 기록 실패: {}", "Moderation", e);
        }
    }
    Ok(())
}

/// 전역 밴 해제
pub async fn handle_unban_user(
    ctx: &BotContext,
    user_id: i64,
    admin_id: i64,
) -> Result<(), AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;

    let removed = ctx.store.remove_ban(user_id).await?;
    if !removed {
        return Err(AuctionError::Validation(
            "전역 밴 내역이 없는 사용자입니다".into(),
        ));
    }

    info!(
        "{:<12} --> 전역 밴 해제: 사용자 {} (관리자 {})",
        "Moderation", user_id, admin_id
    );
    if ctx.cfg.log_group_id != 0 {
        if let Err(e) = ctx
            .chat
            .send_message(ctx.cfg.log_group_id, &texts::unban_log(user_id, admin_id))
            .await
        {
            warn!("{:<12} --> 밴 해제 기록 실패: {}", "Moderation", e);
        }
    }
    Ok(())
}
// endregion: --- Global Ban

// region:    --- Remove Items
/// 아이템 제거. 공개 게시물 삭제는 최선 노력이며 레코드 삭제가 기준이다.
pub async fn handle_remove_items(
    ctx: &BotContext,
    item_ids: Vec<i64>,
    admin_id: i64,
) -> Result<u64, AuctionError> {
    ensure_admin(&ctx.cfg, admin_id)?;

    let mut deleted = 0u64;
    for item_id in item_ids {
        let Some(item) = ctx.store.find_item(item_id).await? else {
            continue;
        };

        if let (Some(channel_id), Some(message_id)) =
            (item.published.channel_id, item.published.channel_message_id)
        {
            if let Err(e) = ctx.chat.delete_message(channel_id, message_id).await {
                warn!("{:<12} --> 채널 게시물 삭제 실패: {}", "Moderation", e);
            }
        }
        if let Some(message_id) = item.published.group_message_id {
            if let Err(e) = ctx.chat.delete_message(ctx.cfg.group_id, message_id).await {
                warn!("{:<12} --> 그룹 게시물 삭제 실패: {}", "Moderation", e);
            }
        }

        if ctx.store.delete_item(item_id).await? {
            deleted += 1;
        }
    }
    info!("{:<12} --> 아이템 {}건 제거", "Moderation", deleted);
    Ok(deleted)
}
// endregion: --- Remove Items
