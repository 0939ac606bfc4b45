/// 정산 경로
/// 만료 스위퍼와 강제 종료가 공유한다. 만료 플래그 가드 CAS 를 통과한
/// 호출자만 공지/통지를 진행하므로 정산 부수효과는 아이템당 한 번만 발생한다.
// region:    --- Imports
use crate::auction::model::Item;
use crate::auction::state::ItemState;
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::messaging::texts;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Settlement
/// 종료 사유
#[derive(Debug, Clone, Copy)]
pub enum EndReason {
    /// 마감 시각 경과 (스위퍼)
    Deadline,
    /// 관리자 강제 종료
    Forced { admin_id: i64 },
}

/// 경매 종료 및 정산.
/// CAS 에 진 호출자는 `AlreadyProcessed` 를 받고 아무 부수효과도 내지 않는다.
pub async fn settle_item(
    ctx: &BotContext,
    item_id: i64,
    reason: EndReason,
) -> Result<Item, AuctionError> {
    match ctx.store.mark_ended(item_id).await? {
        Some(item) => {
            info!(
                "{:<12} --> 경매 종료: 아이템 {} 낙찰가 {} ({:?})",
                "Settlement", item.id, item.current_price, reason
            );
            announce_settlement(ctx, &item, &reason).await;
            Ok(item)
        }
        None => {
            let latest = ctx
                .store
                .find_item(item_id)
                .await?
                .ok_or(AuctionError::NotFound { item_id })?;
            match latest.state {
                ItemState::Ended => Err(AuctionError::AlreadyProcessed {
                    current: latest.state,
                }),
                current => Err(AuctionError::InvalidState {
                    current,
                    action: "종료",
                }),
            }
        }
    }
}

/// 정산 알림 일괄 전송. 각 호출은 독립적으로 최선 노력이다 —
/// 하나가 실패해도 나머지와 상태 전이에는 영향이 없다.
async fn announce_settlement(ctx: &BotContext, item: &Item, reason: &EndReason) {
    let announcement = texts::ended_announcement(item, reason);

    // 1. 그룹 공지
    if let Err(e) = ctx
        .chat
        .send_photo(
            ctx.cfg.group_id,
            &item.photo_id,
            &announcement,
            texts::contact_markup(item),
        )
        .await
    {
        warn!(
            "{:<12} --> 그룹 공지 실패 (아이템 {}): {}",
            "Settlement", item.id, e
        );
    }

    // 2. 채널 게시물 마감 처리 (입찰 버튼 제거)
    if let (Some(channel_id), Some(message_id)) =
        (item.published.channel_id, item.published.channel_message_id)
    {
        if let Err(e) = ctx
            .chat
            .edit_message_caption(
                channel_id,
                message_id,
                &texts::final_caption(item, reason),
                None,
            )
            .await
        {
            warn!(
                "{:<12} --> 채널 캡션 마감 실패 (아이템 {}): {}",
                "Settlement", item.id, e
            );
        }
    }

    // 3. 낙찰자 개별 통지
    if let Some(winner) = &item.leading_bidder {
        if let Err(e) = ctx
            .chat
            .send_message(winner.id, &texts::winner_notice(item))
            .await
        {
            warn!(
                "{:<12} --> 낙찰자 통지 실패 ({}): {}",
                "Settlement", winner.id, e
            );
        }
    }

    // 4. 판매자 통지
    if let Err(e) = ctx
        .chat
        .send_message(item.owner_id, &texts::seller_notice(item, reason))
        .await
    {
        warn!(
            "{:<12} --> 판매자 통지 실패 ({}): {}",
            "Settlement", item.owner_id, e
        );
    }

    // 5. 로그 그룹 기록
    if ctx.cfg.log_group_id != 0 {
        if let Err(e) = ctx
            .chat
            .send_photo(ctx.cfg.log_group_id, &item.photo_id, &announcement, None)
            .await
        {
            warn!(
                "{:<12} --> 로그 기록 실패 (아이템 {}): {}",
                "Settlement", item.id, e
            );
        }
    }
}
// endregion: --- Settlement
