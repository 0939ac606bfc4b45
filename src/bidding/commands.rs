/// 입찰 엔진
/// 선행 조건을 순서대로 검사한 뒤 current_price 가드 CAS 로 확정한다.
/// 경합에서 지면 서버에서 재시도하지 않고 최신 가격과 함께 거절한다 —
/// 재입찰 여부는 호출자가 결정한다.
// region:    --- Imports
use crate::auction::model::Item;
use crate::auction::state::ItemState;
use crate::bidding::model::{Bidder, BidEntry};
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::messaging::texts;
use crate::store::BidUpdate;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub item_id: i64,
    pub bidder_id: i64,
    pub bidder_name: String,
    pub amount: i64,
}

/// 입찰 수락 결과
#[derive(Debug, Serialize)]
pub struct BidAccepted {
    pub item_id: i64,
    pub new_current_price: i64,
}

/// 입찰 처리
pub async fn handle_place_bid(
    ctx: &BotContext,
    cmd: PlaceBidCommand,
) -> Result<BidAccepted, AuctionError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Bid", cmd);

    // (a) 전역 밴 확인
    if ctx.store.find_ban(cmd.bidder_id).await?.is_some() {
        return Err(AuctionError::Permission(
            "전역 밴 상태에서는 입찰할 수 없습니다".into(),
        ));
    }

    // (b) 아이템 존재 확인
    let item = ctx
        .store
        .find_item(cmd.item_id)
        .await?
        .ok_or(AuctionError::NotFound {
            item_id: cmd.item_id,
        })?;

    // (c) 상태 + 만료 플래그 + 마감 시각 이중 게이트.
    //     스위퍼가 늦어도 마감 시각 검사가 입찰을 막는다.
    let now = Utc::now();
    if item.state != ItemState::Approved || item.expired_flag || item.deadline_passed(now) {
        return Err(AuctionError::InvalidState {
            current: item.state,
            action: "입찰",
        });
    }

    // (d) 본인 입찰 금지
    if item.owner_id == cmd.bidder_id {
        return Err(AuctionError::Permission(
            "본인 아이템에는 입찰할 수 없습니다".into(),
        ));
    }

    // (e) 최소 인상폭
    let min_next_bid = item.min_next_bid(ctx.cfg.min_increment);
    if cmd.amount < min_next_bid {
        return Err(AuctionError::BidTooLow { min_next_bid });
    }

    // 새 이력 계산 (보존 상한 적용)
    let mut history = item.bid_history.clone();
    history.push(BidEntry {
        bidder_id: cmd.bidder_id,
        bidder_name: cmd.bidder_name.clone(),
        amount: cmd.amount,
        time: now,
    });
    if history.len() > ctx.cfg.bid_history_cap {
        let excess = history.len() - ctx.cfg.bid_history_cap;
        history.drain(..excess);
    }

    let update = BidUpdate {
        amount: cmd.amount,
        bidder: Bidder {
            id: cmd.bidder_id,
            display_name: cmd.bidder_name.clone(),
        },
        history,
        time: now,
    };

    // 낙관적 확정: 읽기 시점의 current_price 가 그대로일 때만 적용된다.
    match ctx
        .store
        .commit_bid(cmd.item_id, item.current_price, update)
        .await?
    {
        Some(updated) => {
            info!(
                "{:<12} --> 입찰 확정: 아이템 {} 현재가 {}",
                "Bid", updated.id, updated.current_price
            );
            refresh_posts(ctx, &updated).await;
            Ok(BidAccepted {
                item_id: updated.id,
                new_current_price: updated.current_price,
            })
        }
        None => {
            // 가드가 깨짐: 경합 패배인지 상태 변화인지 최신 레코드로 판별
            let latest = ctx
                .store
                .find_item(cmd.item_id)
                .await?
                .ok_or(AuctionError::NotFound {
                    item_id: cmd.item_id,
                })?;
            if latest.state == ItemState::Approved
                && !latest.expired_flag
                && !latest.deadline_passed(Utc::now())
            {
                warn!(
                    "{:<12} --> 입찰 경합 패배: 아이템 {} 현재가 {}",
                    "Bid", latest.id, latest.current_price
                );
                Err(AuctionError::ConcurrencyConflict {
                    current_price: latest.current_price,
                    min_next_bid: latest.min_next_bid(ctx.cfg.min_increment),
                })
            } else {
                Err(AuctionError::InvalidState {
                    current: latest.state,
                    action: "입찰",
                })
            }
        }
    }
}

/// 확정된 입찰을 공개 게시물 캡션에 반영한다.
/// 표시 계층은 최종적 일관성이면 충분하다 — 실패해도 입찰은 유지된다.
async fn refresh_posts(ctx: &BotContext, item: &Item) {
    let caption = texts::post_caption(item);

    if let (Some(channel_id), Some(message_id)) =
        (item.published.channel_id, item.published.channel_message_id)
    {
        if let Err(e) = ctx
            .chat
            .edit_message_caption(
                channel_id,
                message_id,
                &caption,
                Some(texts::bid_markup(&ctx.cfg, item.id)),
            )
            .await
        {
            warn!("{:<12} --> 채널 게시물 갱신 실패: {}", "Bid", e);
        }
    }

    if let Some(message_id) = item.published.group_message_id {
        if let Err(e) = ctx
            .chat
            .edit_message_caption(ctx.cfg.group_id, message_id, &caption, None)
            .await
        {
            warn!("{:<12} --> 그룹 게시물 갱신 실패: {}", "Bid", e);
        }
    }
}
// endregion: --- Commands
