/// 제출 경로
/// 초안 생성(draft) 과 제출 확정(draft → pending) 을 처리한다.
// region:    --- Imports
use crate::auction::model::{Item, NewItem};
use crate::auction::state::ItemState;
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::messaging::texts;
use serde::Deserialize;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 초안 제출 명령
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDraftCommand {
    pub owner_id: i64,
    pub owner_name: String,
    pub category: crate::auction::model::Category,
    pub rarity: crate::auction::model::Rarity,
    pub title: String,
    pub series: String,
    pub tag: Option<String>,
    pub photo_id: String,
}

/// 초안 생성. 밴 사용자의 제출은 거부한다.
pub async fn handle_submit_draft(
    ctx: &BotContext,
    cmd: SubmitDraftCommand,
) -> Result<Item, AuctionError> {
    info!(
        "{:<12} --> 초안 제출: 사용자 {} / {}",
        "Submission", cmd.owner_id, cmd.title
    );

    if ctx.store.find_ban(cmd.owner_id).await?.is_some() {
        return Err(AuctionError::Permission(
            "전역 밴 상태에서는 제출할 수 없습니다".into(),
        ));
    }

    if cmd.title.trim().is_empty() || cmd.series.trim().is_empty() {
        return Err(AuctionError::Validation(
            "이름과 작품명은 비워둘 수 없습니다".into(),
        ));
    }
    if cmd.photo_id.trim().is_empty() {
        return Err(AuctionError::Validation("사진이 필요합니다".into()));
    }

    let item = ctx
        .store
        .insert_draft(NewItem {
            owner_id: cmd.owner_id,
            owner_name: cmd.owner_name,
            category: cmd.category,
            rarity: cmd.rarity,
            title: cmd.title,
            series: cmd.series,
            tag: cmd.tag,
            photo_id: cmd.photo_id,
        })
        .await?;

    info!("{:<12} --> 초안 생성 완료: 아이템 {}", "Submission", item.id);
    Ok(item)
}

/// 제출 확정. 시작가를 정하고 draft → pending 으로 옮긴 뒤
/// 심사 카드를 로그 그룹으로 보낸다.
pub async fn handle_finalize_submission(
    ctx: &BotContext,
    item_id: i64,
    owner_id: i64,
    base_price: i64,
) -> Result<Item, AuctionError> {
    info!(
        "{:<12} --> 제출 확정: 아이템 {} 시작가 {}",
        "Submission", item_id, base_price
    );

    if base_price < 0 {
        return Err(AuctionError::Validation(
            "시작가는 0 이상이어야 합니다".into(),
        ));
    }

    let item = ctx
        .store
        .find_item(item_id)
        .await?
        .ok_or(AuctionError::NotFound { item_id })?;

    // 본인 초안만 확정할 수 있다
    if item.owner_id != owner_id {
        return Err(AuctionError::Permission(
            "본인 초안만 확정할 수 있습니다".into(),
        ));
    }

    match ctx.store.finalize_draft(item_id, base_price).await? {
        Some(pending) => {
            // 심사 카드 전송은 최선 노력
            if ctx.cfg.log_group_id != 0 {
                if let Err(e) = ctx
                    .chat
                    .send_photo(
                        ctx.cfg.log_group_id,
                        &pending.photo_id,
                        &texts::moderation_card(&pending),
                        None,
                    )
                    .await
                {
                    warn!("{:<12} --> 심사 카드 전송 실패: {}", "Submission", e);
                }
            }
            Ok(pending)
        }
        None => {
            let latest = ctx
                .store
                .find_item(item_id)
                .await?
                .ok_or(AuctionError::NotFound { item_id })?;
            match latest.state {
                ItemState::Draft => Err(AuctionError::InvalidState {
                    current: latest.state,
                    action: "제출 확정",
                }),
                current => Err(AuctionError::AlreadyProcessed { current }),
            }
        }
    }
}
// endregion: --- Commands
