/// 만료 스위퍼
/// 두 개의 주기 태스크를 돌린다.
/// 1. 만료 스윕: 마감이 지난 승인 아이템을 정산 경로로 보낸다.
/// 2. 버튼 제거 보조 스윕: 정산 전의 만료 게시물에서 입찰 버튼만 걷어낸다.
///    표시 지연 완화용일 뿐 정확성은 입찰 엔진의 이중 게이트가 보장한다.
// region:    --- Imports
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::settlement::{self, EndReason};
use crate::store::StoreError;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};
// endregion: --- Imports

// region:    --- Auction Sweeper
pub struct AuctionSweeper {
    ctx: Arc<BotContext>,
}

impl AuctionSweeper {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self { ctx }
    }

    /// 스위퍼 시작. 저장소 장애는 로그만 남기고 다음 주기에 재시도한다.
    pub async fn start(&self) {
        let ctx = Arc::clone(&self.ctx);
        tokio::spawn(async move {
            let mut ticker = interval(ctx.cfg.expiry_sweep_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = Self::sweep_expired(&ctx).await {
                    error!("{:<12} --> 만료 스윕 중 오류 발생: {}", "Sweeper", e);
                }
            }
        });

        let ctx = Arc::clone(&self.ctx);
        tokio::spawn(async move {
            let mut ticker = interval(ctx.cfg.cleanup_sweep_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = Self::sweep_stale_markup(&ctx).await {
                    error!("{:<12} --> 버튼 제거 스윕 중 오류 발생: {}", "Sweeper", e);
                }
            }
        });
    }

    /// 만료 스윕 1회 실행.
    /// 아이템별 실패는 격리된다 — 한 건의 정산이 실패해도 나머지는 계속 처리한다.
    /// 만료 플래그 스캔 술어 덕분에 중간에 중단돼도 재시작이 안전하다.
    pub async fn sweep_expired(ctx: &BotContext) -> Result<(), StoreError> {
        let expired = ctx.store.find_expired(Utc::now()).await?;
        if expired.is_empty() {
            debug!("{:<12} --> 만료된 경매 없음", "Sweeper");
            return Ok(());
        }

        info!("{:<12} --> 만료된 경매 {}건 처리 시작", "Sweeper", expired.len());
        for item in expired {
            match settlement::settle_item(ctx, item.id, EndReason::Deadline).await {
                Ok(_) => info!("{:<12} --> 아이템 {} 정산 완료", "Sweeper", item.id),
                // 다른 스위퍼 인스턴스 혹은 강제 종료가 먼저 처리함
                Err(AuctionError::AlreadyProcessed { .. }) => {
                    debug!("{:<12} --> 아이템 {} 는 이미 정산됨", "Sweeper", item.id)
                }
                Err(e) => warn!(
                    "{:<12} --> 아이템 {} 정산 실패, 계속 진행: {}",
                    "Sweeper", item.id, e
                ),
            }
            // 알림 폭주 방지 간격
            tokio::time::sleep(ctx.cfg.settle_pacing).await;
        }
        Ok(())
    }

    /// 버튼 제거 스윕 1회 실행. 만료 플래그는 건드리지 않는다 —
    /// 플래그를 소비하면 정산 스윕이 해당 아이템을 건너뛰게 된다.
    pub async fn sweep_stale_markup(ctx: &BotContext) -> Result<(), StoreError> {
        for item in ctx.store.find_expired(Utc::now()).await? {
            if let (Some(channel_id), Some(message_id)) =
                (item.published.channel_id, item.published.channel_message_id)
            {
                if let Err(e) = ctx
                    .chat
                    .edit_message_reply_markup(channel_id, message_id, None)
                    .await
                {
                    debug!(
                        "{:<12} --> 버튼 제거 실패 (아이템 {}): {}",
                        "Sweeper", item.id, e
                    );
                }
            }
        }
        Ok(())
    }
}
// endregion: --- Auction Sweeper
