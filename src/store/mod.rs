/// 아이템 저장소 포트
/// 저장소가 유일한 상태 원본이다. 상태를 바꾸는 모든 연산은 조건부 갱신으로 표현되어
/// 두 행위자(동시 입찰자, 스위퍼와 강제 종료)가 충돌하는 전이를 함께 적용할 수 없다.
// region:    --- Imports
use crate::auction::model::{GlobalBan, Item, NewItem, PublishedRefs};
use crate::auction::state::ItemState;
use crate::bidding::model::{Bidder, BidEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod memory;
pub mod postgres;
mod queries;

pub use memory::MemoryItemStore;
pub use postgres::PostgresItemStore;
// endregion: --- Imports

// region:    --- Store Error
/// 저장소 에러
#[derive(Debug, Error)]
pub enum StoreError {
    /// 접속 불가 혹은 질의 실패. 백그라운드 태스크는 다음 주기에 재시도한다.
    #[error("저장소를 사용할 수 없습니다: {0}")]
    Unavailable(String),

    /// 저장된 레코드가 도메인 모델로 역직렬화되지 않음
    #[error("손상된 레코드: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
// endregion: --- Store Error

// region:    --- Query Types
/// 목록 조회 필터
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category: Option<crate::auction::model::Category>,
    pub state: Option<ItemState>,
}

/// 페이지 지정
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: 20,
            offset: 0,
        }
    }
}

/// 입찰 확정 시 함께 기록되는 값.
/// `history` 는 상한이 이미 적용된 새 전체 이력이다.
#[derive(Debug, Clone)]
pub struct BidUpdate {
    pub amount: i64,
    pub bidder: Bidder,
    pub history: Vec<BidEntry>,
    pub time: DateTime<Utc>,
}
// endregion: --- Query Types

// region:    --- Item Store Trait
/// 아이템 저장소 트레이트
///
/// `Option<Item>` 을 돌려주는 조건부 갱신 메서드는 가드 조건이 깨졌을 때 `None` 을
/// 반환한다 (경합 패배 혹은 이미 전이된 상태). 호출자가 원인을 판별한다.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 초안 생성. ID는 저장소가 단조 증가 카운터로 부여한다.
    async fn insert_draft(&self, draft: NewItem) -> Result<Item, StoreError>;

    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError>;

    async fn list_user_items(
        &self,
        user_id: i64,
        filter: ItemFilter,
        page: Page,
    ) -> Result<Vec<Item>, StoreError>;

    async fn count_items_in_state(&self, state: ItemState) -> Result<i64, StoreError>;

    /// draft → pending. 가드: 현재 상태가 draft.
    async fn finalize_draft(
        &self,
        item_id: i64,
        base_price: i64,
    ) -> Result<Option<Item>, StoreError>;

    /// pending → approved. 마감을 설정하고 현재가를 시작가로 맞춘다. 가드: pending.
    async fn approve_pending(
        &self,
        item_id: i64,
        deadline: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError>;

    /// pending → rejected. 가드: pending.
    async fn reject_pending(&self, item_id: i64) -> Result<Option<Item>, StoreError>;

    /// 입찰 확정. 가드: approved 이고 만료 플래그가 내려가 있으며
    /// `current_price` 가 읽기 시점 값(`expected_price`) 그대로일 것.
    async fn commit_bid(
        &self,
        item_id: i64,
        expected_price: i64,
        update: BidUpdate,
    ) -> Result<Option<Item>, StoreError>;

    /// approved → ended, 만료 플래그 설정. 가드: 플래그가 아직 내려가 있을 것.
    /// 이 갱신에 성공한 호출자만 정산을 진행한다.
    async fn mark_ended(&self, item_id: i64) -> Result<Option<Item>, StoreError>;

    /// 마감이 지났지만 아직 정산되지 않은 승인 아이템 목록
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Item>, StoreError>;

    async fn set_published_refs(
        &self,
        item_id: i64,
        refs: PublishedRefs,
    ) -> Result<(), StoreError>;

    async fn delete_item(&self, item_id: i64) -> Result<bool, StoreError>;

    /// 밴 등록. 이미 밴된 사용자면 `false`.
    async fn insert_ban(&self, ban: GlobalBan) -> Result<bool, StoreError>;

    /// 밴 해제. 밴 내역이 없으면 `false`.
    async fn remove_ban(&self, user_id: i64) -> Result<bool, StoreError>;

    async fn find_ban(&self, user_id: i64) -> Result<Option<GlobalBan>, StoreError>;

    async fn count_bans(&self) -> Result<i64, StoreError>;

    /// 연결 상태 점검
    async fn ping(&self) -> Result<(), StoreError>;
}
// endregion: --- Item Store Trait
