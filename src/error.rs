/// 경매 도메인 에러 분류
/// 모든 명령 처리 결과는 이 타입으로 수렴한다.
// region:    --- Imports
use crate::auction::state::ItemState;
use crate::messaging::ChatError;
use crate::store::StoreError;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Auction Error
/// 경매 엔진 에러
#[derive(Debug, Error)]
pub enum AuctionError {
    /// 잘못된 입력 (상태 변화 없음)
    #[error("{0}")]
    Validation(String),

    /// 존재하지 않는 아이템
    #[error("아이템을 찾을 수 없습니다: {item_id}")]
    NotFound { item_id: i64 },

    /// 현재 상태에서 허용되지 않는 동작
    #[error("현재 상태({current})에서는 {action}이(가) 허용되지 않습니다")]
    InvalidState {
        current: ItemState,
        action: &'static str,
    },

    /// 동일한 전이가 이미 적용됨 (중복 승인/중복 종료 등)
    #[error("이미 처리된 아이템입니다 (현재 상태: {current})")]
    AlreadyProcessed { current: ItemState },

    /// 권한 없음 (비관리자, 밴 사용자, 본인 입찰)
    #[error("{0}")]
    Permission(String),

    /// 최소 인상폭 미달
    #[error("입찰 금액이 부족합니다. 최소 입찰가: {min_next_bid}")]
    BidTooLow { min_next_bid: i64 },

    /// 낙관적 갱신 경합 패배. 서버에서 재시도하지 않고 최신 가격을 알려준다.
    #[error("다른 입찰이 먼저 처리되었습니다. 현재 최고가: {current_price}, 최소 입찰가: {min_next_bid}")]
    ConcurrencyConflict {
        current_price: i64,
        min_next_bid: i64,
    },

    /// 메시징 호출 실패. 저장소 변경이 이미 확정된 뒤에는 절대 전파하지 않는다.
    #[error("메시징 호출 실패: {0}")]
    External(#[from] ChatError),

    /// 저장소 장애
    #[error("저장소 오류: {0}")]
    Store(#[from] StoreError),
}

impl AuctionError {
    /// 응답 본문에 실리는 고정 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::Validation(_) => "VALIDATION",
            AuctionError::NotFound { .. } => "NOT_FOUND",
            AuctionError::InvalidState { .. } => "INVALID_STATE",
            AuctionError::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            AuctionError::Permission(_) => "PERMISSION_DENIED",
            AuctionError::BidTooLow { .. } => "LOW_BID",
            AuctionError::ConcurrencyConflict { .. } => "BID_CONFLICT",
            AuctionError::External(_) => "EXTERNAL_ERROR",
            AuctionError::Store(_) => "STORE_UNAVAILABLE",
        }
    }
}
// endregion: --- Auction Error
