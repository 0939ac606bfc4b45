/// 메시징 클라이언트 포트
/// 모든 호출은 실패할 수 있으며, 저장소 변경이 확정된 뒤의 호출 실패는
/// 로그만 남기고 무시한다 (표시 계층은 최종적 일관성).
// region:    --- Imports
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod recording;
pub mod telegram;
pub mod texts;

pub use recording::RecordingChat;
pub use telegram::TelegramChat;
// endregion: --- Imports

// region:    --- Chat Error
/// 메시징 호출 에러
#[derive(Debug, Error)]
pub enum ChatError {
    /// 요청 전송 실패 (네트워크, 타임아웃)
    #[error("메시징 요청 실패: {0}")]
    Request(String),

    /// API가 실패 응답을 돌려줌
    #[error("메시징 API 오류: {0}")]
    Api(String),
}
// endregion: --- Chat Error

// region:    --- Types
/// 전송된 메시지 위치
#[derive(Debug, Clone, Copy)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

/// 채팅 멤버 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl ChatMemberStatus {
    pub fn is_member(&self) -> bool {
        !matches!(self, ChatMemberStatus::Left | ChatMemberStatus::Kicked)
    }
}

/// URL 버튼
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub url: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineButton {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// 게시물에 붙는 버튼 배열
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn single(button: InlineButton) -> Self {
        InlineKeyboard {
            inline_keyboard: vec![vec![button]],
        }
    }

    pub fn row(buttons: Vec<InlineButton>) -> Self {
        InlineKeyboard {
            inline_keyboard: vec![buttons],
        }
    }
}
// endregion: --- Types

// region:    --- Chat Client Trait
/// 메시징 클라이언트 트레이트
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<MessageRef, ChatError>;

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_id: &str,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<MessageRef, ChatError>;

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError>;

    async fn edit_message_reply_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError>;

    async fn pin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError>;

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError>;

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError>;

    async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMemberStatus, ChatError>;
}
// endregion: --- Chat Client Trait
