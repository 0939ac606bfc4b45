/// 기록용 메시징 클라이언트
/// 테스트에서 실제 API 대신 주입한다. 모든 호출을 순서대로 기록하며,
/// 실패 플래그를 올리면 전송 계열 호출이 에러를 돌려준다.
// region:    --- Imports
use crate::messaging::{ChatClient, ChatError, ChatMemberStatus, InlineKeyboard, MessageRef};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::Mutex;
// endregion: --- Imports

// region:    --- Recording Chat
/// 기록된 호출
#[derive(Debug, Clone)]
pub enum OutboundCall {
    Message {
        chat_id: i64,
        text: String,
    },
    Photo {
        chat_id: i64,
        caption: String,
        has_markup: bool,
    },
    CaptionEdit {
        chat_id: i64,
        message_id: i64,
        caption: String,
        has_markup: bool,
    },
    MarkupEdit {
        chat_id: i64,
        message_id: i64,
        cleared: bool,
    },
    Pin {
        chat_id: i64,
        message_id: i64,
    },
    Unpin {
        chat_id: i64,
        message_id: i64,
    },
    Delete {
        chat_id: i64,
        message_id: i64,
    },
}

#[derive(Default)]
pub struct RecordingChat {
    calls: Mutex<Vec<OutboundCall>>,
    next_message_id: AtomicI64,
    fail_sends: AtomicBool,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// 전송 계열 호출(send_message / send_photo)을 실패시키도록 설정한다.
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<OutboundCall> {
        self.calls.lock().await.clone()
    }

    pub async fn photos_sent_to(&self, chat_id: i64) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, OutboundCall::Photo { chat_id: cid, .. } if *cid == chat_id))
            .count()
    }

    pub async fn messages_sent_to(&self, chat_id: i64) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                OutboundCall::Message { chat_id: cid, text } if *cid == chat_id => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub async fn markup_edits(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, OutboundCall::MarkupEdit { .. }))
            .count()
    }

    async fn record(&self, call: OutboundCall) {
        self.calls.lock().await.push(call);
    }

    fn next_ref(&self, chat_id: i64) -> MessageRef {
        MessageRef {
            chat_id,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    fn check_send(&self) -> Result<(), ChatError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            Err(ChatError::Request("전송 실패 (테스트 설정)".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChatClient for RecordingChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<MessageRef, ChatError> {
        self.check_send()?;
        self.record(OutboundCall::Message {
            chat_id,
            text: text.to_string(),
        })
        .await;
        Ok(self.next_ref(chat_id))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        _photo_id: &str,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<MessageRef, ChatError> {
        self.check_send()?;
        self.record(OutboundCall::Photo {
            chat_id,
            caption: caption.to_string(),
            has_markup: markup.is_some(),
        })
        .await;
        Ok(self.next_ref(chat_id))
    }

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError> {
        self.record(OutboundCall::CaptionEdit {
            chat_id,
            message_id,
            caption: caption.to_string(),
            has_markup: markup.is_some(),
        })
        .await;
        Ok(())
    }

    async fn edit_message_reply_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError> {
        self.record(OutboundCall::MarkupEdit {
            chat_id,
            message_id,
            cleared: markup.is_none(),
        })
        .await;
        Ok(())
    }

    async fn pin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.record(OutboundCall::Pin {
            chat_id,
            message_id,
        })
        .await;
        Ok(())
    }

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.record(OutboundCall::Unpin {
            chat_id,
            message_id,
        })
        .await;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.record(OutboundCall::Delete {
            chat_id,
            message_id,
        })
        .await;
        Ok(())
    }

    async fn get_chat_member(
        &self,
        _chat_id: i64,
        _user_id: i64,
    ) -> Result<ChatMemberStatus, ChatError> {
        Ok(ChatMemberStatus::Member)
    }
}
// endregion: --- Recording Chat
