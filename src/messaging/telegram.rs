/// 텔레그램 Bot API 클라이언트
// region:    --- Imports
use crate::messaging::{ChatClient, ChatError, ChatMemberStatus, InlineKeyboard, MessageRef};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;
// endregion: --- Imports

// region:    --- Telegram Chat
/// API 응답 공통 형태
#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
    result: Option<Value>,
}

pub struct TelegramChat {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramChat {
    pub fn new(bot_token: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("HTTP client creation error");
        TelegramChat {
            http,
            base_url: format!("https://api.telegram.org/bot{bot_token}"),
        }
    }

    /// API 메서드 호출. 호출 타임아웃은 클라이언트 수준에서 제한된다.
    async fn call(&self, method: &str, payload: Value) -> Result<Value, ChatError> {
        info!("{:<12} --> API 호출: {}", "Chat", method);
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        if !body.ok {
            return Err(ChatError::Api(
                body.description.unwrap_or_else(|| "알 수 없는 오류".into()),
            ));
        }
        Ok(body.result.unwrap_or(Value::Null))
    }
}

fn message_ref(chat_id: i64, result: &Value) -> Result<MessageRef, ChatError> {
    let message_id = result["message_id"]
        .as_i64()
        .ok_or_else(|| ChatError::Api("응답에 message_id가 없습니다".into()))?;
    Ok(MessageRef {
        chat_id,
        message_id,
    })
}

#[async_trait]
impl ChatClient for TelegramChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<MessageRef, ChatError> {
        let result = self
            .call(
                "sendMessage",
                json!({ "chat_id": chat_id, "text": text, "parse_mode": "HTML" }),
            )
            .await?;
        message_ref(chat_id, &result)
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_id: &str,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<MessageRef, ChatError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "photo": photo_id,
            "caption": caption,
            "parse_mode": "HTML",
        });
        if let Some(markup) = markup {
            payload["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| ChatError::Request(e.to_string()))?;
        }
        let result = self.call("sendPhoto", payload).await?;
        message_ref(chat_id, &result)
    }

    async fn edit_message_caption(
        &self,
        chat_id: i64,
        message_id: i64,
        caption: &str,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "caption": caption,
            "parse_mode": "HTML",
        });
        if let Some(markup) = markup {
            payload["reply_markup"] = serde_json::to_value(markup)
                .map_err(|e| ChatError::Request(e.to_string()))?;
        }
        self.call("editMessageCaption", payload).await?;
        Ok(())
    }

    async fn edit_message_reply_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        markup: Option<InlineKeyboard>,
    ) -> Result<(), ChatError> {
        let markup = markup.unwrap_or_default();
        self.call(
            "editMessageReplyMarkup",
            json!({
                "chat_id": chat_id,
                "message_id": message_id,
                "reply_markup": serde_json::to_value(markup)
                    .map_err(|e| ChatError::Request(e.to_string()))?,
            }),
        )
        .await?;
        Ok(())
    }

    async fn pin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.call(
            "pinChatMessage",
            json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await?;
        Ok(())
    }

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.call(
            "unpinChatMessage",
            json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), ChatError> {
        self.call(
            "deleteMessage",
            json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await?;
        Ok(())
    }

    async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMemberStatus, ChatError> {
        let result = self
            .call(
                "getChatMember",
                json!({ "chat_id": chat_id, "user_id": user_id }),
            )
            .await?;
        let status = result["status"]
            .as_str()
            .ok_or_else(|| ChatError::Api("응답에 status가 없습니다".into()))?;
        serde_json::from_value(Value::String(status.to_string()))
            .map_err(|_| ChatError::Api(format!("알 수 없는 멤버 상태: {status}")))
    }
}
// endregion: --- Telegram Chat
