/// HTTP 명령 표면
/// 엔진 결과를 상태 코드 + JSON 본문으로 변환한다. 입찰 경로는 엔진에 들어가기 전에
/// 그룹/채널 멤버십 게이트를 통과해야 한다 (출처 검증은 표시 계층의 몫).
// region:    --- Imports
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::context::BotContext;
use crate::error::AuctionError;
use crate::moderation::commands as moderation;
use crate::query;
use crate::store::{ItemFilter, Page};
use crate::submission::commands as submission;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
// endregion: --- Imports

// region:    --- Error Mapping
fn error_response(err: AuctionError) -> Response {
    let status = match &err {
        AuctionError::Validation(_) | AuctionError::BidTooLow { .. } => StatusCode::BAD_REQUEST,
        AuctionError::NotFound { .. } => StatusCode::NOT_FOUND,
        AuctionError::InvalidState { .. }
        | AuctionError::AlreadyProcessed { .. }
        | AuctionError::ConcurrencyConflict { .. } => StatusCode::CONFLICT,
        AuctionError::Permission(_) => StatusCode::FORBIDDEN,
        AuctionError::External(_) => StatusCode::BAD_GATEWAY,
        AuctionError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let mut body = json!({
        "error": err.to_string(),
        "code": err.code(),
    });
    match &err {
        AuctionError::BidTooLow { min_next_bid } => {
            body["min_next_bid"] = json!(min_next_bid);
        }
        AuctionError::ConcurrencyConflict {
            current_price,
            min_next_bid,
        } => {
            body["current_price"] = json!(current_price);
            body["min_next_bid"] = json!(min_next_bid);
        }
        _ => {}
    }
    (status, Json(body)).into_response()
}
// endregion: --- Error Mapping

// region:    --- Bid Handler
/// 입찰 요청 처리
pub async fn handle_bid(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Json(cmd): Json<PlaceBidCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Handler", cmd);

    // 그룹/채널 멤버십 게이트
    if !is_member(&ctx, cmd.bidder_id).await {
        return error_response(AuctionError::Permission(
            "그룹과 채널에 가입해야 입찰할 수 있습니다".into(),
        ));
    }

    match handle_place_bid(&ctx, cmd).await {
        Ok(accepted) => (
            StatusCode::OK,
            Json(json!({
                "message": "입찰이 성공적으로 처리되었습니다.",
                "item_id": accepted.item_id,
                "current_price": accepted.new_current_price,
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// 그룹과 채널 모두에 가입되어 있는지 확인한다.
/// 멤버십 조회 실패는 미가입으로 취급한다.
async fn is_member(ctx: &BotContext, user_id: i64) -> bool {
    let group = ctx.chat.get_chat_member(ctx.cfg.group_id, user_id).await;
    let channel = ctx.chat.get_chat_member(ctx.cfg.channel_id, user_id).await;
    matches!((group, channel), (Ok(g), Ok(c)) if g.is_member() && c.is_member())
}
// endregion: --- Bid Handler

// region:    --- Submission Handlers
/// 초안 제출 처리
pub async fn handle_submit(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Json(cmd): Json<submission::SubmitDraftCommand>,
) -> impl IntoResponse {
    match submission::handle_submit_draft(&ctx, cmd).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub owner_id: i64,
    pub base_price: i64,
}

/// 제출 확정 처리
pub async fn handle_finalize(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(item_id): Path<i64>,
    Json(req): Json<FinalizeRequest>,
) -> impl IntoResponse {
    match submission::handle_finalize_submission(&ctx, item_id, req.owner_id, req.base_price).await
    {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}
// endregion: --- Submission Handlers

// region:    --- Moderation Handlers
#[derive(Debug, Deserialize)]
pub struct AdminRequest {
    pub admin_id: i64,
}

/// 승인 처리
pub async fn handle_approve(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(item_id): Path<i64>,
    Json(req): Json<AdminRequest>,
) -> impl IntoResponse {
    match moderation::handle_approve(&ctx, item_id, req.admin_id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 거절 처리
pub async fn handle_reject(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(item_id): Path<i64>,
    Json(req): Json<AdminRequest>,
) -> impl IntoResponse {
    match moderation::handle_reject(&ctx, item_id, req.admin_id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 강제 종료 처리
pub async fn handle_force_end(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(item_id): Path<i64>,
    Json(req): Json<AdminRequest>,
) -> impl IntoResponse {
    match moderation::handle_force_end(&ctx, item_id, req.admin_id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub admin_id: i64,
    pub item_ids: Vec<i64>,
}

/// 아이템 제거 처리
pub async fn handle_remove(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Json(req): Json<RemoveRequest>,
) -> impl IntoResponse {
    match moderation::handle_remove_items(&ctx, req.item_ids, req.admin_id).await {
        Ok(deleted) => (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub admin_id: i64,
    pub user_id: i64,
    pub reason: Option<String>,
}

/// 전역 밴 등록 처리
pub async fn handle_ban(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Json(req): Json<BanRequest>,
) -> impl IntoResponse {
    let reason = req.reason.unwrap_or_else(|| "사유 없음".into());
    match moderation::handle_ban_user(&ctx, req.user_id, req.admin_id, reason).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "banned": req.user_id }))).into_response(),
        Err(e) => error_response(e),
    }
}

/// 전역 밴 해제 처리
pub async fn handle_unban(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(user_id): Path<i64>,
    Json(req): Json<AdminRequest>,
) -> impl IntoResponse {
    match moderation::handle_unban_user(&ctx, user_id, req.admin_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "unbanned": user_id }))).into_response(),
        Err(e) => error_response(e),
    }
}
// endregion: --- Moderation Handlers

// region:    --- Query Handlers
/// 아이템 조회
pub async fn handle_get_item(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(item_id): Path<i64>,
) -> impl IntoResponse {
    match query::handlers::get_item(&ctx, item_id).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 사용자 아이템 목록 조회
pub async fn handle_user_items(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Path(user_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let mut filter = ItemFilter::default();
    if let Some(category) = &params.category {
        match category.parse() {
            Ok(c) => filter.category = Some(c),
            Err(e) => return error_response(AuctionError::Validation(e)),
        }
    }
    if let Some(state) = &params.state {
        match state.parse() {
            Ok(s) => filter.state = Some(s),
            Err(e) => return error_response(AuctionError::Validation(e)),
        }
    }
    let page = Page {
        limit: params.limit.unwrap_or(20),
        offset: params.offset.unwrap_or(0),
    };

    match query::handlers::list_user_items(&ctx, user_id, filter, page).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub admin_id: i64,
}

/// 운영 현황 조회 (관리자 전용)
pub async fn handle_status(
    State(ctx): State<std::sync::Arc<BotContext>>,
    Query(params): Query<StatusParams>,
) -> impl IntoResponse {
    if !moderation::is_admin(&ctx.cfg, params.admin_id) {
        return error_response(AuctionError::Permission(
            "소유자 또는 관리자만 사용할 수 있습니다".into(),
        ));
    }
    Json(query::handlers::status_overview(&ctx).await).into_response()
}

/// 상태 점검 (keep-alive)
pub async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
// endregion: --- Query Handlers
