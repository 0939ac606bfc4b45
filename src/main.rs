// region:    --- Imports
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod config;
mod context;
mod error;
mod handlers;
mod messaging;
mod moderation;
mod query;
mod scheduler;
mod settlement;
mod store;
mod submission;

use config::BotConfig;
use context::BotContext;
use messaging::TelegramChat;
use scheduler::AuctionSweeper;
use store::PostgresItemStore;
// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let cfg = BotConfig::from_env();

    // 저장소 접속 및 초기화
    let store = match PostgresItemStore::connect(&cfg.database_url).await {
        Ok(store) => store,
        Err(e) => {
            error!("{:<12} --> 저장소 접속 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };
    if let Err(e) = store.initialize_schema().await {
        error!("{:<12} --> 저장소 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 저장소 초기화 성공", "Main");

    // 메시징 클라이언트 생성
    let chat = TelegramChat::new(&cfg.bot_token);

    // 실행 컨텍스트 구성
    let ctx = Arc::new(BotContext::new(
        Arc::new(store),
        Arc::new(chat),
        cfg.clone(),
    ));

    // 만료 스위퍼 시작
    let sweeper = AuctionSweeper::new(Arc::clone(&ctx));
    sweeper.start().await;
    info!("{:<12} --> 만료 스위퍼 시작", "Main");

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/bid", post(handlers::handle_bid))
        .route("/items", post(handlers::handle_submit))
        .route("/items/remove", post(handlers::handle_remove))
        .route("/items/:id", get(handlers::handle_get_item))
        .route("/items/:id/finalize", post(handlers::handle_finalize))
        .route("/items/:id/approve", post(handlers::handle_approve))
        .route("/items/:id/reject", post(handlers::handle_reject))
        .route("/items/:id/forceend", post(handlers::handle_force_end))
        .route("/users/:id/items", get(handlers::handle_user_items))
        .route("/bans", post(handlers::handle_ban))
        .route("/bans/:user_id/remove", post(handlers::handle_unban))
        .route("/status", get(handlers::handle_status))
        .route("/health", get(handlers::handle_health))
        .layer(cors)
        .with_state(Arc::clone(&ctx));

    // 리스너 생성
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
