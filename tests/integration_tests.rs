use auction_bot::auction::model::{Category, Rarity};
use auction_bot::auction::state::ItemState;
use auction_bot::bidding::commands::{handle_place_bid, PlaceBidCommand};
use auction_bot::config::BotConfig;
use auction_bot::context::BotContext;
use auction_bot::error::AuctionError;
use auction_bot::messaging::{ChatClient, RecordingChat};
use auction_bot::moderation::commands as moderation;
use auction_bot::query;
use auction_bot::scheduler::AuctionSweeper;
use auction_bot::settlement::{self, EndReason};
use auction_bot::store::{ItemFilter, ItemStore, MemoryItemStore, Page};
use auction_bot::submission::commands::{self as submission, SubmitDraftCommand};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// 기본 설정의 소유자 (관리자 권한)
const ADMIN: i64 = 1000;

struct TestEnv {
    ctx: Arc<BotContext>,
    store: Arc<MemoryItemStore>,
    chat: Arc<RecordingChat>,
}

/// 인메모리 저장소 + 기록용 메시징 클라이언트로 컨텍스트 구성
fn setup() -> TestEnv {
    let store = Arc::new(MemoryItemStore::new());
    let chat = Arc::new(RecordingChat::new());
    let cfg = BotConfig {
        settle_pacing: std::time::Duration::from_millis(0),
        ..BotConfig::default()
    };
    let ctx = Arc::new(BotContext::new(
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::clone(&chat) as Arc<dyn ChatClient>,
        cfg,
    ));
    TestEnv { ctx, store, chat }
}

fn draft_cmd(owner_id: i64) -> SubmitDraftCommand {
    SubmitDraftCommand {
        owner_id,
        owner_name: format!("user{owner_id}"),
        category: Category::Waifu,
        rarity: Rarity::Rare,
        title: "테스트 캐릭터".into(),
        series: "테스트 작품".into(),
        tag: None,
        photo_id: "photo-1".into(),
    }
}

fn bid_cmd(item_id: i64, bidder_id: i64, amount: i64) -> PlaceBidCommand {
    PlaceBidCommand {
        item_id,
        bidder_id,
        bidder_name: format!("bidder{bidder_id}"),
        amount,
    }
}

/// 제출 → 확정까지 진행된 아이템 생성
async fn pending_item(env: &TestEnv, owner_id: i64, base_price: i64) -> i64 {
    let draft = submission::handle_submit_draft(&env.ctx, draft_cmd(owner_id))
        .await
        .unwrap();
    submission::handle_finalize_submission(&env.ctx, draft.id, owner_id, base_price)
        .await
        .unwrap();
    draft.id
}

/// 승인까지 진행된 아이템 생성
async fn approved_item(env: &TestEnv, owner_id: i64, base_price: i64) -> i64 {
    let item_id = pending_item(env, owner_id, base_price).await;
    moderation::handle_approve(&env.ctx, item_id, ADMIN)
        .await
        .unwrap();
    item_id
}

/// 최소 인상폭 경계 테스트: 현재가 100, 인상폭 5 → 104 거절, 105 수락
#[tokio::test]
async fn test_min_increment_boundary() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 104))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuctionError::BidTooLow { min_next_bid: 105 }
    ));

    // 거절된 입찰은 가격을 바꾸지 않는다
    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 100);

    let accepted = handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 105))
        .await
        .unwrap();
    assert_eq!(accepted.new_current_price, 105);

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 105);
    assert_eq!(item.leading_bidder.as_ref().unwrap().id, 20);
}

/// 본인 입찰은 금액과 무관하게 거절된다
#[tokio::test]
async fn test_self_bid_rejected() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 10, 10_000))
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 100);
}

/// 승인 상태가 아니면 입찰할 수 없다
#[tokio::test]
async fn test_bid_requires_approved_state() {
    let env = setup();

    // pending 상태
    let pending_id = pending_item(&env, 10, 100).await;
    let err = handle_place_bid(&env.ctx, bid_cmd(pending_id, 20, 200))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuctionError::InvalidState {
            current: ItemState::Pending,
            ..
        }
    ));

    // ended 상태
    let ended_id = approved_item(&env, 11, 100).await;
    moderation::handle_force_end(&env.ctx, ended_id, ADMIN)
        .await
        .unwrap();
    let err = handle_place_bid(&env.ctx, bid_cmd(ended_id, 20, 200))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuctionError::InvalidState {
            current: ItemState::Ended,
            ..
        }
    ));

    let item = env.store.find_item(ended_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 100);
}

/// 마감이 지나면 스위퍼가 늦어도 입찰은 거절된다
#[tokio::test]
async fn test_bid_after_deadline_rejected() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;
    env.store
        .override_deadline(item_id, Utc::now() - Duration::hours(1))
        .await;

    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 200))
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::InvalidState { .. }));

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 100);
    // 스위퍼가 아직 돌지 않았으므로 상태는 그대로다
    assert_eq!(item.state, ItemState::Approved);
    assert!(!item.expired_flag);
}

/// 수락된 입찰 열에 대해 현재가는 단조 증가한다
#[tokio::test]
async fn test_price_monotonic_over_accepted_bids() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    let mut last_price = 100;
    for (bidder, amount) in [(20, 110), (21, 120), (22, 150), (20, 155)] {
        let accepted = handle_place_bid(&env.ctx, bid_cmd(item_id, bidder, amount))
            .await
            .unwrap();
        assert!(accepted.new_current_price > last_price);
        last_price = accepted.new_current_price;
    }

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 155);
    assert_eq!(item.bid_history.len(), 4);
    assert_eq!(item.leading_bidder.as_ref().unwrap().id, 20);
}

/// 동시 입찰: 하나만 즉시 성공하거나, 직렬화되어 둘 다 성공한다.
/// 경합에서 진 쪽은 이긴 가격이 담긴 ConcurrencyConflict 를 받는다.
#[tokio::test]
async fn test_concurrent_bidding() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    let ctx_a = Arc::clone(&env.ctx);
    let ctx_b = Arc::clone(&env.ctx);
    let a = tokio::spawn(async move { handle_place_bid(&ctx_a, bid_cmd(item_id, 20, 120)).await });
    let b = tokio::spawn(async move { handle_place_bid(&ctx_b, bid_cmd(item_id, 21, 130)).await });

    let results = vec![a.await.unwrap(), b.await.unwrap()];
    let accepted: Vec<i64> = results
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|ok| ok.new_current_price))
        .collect();
    assert!(!accepted.is_empty(), "적어도 하나의 입찰은 성공해야 한다");

    let final_price = env
        .store
        .find_item(item_id)
        .await
        .unwrap()
        .unwrap()
        .current_price;
    assert_eq!(final_price, *accepted.iter().max().unwrap());

    // 실패한 쪽은 경합 패배 혹은 최신 가격 기준 인상폭 미달이어야 한다
    for result in &results {
        if let Err(e) = result {
            match e {
                AuctionError::ConcurrencyConflict { current_price, .. } => {
                    assert!(accepted.contains(current_price));
                }
                AuctionError::BidTooLow { .. } => {}
                other => panic!("예상하지 못한 에러: {other:?}"),
            }
        }
    }
}

/// 읽기 시점 가격이 낡았으면 저장소 CAS 가 거부한다
#[tokio::test]
async fn test_stale_price_guard() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 120))
        .await
        .unwrap();

    // 가격 100 기준으로 만든 갱신은 더 이상 적용되지 않는다
    let stale = env
        .store
        .commit_bid(
            item_id,
            100,
            auction_bot::store::BidUpdate {
                amount: 125,
                bidder: auction_bot::bidding::model::Bidder {
                    id: 21,
                    display_name: "bidder21".into(),
                },
                history: Vec::new(),
                time: Utc::now(),
            },
        )
        .await
        .unwrap();
    assert!(stale.is_none());

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.current_price, 120);
}

/// 승인은 멱등-안전하다: 두 번째 시도는 AlreadyProcessed 를 받고
/// 게시물이 중복 생성되지 않는다
#[tokio::test]
async fn test_approve_idempotent() {
    let env = setup();
    let item_id = pending_item(&env, 10, 100).await;

    let approved = moderation::handle_approve(&env.ctx, item_id, ADMIN)
        .await
        .unwrap();
    assert_eq!(approved.state, ItemState::Approved);
    assert_eq!(approved.current_price, 100);
    assert!(approved.deadline.is_some());

    let err = moderation::handle_approve(&env.ctx, item_id, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuctionError::AlreadyProcessed {
            current: ItemState::Approved
        }
    ));

    // 채널 게시는 한 번만 일어난다
    assert_eq!(env.chat.photos_sent_to(env.ctx.cfg.channel_id).await, 1);
}

/// 거절은 게시 없이 제출자에게만 알린다
#[tokio::test]
async fn test_reject_without_publication() {
    let env = setup();
    let item_id = pending_item(&env, 10, 100).await;

    let rejected = moderation::handle_reject(&env.ctx, item_id, ADMIN)
        .await
        .unwrap();
    assert_eq!(rejected.state, ItemState::Rejected);
    assert_eq!(env.chat.photos_sent_to(env.ctx.cfg.channel_id).await, 0);
    assert_eq!(env.chat.photos_sent_to(10).await, 1);

    // 종결 상태에서 승인/거절은 모두 거부된다
    let err = moderation::handle_approve(&env.ctx, item_id, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::AlreadyProcessed { .. }));
    let err = moderation::handle_reject(&env.ctx, item_id, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::AlreadyProcessed { .. }));
}

/// 비관리자는 심사 동작을 수행할 수 없다
#[tokio::test]
async fn test_moderation_requires_admin() {
    let env = setup();
    let item_id = pending_item(&env, 10, 100).await;

    let err = moderation::handle_approve(&env.ctx, item_id, 42)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    let err = moderation::handle_force_end(&env.ctx, item_id, 42)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));
}

/// 종료 전이는 동시에 시도돼도 정확히 한 번만 적용되고,
/// 정산 부수효과도 한 번만 발생한다
#[tokio::test]
async fn test_settlement_applied_exactly_once() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;
    env.store
        .override_deadline(item_id, Utc::now() - Duration::hours(1))
        .await;

    let group_posts_before = env.chat.photos_sent_to(env.ctx.cfg.group_id).await;

    let ctx_a = Arc::clone(&env.ctx);
    let ctx_b = Arc::clone(&env.ctx);
    let a = tokio::spawn(
        async move { settlement::settle_item(&ctx_a, item_id, EndReason::Deadline).await },
    );
    let b = tokio::spawn(
        async move { settlement::settle_item(&ctx_b, item_id, EndReason::Deadline).await },
    );

    let results = vec![a.await.unwrap(), b.await.unwrap()];
    let ok_count = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok_count, 1, "정확히 한 쪽만 정산을 수행해야 한다");
    assert!(results.iter().any(|r| matches!(
        r,
        Err(AuctionError::AlreadyProcessed { .. })
    )));

    // 그룹 공지는 정확히 한 건
    assert_eq!(
        env.chat.photos_sent_to(env.ctx.cfg.group_id).await,
        group_posts_before + 1
    );

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.state, ItemState::Ended);
    assert!(item.expired_flag);
}

/// 스위퍼는 아이템별 실패를 격리한다: 알림이 전부 실패해도
/// 만료된 아이템은 모두 종료된다
#[tokio::test]
async fn test_sweeper_isolates_notification_failures() {
    let env = setup();
    let first = approved_item(&env, 10, 100).await;
    let second = approved_item(&env, 11, 200).await;
    for id in [first, second] {
        env.store
            .override_deadline(id, Utc::now() - Duration::hours(1))
            .await;
    }

    env.chat.set_fail_sends(true);
    AuctionSweeper::sweep_expired(&env.ctx).await.unwrap();

    for id in [first, second] {
        let item = env.store.find_item(id).await.unwrap().unwrap();
        assert_eq!(item.state, ItemState::Ended);
        assert!(item.expired_flag);
    }
}

/// 스윕 재실행은 안전하다: 이미 플래그가 선 아이템은 스캔에서 빠진다
#[tokio::test]
async fn test_sweep_restart_is_idempotent() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;
    env.store
        .override_deadline(item_id, Utc::now() - Duration::hours(1))
        .await;

    AuctionSweeper::sweep_expired(&env.ctx).await.unwrap();
    let group_posts = env.chat.photos_sent_to(env.ctx.cfg.group_id).await;

    AuctionSweeper::sweep_expired(&env.ctx).await.unwrap();
    assert_eq!(
        env.chat.photos_sent_to(env.ctx.cfg.group_id).await,
        group_posts,
        "재실행이 공지를 중복 전송하면 안 된다"
    );
}

/// 버튼 제거 보조 스윕은 표시만 손보고 만료 플래그는 소비하지 않는다
#[tokio::test]
async fn test_cleanup_sweep_preserves_settlement() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;
    env.store
        .override_deadline(item_id, Utc::now() - Duration::hours(1))
        .await;

    AuctionSweeper::sweep_stale_markup(&env.ctx).await.unwrap();
    assert!(env.chat.markup_edits().await >= 1);

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.state, ItemState::Approved);
    assert!(!item.expired_flag);

    // 정산 스윕은 여전히 해당 아이템을 찾아 종료시킨다
    AuctionSweeper::sweep_expired(&env.ctx).await.unwrap();
    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.state, ItemState::Ended);
}

/// 전역 밴은 입찰과 제출을 모두 막고, 해제하면 복구된다
#[tokio::test]
async fn test_global_ban_lifecycle() {
    let env = setup();
    let item_id = approved_item(&env, 10, 100).await;

    moderation::handle_ban_user(&env.ctx, 20, ADMIN, "규칙 위반".into())
        .await
        .unwrap();

    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 200))
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    let err = submission::handle_submit_draft(&env.ctx, draft_cmd(20))
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    // 중복 밴은 거절
    let err = moderation::handle_ban_user(&env.ctx, 20, ADMIN, "중복".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Validation(_)));

    // 관리자는 밴할 수 없다
    let err = moderation::handle_ban_user(&env.ctx, 1001, ADMIN, "시도".into())
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    moderation::handle_unban_user(&env.ctx, 20, ADMIN)
        .await
        .unwrap();
    handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 200))
        .await
        .unwrap();

    let err = moderation::handle_unban_user(&env.ctx, 20, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Validation(_)));
}

/// 제출 확정 규칙: 본인만, 0 이상 시작가, 한 번만
#[tokio::test]
async fn test_finalize_submission_rules() {
    let env = setup();
    let draft = submission::handle_submit_draft(&env.ctx, draft_cmd(10))
        .await
        .unwrap();

    let err = submission::handle_finalize_submission(&env.ctx, draft.id, 11, 100)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Permission(_)));

    let err = submission::handle_finalize_submission(&env.ctx, draft.id, 10, -5)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::Validation(_)));

    submission::handle_finalize_submission(&env.ctx, draft.id, 10, 100)
        .await
        .unwrap();
    let err = submission::handle_finalize_submission(&env.ctx, draft.id, 10, 100)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::AlreadyProcessed { .. }));
}

/// 전 과정 시나리오: 제출 → 승인 → 입찰 경계 → 강제 종료
#[tokio::test]
async fn test_auction_lifecycle_end_to_end() {
    let env = setup();
    let item_id = pending_item(&env, 10, 100).await;
    moderation::handle_approve(&env.ctx, item_id, ADMIN)
        .await
        .unwrap();

    // 120 수락
    let accepted = handle_place_bid(&env.ctx, bid_cmd(item_id, 20, 120))
        .await
        .unwrap();
    assert_eq!(accepted.new_current_price, 120);

    // 123 거절 (최소 다음 입찰가 125)
    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 21, 123))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuctionError::BidTooLow { min_next_bid: 125 }
    ));

    // 125 수락
    let accepted = handle_place_bid(&env.ctx, bid_cmd(item_id, 21, 125))
        .await
        .unwrap();
    assert_eq!(accepted.new_current_price, 125);

    // 강제 종료
    let ended = moderation::handle_force_end(&env.ctx, item_id, ADMIN)
        .await
        .unwrap();
    assert_eq!(ended.state, ItemState::Ended);
    assert!(ended.expired_flag);
    assert_eq!(ended.current_price, 125);
    assert_eq!(ended.leading_bidder.as_ref().unwrap().id, 21);

    // 낙찰자와 판매자 개별 통지
    assert_eq!(env.chat.messages_sent_to(21).await.len(), 1);
    assert_eq!(env.chat.messages_sent_to(10).await.len(), 1);

    // 종료 후 입찰은 거절된다
    let err = handle_place_bid(&env.ctx, bid_cmd(item_id, 22, 200))
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::InvalidState { .. }));

    // 강제 종료 재시도는 중복 정산이 아니다
    let err = moderation::handle_force_end(&env.ctx, item_id, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(err, AuctionError::AlreadyProcessed { .. }));
}

/// 입찰 이력은 설정된 상한까지 최근 항목만 보존한다
#[tokio::test]
async fn test_bid_history_retention_cap() {
    let store = Arc::new(MemoryItemStore::new());
    let chat = Arc::new(RecordingChat::new());
    let cfg = BotConfig {
        bid_history_cap: 3,
        settle_pacing: std::time::Duration::from_millis(0),
        ..BotConfig::default()
    };
    let ctx = Arc::new(BotContext::new(
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::clone(&chat) as Arc<dyn ChatClient>,
        cfg,
    ));
    let env = TestEnv { ctx, store, chat };

    let item_id = approved_item(&env, 10, 100).await;
    for (i, amount) in [110, 120, 130, 140, 150].iter().enumerate() {
        handle_place_bid(&env.ctx, bid_cmd(item_id, 20 + i as i64, *amount))
            .await
            .unwrap();
    }

    let item = env.store.find_item(item_id).await.unwrap().unwrap();
    assert_eq!(item.bid_history.len(), 3);
    // 가장 오래된 항목이 밀려나고 최근 3건만 남는다
    let amounts: Vec<i64> = item.bid_history.iter().map(|b| b.amount).collect();
    assert_eq!(amounts, vec![130, 140, 150]);
}

/// 사용자 아이템 목록: 필터와 페이지 적용
#[tokio::test]
async fn test_list_user_items() {
    let env = setup();
    for _ in 0..3 {
        pending_item(&env, 10, 100).await;
    }
    let mut husbando = draft_cmd(10);
    husbando.category = Category::Husbando;
    let draft = submission::handle_submit_draft(&env.ctx, husbando)
        .await
        .unwrap();
    submission::handle_finalize_submission(&env.ctx, draft.id, 10, 50)
        .await
        .unwrap();
    pending_item(&env, 11, 100).await;

    let all = query::handlers::list_user_items(
        &env.ctx,
        10,
        ItemFilter::default(),
        Page::default(),
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 4);

    let filtered = query::handlers::list_user_items(
        &env.ctx,
        10,
        ItemFilter {
            category: Some(Category::Husbando),
            state: Some(ItemState::Pending),
        },
        Page::default(),
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, draft.id);

    let paged = query::handlers::list_user_items(
        &env.ctx,
        10,
        ItemFilter::default(),
        Page {
            limit: 2,
            offset: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(paged.len(), 2);
    // 최신 아이템부터 내려온다
    assert!(paged[0].id > paged[1].id);
}

/// 운영 현황 집계
#[tokio::test]
async fn test_status_overview() {
    let env = setup();
    pending_item(&env, 10, 100).await;
    let approved = approved_item(&env, 11, 100).await;
    let ended = approved_item(&env, 12, 100).await;
    moderation::handle_force_end(&env.ctx, ended, ADMIN)
        .await
        .unwrap();
    moderation::handle_ban_user(&env.ctx, 99, ADMIN, "테스트".into())
        .await
        .unwrap();

    let overview = query::handlers::status_overview(&env.ctx).await;
    assert!(overview.store_ok);
    assert_eq!(overview.pending_items, 1);
    assert_eq!(overview.approved_items, 1);
    assert_eq!(overview.ended_items, 1);
    assert_eq!(overview.active_bans, 1);

    let item = env.store.find_item(approved).await.unwrap().unwrap();
    assert_eq!(item.state, ItemState::Approved);
}

/// 상태 머신 전이 표
#[tokio::test]
async fn test_state_transition_table() {
    use ItemState::*;

    assert!(Draft.can_transition(Pending));
    assert!(Pending.can_transition(Approved));
    assert!(Pending.can_transition(Rejected));
    assert!(Approved.can_transition(Ended));

    // 역방향/건너뛰기 간선은 없다
    assert!(!Pending.can_transition(Draft));
    assert!(!Draft.can_transition(Approved));
    assert!(!Rejected.can_transition(Approved));
    assert!(!Ended.can_transition(Approved));
    assert!(!Approved.can_transition(Rejected));

    assert!(Rejected.is_terminal());
    assert!(Ended.is_terminal());
    assert!(!Approved.is_terminal());
}
