/// 아이템 생성
pub const INSERT_DRAFT: &str = r#"
    INSERT INTO items (owner_id, owner_name, category, rarity, title, series, tag, photo_id, state)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'draft')
    RETURNING *
"#;

/// 아이템 조회
pub const GET_ITEM: &str = "SELECT * FROM items WHERE id = $1";

/// 사용자 아이템 목록 조회 (분류/상태 필터는 NULL 이면 무시)
pub const LIST_USER_ITEMS: &str = r#"
    SELECT * FROM items
    WHERE owner_id = $1
      AND ($2::text IS NULL OR category = $2)
      AND ($3::text IS NULL OR state = $3)
    ORDER BY id DESC
    LIMIT $4 OFFSET $5
"#;

/// 상태별 아이템 수
pub const COUNT_ITEMS_IN_STATE: &str = "SELECT COUNT(*) FROM items WHERE state = $1";

/// 제출 확정 (draft → pending)
pub const FINALIZE_DRAFT: &str = r#"
    UPDATE items SET state = 'pending', base_price = $2
    WHERE id = $1 AND state = 'draft'
    RETURNING *
"#;

/// 승인 (pending → approved), 마감 설정과 현재가 초기화를 함께 수행
pub const APPROVE_PENDING: &str = r#"
    UPDATE items SET state = 'approved', deadline = $2, current_price = base_price, expired_flag = FALSE
    WHERE id = $1 AND state = 'pending'
    RETURNING *
"#;

/// 거절 (pending → rejected)
pub const REJECT_PENDING: &str = r#"
    UPDATE items SET state = 'rejected'
    WHERE id = $1 AND state = 'pending'
    RETURNING *
"#;

/// 입찰 확정. current_price 가드가 낙관적 동시성 제어의 핵심이다.
pub const COMMIT_BID: &str = r#"
    UPDATE items SET current_price = $2, leading_bidder = $3, bid_history = $4, last_bid_time = $5
    WHERE id = $1 AND state = 'approved' AND expired_flag = FALSE AND current_price = $6
    RETURNING *
"#;

/// 경매 종료 (approved → ended). 만료 플래그 가드로 중복 정산을 막는다.
pub const MARK_ENDED: &str = r#"
    UPDATE items SET expired_flag = TRUE, state = 'ended'
    WHERE id = $1 AND state = 'approved' AND expired_flag = FALSE
    RETURNING *
"#;

/// 마감 경과, 미정산 아이템 스캔
pub const FIND_EXPIRED: &str = r#"
    SELECT * FROM items
    WHERE state = 'approved' AND expired_flag = FALSE AND deadline <= $1
    ORDER BY deadline
"#;

/// 공개 게시물 참조 갱신
pub const SET_PUBLISHED_REFS: &str = r#"
    UPDATE items SET channel_id = $2, channel_message_id = $3, group_message_id = $4
    WHERE id = $1
"#;

/// 아이템 삭제
pub const DELETE_ITEM: &str = "DELETE FROM items WHERE id = $1";

/// 밴 등록 (이미 있으면 무시)
pub const INSERT_BAN: &str = r#"
    INSERT INTO global_bans (user_id, reason, banned_by, timestamp)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (user_id) DO NOTHING
"#;

/// 밴 해제
pub const REMOVE_BAN: &str = "DELETE FROM global_bans WHERE user_id = $1";

/// 밴 조회
pub const GET_BAN: &str =
    "SELECT user_id, reason, banned_by, timestamp FROM global_bans WHERE user_id = $1";

/// 밴 수
pub const COUNT_BANS: &str = "SELECT COUNT(*) FROM global_bans";
