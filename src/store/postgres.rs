/// PostgreSQL 저장소 구현체
/// 조건부 UPDATE ... RETURNING 이 비교-교환(CAS) 원시 연산이다. 가드가 깨지면
/// 갱신된 행이 없고, 호출자는 `None` 으로 경합 패배를 알게 된다.
// region:    --- Imports
use crate::auction::model::{Category, GlobalBan, Item, NewItem, PublishedRefs, Rarity};
use crate::auction::state::ItemState;
use crate::bidding::model::{Bidder, BidEntry};
use crate::store::{queries, BidUpdate, ItemFilter, ItemStore, Page, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Item Row
/// items 테이블 행. 역직렬화 후 도메인 모델로 검증 변환한다.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    owner_id: i64,
    owner_name: String,
    category: String,
    rarity: String,
    title: String,
    series: String,
    tag: Option<String>,
    photo_id: String,
    base_price: i64,
    current_price: i64,
    state: String,
    leading_bidder: Option<Json<Bidder>>,
    bid_history: Json<Vec<BidEntry>>,
    last_bid_time: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
    expired_flag: bool,
    channel_id: Option<i64>,
    channel_message_id: Option<i64>,
    group_message_id: Option<i64>,
    submitted_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            owner_id: row.owner_id,
            owner_name: row.owner_name,
            category: row.category.parse::<Category>().map_err(StoreError::Corrupt)?,
            rarity: row.rarity.parse::<Rarity>().map_err(StoreError::Corrupt)?,
            title: row.title,
            series: row.series,
            tag: row.tag,
            photo_id: row.photo_id,
            base_price: row.base_price,
            current_price: row.current_price,
            state: row.state.parse::<ItemState>().map_err(StoreError::Corrupt)?,
            leading_bidder: row.leading_bidder.map(|j| j.0),
            bid_history: row.bid_history.0,
            last_bid_time: row.last_bid_time,
            deadline: row.deadline,
            expired_flag: row.expired_flag,
            published: PublishedRefs {
                channel_id: row.channel_id,
                channel_message_id: row.channel_message_id,
                group_message_id: row.group_message_id,
            },
            submitted_at: row.submitted_at,
        })
    }
}

fn into_item(row: Option<ItemRow>) -> Result<Option<Item>, StoreError> {
    row.map(Item::try_from).transpose()
}
// endregion: --- Item Row

// region:    --- Postgres Item Store
pub struct PostgresItemStore {
    pool: Arc<PgPool>,
}

impl PostgresItemStore {
    /// 풀 생성 및 접속
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(PostgresItemStore {
            pool: Arc::new(pool),
        })
    }

    /// 스키마 초기화
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema_sql = include_str!("../sql/01-create-schema.sql");
        self.execute_multi_query(schema_sql).await?;
        info!("{:<12} --> 스키마 초기화 완료", "Store");
        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), StoreError> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn insert_draft(&self, draft: NewItem) -> Result<Item, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::INSERT_DRAFT)
            .bind(draft.owner_id)
            .bind(&draft.owner_name)
            .bind(draft.category.as_str())
            .bind(draft.rarity.as_str())
            .bind(&draft.title)
            .bind(&draft.series)
            .bind(&draft.tag)
            .bind(&draft.photo_id)
            .fetch_one(&*self.pool)
            .await?;
        row.try_into()
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::GET_ITEM)
            .bind(item_id)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn list_user_items(
        &self,
        user_id: i64,
        filter: ItemFilter,
        page: Page,
    ) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(queries::LIST_USER_ITEMS)
            .bind(user_id)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.state.map(|s| s.as_str()))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Item::try_from).collect()
    }

    async fn count_items_in_state(&self, state: ItemState) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_ITEMS_IN_STATE)
            .bind(state.as_str())
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }

    async fn finalize_draft(
        &self,
        item_id: i64,
        base_price: i64,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::FINALIZE_DRAFT)
            .bind(item_id)
            .bind(base_price)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn approve_pending(
        &self,
        item_id: i64,
        deadline: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::APPROVE_PENDING)
            .bind(item_id)
            .bind(deadline)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn reject_pending(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::REJECT_PENDING)
            .bind(item_id)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn commit_bid(
        &self,
        item_id: i64,
        expected_price: i64,
        update: BidUpdate,
    ) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::COMMIT_BID)
            .bind(item_id)
            .bind(update.amount)
            .bind(Json(update.bidder))
            .bind(Json(update.history))
            .bind(update.time)
            .bind(expected_price)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn mark_ended(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(queries::MARK_ENDED)
            .bind(item_id)
            .fetch_optional(&*self.pool)
            .await?;
        into_item(row)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(queries::FIND_EXPIRED)
            .bind(now)
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(Item::try_from).collect()
    }

    async fn set_published_refs(
        &self,
        item_id: i64,
        refs: PublishedRefs,
    ) -> Result<(), StoreError> {
        sqlx::query(queries::SET_PUBLISHED_REFS)
            .bind(item_id)
            .bind(refs.channel_id)
            .bind(refs.channel_message_id)
            .bind(refs.group_message_id)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete_item(&self, item_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::DELETE_ITEM)
            .bind(item_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_ban(&self, ban: GlobalBan) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::INSERT_BAN)
            .bind(ban.user_id)
            .bind(&ban.reason)
            .bind(ban.banned_by)
            .bind(ban.timestamp)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_ban(&self, user_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::REMOVE_BAN)
            .bind(user_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_ban(&self, user_id: i64) -> Result<Option<GlobalBan>, StoreError> {
        let ban = sqlx::query_as::<_, GlobalBan>(queries::GET_BAN)
            .bind(user_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(ban)
    }

    async fn count_bans(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_BANS)
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}
// endregion: --- Postgres Item Store
