/// 인메모리 저장소 구현체
/// 테스트와 로컬 개발에서 PostgreSQL 구현을 대신한다. 뮤텍스 한 번의 잠금 안에서
/// 가드 검사와 갱신을 함께 수행하므로 CAS 의미가 그대로 유지된다.
// region:    --- Imports
use crate::auction::model::{GlobalBan, Item, NewItem, PublishedRefs};
use crate::auction::state::ItemState;
use crate::store::{BidUpdate, ItemFilter, ItemStore, Page, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
// endregion: --- Imports

// region:    --- Memory Item Store
#[derive(Default)]
struct MemoryInner {
    items: HashMap<i64, Item>,
    bans: HashMap<i64, GlobalBan>,
    next_id: i64,
}

pub struct MemoryItemStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        MemoryItemStore {
            inner: Mutex::new(MemoryInner::default()),
        }
    }

    /// 테스트 지원: 마감 시각을 직접 덮어쓴다.
    pub async fn override_deadline(&self, item_id: i64, deadline: DateTime<Utc>) {
        let mut inner = self.inner.lock().await;
        if let Some(item) = inner.items.get_mut(&item_id) {
            item.deadline = Some(deadline);
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert_draft(&self, draft: NewItem) -> Result<Item, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let item = Item {
            id: inner.next_id,
            owner_id: draft.owner_id,
            owner_name: draft.owner_name,
            category: draft.category,
            rarity: draft.rarity,
            title: draft.title,
            series: draft.series,
            tag: draft.tag,
            photo_id: draft.photo_id,
            base_price: 0,
            current_price: 0,
            state: ItemState::Draft,
            leading_bidder: None,
            bid_history: Vec::new(),
            last_bid_time: None,
            deadline: None,
            expired_flag: false,
            published: PublishedRefs::default(),
            submitted_at: Utc::now(),
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.items.get(&item_id).cloned())
    }

    async fn list_user_items(
        &self,
        user_id: i64,
        filter: ItemFilter,
        page: Page,
    ) -> Result<Vec<Item>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<Item> = inner
            .items
            .values()
            .filter(|i| i.owner_id == user_id)
            .filter(|i| filter.category.map(|c| i.category == c).unwrap_or(true))
            .filter(|i| filter.state.map(|s| i.state == s).unwrap_or(true))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .collect())
    }

    async fn count_items_in_state(&self, state: ItemState) -> Result<i64, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.items.values().filter(|i| i.state == state).count() as i64)
    }

    async fn finalize_draft(
        &self,
        item_id: i64,
        base_price: i64,
    ) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.items.get_mut(&item_id) {
            Some(item) if item.state == ItemState::Draft => {
                item.state = ItemState::Pending;
                item.base_price = base_price;
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn approve_pending(
        &self,
        item_id: i64,
        deadline: DateTime<Utc>,
    ) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.items.get_mut(&item_id) {
            Some(item) if item.state == ItemState::Pending => {
                item.state = ItemState::Approved;
                item.deadline = Some(deadline);
                item.current_price = item.base_price;
                item.expired_flag = false;
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn reject_pending(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.items.get_mut(&item_id) {
            Some(item) if item.state == ItemState::Pending => {
                item.state = ItemState::Rejected;
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn commit_bid(
        &self,
        item_id: i64,
        expected_price: i64,
        update: BidUpdate,
    ) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.items.get_mut(&item_id) {
            Some(item)
                if item.state == ItemState::Approved
                    && !item.expired_flag
                    && item.current_price == expected_price =>
            {
                item.current_price = update.amount;
                item.leading_bidder = Some(update.bidder);
                item.bid_history = update.history;
                item.last_bid_time = Some(update.time);
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_ended(&self, item_id: i64) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.items.get_mut(&item_id) {
            Some(item) if item.state == ItemState::Approved && !item.expired_flag => {
                item.expired_flag = true;
                item.state = ItemState::Ended;
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Item>, StoreError> {
        let inner = self.inner.lock().await;
        let mut items: Vec<Item> = inner
            .items
            .values()
            .filter(|i| i.state == ItemState::Approved && !i.expired_flag && i.deadline_passed(now))
            .cloned()
            .collect();
        items.sort_by_key(|i| i.deadline);
        Ok(items)
    }

    async fn set_published_refs(
        &self,
        item_id: i64,
        refs: PublishedRefs,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if let Some(item) = inner.items.get_mut(&item_id) {
            item.published = refs;
        }
        Ok(())
    }

    async fn delete_item(&self, item_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.items.remove(&item_id).is_some())
    }

    async fn insert_ban(&self, ban: GlobalBan) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.bans.contains_key(&ban.user_id) {
            return Ok(false);
        }
        inner.bans.insert(ban.user_id, ban);
        Ok(true)
    }

    async fn remove_ban(&self, user_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.bans.remove(&user_id).is_some())
    }

    async fn find_ban(&self, user_id: i64) -> Result<Option<GlobalBan>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bans.get(&user_id).cloned())
    }

    async fn count_bans(&self) -> Result<i64, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bans.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
// endregion: --- Memory Item Store
