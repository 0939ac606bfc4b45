// region:    --- Imports
use crate::auction::state::ItemState;
use crate::bidding::model::{Bidder, BidEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
// endregion: --- Imports

// region:    --- Category
/// 아이템 분류 (닫힌 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Waifu,
    Husbando,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Waifu => "waifu",
            Category::Husbando => "husbando",
        }
    }

    /// 게시물 캡션에 쓰는 표기
    pub fn label(&self) -> &'static str {
        match self {
            Category::Waifu => "Waifu",
            Category::Husbando => "Husbando",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waifu" => Ok(Category::Waifu),
            "husbando" => Ok(Category::Husbando),
            other => Err(format!("알 수 없는 분류: {other}")),
        }
    }
}
// endregion: --- Category

// region:    --- Rarity
/// 등급. 표기 라벨과 기호가 고정되어 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Medium,
    Rare,
    Legendary,
    Exclusive,
    Limited,
    Celestial,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Medium => "medium",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
            Rarity::Exclusive => "exclusive",
            Rarity::Limited => "limited",
            Rarity::Celestial => "celestial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Medium => "Medium",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Exclusive => "Exclusive",
            Rarity::Limited => "Limited",
            Rarity::Celestial => "Celestial",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Rarity::Common => "🔵",
            Rarity::Medium => "🔴",
            Rarity::Rare => "🟠",
            Rarity::Legendary => "🟡",
            Rarity::Exclusive => "💮",
            Rarity::Limited => "🔮",
            Rarity::Celestial => "🎐",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Rarity::Common),
            "medium" => Ok(Rarity::Medium),
            "rare" => Ok(Rarity::Rare),
            "legendary" => Ok(Rarity::Legendary),
            "exclusive" => Ok(Rarity::Exclusive),
            "limited" => Ok(Rarity::Limited),
            "celestial" => Ok(Rarity::Celestial),
            other => Err(format!("알 수 없는 등급: {other}")),
        }
    }
}
// endregion: --- Rarity

// region:    --- Item
/// 공개 게시물 참조. 승인 시점에 채워지고, 이후 캡션 수정에 사용된다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishedRefs {
    pub channel_id: Option<i64>,
    pub channel_message_id: Option<i64>,
    pub group_message_id: Option<i64>,
}

/// 경매 아이템
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub category: Category,
    pub rarity: Rarity,
    /// 캐릭터 이름
    pub title: String,
    /// 출전 작품
    pub series: String,
    pub tag: Option<String>,
    /// 게시물 사진 참조
    pub photo_id: String,
    pub base_price: i64,
    pub current_price: i64,
    pub state: ItemState,
    pub leading_bidder: Option<Bidder>,
    pub bid_history: Vec<BidEntry>,
    pub last_bid_time: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub expired_flag: bool,
    pub published: PublishedRefs,
    pub submitted_at: DateTime<Utc>,
}

impl Item {
    /// 마감 시각 경과 여부. 마감이 아직 설정되지 않았다면 경과하지 않은 것으로 본다.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map(|d| d <= now).unwrap_or(false)
    }

    /// 다음 입찰이 만족해야 하는 최소 금액
    pub fn min_next_bid(&self, min_increment: i64) -> i64 {
        self.current_price + min_increment
    }
}

/// 신규 제출 입력
#[derive(Debug, Clone)]
pub struct NewItem {
    pub owner_id: i64,
    pub owner_name: String,
    pub category: Category,
    pub rarity: Rarity,
    pub title: String,
    pub series: String,
    pub tag: Option<String>,
    pub photo_id: String,
}
// endregion: --- Item

// region:    --- Global Ban
/// 전역 밴 레코드
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GlobalBan {
    pub user_id: i64,
    pub reason: String,
    pub banned_by: i64,
    pub timestamp: DateTime<Utc>,
}
// endregion: --- Global Ban
