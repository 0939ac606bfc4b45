// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
// endregion: --- Imports

// 현재 선두 입찰자
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bidder {
    pub id: i64,
    pub display_name: String,
}

// 입찰 이력 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidEntry {
    pub bidder_id: i64,
    pub bidder_name: String,
    pub amount: i64,
    pub time: DateTime<Utc>,
}
