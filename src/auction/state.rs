/// 경매 상태 머신
/// 모든 상태 전이는 단방향이며, 허용 여부는 이 모듈의 전이 표 하나로 판정한다.
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
// endregion: --- Imports

// region:    --- Item State
/// 아이템 상태
///
/// 전이: draft → pending → (approved | rejected), approved → ended.
/// rejected 와 ended 는 종결 상태이며 되돌아가는 간선은 없다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Draft,
    Pending,
    Approved,
    Rejected,
    Ended,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Draft => "draft",
            ItemState::Pending => "pending",
            ItemState::Approved => "approved",
            ItemState::Rejected => "rejected",
            ItemState::Ended => "ended",
        }
    }

    /// 종결 상태 여부
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Rejected | ItemState::Ended)
    }

    /// 전이 허용 여부
    pub fn can_transition(&self, to: ItemState) -> bool {
        matches!(
            (self, to),
            (ItemState::Draft, ItemState::Pending)
                | (ItemState::Pending, ItemState::Approved)
                | (ItemState::Pending, ItemState::Rejected)
                | (ItemState::Approved, ItemState::Ended)
        )
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ItemState::Draft),
            "pending" => Ok(ItemState::Pending),
            "approved" => Ok(ItemState::Approved),
            "rejected" => Ok(ItemState::Rejected),
            "ended" => Ok(ItemState::Ended),
            other => Err(format!("알 수 없는 아이템 상태: {other}")),
        }
    }
}
// endregion: --- Item State
