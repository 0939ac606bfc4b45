/// 실행 컨텍스트
/// 저장소와 메시징 클라이언트를 트레이트 뒤에 두어 테스트 더블을 주입할 수 있게 한다.
// region:    --- Imports
use crate::config::BotConfig;
use crate::messaging::ChatClient;
use crate::store::ItemStore;
use std::sync::Arc;
// endregion: --- Imports

// region:    --- Bot Context
/// 모든 엔진 컴포넌트가 공유하는 컨텍스트.
/// 저장소가 유일한 상태 원본이며, 컨텍스트 자체는 불변이다.
pub struct BotContext {
    pub store: Arc<dyn ItemStore>,
    pub chat: Arc<dyn ChatClient>,
    pub cfg: BotConfig,
}

impl BotContext {
    pub fn new(store: Arc<dyn ItemStore>, chat: Arc<dyn ChatClient>, cfg: BotConfig) -> Self {
        BotContext { store, chat, cfg }
    }
}
// endregion: --- Bot Context
