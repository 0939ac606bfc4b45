/// 봇 설정
/// 전역 싱글턴 대신 명시적인 설정 객체를 만들어 각 컴포넌트에 주입한다.
// region:    --- Imports
use std::time::Duration;
// endregion: --- Imports

// region:    --- Bot Config
/// 봇 전체 설정. 환경 변수에서 읽어 구성한다.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// 메시징 API 토큰
    pub bot_token: String,
    /// 경매 그룹 채팅 ID
    pub group_id: i64,
    /// 공지 채널 ID
    pub channel_id: i64,
    /// 운영 로그 그룹 ID (0이면 기록하지 않음)
    pub log_group_id: i64,
    /// 소유자 ID
    pub owner_id: i64,
    /// 관리자 ID 목록
    pub admins: Vec<i64>,
    /// 그룹 초대 링크
    pub group_url: String,
    /// 채널 초대 링크
    pub channel_url: String,
    /// 데이터베이스 접속 URL
    pub database_url: String,
    /// HTTP 서버 바인드 주소
    pub listen_addr: String,
    /// 최소 입찰 인상폭
    pub min_increment: i64,
    /// 경매 진행 기간 (승인 시점부터)
    pub auction_duration: chrono::Duration,
    /// 만료 스윕 주기
    pub expiry_sweep_interval: Duration,
    /// 입찰 버튼 제거 보조 스윕 주기
    pub cleanup_sweep_interval: Duration,
    /// 그룹 고정 해제까지의 지연
    pub unpin_delay: Duration,
    /// 만료 정산 사이의 간격 (알림 폭주 방지)
    pub settle_pacing: Duration,
    /// 입찰 이력 보존 상한 (최근 N건)
    pub bid_history_cap: usize,
}

impl BotConfig {
    /// 환경 변수에서 설정을 읽는다. 필수 값이 없으면 기동 시점에 바로 실패한다.
    pub fn from_env() -> Self {
        BotConfig {
            bot_token: std::env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            group_id: env_i64("GROUP_ID"),
            channel_id: env_i64("CHANNEL_ID"),
            log_group_id: env_i64_or("LOG_GROUP_ID", 0),
            owner_id: env_i64("OWNER_ID"),
            admins: std::env::var("ADMINS")
                .unwrap_or_default()
                .split(',')
                .filter_map(|x| x.trim().parse().ok())
                .collect(),
            group_url: std::env::var("GROUP_URL").unwrap_or_default(),
            channel_url: std::env::var("CHANNEL_URL").unwrap_or_default(),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            min_increment: env_i64_or("MIN_INCREMENT", 5),
            auction_duration: chrono::Duration::hours(env_i64_or("AUCTION_DURATION_HOURS", 72)),
            expiry_sweep_interval: Duration::from_secs(env_u64_or("EXPIRY_SWEEP_SECS", 3600)),
            cleanup_sweep_interval: Duration::from_secs(env_u64_or("CLEANUP_SWEEP_SECS", 3600)),
            unpin_delay: Duration::from_secs(env_u64_or("UNPIN_DELAY_SECS", 72 * 3600)),
            settle_pacing: Duration::from_millis(env_u64_or("SETTLE_PACING_MS", 1000)),
            bid_history_cap: env_u64_or("BID_HISTORY_CAP", 100) as usize,
        }
    }
}

/// 테스트 및 로컬 개발용 기본값
impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            bot_token: String::new(),
            group_id: -1001,
            channel_id: -1002,
            log_group_id: -1003,
            owner_id: 1000,
            admins: vec![1001],
            group_url: "https://t.me/auction_group".into(),
            channel_url: "https://t.me/auction_channel".into(),
            database_url: String::new(),
            listen_addr: "0.0.0.0:3000".into(),
            min_increment: 5,
            auction_duration: chrono::Duration::hours(72),
            expiry_sweep_interval: Duration::from_secs(3600),
            cleanup_sweep_interval: Duration::from_secs(3600),
            unpin_delay: Duration::from_secs(72 * 3600),
            settle_pacing: Duration::from_millis(1000),
            bid_history_cap: 100,
        }
    }
}

fn env_i64(key: &str) -> i64 {
    std::env::var(key)
        .unwrap_or_else(|_| panic!("{key} must be set"))
        .parse()
        .unwrap_or_else(|_| panic!("{key} must be an integer"))
}

fn env_i64_or(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
// endregion: --- Bot Config
