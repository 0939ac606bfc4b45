/// 게시물/알림 문구 빌더
// region:    --- Imports
use crate::auction::model::Item;
use crate::config::BotConfig;
use crate::messaging::{InlineButton, InlineKeyboard};
use crate::settlement::EndReason;
// endregion: --- Imports

// region:    --- Post Captions
/// 공개 게시물 캡션. 아이템 ID 줄은 답장 입찰의 ID 해석에 쓰인다.
pub fn post_caption(item: &Item) -> String {
    let mut caption = format!(
        "🆔 아이템 ID: {}\n🎬 작품: {}\n💞 {}: {}\n💎 등급: {} {}\n\n💰 시작가: {}\n",
        item.id,
        item.series,
        item.category.label(),
        item.title,
        item.rarity.label(),
        item.rarity.glyph(),
        item.base_price,
    );
    if let Some(bidder) = &item.leading_bidder {
        caption.push_str(&format!(
            "🏆 최고 입찰: {} ({})\n",
            item.current_price, bidder.display_name
        ));
    }
    if let Some(tag) = &item.tag {
        caption.push('\n');
        caption.push_str(tag);
    }
    caption
}

/// 공개 게시물의 입찰 버튼
pub fn bid_markup(cfg: &BotConfig, item_id: i64) -> InlineKeyboard {
    InlineKeyboard::single(InlineButton::new(
        "💸 입찰하기",
        format!("{}?start=bid_{}", cfg.group_url, item_id),
    ))
}
// endregion: --- Post Captions

// region:    --- Settlement Texts
fn winner_line(item: &Item) -> String {
    match &item.leading_bidder {
        Some(bidder) => bidder.display_name.clone(),
        None => "낙찰자 없음".into(),
    }
}

/// 종료 공지 본문
pub fn ended_announcement(item: &Item, reason: &EndReason) -> String {
    let heading = match reason {
        EndReason::Deadline => "🎉 <b>경매 종료!</b>",
        EndReason::Forced { .. } => "🚨 <b>관리자가 경매를 종료했습니다!</b>",
    };
    format!(
        "{heading}\n\n💞 <b>{}</b>: {}\n🎬 <b>작품:</b> {}\n💎 등급: {} {}\n\n💰 <b>낙찰가:</b> {}\n👤 <b>판매자:</b> {}\n🏆 <b>낙찰자:</b> {}\n\n🆔 <b>아이템 ID:</b> {}",
        item.category.label(),
        item.title,
        item.series,
        item.rarity.label(),
        item.rarity.glyph(),
        item.current_price,
        item.owner_name,
        winner_line(item),
        item.id,
    )
}

/// 종료 후 채널 게시물 최종 캡션
pub fn final_caption(item: &Item, reason: &EndReason) -> String {
    let footer = match reason {
        EndReason::Deadline => "⏰ <b>경매가 종료되었습니다</b>",
        EndReason::Forced { .. } => "🛑 <b>관리자에 의해 종료되었습니다</b>",
    };
    format!("{}\n\n{}", ended_announcement(item, reason), footer)
}

/// 종료 공지의 연락 버튼
pub fn contact_markup(item: &Item) -> Option<InlineKeyboard> {
    let mut buttons = vec![InlineButton::new(
        "👤 판매자에게 연락",
        format!("tg://user?id={}", item.owner_id),
    )];
    if let Some(bidder) = &item.leading_bidder {
        buttons.push(InlineButton::new(
            "🏆 낙찰자에게 연락",
            format!("tg://user?id={}", bidder.id),
        ));
    }
    Some(InlineKeyboard::row(buttons))
}

/// 낙찰자 개별 통지
pub fn winner_notice(item: &Item) -> String {
    format!(
        "🎉 축하합니다!\n\n<b>{}</b> ({}) 경매에서 낙찰되셨습니다.\n💰 낙찰가: {}\n🆔 아이템 ID: {}\n\n수령은 판매자에게 직접 연락해 주세요 💎",
        item.title, item.series, item.current_price, item.id,
    )
}

/// 판매자 통지
pub fn seller_notice(item: &Item, reason: &EndReason) -> String {
    let heading = match reason {
        EndReason::Deadline => "🕊️ 경매가 종료되었습니다.",
        EndReason::Forced { .. } => "🛑 관리자가 경매를 종료했습니다.",
    };
    format!(
        "{heading}\n\n💞 <b>{}</b>\n🏆 낙찰자: {}\n💰 낙찰가: {}\n🆔 아이템 ID: {}",
        item.title,
        winner_line(item),
        item.current_price,
        item.id,
    )
}
// endregion: --- Settlement Texts

// region:    --- Moderation Texts
/// 심사용 카드. 제출 확정 시 로그 그룹으로 전송된다.
pub fn moderation_card(item: &Item) -> String {
    format!(
        "📩 <b>새 {} 제출</b>\n\n🆔 <b>아이템 ID:</b> {}\n👤 <b>제출자:</b> {}\n🎬 <b>작품:</b> {}\n💞 <b>이름:</b> {}\n💎 <b>등급:</b> {} {}\n💰 <b>시작가:</b> {}",
        item.category.label(),
        item.id,
        item.owner_name,
        item.series,
        item.title,
        item.rarity.label(),
        item.rarity.glyph(),
        item.base_price,
    )
}

/// 승인 통지 (제출자에게)
pub fn approval_notice(item: &Item) -> String {
    format!(
        "🎉 <b>제출하신 {}이(가) 승인되었습니다!</b>\n\n💞 이름: {}\n🎬 작품: {}\n💎 등급: {} {}",
        item.category.label(),
        item.title,
        item.series,
        item.rarity.label(),
        item.rarity.glyph(),
    )
}

/// 거절 통지 (제출자에게)
pub fn rejection_notice(item: &Item) -> String {
    format!(
        "❌ <b>제출하신 {}이(가) 거절되었습니다.</b>\n\n💞 이름: {}\n🎬 작품: {}\n\n내용을 확인한 뒤 다시 제출해 주세요.",
        item.category.label(),
        item.title,
        item.series,
    )
}

/// 밴 기록 (로그 그룹)
pub fn ban_log(user_id: i64, banned_by: i64, reason: &str) -> String {
    format!(
        "🚨 <b>전역 밴 등록</b>\n\n대상: {user_id}\n실행: {banned_by}\n사유: {reason}"
    )
}

/// 밴 해제 기록 (로그 그룹)
pub fn unban_log(user_id: i64, removed_by: i64) -> String {
    format!("✅ <b>전역 밴 해제</b>\n\n대상: {user_id}\n실행: {removed_by}")
}
// endregion: --- Moderation Texts
