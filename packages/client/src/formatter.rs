//! Message formatting utilities for client display.

use smilesync_server::infrastructure::dto::websocket::{MessageType, WireMessage};
use smilesync_shared::time::timestamp_to_jst_hhmmss;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a server frame for display
    ///
    /// 表示しないフレームの場合は `None` を返します。タイマーは 1 分ごとにのみ表示します。
    pub fn format(message: &WireMessage, own_nickname: &str) -> Option<String> {
        match message.r#type {
            MessageType::Message => Some(Self::format_chat_message(message, own_nickname)),
            MessageType::ClientsList => Some(Self::format_clients_list(
                message.clients_list.as_deref().unwrap_or_default(),
                own_nickname,
            )),
            MessageType::MeetingStatus => Some(
                if message.is_meeting_active.unwrap_or(false) {
                    "\n>>> Meeting started\n".to_string()
                } else {
                    "\n>>> Meeting ended\n".to_string()
                },
            ),
            MessageType::SmilePoint => message
                .total_smile_point
                .map(|total| format!("\n* Smile points: {}\n", total)),
            MessageType::Idea => message
                .total_ideas
                .map(|total| format!("\n* Ideas: {}\n", total)),
            MessageType::Level => message
                .level
                .map(|level| format!("\n*** Level {} ***\n", level)),
            MessageType::ImageAnimalType => message
                .image_animal_type
                .as_ref()
                .map(|animal| format!("\n* Reward animal: {}\n", animal)),
            MessageType::ImageUrls => message
                .image_urls
                .as_ref()
                .and_then(|urls| urls.last().map(|last| (urls.len(), last)))
                .map(|(count, last)| format!("\n* Reward image #{}: {}\n", count, last)),
            MessageType::Timer => message
                .timer
                .as_deref()
                .filter(|timer| timer.ends_with(":00"))
                .map(|timer| format!("\n* Elapsed {}\n", timer)),
            MessageType::Init => None,
        }
    }

    /// Format the roster, marking the current user with "(me)"
    pub fn format_clients_list(nicknames: &[String], own_nickname: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(RULE);
        output.push_str("\nParticipants:\n");

        if nicknames.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for nickname in nicknames {
                let me_suffix = if nickname == own_nickname { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", nickname, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a chat message as `[HH:MM:SS] nickname: text`
    pub fn format_chat_message(message: &WireMessage, own_nickname: &str) -> String {
        let nickname = message.nickname.as_deref().unwrap_or("?");
        let me_suffix = if nickname == own_nickname { " (me)" } else { "" };
        let time = message
            .timestamp
            .as_deref()
            .map(Self::format_time)
            .unwrap_or_default();
        format!(
            "\n[{}] {}{}: {}\n",
            time,
            nickname,
            me_suffix,
            message.text.as_deref().unwrap_or_default()
        )
    }

    /// Format a raw message that couldn't be parsed
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// RFC 3339 の時刻を JST の `HH:MM:SS` に変換（解釈できなければそのまま）
    fn format_time(timestamp: &str) -> String {
        chrono::DateTime::parse_from_rfc3339(timestamp)
            .map(|time| timestamp_to_jst_hhmmss(time.timestamp_millis()))
            .unwrap_or_else(|_| timestamp.to_string())
    }
}
