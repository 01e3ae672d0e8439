//! 記録ストアへ保存するレコード
//!
//! 1 回のサーバー実行につき 1 つのドキュメントにまとめられ、
//! 種類ごとのログ（[`Record::log_name`]）に追記されます。

use serde::Serialize;

use super::{
    entity::{ChatMessage, Submitter},
    value_object::{Level, Timestamp},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRecord {
    pub timestamp: Timestamp,
    pub client_id: String,
    pub nickname: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmilePointRecord {
    pub timestamp: Timestamp,
    /// 会議開始からの経過秒数
    pub since_meeting_start: Option<u64>,
    pub client_id: String,
    pub nickname: String,
    pub smile_point: u64,
    /// 加算後の合計
    pub total_smile_point: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaRecord {
    pub timestamp: Timestamp,
    pub since_meeting_start: Option<u64>,
    pub client_id: String,
    pub nickname: String,
    pub total_ideas: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelRecord {
    pub timestamp: Timestamp,
    pub since_meeting_start: Option<u64>,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub timestamp: Timestamp,
    pub level: u8,
    pub prompt: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Chat(ChatRecord),
    SmilePoint(SmilePointRecord),
    Idea(IdeaRecord),
    Level(LevelRecord),
    Image(ImageRecord),
}

impl Record {
    pub fn chat(message: &ChatMessage) -> Self {
        Self::Chat(ChatRecord {
            timestamp: message.timestamp,
            client_id: message.from.client_id.as_str().to_string(),
            nickname: message.from.nickname.as_str().to_string(),
            text: message.text.as_str().to_string(),
        })
    }

    pub fn smile_point(
        submitter: &Submitter,
        timestamp: Timestamp,
        since_meeting_start: Option<u64>,
        smile_point: u64,
        total_smile_point: u64,
    ) -> Self {
        Self::SmilePoint(SmilePointRecord {
            timestamp,
            since_meeting_start,
            client_id: submitter.client_id.as_str().to_string(),
            nickname: submitter.nickname.as_str().to_string(),
            smile_point,
            total_smile_point,
        })
    }

    pub fn idea(
        submitter: &Submitter,
        timestamp: Timestamp,
        since_meeting_start: Option<u64>,
        total_ideas: u64,
    ) -> Self {
        Self::Idea(IdeaRecord {
            timestamp,
            since_meeting_start,
            client_id: submitter.client_id.as_str().to_string(),
            nickname: submitter.nickname.as_str().to_string(),
            total_ideas,
        })
    }

    pub fn level(timestamp: Timestamp, since_meeting_start: Option<u64>, level: Level) -> Self {
        Self::Level(LevelRecord {
            timestamp,
            since_meeting_start,
            level: level.value(),
        })
    }

    pub fn image(timestamp: Timestamp, level: Level, prompt: String, image_url: String) -> Self {
        Self::Image(ImageRecord {
            timestamp,
            level: level.value(),
            prompt,
            image_url,
        })
    }

    /// レコードを追記するログの名前
    pub fn log_name(&self) -> &'static str {
        match self {
            Self::Chat(_) => "chat_log",
            Self::SmilePoint(_) => "smile_points_log",
            Self::Idea(_) => "smile_ideas_log",
            Self::Level(_) => "smile_level_log",
            Self::Image(_) => "smile_image_log",
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Chat(r) => r.timestamp,
            Self::SmilePoint(r) => r.timestamp,
            Self::Idea(r) => r.timestamp,
            Self::Level(r) => r.timestamp,
            Self::Image(r) => r.timestamp,
        }
    }
}
