//! ブロードキャストされるイベント
//!
//! 全てのプロデューサー（接続ハンドラ、タイマー、画像生成）は
//! [`Dispatch`] を 1 本のイベントキューに投入し、EventDispatcher が
//! 受理した順に配信します。

use super::{
    entity::ChatMessage,
    value_object::{AnimalType, ConnectionId, Level, Nickname},
};

/// 配信されるイベント（各バリアントは送信に必要なフィールドのみを持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ChatMessage(ChatMessage),
    /// 加算後のスマイルポイント合計
    ScoreDelta { total_smile_point: u64 },
    /// 加算後のアイデア数合計
    IdeaIncrement { total_ideas: u64 },
    MeetingStatusChanged { is_meeting_active: bool },
    AnimalTypeChanged { animal_type: AnimalType },
    TimerTick { elapsed_secs: u64 },
    RosterChanged { nicknames: Vec<Nickname> },
    LevelChanged { level: Level },
    /// 生成済み画像 URL の全履歴
    ImageGenerated { image_urls: Vec<String> },
}

impl Event {
    /// ログ出力用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatMessage(_) => "chat-message",
            Self::ScoreDelta { .. } => "score",
            Self::IdeaIncrement { .. } => "idea",
            Self::MeetingStatusChanged { .. } => "meeting-status",
            Self::AnimalTypeChanged { .. } => "animal-type",
            Self::TimerTick { .. } => "timer",
            Self::RosterChanged { .. } => "roster",
            Self::LevelChanged { .. } => "level",
            Self::ImageGenerated { .. } => "image",
        }
    }
}

/// イベントの配信先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// 配信時点で登録されている全ての接続
    All,
    /// 特定の接続のみ（参加直後のスナップショット）
    Only(ConnectionId),
}

/// 配信先付きのイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub audience: Audience,
    pub event: Event,
}

impl Dispatch {
    pub fn to_all(event: Event) -> Self {
        Self {
            audience: Audience::All,
            event,
        }
    }

    pub fn to(connection_id: ConnectionId, event: Event) -> Self {
        Self {
            audience: Audience::Only(connection_id),
            event,
        }
    }
}
