//! クライアントから受信したメッセージのドメイン表現

use super::{
    entity::Submitter,
    value_object::{AnimalType, MessageText, SmilePoint},
};

/// 受信メッセージの種類（ルーティング判定に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Chat,
    SmilePoint,
    Idea,
    MeetingStatus,
    AnimalType,
}

/// デコード済みの受信メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    Chat {
        submitter: Submitter,
        text: MessageText,
    },
    SmilePoint {
        submitter: Submitter,
        point: SmilePoint,
    },
    Idea {
        submitter: Submitter,
    },
    MeetingStatus {
        active: bool,
    },
    AnimalType {
        animal_type: AnimalType,
    },
}

impl InboundCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Chat { .. } => CommandKind::Chat,
            Self::SmilePoint { .. } => CommandKind::SmilePoint,
            Self::Idea { .. } => CommandKind::Idea,
            Self::MeetingStatus { .. } => CommandKind::MeetingStatus,
            Self::AnimalType { .. } => CommandKind::AnimalType,
        }
    }
}
