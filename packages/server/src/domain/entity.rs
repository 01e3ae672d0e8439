//! Entities

use serde::Serialize;

use super::value_object::{ClientId, MessageText, Nickname, Timestamp};

/// 送信者の情報（記録ストアへの保存に使う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submitter {
    pub client_id: ClientId,
    pub nickname: Nickname,
}

impl Submitter {
    pub fn new(client_id: ClientId, nickname: Nickname) -> Self {
        Self {
            client_id,
            nickname,
        }
    }
}

/// チャット履歴の 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub from: Submitter,
    pub text: MessageText,
    /// サーバーが受信した時刻
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(from: Submitter, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            from,
            text,
            timestamp,
        }
    }
}
