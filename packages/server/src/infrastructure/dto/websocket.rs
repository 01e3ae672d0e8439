//! WebSocket message DTOs.
//!
//! 全てのメッセージは 1 つの JSON オブジェクトで、`type` によって
//! 意味のあるフィールドが決まります。送信時は種類に関係するフィールドのみを出力し、
//! 真偽値や数値は 0 や false であっても省略しません。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    /// ハンドシェイク（最初のフレーム）
    Init,
    /// チャットメッセージ
    Message,
    SmilePoint,
    Idea,
    MeetingStatus,
    ImageAnimalType,
    // 以下はサーバーからのみ送信される
    ClientsList,
    Timer,
    Level,
    ImageUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    pub r#type: MessageType,
    /// RFC 3339 形式（受信時は無視される）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(
        rename = "client_id",
        alias = "clientId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_smile_point: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ideas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_meeting_active: Option<bool>,
    /// 経過時間（`HH:MM:SS`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_animal_type: Option<String>,
}

impl WireMessage {
    /// `type` 以外のフィールドが全て空のメッセージを作成
    pub fn new(r#type: MessageType) -> Self {
        Self {
            r#type,
            timestamp: None,
            client_id: None,
            nickname: None,
            text: None,
            point: None,
            total_smile_point: None,
            total_ideas: None,
            level: None,
            is_meeting_active: None,
            timer: None,
            clients_list: None,
            image_urls: None,
            image_animal_type: None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
