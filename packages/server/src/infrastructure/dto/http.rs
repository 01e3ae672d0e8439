//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use smilesync_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::SessionState;

/// `POST /login` のリクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub nickname: String,
    pub password: String,
}

/// `POST /login` のレスポンス
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub nickname: String,
    pub role: &'static str,
}

/// `GET /debug/session` のレスポンス
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStateDto {
    pub is_meeting_active: bool,
    /// RFC 3339 形式（会議中のみ）
    pub meeting_started_at: Option<String>,
    pub total_smile_point: u64,
    pub total_ideas: u64,
    pub level: u8,
    pub level_thresholds: Option<Vec<u64>>,
    pub image_urls: Vec<String>,
    pub image_animal_type: String,
    pub message_count: usize,
    pub clients_list: Vec<String>,
}

impl From<&SessionState> for SessionStateDto {
    fn from(session: &SessionState) -> Self {
        Self {
            is_meeting_active: session.is_meeting_active(),
            meeting_started_at: session
                .meeting_started_at()
                .filter(|_| session.is_meeting_active())
                .map(|started_at| timestamp_to_jst_rfc3339(started_at.value())),
            total_smile_point: session.total_smile_point(),
            total_ideas: session.total_ideas(),
            level: session.level().value(),
            level_thresholds: session.thresholds().map(|t| t.values().to_vec()),
            image_urls: session.image_urls().to_vec(),
            image_animal_type: session.image_animal_type().as_str().to_string(),
            message_count: session.messages().len(),
            clients_list: session
                .roster()
                .nicknames()
                .into_iter()
                .map(|n| n.into_string())
                .collect(),
        }
    }
}
