//! Domain errors

use thiserror::Error;

use super::value_object::ConnectionId;

/// Value Object の生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("nickname is too long ({length} > {max} characters)")]
    NicknameTooLong { length: usize, max: usize },

    #[error("client id is too long ({length} > {max} characters)")]
    ClientIdTooLong { length: usize, max: usize },

    #[error("message text must not be empty")]
    EmptyMessage,

    #[error("message text is too long ({length} > {max} characters)")]
    MessageTooLong { length: usize, max: usize },

    #[error("smile point must not be negative (got {0})")]
    NegativeSmilePoint(i64),

    #[error("animal type must not be empty")]
    EmptyAnimalType,

    #[error("animal type is too long ({length} > {max} characters)")]
    AnimalTypeTooLong { length: usize, max: usize },

    #[error("level must be between 1 and 10 (got {0})")]
    LevelOutOfRange(u8),
}

/// 記録ストアへの保存に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    #[error("failed to serialize record: {0}")]
    Serialize(String),

    #[error("failed to write record: {0}")]
    Io(String),
}

/// 画像生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageGenerationError {
    #[error("image generation is not configured")]
    NotConfigured,

    #[error("image generation request failed: {0}")]
    Request(String),

    #[error("image generation API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode image generation response: {0}")]
    Decode(String),

    #[error("image generation response contained no image")]
    EmptyResponse,

    #[error("image generation timed out after {0} seconds")]
    Timeout(u64),
}

/// メッセージ送信に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection {0} not found")]
    ClientNotFound(ConnectionId),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(String),
}
