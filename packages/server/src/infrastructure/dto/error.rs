//! Decode errors for inbound frames.

use thiserror::Error;

use crate::domain::ValueObjectError;

use super::websocket::MessageType;

/// 受信フレームを解釈できなかった場合のエラー（フレームは読み飛ばされる）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed frame: {0}")]
    Malformed(String),

    #[error("'{0:?}' is not accepted from clients")]
    ServerOnlyType(MessageType),

    #[error("'{field}' is required for '{message_type:?}'")]
    MissingField {
        message_type: MessageType,
        field: &'static str,
    },

    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueObjectError),
}
