//! Error types for the SmileSync client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not establish the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection dropped after it was established
    #[error("Connection lost")]
    ConnectionLost,

    /// Gave up after the maximum number of reconnect attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 入力行を解釈できなかった場合のエラー（接続は継続する）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Smile point must be a non-negative integer: '{0}'")]
    InvalidPoint(String),
}
