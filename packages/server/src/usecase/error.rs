//! UseCase errors

use thiserror::Error;

use crate::domain::CommandKind;

/// 受信メッセージが現在の会議状態では受け付けられない場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{kind:?} is not accepted while the meeting is {}", if *meeting_active { "active" } else { "inactive" })]
    NotAccepted {
        kind: CommandKind,
        meeting_active: bool,
    },
}

/// ログインに失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("login is not configured")]
    NotConfigured,

    #[error("invalid password")]
    InvalidPassword,
}
