//! Domain logic for client-side operations.
//!
//! 副作用を持たない純粋な関数のみを置き、テストしやすくしています。

use smilesync_server::infrastructure::dto::websocket::{MessageType, WireMessage};

use crate::error::InputError;

/// 接続に使う送信者情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub client_id: String,
    pub nickname: String,
}

impl Identity {
    pub fn new(client_id: String, nickname: String) -> Self {
        Self {
            client_id,
            nickname,
        }
    }

    /// 接続直後に送るハンドシェイク
    pub fn handshake(&self) -> WireMessage {
        WireMessage {
            client_id: Some(self.client_id.clone()),
            nickname: Some(self.nickname.clone()),
            ..WireMessage::new(MessageType::Init)
        }
    }

    fn stamp(&self, message: WireMessage) -> WireMessage {
        WireMessage {
            client_id: Some(self.client_id.clone()),
            nickname: Some(self.nickname.clone()),
            ..message
        }
    }
}

/// 入力行の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientInput {
    Send(WireMessage),
    Quit,
}

/// Parse one line of user input.
///
/// `/` で始まる行はコマンド、それ以外はチャットメッセージとして扱います。
pub fn parse_input(line: &str, identity: &Identity) -> Result<ClientInput, InputError> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ClientInput::Send(identity.stamp(WireMessage {
            text: Some(line.to_string()),
            ..WireMessage::new(MessageType::Message)
        })));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let message = match name {
        "quit" => return Ok(ClientInput::Quit),
        "start" | "stop" => WireMessage {
            is_meeting_active: Some(name == "start"),
            ..WireMessage::new(MessageType::MeetingStatus)
        },
        "smile" => {
            if argument.is_empty() {
                return Err(InputError::Usage("/smile <points>"));
            }
            let point = argument
                .parse::<u32>()
                .map_err(|_| InputError::InvalidPoint(argument.to_string()))?;
            identity.stamp(WireMessage {
                point: Some(i64::from(point)),
                ..WireMessage::new(MessageType::SmilePoint)
            })
        }
        "idea" => identity.stamp(WireMessage::new(MessageType::Idea)),
        "animal" => {
            if argument.is_empty() {
                return Err(InputError::Usage("/animal <type>"));
            }
            WireMessage {
                image_animal_type: Some(argument.to_string()),
                ..WireMessage::new(MessageType::ImageAnimalType)
            }
        }
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(ClientInput::Send(message))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
