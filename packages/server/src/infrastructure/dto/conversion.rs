//! Conversion logic between DTOs and domain types.

use smilesync_shared::time::{format_elapsed, timestamp_to_jst_rfc3339};

use crate::domain::{
    AnimalType, ClientId, Event, InboundCommand, MessageText, Nickname, SmilePoint, Submitter,
};
use crate::infrastructure::dto::{
    DecodeError,
    websocket::{MessageType, WireMessage},
};

// ========================================
// Domain Event → DTO
// ========================================

impl From<&Event> for WireMessage {
    fn from(event: &Event) -> Self {
        match event {
            Event::ChatMessage(message) => Self {
                timestamp: Some(timestamp_to_jst_rfc3339(message.timestamp.value())),
                client_id: Some(message.from.client_id.as_str().to_string()),
                nickname: Some(message.from.nickname.as_str().to_string()),
                text: Some(message.text.as_str().to_string()),
                ..Self::new(MessageType::Message)
            },
            Event::ScoreDelta { total_smile_point } => Self {
                total_smile_point: Some(*total_smile_point),
                ..Self::new(MessageType::SmilePoint)
            },
            Event::IdeaIncrement { total_ideas } => Self {
                total_ideas: Some(*total_ideas),
                ..Self::new(MessageType::Idea)
            },
            Event::MeetingStatusChanged { is_meeting_active } => Self {
                is_meeting_active: Some(*is_meeting_active),
                ..Self::new(MessageType::MeetingStatus)
            },
            Event::AnimalTypeChanged { animal_type } => Self {
                image_animal_type: Some(animal_type.as_str().to_string()),
                ..Self::new(MessageType::ImageAnimalType)
            },
            Event::TimerTick { elapsed_secs } => Self {
                timer: Some(format_elapsed(*elapsed_secs)),
                ..Self::new(MessageType::Timer)
            },
            Event::RosterChanged { nicknames } => Self {
                clients_list: Some(nicknames.iter().map(|n| n.as_str().to_string()).collect()),
                ..Self::new(MessageType::ClientsList)
            },
            Event::LevelChanged { level } => Self {
                level: Some(level.value()),
                ..Self::new(MessageType::Level)
            },
            Event::ImageGenerated { image_urls } => Self {
                image_urls: Some(image_urls.clone()),
                ..Self::new(MessageType::ImageUrls)
            },
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

/// ハンドシェイクのフレームを解釈し、接続の送信者情報を返す
///
/// 空でないニックネームを持つ WireMessage であれば種類は問いません。
pub fn decode_handshake(text: &str) -> Result<Submitter, DecodeError> {
    let message = WireMessage::from_json(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let nickname = message.nickname.ok_or(DecodeError::MissingField {
        message_type: message.r#type,
        field: "nickname",
    })?;
    let client_id = message.client_id.unwrap_or_default();

    Ok(Submitter::new(
        ClientId::new(client_id)?,
        Nickname::new(nickname)?,
    ))
}

/// 受信フレームを解釈する
///
/// フレームに送信者情報が含まれていなければ、ハンドシェイクで受け取った
/// `connection` の情報を使います。
pub fn decode_command(text: &str, connection: &Submitter) -> Result<InboundCommand, DecodeError> {
    let message = WireMessage::from_json(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    command_from_wire(message, connection)
}

fn command_from_wire(
    message: WireMessage,
    connection: &Submitter,
) -> Result<InboundCommand, DecodeError> {
    let message_type = message.r#type;
    let missing = |field: &'static str| DecodeError::MissingField {
        message_type,
        field,
    };

    let submitter = || -> Result<Submitter, DecodeError> {
        let client_id = match &message.client_id {
            Some(client_id) => ClientId::new(client_id.clone())?,
            None => connection.client_id.clone(),
        };
        let nickname = match &message.nickname {
            Some(nickname) => Nickname::new(nickname.clone())?,
            None => connection.nickname.clone(),
        };
        Ok(Submitter::new(client_id, nickname))
    };

    match message_type {
        MessageType::Message => {
            let text = message.text.clone().ok_or_else(|| missing("text"))?;
            Ok(InboundCommand::Chat {
                submitter: submitter()?,
                text: MessageText::new(text)?,
            })
        }
        MessageType::SmilePoint => {
            let point = message.point.ok_or_else(|| missing("point"))?;
            Ok(InboundCommand::SmilePoint {
                submitter: submitter()?,
                point: SmilePoint::try_from(point)?,
            })
        }
        MessageType::Idea => Ok(InboundCommand::Idea {
            submitter: submitter()?,
        }),
        MessageType::MeetingStatus => {
            let active = message
                .is_meeting_active
                .ok_or_else(|| missing("isMeetingActive"))?;
            Ok(InboundCommand::MeetingStatus { active })
        }
        MessageType::ImageAnimalType => {
            let animal_type = message
                .image_animal_type
                .clone()
                .ok_or_else(|| missing("imageAnimalType"))?;
            Ok(InboundCommand::AnimalType {
                animal_type: AnimalType::new(animal_type)?,
            })
        }
        MessageType::Init
        | MessageType::ClientsList
        | MessageType::Timer
        | MessageType::Level
        | MessageType::ImageUrls => Err(DecodeError::ServerOnlyType(message_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Level, Timestamp, ValueObjectError};

    fn connection() -> Submitter {
        Submitter::new(
            ClientId::new("conn-id".to_string()).unwrap(),
            Nickname::new("alice".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_handshake_requires_nickname() {
        // テスト項目: ハンドシェイクには空でないニックネームが必要
        // given (前提条件):
        let ok = r#"{"type":"init","clientId":"c1","nickname":"alice"}"#;
        let missing = r#"{"type":"init","clientId":"c1"}"#;
        let empty = r#"{"type":"init","nickname":"  "}"#;
        let garbage = "hello";

        // when (操作) / then (期待する結果):
        let submitter = decode_handshake(ok).unwrap();
        assert_eq!(submitter.nickname.as_str(), "alice");
        assert_eq!(submitter.client_id.as_str(), "c1");
        assert!(matches!(
            decode_handshake(missing),
            Err(DecodeError::MissingField { field: "nickname", .. })
        ));
        assert_eq!(
            decode_handshake(empty),
            Err(DecodeError::InvalidValue(ValueObjectError::EmptyNickname))
        );
        assert!(matches!(
            decode_handshake(garbage),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_smile_point() {
        // テスト項目: スマイルポイントのフレームがコマンドに変換される
        // given (前提条件):
        let text = r#"{"type":"smilePoint","client_id":"c2","nickname":"bob","point":7}"#;

        // when (操作):
        let command = decode_command(text, &connection()).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            InboundCommand::SmilePoint {
                submitter: Submitter::new(
                    ClientId::new("c2".to_string()).unwrap(),
                    Nickname::new("bob".to_string()).unwrap()
                ),
                point: SmilePoint::new(7),
            }
        );
    }

    #[test]
    fn test_decode_negative_point_is_rejected() {
        // テスト項目: 負のスマイルポイントはデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"smilePoint","point":-3}"#;

        // when (操作):
        let result = decode_command(text, &connection());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DecodeError::InvalidValue(
                ValueObjectError::NegativeSmilePoint(-3)
            ))
        );
    }

    #[test]
    fn test_decode_falls_back_to_connection_submitter() {
        // テスト項目: 送信者情報のないフレームはハンドシェイクの情報を使う
        // given (前提条件):
        let text = r#"{"type":"idea"}"#;

        // when (操作):
        let command = decode_command(text, &connection()).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            InboundCommand::Idea {
                submitter: connection()
            }
        );
    }

    #[test]
    fn test_decode_missing_value_is_rejected() {
        // テスト項目: point や isMeetingActive のないフレームは 0 や false として扱わずにエラーになる
        // given (前提条件):
        let point = r#"{"type":"smilePoint"}"#;
        let status = r#"{"type":"meetingStatus"}"#;

        // when (操作) / then (期待する結果):
        assert_eq!(
            decode_command(point, &connection()),
            Err(DecodeError::MissingField {
                message_type: MessageType::SmilePoint,
                field: "point",
            })
        );
        assert_eq!(
            decode_command(status, &connection()),
            Err(DecodeError::MissingField {
                message_type: MessageType::MeetingStatus,
                field: "isMeetingActive",
            })
        );
    }

    #[test]
    fn test_decode_server_only_type_is_rejected() {
        // テスト項目: サーバー専用の種類を受信した場合はデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"level","level":10}"#;

        // when (操作):
        let result = decode_command(text, &connection());

        // then (期待する結果):
        assert_eq!(result, Err(DecodeError::ServerOnlyType(MessageType::Level)));
    }

    #[test]
    fn test_event_to_wire_message() {
        // テスト項目: イベントが種類に応じたフィールドのみを持つメッセージに変換される
        // given (前提条件):
        let chat = Event::ChatMessage(ChatMessage::new(
            connection(),
            MessageText::new("hi".to_string()).unwrap(),
            Timestamp::new(0),
        ));
        let timer = Event::TimerTick { elapsed_secs: 3725 };
        let level = Event::LevelChanged {
            level: Level::new(4).unwrap(),
        };
        let score = Event::ScoreDelta {
            total_smile_point: 0,
        };

        // when (操作):
        let chat = serde_json::to_value(WireMessage::from(&chat)).unwrap();
        let timer = serde_json::to_value(WireMessage::from(&timer)).unwrap();
        let level = serde_json::to_value(WireMessage::from(&level)).unwrap();
        let score = serde_json::to_value(WireMessage::from(&score)).unwrap();

        // then (期待する結果):
        assert_eq!(chat["type"], "message");
        assert_eq!(chat["client_id"], "conn-id");
        assert_eq!(chat["nickname"], "alice");
        assert_eq!(chat["text"], "hi");
        assert_eq!(chat["timestamp"], "1970-01-01T09:00:00+09:00");
        assert_eq!(
            timer,
            serde_json::json!({"type": "timer", "timer": "01:02:05"})
        );
        assert_eq!(level, serde_json::json!({"type": "level", "level": 4}));
        assert_eq!(
            score,
            serde_json::json!({"type": "smilePoint", "totalSmilePoint": 0})
        );
    }
}
