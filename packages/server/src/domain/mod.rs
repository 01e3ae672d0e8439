//! Domain layer
//!
//! 会議セッションの状態とルールを表現する層です。
//! 外部サービス（記録ストア、画像生成、WebSocket 送信）はこの層が定義する
//! trait を通して利用し、具体的な実装は Infrastructure 層が提供します。

pub mod command;
pub mod entity;
pub mod error;
pub mod event;
pub mod image_generator;
pub mod level;
pub mod message_pusher;
pub mod record;
pub mod record_store;
pub mod registry;
pub mod session;
pub mod value_object;

pub use command::{CommandKind, InboundCommand};
pub use entity::{ChatMessage, Submitter};
pub use error::{ImageGenerationError, MessagePushError, RecordStoreError, ValueObjectError};
pub use event::{Audience, Dispatch, Event};
pub use image_generator::{GeneratedImage, ImageGenerator};
pub use level::{LevelEngine, LevelThresholds};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use record::Record;
pub use record_store::RecordStore;
pub use registry::ConnectionRegistry;
pub use session::{MeetingStarted, ScoreApplied, SessionState};
#[cfg(test)]
pub use image_generator::MockImageGenerator;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use value_object::{
    AnimalType, ClientId, ConnectionId, ConnectionIdFactory, DEFAULT_ANIMAL_TYPE, Level,
    MessageText, Nickname, SmilePoint, Timestamp,
};
