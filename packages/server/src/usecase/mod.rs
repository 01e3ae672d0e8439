//! UseCase layer
//!
//! 1 つの操作につき 1 つのユースケースを定義します。
//! セッション状態の変更とイベントの投入は同じロックの内側で行い、
//! 記録ストアへの保存や画像生成などの外部 I/O はロックを解放してから行います。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Record, RecordStore, SessionState};

pub mod apply_smile_point;
pub mod change_animal_type;
pub mod change_meeting_status;
pub mod connect_participant;
pub mod disconnect_participant;
pub mod dispatcher;
pub mod error;
pub mod event_queue;
pub mod generate_reward_image;
pub mod get_session_state;
pub mod increment_idea;
pub mod login;
pub mod send_message;
pub mod timer_ticker;

pub use apply_smile_point::{ApplySmilePointUseCase, SmilePointApplied};
pub use change_animal_type::ChangeAnimalTypeUseCase;
pub use change_meeting_status::ChangeMeetingStatusUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use dispatcher::EventDispatcher;
pub use error::{CommandError, LoginError};
pub use event_queue::{EventQueue, EventReceiver, QueueItem};
pub use generate_reward_image::GenerateRewardImageUseCase;
pub use get_session_state::GetSessionStateUseCase;
pub use increment_idea::IncrementIdeaUseCase;
pub use login::{LoginUseCase, Role};
pub use send_message::SendMessageUseCase;
pub use timer_ticker::{TickerSettings, TimerHandle, TimerTicker};

/// プロセス内で共有される唯一のセッション状態
pub type SharedSession = Arc<Mutex<SessionState>>;

/// 新しい共有セッションを作成
pub fn new_shared_session(session: SessionState) -> SharedSession {
    Arc::new(Mutex::new(session))
}

/// レコードを保存する（失敗はログに残すのみ）
pub(crate) async fn save_record(record_store: &dyn RecordStore, record: Record) {
    let log_name = record.log_name();
    if let Err(e) = record_store.save(record).await {
        tracing::error!("Failed to save record to '{}': {}", log_name, e);
    }
}
