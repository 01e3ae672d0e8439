//! Application wiring.
//!
//! 依存関係を以下の順序で組み立てます:
//! 1. SessionState（共有状態）とイベントキュー
//! 2. MessagePusher
//! 3. UseCases
//! 4. EventDispatcher（タスクとして起動）
//! 5. AppState

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{
    domain::{AnimalType, ImageGenerator, RecordStore, SessionState},
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::AppState,
    usecase::{
        ApplySmilePointUseCase, ChangeAnimalTypeUseCase, ChangeMeetingStatusUseCase,
        ConnectParticipantUseCase, DisconnectParticipantUseCase, EventDispatcher, EventQueue,
        GenerateRewardImageUseCase, GetSessionStateUseCase, IncrementIdeaUseCase, LoginUseCase,
        SendMessageUseCase, SharedSession, TickerSettings,
        generate_reward_image::DEFAULT_IMAGE_TIMEOUT_SECS, new_shared_session,
    },
};

/// 外部サービス以外の設定
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub default_animal_type: AnimalType,
    pub ticker_settings: TickerSettings,
    pub image_timeout: Duration,
    pub login: LoginUseCase,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_animal_type: AnimalType::default(),
            ticker_settings: TickerSettings::default(),
            image_timeout: Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS),
            login: LoginUseCase::default(),
        }
    }
}

/// 組み立て済みのアプリケーション
pub struct Application {
    state: Arc<AppState>,
    session: SharedSession,
    dispatcher: JoinHandle<()>,
}

impl Application {
    /// 依存関係を組み立て、EventDispatcher を起動する
    ///
    /// tokio ランタイムの内側で呼び出す必要があります。
    pub fn build(
        settings: AppSettings,
        record_store: Arc<dyn RecordStore>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        // 1. Shared session and event queue
        let session = new_shared_session(SessionState::new(settings.default_animal_type));
        let (queue, receiver) = EventQueue::new();

        // 2. MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 3. UseCases
        let reward_image = Arc::new(GenerateRewardImageUseCase::new(
            session.clone(),
            queue.clone(),
            image_generator,
            record_store.clone(),
            settings.image_timeout,
        ));
        let state = Arc::new(AppState {
            connection_ids: Default::default(),
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                session.clone(),
                queue.clone(),
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                session.clone(),
                queue.clone(),
                message_pusher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                session.clone(),
                queue.clone(),
                record_store.clone(),
            )),
            apply_smile_point_usecase: Arc::new(ApplySmilePointUseCase::new(
                session.clone(),
                queue.clone(),
                record_store.clone(),
                reward_image,
            )),
            increment_idea_usecase: Arc::new(IncrementIdeaUseCase::new(
                session.clone(),
                queue.clone(),
                record_store,
            )),
            change_meeting_status_usecase: Arc::new(ChangeMeetingStatusUseCase::new(
                session.clone(),
                queue.clone(),
                settings.ticker_settings,
            )),
            change_animal_type_usecase: Arc::new(ChangeAnimalTypeUseCase::new(
                session.clone(),
                queue,
            )),
            get_session_state_usecase: Arc::new(GetSessionStateUseCase::new(session.clone())),
            login_usecase: Arc::new(settings.login),
        });

        // 4. EventDispatcher
        let dispatcher = tokio::spawn(EventDispatcher::new(message_pusher).run(receiver));

        Self {
            state,
            session,
            dispatcher,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    /// EventDispatcher が動作中かどうか
    pub fn is_dispatching(&self) -> bool {
        !self.dispatcher.is_finished()
    }
}
