//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{
    domain::ConnectionIdFactory,
    usecase::{
        ApplySmilePointUseCase, ChangeAnimalTypeUseCase, ChangeMeetingStatusUseCase,
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetSessionStateUseCase,
        IncrementIdeaUseCase, LoginUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// 接続 ID の払い出し（プロセス内で単調増加）
    pub connection_ids: ConnectionIdFactory,
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub apply_smile_point_usecase: Arc<ApplySmilePointUseCase>,
    pub increment_idea_usecase: Arc<IncrementIdeaUseCase>,
    pub change_meeting_status_usecase: Arc<ChangeMeetingStatusUseCase>,
    pub change_animal_type_usecase: Arc<ChangeAnimalTypeUseCase>,
    pub get_session_state_usecase: Arc<GetSessionStateUseCase>,
    pub login_usecase: Arc<LoginUseCase>,
}
