//! UseCase: セッション状態の取得（デバッグ用）

use crate::domain::SessionState;

use super::SharedSession;

pub struct GetSessionStateUseCase {
    session: SharedSession,
}

impl GetSessionStateUseCase {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// 現在のセッション状態のスナップショットを返す
    pub async fn execute(&self) -> SessionState {
        self.session.lock().await.clone()
    }
}
