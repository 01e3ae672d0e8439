//! SessionState: 会議セッションの共有状態
//!
//! プロセス内に 1 つだけ存在し、複数の会議をまたいで生存します。
//! 全ての読み書きは 1 つのロックの内側で行われる前提で、
//! このモジュール自体は同期的で副作用を持ちません。
//!
//! ## 不変条件
//!
//! - スマイルポイント合計とアイデア数は減少しない
//! - 閾値は 1 回の会議につき高々 1 度だけ設定され、次の会議開始時のみリセットされる
//! - 1 回の会議の間、レベルは減少しない
//! - 動物の種類は会議中には変更できない

use std::time::Duration;

use super::{
    command::CommandKind,
    entity::ChatMessage,
    event::{Dispatch, Event},
    level::{LevelEngine, LevelThresholds},
    registry::ConnectionRegistry,
    value_object::{AnimalType, ConnectionId, Level, Nickname, SmilePoint, Timestamp},
};

/// スコア加算の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreApplied {
    pub total_smile_point: u64,
    pub previous_level: Level,
    pub level: Level,
}

impl ScoreApplied {
    /// レベルが変化した場合は新しいレベルを返す
    pub fn level_change(&self) -> Option<Level> {
        LevelEngine::requires_reward_image(self.previous_level, self.level).then_some(self.level)
    }
}

/// 会議開始の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingStarted {
    /// この会議を識別する世代番号（タイマーが自分の会議か判定するのに使う）
    pub epoch: u64,
    /// 前の会議のレベルから 1 に戻った場合は `Some(Level::MIN)`
    pub level_reset: Option<Level>,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    meeting_active: bool,
    meeting_started_at: Option<Timestamp>,
    meeting_epoch: u64,
    total_smile_point: u64,
    total_ideas: u64,
    level: Level,
    thresholds: Option<LevelThresholds>,
    image_urls: Vec<String>,
    image_animal_type: AnimalType,
    messages: Vec<ChatMessage>,
    roster: ConnectionRegistry,
}

impl SessionState {
    pub fn new(image_animal_type: AnimalType) -> Self {
        Self {
            meeting_active: false,
            meeting_started_at: None,
            meeting_epoch: 0,
            total_smile_point: 0,
            total_ideas: 0,
            level: Level::MIN,
            thresholds: None,
            image_urls: Vec::new(),
            image_animal_type,
            messages: Vec::new(),
            roster: ConnectionRegistry::new(),
        }
    }

    pub fn is_meeting_active(&self) -> bool {
        self.meeting_active
    }

    pub fn meeting_started_at(&self) -> Option<Timestamp> {
        self.meeting_started_at
    }

    pub fn total_smile_point(&self) -> u64 {
        self.total_smile_point
    }

    pub fn total_ideas(&self) -> u64 {
        self.total_ideas
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn thresholds(&self) -> Option<&LevelThresholds> {
        self.thresholds.as_ref()
    }

    pub fn thresholds_set(&self) -> bool {
        self.thresholds.is_some()
    }

    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    pub fn image_animal_type(&self) -> &AnimalType {
        &self.image_animal_type
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn roster(&self) -> &ConnectionRegistry {
        &self.roster
    }

    /// 会議開始からの経過秒数（会議中でなければ `None`）
    pub fn seconds_since_meeting_start(&self, now: Timestamp) -> Option<u64> {
        self.meeting_started_at
            .filter(|_| self.meeting_active)
            .map(|started_at| now.seconds_since(started_at))
    }

    /// 受信メッセージを受け付けるかどうか
    ///
    /// 会議中でなければ動物の種類の変更のみ、会議中であればチャット・
    /// スマイルポイント・アイデアのみを受け付けます。会議状態の変更は常に受け付けます。
    pub fn accepts(&self, kind: CommandKind) -> bool {
        match kind {
            CommandKind::MeetingStatus => true,
            CommandKind::AnimalType => !self.meeting_active,
            CommandKind::Chat | CommandKind::SmilePoint | CommandKind::Idea => self.meeting_active,
        }
    }

    /// 会議を開始する（会議中に呼ばれた場合は新しい会議としてやり直す）
    pub fn start_meeting(&mut self, now: Timestamp) -> MeetingStarted {
        self.meeting_active = true;
        self.meeting_started_at = Some(now);
        self.meeting_epoch += 1;
        self.thresholds = None;

        let level_reset = (self.level != Level::MIN).then_some(Level::MIN);
        self.level = Level::MIN;

        MeetingStarted {
            epoch: self.meeting_epoch,
            level_reset,
        }
    }

    /// 会議を終了する。会議中だった場合は `true`
    pub fn end_meeting(&mut self) -> bool {
        let was_active = self.meeting_active;
        self.meeting_active = false;
        self.meeting_started_at = None;
        was_active
    }

    /// `epoch` の会議が現在も進行中かどうか
    pub fn is_current_meeting(&self, epoch: u64) -> bool {
        self.meeting_active && self.meeting_epoch == epoch
    }

    /// 経過時間が `delay` に達していれば閾値を固定する
    ///
    /// 閾値はその瞬間のスマイルポイント合計から計算され、
    /// 1 回の会議につき 1 度だけ設定されます。設定した場合は閾値を返します。
    pub fn fix_thresholds_if_due(
        &mut self,
        epoch: u64,
        elapsed: Duration,
        delay: Duration,
    ) -> Option<LevelThresholds> {
        if !self.is_current_meeting(epoch) || self.thresholds.is_some() || elapsed < delay {
            return None;
        }
        let thresholds = LevelThresholds::from_baseline(self.total_smile_point);
        self.thresholds = Some(thresholds);
        Some(thresholds)
    }

    /// スマイルポイントを加算し、レベルを再計算する
    pub fn apply_score_delta(&mut self, delta: SmilePoint) -> ScoreApplied {
        self.total_smile_point = self.total_smile_point.saturating_add(delta.value());

        let previous_level = self.level;
        self.level = LevelEngine::compute_level(self.total_smile_point, self.thresholds.as_ref());

        ScoreApplied {
            total_smile_point: self.total_smile_point,
            previous_level,
            level: self.level,
        }
    }

    /// アイデア数を 1 増やし、新しい合計を返す
    pub fn increment_ideas(&mut self) -> u64 {
        self.total_ideas = self.total_ideas.saturating_add(1);
        self.total_ideas
    }

    /// 動物の種類を変更する。会議中は変更せず `false` を返す
    pub fn set_animal_type(&mut self, animal_type: AnimalType) -> bool {
        if self.meeting_active {
            return false;
        }
        self.image_animal_type = animal_type;
        true
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// 生成された画像 URL を履歴に追加し、履歴全体を返す
    pub fn append_image_url(&mut self, url: String) -> &[String] {
        self.image_urls.push(url);
        &self.image_urls
    }

    /// 接続を登録する（既存のニックネームは上書き）
    pub fn register_connection(&mut self, connection_id: ConnectionId, nickname: Nickname) {
        self.roster.register(connection_id, nickname);
    }

    /// 接続を登録解除する。登録されていた場合は `true`
    pub fn unregister_connection(&mut self, connection_id: ConnectionId) -> bool {
        self.roster.unregister(connection_id).is_some()
    }

    /// 参加直後の接続に送るスナップショット
    ///
    /// チャット履歴、会議状態、スマイルポイント合計、アイデア数、
    /// 画像履歴（空でなければ）、レベル、動物の種類の順に並びます。
    pub fn join_snapshot(&self, connection_id: ConnectionId) -> Vec<Dispatch> {
        let mut events: Vec<Event> = self
            .messages
            .iter()
            .cloned()
            .map(Event::ChatMessage)
            .collect();

        events.push(Event::MeetingStatusChanged {
            is_meeting_active: self.meeting_active,
        });
        events.push(Event::ScoreDelta {
            total_smile_point: self.total_smile_point,
        });
        events.push(Event::IdeaIncrement {
            total_ideas: self.total_ideas,
        });
        if !self.image_urls.is_empty() {
            events.push(Event::ImageGenerated {
                image_urls: self.image_urls.clone(),
            });
        }
        events.push(Event::LevelChanged { level: self.level });
        events.push(Event::AnimalTypeChanged {
            animal_type: self.image_animal_type.clone(),
        });

        events
            .into_iter()
            .map(|event| Dispatch::to(connection_id, event))
            .collect()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(AnimalType::default())
    }
}
