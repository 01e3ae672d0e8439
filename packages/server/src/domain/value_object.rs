//! Value Objects
//!
//! 不変で、生成時に検証済みの値を表す型です。

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::Serialize;
use smilesync_shared::time::get_jst_timestamp;

use super::error::ValueObjectError;

/// ニックネームの最大文字数
pub const NICKNAME_MAX_LENGTH: usize = 64;
/// クライアント ID の最大文字数
pub const CLIENT_ID_MAX_LENGTH: usize = 128;
/// チャットメッセージの最大文字数
pub const MESSAGE_MAX_LENGTH: usize = 1000;
/// 動物の種類の最大文字数
pub const ANIMAL_TYPE_MAX_LENGTH: usize = 100;
/// 初期状態の動物の種類
pub const DEFAULT_ANIMAL_TYPE: &str = "golden retriever";

/// 接続の識別子
///
/// 接続レコードのアリーナを指す不透明な整数 ID です。
/// 接続の順序（登録順）を表すため、採番は単調増加します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// ConnectionId の採番器（プロセス内で単調増加）
#[derive(Debug)]
pub struct ConnectionIdFactory {
    next: AtomicU64,
}

impl ConnectionIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// 新しい ConnectionId を払い出す
    pub fn generate(&self) -> ConnectionId {
        ConnectionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionIdFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// 参加者のニックネーム（一意性は保証しない）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyNickname);
        }
        let length = value.chars().count();
        if length > NICKNAME_MAX_LENGTH {
            return Err(ValueObjectError::NicknameTooLong {
                length,
                max: NICKNAME_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントが自己申告する ID（記録用、空文字を許容）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let length = value.chars().count();
        if length > CLIENT_ID_MAX_LENGTH {
            return Err(ValueObjectError::ClientIdTooLong {
                length,
                max: CLIENT_ID_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// チャットメッセージの本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessage);
        }
        let length = value.chars().count();
        if length > MESSAGE_MAX_LENGTH {
            return Err(ValueObjectError::MessageTooLong {
                length,
                max: MESSAGE_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 1 回の送信で加算されるスマイルポイント（0 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SmilePoint(u64);

impl SmilePoint {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for SmilePoint {
    type Error = ValueObjectError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| ValueObjectError::NegativeSmilePoint(value))
    }
}

/// 報酬画像に描かれる動物の種類
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnimalType(String);

impl AnimalType {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyAnimalType);
        }
        let length = trimmed.chars().count();
        if length > ANIMAL_TYPE_MAX_LENGTH {
            return Err(ValueObjectError::AnimalTypeTooLong {
                length,
                max: ANIMAL_TYPE_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnimalType {
    fn default() -> Self {
        Self(DEFAULT_ANIMAL_TYPE.to_string())
    }
}

impl TryFrom<String> for AnimalType {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 達成レベル（1〜10）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(10);

    pub fn new(value: u8) -> Result<Self, ValueObjectError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&value) {
            return Err(ValueObjectError::LevelOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// 範囲外の値を 1〜10 に丸めて生成する
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn now() -> Self {
        Self(get_jst_timestamp())
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過秒数（負になる場合は 0）
    pub fn seconds_since(&self, earlier: Timestamp) -> u64 {
        u64::try_from(self.0 - earlier.0).unwrap_or(0) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_is_monotonic() {
        // テスト項目: ConnectionIdFactory が単調増加する ID を払い出す
        // given (前提条件):
        let factory = ConnectionIdFactory::new();

        // when (操作):
        let first = factory.generate();
        let second = factory.generate();

        // then (期待する結果):
        assert!(first < second);
        assert_eq!(first.value() + 1, second.value());
    }

    #[test]
    fn test_nickname_rejects_blank() {
        // テスト項目: 空白のみのニックネームは拒否される
        // when (操作):
        let result = Nickname::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyNickname));
    }

    #[test]
    fn test_nickname_rejects_too_long() {
        // テスト項目: 最大文字数を超えるニックネームは拒否される
        // given (前提条件):
        let value = "a".repeat(NICKNAME_MAX_LENGTH + 1);

        // when (操作):
        let result = Nickname::new(value);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::NicknameTooLong { .. })
        ));
    }

    #[test]
    fn test_smile_point_rejects_negative() {
        // テスト項目: 負のスマイルポイントは拒否される
        // when (操作):
        let negative = SmilePoint::try_from(-1);
        let positive = SmilePoint::try_from(5);

        // then (期待する結果):
        assert_eq!(negative, Err(ValueObjectError::NegativeSmilePoint(-1)));
        assert_eq!(positive, Ok(SmilePoint::new(5)));
    }

    #[test]
    fn test_animal_type_is_trimmed() {
        // テスト項目: 動物の種類は前後の空白が除去される
        // when (操作):
        let animal = AnimalType::new("  shiba inu ".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(animal.as_str(), "shiba inu");
        assert_eq!(AnimalType::default().as_str(), DEFAULT_ANIMAL_TYPE);
    }

    #[test]
    fn test_level_range() {
        // テスト項目: レベルは 1〜10 の範囲のみ生成でき、clamped は範囲内に丸める
        // then (期待する結果):
        assert!(Level::new(0).is_err());
        assert!(Level::new(11).is_err());
        assert_eq!(Level::new(10).unwrap(), Level::MAX);
        assert_eq!(Level::clamped(0), Level::MIN);
        assert_eq!(Level::clamped(42), Level::MAX);
    }

    #[test]
    fn test_timestamp_seconds_since() {
        // テスト項目: 経過秒数は切り捨てで計算され、逆順の場合は 0 になる
        // given (前提条件):
        let start = Timestamp::new(1_000);
        let later = Timestamp::new(62_999);

        // then (期待する結果):
        assert_eq!(later.seconds_since(start), 61);
        assert_eq!(start.seconds_since(later), 0);
    }
}
