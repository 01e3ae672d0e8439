//! RecordStore trait 定義
//!
//! 会議中の出来事（チャット、スマイルポイント、アイデア、レベル、画像）を
//! 外部ストアに残すためのインターフェースです。保存の失敗はログに残すだけで、
//! セッション状態には影響しません。

use async_trait::async_trait;

use super::{RecordStoreError, record::Record};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// レコードを保存する
    async fn save(&self, record: Record) -> Result<(), RecordStoreError>;
}
