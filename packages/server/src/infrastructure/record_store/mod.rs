//! 記録ストアの実装
//!
//! - `inmemory`: プロセス内に保持する実装（デフォルト）
//! - `jsonl`: JSON Lines ファイルに追記する実装

pub mod inmemory;
pub mod jsonl;

pub use inmemory::{InMemoryRecordStore, RecordDocument};
pub use jsonl::JsonLinesRecordStore;

use smilesync_shared::time::{get_jst_timestamp, timestamp_to_jst_datetime};

/// ドキュメント ID（最初に保存した時刻を `YYYY-MM-DD HH:MM:SS` で表したもの）
pub(crate) fn new_document_id() -> String {
    timestamp_to_jst_datetime(get_jst_timestamp())
}
