//! In-memory RecordStore
//!
//! 1 回のサーバー実行分のレコードを 1 つのドキュメントにまとめて保持します。
//! ログごとに保持する件数には上限があり、超えた分は古いものから捨てます。

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{Record, RecordStore, RecordStoreError};

use super::new_document_id;

/// ログごとに保持するレコード数のデフォルト
pub const DEFAULT_LOG_CAPACITY: usize = 1_000;

/// ログ名ごとにレコードをまとめたドキュメント
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDocument {
    pub id: String,
    pub logs: BTreeMap<&'static str, VecDeque<Record>>,
    /// 上限を超えて捨てたレコード数
    pub dropped: u64,
}

impl RecordDocument {
    fn new(id: String) -> Self {
        Self {
            id,
            logs: BTreeMap::new(),
            dropped: 0,
        }
    }

    /// 古い順のレコード
    pub fn log(&self, name: &str) -> Vec<&Record> {
        self.logs
            .get(name)
            .map(|log| log.iter().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct InMemoryRecordStore {
    document: Mutex<Option<RecordDocument>>,
    log_capacity: usize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// ログごとの上限を指定して作成（0 の場合は 1 として扱う）
    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            document: Mutex::new(None),
            log_capacity: log_capacity.max(1),
        }
    }

    /// 保存済みのドキュメント（まだ何も保存していなければ `None`）
    pub async fn document(&self) -> Option<RecordDocument> {
        self.document.lock().await.clone()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, record: Record) -> Result<(), RecordStoreError> {
        let mut document = self.document.lock().await;
        let document = document.get_or_insert_with(|| {
            let id = new_document_id();
            tracing::info!("Record document '{}' created", id);
            RecordDocument::new(id)
        });

        let log_name = record.log_name();
        tracing::debug!("Saving record to '{}'", log_name);
        let log = document.logs.entry(log_name).or_default();
        if log.len() >= self.log_capacity {
            log.pop_front();
            if document.dropped == 0 {
                tracing::warn!(
                    "In-memory log '{}' reached {} records, dropping the oldest",
                    log_name,
                    self.log_capacity
                );
            }
            document.dropped += 1;
        }
        log.push_back(record);
        Ok(())
    }
}
