//! JSON Lines RecordStore
//!
//! レコードを 1 行 1 オブジェクトでファイルに追記します。
//! 各行は `{"document": <id>, "kind": <種類>, ...}` の形式です。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::domain::{Record, RecordStore, RecordStoreError};

use super::new_document_id;

#[derive(Serialize)]
struct RecordLine<'a> {
    document: &'a str,
    #[serde(flatten)]
    record: &'a Record,
}

#[derive(Debug)]
pub struct JsonLinesRecordStore {
    path: PathBuf,
    /// ドキュメント ID（最初の保存時に決まる）。書き込みの直列化にも使う
    document_id: Mutex<Option<String>>,
}

impl JsonLinesRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document_id: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonLinesRecordStore {
    async fn save(&self, record: Record) -> Result<(), RecordStoreError> {
        let mut document_id = self.document_id.lock().await;
        let document_id = document_id.get_or_insert_with(new_document_id);

        let mut line = serde_json::to_string(&RecordLine {
            document: document_id,
            record: &record,
        })
        .map_err(|e| RecordStoreError::Serialize(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RecordStoreError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RecordStoreError::Io(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| RecordStoreError::Io(e.to_string()))?;

        tracing::debug!(
            "Appended '{}' record to {}",
            record.log_name(),
            self.path.display()
        );
        Ok(())
    }
}
