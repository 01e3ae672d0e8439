//! ConnectionRegistry: 接続中の参加者（ロスター）の管理
//!
//! 接続レコードは `ConnectionId` をキーとするアリーナで保持し、
//! 接続側は ID のみを保持します。ロスターの並び順は登録順
//! （`ConnectionId` の昇順）です。

use std::collections::BTreeMap;

use super::value_object::{ConnectionId, Nickname};

#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    entries: BTreeMap<ConnectionId, Nickname>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を登録する（既存のニックネームは上書き）
    ///
    /// 上書きされた以前のニックネームを返します。
    pub fn register(&mut self, connection_id: ConnectionId, nickname: Nickname) -> Option<Nickname> {
        self.entries.insert(connection_id, nickname)
    }

    /// 接続を登録解除する（未登録の場合は何もしない）
    ///
    /// 登録されていた場合はそのニックネームを返します。
    pub fn unregister(&mut self, connection_id: ConnectionId) -> Option<Nickname> {
        self.entries.remove(&connection_id)
    }

    pub fn contains(&self, connection_id: ConnectionId) -> bool {
        self.entries.contains_key(&connection_id)
    }

    pub fn nickname(&self, connection_id: ConnectionId) -> Option<&Nickname> {
        self.entries.get(&connection_id)
    }

    /// 登録順のニックネーム一覧
    pub fn nicknames(&self) -> Vec<Nickname> {
        self.entries.values().cloned().collect()
    }

    /// 登録順の接続 ID 一覧
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nickname(value: &str) -> Nickname {
        Nickname::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_register_keeps_registration_order() {
        // テスト項目: ロスターは登録順（ConnectionId 順）に並ぶ
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        registry.register(ConnectionId::new(2), nickname("bob"));
        registry.register(ConnectionId::new(1), nickname("alice"));
        registry.register(ConnectionId::new(3), nickname("charlie"));

        // then (期待する結果):
        let names: Vec<String> = registry
            .nicknames()
            .into_iter()
            .map(Nickname::into_string)
            .collect();
        assert_eq!(names, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_register_overwrites_nickname() {
        // テスト項目: 同じ接続を再登録するとニックネームが上書きされる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new(1);
        registry.register(id, nickname("alice"));

        // when (操作):
        let previous = registry.register(id, nickname("alice2"));

        // then (期待する結果):
        assert_eq!(previous, Some(nickname("alice")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.nickname(id), Some(&nickname("alice2")));
    }

    #[test]
    fn test_duplicate_nicknames_are_allowed() {
        // テスト項目: 異なる接続が同じニックネームを使える
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        registry.register(ConnectionId::new(1), nickname("alice"));
        registry.register(ConnectionId::new(2), nickname("alice"));

        // then (期待する結果):
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        // テスト項目: 未登録の接続の登録解除は何も変更しない
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let id = ConnectionId::new(1);
        registry.register(id, nickname("alice"));

        // when (操作):
        let first = registry.unregister(id);
        let second = registry.unregister(id);

        // then (期待する結果):
        assert_eq!(first, Some(nickname("alice")));
        assert_eq!(second, None);
        assert!(registry.is_empty());
    }
}
