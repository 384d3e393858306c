//! Todo ドメインモデル
//!
//! レコード型と順序（order）割り当て規則のみを担当します。
//! I/O はストア層（todo-api 側）の責務です。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Todo の識別子（ULID 文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 永続化される Todo レコード
///
/// `order` は表示順のランクで、一意性はアプリケーション側が
/// スワップによって維持します（ストアは強制しない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub value: String,
    pub order: i64,
    /// `None` は未完了。完了時刻が入っていれば完了済み。
    pub done_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// 新規レコードを作成します（未完了で開始）。
    pub fn new(value: impl Into<String>, order: i64) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            value: value.into(),
            order,
            done_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 完了状態を設定します。`true` なら現在時刻、`false` なら未完了へ戻します。
    pub fn set_done(&mut self, done: bool) {
        self.done_at = done.then(Utc::now);
        self.touch();
    }

    /// 表示順ランクを付け替えます。
    pub fn set_order(&mut self, order: i64) {
        self.order = order;
        self.touch();
    }

    /// 内容を置き換えます。空文字の拒否は呼び出し側が行います。
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// 次の order 値を決定します（現在の最大値 +1、コレクションが空なら 1）。
pub fn next_order(current_max: Option<i64>) -> i64 {
    current_max.map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_is_26_char_base32() {
        // Act: 新しい ID を生成
        let id = TodoId::new();

        // Assert: ULID の 26 文字 Base32 表現であること
        assert_eq!(id.as_str().len(), 26);
        let valid_chars = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";
        for c in id.as_str().chars() {
            assert!(valid_chars.contains(c), "Invalid character: {c}");
        }
    }

    #[test]
    fn next_order_starts_at_one_for_empty_collection() {
        assert_eq!(next_order(None), 1);
    }

    #[test]
    fn next_order_increments_current_max() {
        assert_eq!(next_order(Some(1)), 2);
        assert_eq!(next_order(Some(41)), 42);
    }

    #[test]
    fn new_todo_starts_incomplete() {
        // Act: 作成
        let todo = Todo::new("Buy milk", 1);

        // Assert: 未完了で、作成時刻と更新時刻が一致
        assert_eq!(todo.value, "Buy milk");
        assert_eq!(todo.order, 1);
        assert!(todo.done_at.is_none());
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn set_done_records_and_clears_completion_time() {
        let mut todo = Todo::new("Task", 1);

        todo.set_done(true);
        assert!(todo.done_at.is_some());

        todo.set_done(false);
        assert!(todo.done_at.is_none());
    }

    #[test]
    fn mutators_bump_updated_at() {
        let mut todo = Todo::new("Task", 1);
        let created = todo.created_at;

        todo.set_order(5);
        assert_eq!(todo.order, 5);
        assert!(todo.updated_at >= created);

        todo.set_value("Renamed");
        assert_eq!(todo.value, "Renamed");
    }

    #[test]
    fn serializes_with_null_done_at() {
        // Arrange: 未完了のレコード
        let todo = Todo::new("Task", 3);

        // Act: JSON へ変換
        let json = serde_json::to_value(&todo).unwrap();

        // Assert: ワイヤ上のフィールド名と null 表現
        assert_eq!(json["id"], todo.id.as_str());
        assert_eq!(json["value"], "Task");
        assert_eq!(json["order"], 3);
        assert!(json["done_at"].is_null());
        assert!(json["created_at"].is_string());
        assert!(json["updated_at"].is_string());
    }
}
