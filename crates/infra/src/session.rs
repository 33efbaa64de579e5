//! # セッション管理
//!
//! プロセス内メモリを使用したセッション管理を提供する。
//!
//! セッション ID は UUID v4（暗号論的に安全なランダム値）で、
//! Cookie には ID のみを渡す。セッションデータ本体はサーバ側に保持し、
//! クライアントにはユーザーレコードやパスワード情報を一切渡さない。
//!
//! 有効期限は設けない（ログアウトまたは退会で削除される）。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::InfraError;

/// セッションデータ
///
/// ログイン成功時に作成され、ログアウトまたは退会で削除される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl SessionData {
    /// 新しいセッションデータを作成する
    ///
    /// `created_at` は現在時刻で初期化される。
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// セッションストアトレイト
///
/// セッションの作成・取得・削除を行う。
/// 実装はプロセス内メモリを使用する [`InMemorySessionStore`] を参照。
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// セッションを作成し、セッション ID を返す
    ///
    /// # 戻り値
    ///
    /// 生成されたセッション ID（UUID v4）
    async fn create(&self, data: &SessionData) -> Result<String, InfraError>;

    /// セッションを取得する
    ///
    /// # 戻り値
    ///
    /// セッションが存在すれば `Some(SessionData)`、なければ `None`
    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError>;

    /// セッションを削除する
    ///
    /// 存在しないセッションを削除しても成功とする。
    async fn delete(&self, session_id: &str) -> Result<(), InfraError>;
}

/// プロセス内メモリを使用したセッションストア
///
/// 単一プロセス構成のため外部キャッシュは使用しない。
/// プロセス再起動で全セッションは失効する。
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl InMemorySessionStore {
    /// 新しい InMemorySessionStore を作成する
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, data: &SessionData) -> Result<String, InfraError> {
        let session_id = Uuid::new_v4().to_string();

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), data.clone());

        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionData>, InfraError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &str) -> Result<(), InfraError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}
