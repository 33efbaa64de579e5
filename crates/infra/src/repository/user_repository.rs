//! # UserRepository
//!
//! ユーザーレコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **フラットファイル**: 全レコードを単一の JSON 配列としてファイルに保存
//! - **Mutex 付きキャッシュ**: レコードはメモリ上に保持し、変更のたびに
//!   ファイルへ全量書き戻す。読み書きは同一の Mutex で直列化されるため、
//!   同時リクエストによる更新喪失やユーザー名重複は発生しない
//! - **一意性の保証**: 挿入時の重複チェックもロック内で行う

use std::path::{Path, PathBuf};

use aikotoba_domain::{
    password::PasswordHash,
    user::{DisplayName, User, Username},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::InfraError;

/// ストアファイル上のユーザーレコード
///
/// 外部形式は `{username, name, password}` の JSON オブジェクト
/// （`password` はハッシュ文字列）。ドメインの [`User`] と相互変換する。
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    username: String,
    name: String,
    password: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().as_str().to_string(),
            name: user.name().as_str().to_string(),
            password: user.password_hash().as_str().to_string(),
        }
    }
}

impl UserRecord {
    /// レコードをドメインエンティティに復元する
    ///
    /// ストアファイル由来の値でもドメインのバリデーションを通す。
    fn into_user(self) -> Result<User, InfraError> {
        let username = Username::new(self.username)
            .map_err(|e| InfraError::unexpected(format!("不正なレコード: {e}")))?;
        let name = DisplayName::new(self.name)
            .map_err(|e| InfraError::unexpected(format!("不正なレコード: {e}")))?;
        Ok(User::new(username, name, PasswordHash::new(self.password)))
    }
}

/// ユーザーリポジトリトレイト
///
/// ユーザーレコードの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、web 層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー名でユーザーを取得（線形探索）
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: ストアエラー
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError>;

    /// 全ユーザーを挿入順で取得
    async fn list_all(&self) -> Result<Vec<User>, InfraError>;

    /// ユーザーを追加
    ///
    /// 重複チェックと追加は同一ロック内で行われる。
    ///
    /// # エラー
    ///
    /// - 同名のユーザーが既に存在する場合は `Conflict`
    /// - ファイル書き込みに失敗した場合は `Io`
    async fn insert(&self, user: User) -> Result<(), InfraError>;

    /// ユーザー名が一致する最初のレコードを削除
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 削除した場合
    /// - `Ok(false)`: 該当レコードがなかった場合
    async fn delete_by_username(&self, username: &Username) -> Result<bool, InfraError>;
}

/// JSON フラットファイル実装の UserRepository
///
/// 起動時にファイルを読み込んでキャッシュし、変更のたびに
/// 配列全体をファイルへ書き戻す。
pub struct FileUserRepository {
    path: PathBuf,
    records: Mutex<Vec<UserRecord>>,
}

impl FileUserRepository {
    /// ストアファイルを読み込んでリポジトリを作成する
    ///
    /// - ファイルが存在しない場合は空のストアとして開始する
    ///   （初回の変更時にファイルが作成される）
    /// - ファイルが JSON 配列として解釈できない場合はエラー
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, InfraError> {
        let path = path.as_ref().to_path_buf();

        let records = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str::<Vec<UserRecord>>(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// キャッシュの内容をファイルへ書き戻す
    ///
    /// 呼び出し元がロックを保持した状態で実行すること。
    async fn flush(&self, records: &[UserRecord]) -> Result<(), InfraError> {
        let json = serde_json::to_string(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, InfraError> {
        let records = self.records.lock().await;

        records
            .iter()
            .find(|r| r.username == username.as_str())
            .map(|r| r.clone().into_user())
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, InfraError> {
        let records = self.records.lock().await;

        records
            .iter()
            .map(|r| r.clone().into_user())
            .collect::<Result<Vec<_>, _>>()
    }

    async fn insert(&self, user: User) -> Result<(), InfraError> {
        let mut records = self.records.lock().await;

        // 重複チェックは挿入と同じロック内で行う
        if records.iter().any(|r| r.username == user.username().as_str()) {
            return Err(InfraError::conflict("User", user.username().as_str()));
        }

        records.push(UserRecord::from(&user));
        self.flush(&records).await?;

        Ok(())
    }

    async fn delete_by_username(&self, username: &Username) -> Result<bool, InfraError> {
        let mut records = self.records.lock().await;

        let Some(index) = records.iter().position(|r| r.username == username.as_str()) else {
            return Ok(false);
        };

        records.remove(index);
        self.flush(&records).await?;

        Ok(true)
    }
}
