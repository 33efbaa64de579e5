//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Username`] | ユーザー名 | ストア内で一意なログイン ID |
//! | [`DisplayName`] | 表示名 | プロフィールに表示する名前 |
//! | [`User`] | ユーザー | ストアに永続化される会員レコード |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: ユーザー名・表示名は String をラップし、
//!   型の取り違えを防ぐ
//! - **バリデーション**: 生成時に存在チェック（空でないこと）を実行する
//! - **不変性**: エンティティフィールドは生成後に変更しない

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// ユーザー名（一意識別子）
///
/// ストア内でユーザーを特定するキー。一意性の保証は
/// リポジトリ側の責務（挿入時にロック内で検査される）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// ユーザー名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "ユーザー名は必須です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// 表示名（値オブジェクト）
///
/// プロフィールページに表示される名前。一意性は要求しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct DisplayName(String);

impl DisplayName {
    /// 表示名を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation("表示名は必須です".to_string()));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーエンティティ
///
/// ストアに永続化される会員レコード。パスワードはハッシュ化された
/// 状態でのみ保持する（平文はエンティティに入らない）。
///
/// # 不変条件
///
/// - `username` はストア内で一意（リポジトリが挿入時に保証）
/// - `password_hash` は常に PHC 形式のハッシュ文字列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    name: DisplayName,
    password_hash: PasswordHash,
}

impl User {
    /// 新しいユーザーを作成する
    ///
    /// # 引数
    ///
    /// - `username`: ユーザー名（一意キー）
    /// - `name`: 表示名
    /// - `password_hash`: ハッシュ化済みパスワード
    pub fn new(username: Username, name: DisplayName, password_hash: PasswordHash) -> Self {
        Self {
            username,
            name,
            password_hash,
        }
    }

    // Getter メソッド

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
