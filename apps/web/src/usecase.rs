//! # ユースケース層
//!
//! Web サービスのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリとパスワードハッシャを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod account;

use aikotoba_domain::user::User;
pub use account::AccountUseCaseImpl;
use async_trait::async_trait;

use crate::error::WebError;

/// 会員管理ユースケーストレイト
///
/// Web サービスのビジネスロジックを定義する。
/// 具体的な実装は `AccountUseCaseImpl` で提供される。
#[async_trait]
pub trait AccountUseCase: Send + Sync {
    /// 会員登録する
    ///
    /// ## 引数
    ///
    /// - `username`: ユーザー名（一意キー）
    /// - `name`: 表示名
    /// - `password`: 平文パスワード
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 登録されたユーザー
    /// - `Err(WebError::DuplicateUsername)`: ユーザー名が既に存在する場合
    async fn signup(
        &self,
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<User, WebError>;

    /// ログイン認証する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 認証に成功したユーザー
    /// - `Err(WebError::UnknownUsername)`: 未登録のユーザー名の場合
    /// - `Err(WebError::PasswordMismatch)`: パスワードが一致しない場合
    async fn login(&self, username: &str, password: &str) -> Result<User, WebError>;

    /// プロフィール表示用にユーザーを取得する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(Some(User))`: ユーザーが存在する場合
    /// - `Ok(None)`: ユーザーが存在しない（退会済み）場合
    async fn find_profile(&self, username: &str) -> Result<Option<User>, WebError>;

    /// 退会する（アカウント削除）
    ///
    /// パスワードを検証し、一致した場合のみレコードを削除する。
    ///
    /// ## 戻り値
    ///
    /// - `Ok(())`: 削除成功
    /// - `Err(WebError::PasswordMismatch)`: パスワードが一致しない場合
    ///   （ストアは変更されない）
    async fn withdraw(&self, username: &str, password: &str) -> Result<(), WebError>;
}

/// AccountUseCaseImpl に AccountUseCase トレイトを実装
#[async_trait]
impl AccountUseCase for AccountUseCaseImpl {
    async fn signup(
        &self,
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<User, WebError> {
        self.signup(username, name, password).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, WebError> {
        self.login(username, password).await
    }

    async fn find_profile(&self, username: &str) -> Result<Option<User>, WebError> {
        self.find_profile(username).await
    }

    async fn withdraw(&self, username: &str, password: &str) -> Result<(), WebError> {
        self.withdraw(username, password).await
    }
}
