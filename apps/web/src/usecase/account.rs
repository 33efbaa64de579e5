//! # 会員管理ユースケース
//!
//! 会員登録・ログイン・退会のビジネスロジックを実装する。
//!
//! ## タイミング攻撃対策
//!
//! ログイン・退会時の検証では、ユーザーが存在しない場合もダミーハッシュで
//! 検証を実行し、処理時間を均一化する。

use std::sync::Arc;

use aikotoba_domain::{
    DomainError,
    password::{PasswordHash, PlainPassword},
    user::{DisplayName, User, Username},
};
use aikotoba_infra::{PasswordHasher, repository::UserRepository};

use crate::error::WebError;

/// 会員管理ユースケースの実装
pub struct AccountUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AccountUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// 会員登録する
    ///
    /// パスワードをハッシュ化してストアに追加する。
    /// 重複チェックの最終防衛はリポジトリの挿入ロック内で行われるため、
    /// 同時登録でもユーザー名の一意性は保たれる。
    pub async fn signup(
        &self,
        username: &str,
        name: &str,
        password: &str,
    ) -> Result<User, WebError> {
        let username = Username::new(username)?;
        let name = DisplayName::new(name)?;
        if password.is_empty() {
            return Err(WebError::Validation(DomainError::Validation(
                "パスワードは必須です".to_string(),
            )));
        }
        let plain = PlainPassword::new(password);

        // 早期リターン用の存在チェック（ハッシュ計算を節約する）
        if self
            .user_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(WebError::DuplicateUsername(username.into_string()));
        }

        let hash = self.password_hasher.hash(&plain)?;
        let user = User::new(username.clone(), name, hash);

        match self.user_repository.insert(user.clone()).await {
            Ok(()) => Ok(user),
            Err(e) if e.as_conflict().is_some() => {
                Err(WebError::DuplicateUsername(username.into_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// ログイン認証する
    pub async fn login(&self, username: &str, password: &str) -> Result<User, WebError> {
        let username = Username::new(username)?;
        let plain = PlainPassword::new(password);

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            // タイミング攻撃対策: 未登録ユーザーでもダミー検証を実行
            self.dummy_verification(&plain);
            return Err(WebError::UnknownUsername(username.into_string()));
        };

        let result = self.password_hasher.verify(&plain, user.password_hash())?;
        if result.is_mismatch() {
            return Err(WebError::PasswordMismatch);
        }

        Ok(user)
    }

    /// プロフィール表示用にユーザーを取得する
    pub async fn find_profile(&self, username: &str) -> Result<Option<User>, WebError> {
        let username = Username::new(username)?;
        Ok(self.user_repository.find_by_username(&username).await?)
    }

    /// 退会する（アカウント削除）
    ///
    /// パスワードが一致しない場合は明示的なエラーを返し、
    /// ストアは変更しない。
    pub async fn withdraw(&self, username: &str, password: &str) -> Result<(), WebError> {
        let username = Username::new(username)?;
        let plain = PlainPassword::new(password);

        let Some(user) = self.user_repository.find_by_username(&username).await? else {
            self.dummy_verification(&plain);
            return Err(WebError::UnknownUsername(username.into_string()));
        };

        let result = self.password_hasher.verify(&plain, user.password_hash())?;
        if result.is_mismatch() {
            return Err(WebError::PasswordMismatch);
        }

        self.user_repository.delete_by_username(&username).await?;

        Ok(())
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// ユーザーが存在しない場合も実際のパスワード検証と同等の時間を消費する。
    /// 固定 sleep ではなく実際に Argon2id 検証を実行することで、
    /// CPU/メモリ状況による自然な変動も含めて同じ時間特性になる。
    fn dummy_verification(&self, password: &PlainPassword) {
        // ダミーハッシュ（有効な Argon2id 形式）
        let dummy_hash = PasswordHash::new(
            "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        );
        // 結果は無視（エラーでも問題ない）
        let _ = self.password_hasher.verify(password, &dummy_hash);
    }
}
