//! # Aikotoba ドメイン層
//!
//! 会員管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: `Username` や `PlainPassword` などのプリミティブを
//!   Newtype でラップし、生成時にバリデーションを実行する
//! - **エンティティ**: 一意の識別子（ユーザー名）を持つ `User`
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（ファイル永続化、セッションストア）に
//! 一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーエンティティと関連する値オブジェクト
//! - [`password`] - パスワード関連の値オブジェクト

pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
