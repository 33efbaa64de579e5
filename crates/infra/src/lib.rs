//! # Aikotoba インフラ層
//!
//! 外部リソースとの入出力を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはドメイン層で定義されたモデルに対する永続化・
//! 暗号処理の具体的な実装を提供する。外部リソースの詳細を
//! カプセル化し、ドメイン層をインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **ユーザーストア**: JSON フラットファイルへの永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//! - **セッションストア**: プロセス内セッションの管理
//!
//! ## 依存関係
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードハッシュ処理
//! - [`repository`] - リポジトリ実装
//! - [`session`] - セッションストア

pub mod error;
pub mod password;
pub mod repository;
pub mod session;

pub use error::InfraError;
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use session::{InMemorySessionStore, SessionData, SessionStore};
