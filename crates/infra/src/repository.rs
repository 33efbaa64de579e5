//! # リポジトリ実装
//!
//! ユーザーストアへの永続化操作を提供する。
//!
//! ## 設計方針
//!
//! - **ストアの抽象化**: トレイト経由でアクセスし、ファイル固有の処理をカプセル化
//! - **排他制御**: 変更操作はロック内で実行し、競合による更新喪失を防ぐ
//! - **テスタビリティ**: トレイト経由でスタブ可能な設計

pub mod user_repository;

pub use user_repository::{FileUserRepository, UserRepository};
