//! # Web サーバー設定
//!
//! 環境変数から Web サーバーの設定を読み込む。

use std::{env, path::PathBuf};

/// デフォルトのポート番号（従来システムの固定ポート）
const DEFAULT_PORT: &str = "3000";

/// デフォルトのユーザーストアファイル
const DEFAULT_USERS_FILE: &str = "user.json";

/// デフォルトの静的ファイルディレクトリ
const DEFAULT_STATIC_DIR: &str = "public";

/// Web サーバーの設定
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ユーザーストアファイルのパス
    pub users_file: PathBuf,
    /// 静的ファイルディレクトリ
    pub static_dir: PathBuf,
}

impl WebConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_port(env::var("WEB_PORT").ok().as_deref()),
            users_file: env::var("USERS_FILE")
                .unwrap_or_else(|_| DEFAULT_USERS_FILE.to_string())
                .into(),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string())
                .into(),
        }
    }
}

/// ポート番号をパースする
///
/// 未設定の場合はデフォルトポートを使用する。
fn parse_port(value: Option<&str>) -> u16 {
    value
        .unwrap_or(DEFAULT_PORT)
        .parse()
        .expect("WEB_PORT は有効なポート番号である必要があります")
}
