//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `pages`: ルートページ（プロフィール / 未ログイン）
//! - `auth`: 認証関連（会員登録、ログイン、ログアウト）
//! - `account`: 退会
//! - `health`: ヘルスチェック

pub mod account;
pub mod auth;
pub mod health;
pub mod pages;

use std::sync::Arc;

pub use account::withdraw;
use aikotoba_infra::SessionStore;
pub use auth::{login, logout, signup};
use axum::http::{StatusCode, header};
use axum_extra::extract::cookie::{Cookie, SameSite};
pub use health::health_check;
pub use pages::home;
use serde::Deserialize;

use crate::{usecase::AccountUseCase, view::PageRenderer};

/// ハンドラの共有状態
pub struct AppState {
    pub usecase: Arc<dyn AccountUseCase>,
    pub sessions: Arc<dyn SessionStore>,
    pub pages: Arc<PageRenderer>,
}

// --- リクエスト型 ---

/// 会員登録フォーム
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub name: String,
    pub password: String,
}

/// ログインフォーム
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// 退会フォーム（パスワード確認）
#[derive(Debug, Deserialize)]
pub struct WithdrawForm {
    pub password: String,
}

// --- 共有定数 ---

/// セッション Cookie 名
///
/// 値は不透明なセッション ID のみ（ユーザーレコードは入れない）。
/// 名前は従来システムの外部インターフェースに合わせて USER を維持する。
const SESSION_COOKIE_NAME: &str = "USER";

// --- Cookie / リダイレクトヘルパー ---

/// セッション Cookie を構築する
///
/// 有効期限は設定しない（ブラウザセッション Cookie）。
fn build_session_cookie(session_id: &str) -> Cookie<'static> {
    // 本番環境では Secure フラグを有効にする
    // ENV=production の場合に HTTPS 必須となる
    let is_production = std::env::var("ENV").unwrap_or_default() == "production";

    let mut builder = Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    if is_production {
        builder = builder.secure(true);
    }

    builder.build()
}

/// Cookie をクリアするための Cookie を構築する
fn build_clear_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// ルートページへの 302 リダイレクト
///
/// 外部インターフェース契約に合わせて 302 Found を返す。
fn redirect_to_home() -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

// --- テストユーティリティ ---
