//! # ルートページハンドラ
//!
//! セッション Cookie の有無でプロフィールページと未ログインページを
//! 出し分ける。

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use axum_extra::extract::CookieJar;

use super::{AppState, SESSION_COOKIE_NAME, build_clear_cookie};
use crate::error::WebError;

/// GET /
///
/// ## 状態遷移
///
/// - Cookie なし / 不明なセッション ID → 未ログインページ
/// - セッションあり & ユーザーがストアに存在 → プロフィールページ
/// - セッションあり & ユーザーが退会済み → セッションを破棄して
///   Cookie をクリアし、未ログインページ
///
/// プロフィールに表示するのはユーザー名と表示名のみ
/// （パスワードは出さない）。
#[tracing::instrument(skip_all)]
pub async fn home(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    // Cookie からセッション ID を取得
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Ok((jar, Html(state.pages.home_anonymous()?)));
    };
    let session_id = cookie.value().to_string();

    // セッションを取得
    let Some(session) = state.sessions.get(&session_id).await? else {
        // 不明なセッション ID は未ログイン扱い
        return Ok((jar, Html(state.pages.home_anonymous()?)));
    };

    // セッションが指すユーザーがストアに存在するか確認
    match state.usecase.find_profile(session.username()).await? {
        Some(user) => {
            let html = state
                .pages
                .home_authenticated(user.username().as_str(), user.name().as_str())?;
            Ok((jar, Html(html)))
        }
        None => {
            // 退会済みユーザーのセッションは破棄して Cookie もクリアする
            if let Err(e) = state.sessions.delete(&session_id).await {
                tracing::warn!("セッション削除に失敗（無視）: {}", e);
            }
            let jar = jar.add(build_clear_cookie());
            Ok((jar, Html(state.pages.home_anonymous()?)))
        }
    }
}
