//! # 退会ハンドラ
//!
//! パスワード確認付きのアカウント削除エンドポイントを提供する。

use std::sync::Arc;

use aikotoba_shared::{event_log::event, log_business_event};
use axum::{Form, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use super::{AppState, SESSION_COOKIE_NAME, WithdrawForm, build_clear_cookie, redirect_to_home};
use crate::error::WebError;

/// POST /withdraw
///
/// セッションの持ち主のアカウントを削除する。
///
/// ## フロー
///
/// 1. セッションがなければ 401
/// 2. フォームのパスワードをストアのハッシュと照合
/// 3. 不一致なら 400（ストアもセッションも変更しない）
/// 4. 一致したらレコード削除・セッション破棄・Cookie クリア・リダイレクト
#[tracing::instrument(skip_all)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<WithdrawForm>,
) -> Result<impl IntoResponse, WebError> {
    // セッションがなければ未認証
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Err(WebError::Unauthorized);
    };
    let session_id = cookie.value().to_string();
    let Some(session) = state.sessions.get(&session_id).await? else {
        return Err(WebError::Unauthorized);
    };

    // パスワード不一致は明示的なエラーとして返す
    if let Err(e) = state
        .usecase
        .withdraw(session.username(), &form.password)
        .await
    {
        log_business_event!(
            event.category = event::category::ACCOUNT,
            event.action = event::action::WITHDRAW_FAILURE,
            event.entity_type = event::entity_type::USER,
            event.result = event::result::FAILURE,
            "退会失敗: {}",
            e
        );
        return Err(e);
    }

    // セッションを破棄して Cookie をクリアする
    if let Err(e) = state.sessions.delete(&session_id).await {
        tracing::warn!("セッション削除に失敗（無視）: {}", e);
    }
    let jar = jar.add(build_clear_cookie());

    log_business_event!(
        event.category = event::category::ACCOUNT,
        event.action = event::action::WITHDRAW_SUCCESS,
        event.entity_type = event::entity_type::USER,
        event.entity_id = session.username(),
        event.result = event::result::SUCCESS,
        "退会成功"
    );

    Ok((jar, redirect_to_home()))
}
