//! # 認証ハンドラ
//!
//! 会員登録・ログイン・ログアウトのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /signup` - 会員登録（成功時にセッション Cookie を発行）
//! - `POST /login` - ログイン（成功時にセッション Cookie を発行）
//! - `GET /logout` - ログアウト（Cookie をクリア、ストアには触れない）

use std::sync::Arc;

use aikotoba_infra::SessionData;
use aikotoba_shared::{event_log::event, log_business_event};
use axum::{Form, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use super::{
    AppState,
    LoginForm,
    SESSION_COOKIE_NAME,
    SignupForm,
    build_clear_cookie,
    build_session_cookie,
    redirect_to_home,
};
use crate::error::WebError;

/// POST /signup
///
/// 会員登録してセッションを確立する。
///
/// ## フロー
///
/// 1. ユースケースで重複チェック・ハッシュ化・ストア追加
/// 2. セッションを作成し Cookie を設定
/// 3. ルートページへリダイレクト
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<impl IntoResponse, WebError> {
    let user = match state
        .usecase
        .signup(&form.username, &form.name, &form.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            log_business_event!(
                event.category = event::category::ACCOUNT,
                event.action = event::action::SIGNUP_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.result = event::result::FAILURE,
                "会員登録失敗: {}",
                e
            );
            return Err(e);
        }
    };

    // セッションを作成して Cookie を設定
    let session = SessionData::new(user.username().as_str(), user.name().as_str());
    let session_id = state.sessions.create(&session).await?;
    let jar = jar.add(build_session_cookie(&session_id));

    log_business_event!(
        event.category = event::category::ACCOUNT,
        event.action = event::action::SIGNUP_SUCCESS,
        event.entity_type = event::entity_type::USER,
        event.entity_id = %user.username(),
        event.result = event::result::SUCCESS,
        "会員登録成功"
    );

    Ok((jar, redirect_to_home()))
}

/// POST /login
///
/// ユーザー名とパスワードでログインし、セッションを確立する。
///
/// 未登録ユーザー名とパスワード不一致はいずれも 400 で、
/// Cookie は発行されない。
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, WebError> {
    let user = match state.usecase.login(&form.username, &form.password).await {
        Ok(user) => user,
        Err(e) => {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.result = event::result::FAILURE,
                "ログイン失敗: {}",
                e
            );
            return Err(e);
        }
    };

    // セッションを作成して Cookie を設定
    let session = SessionData::new(user.username().as_str(), user.name().as_str());
    let session_id = state.sessions.create(&session).await?;
    let jar = jar.add(build_session_cookie(&session_id));

    log_business_event!(
        event.category = event::category::AUTH,
        event.action = event::action::LOGIN_SUCCESS,
        event.entity_type = event::entity_type::SESSION,
        event.entity_id = %session_id,
        event.result = event::result::SUCCESS,
        "ログイン成功"
    );

    Ok((jar, redirect_to_home()))
}

/// GET /logout
///
/// セッションを破棄して Cookie をクリアする。
/// Cookie の有無にかかわらず常にリダイレクトし、ストアには触れない。
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        let session_id = cookie.value().to_string();
        // セッション削除の失敗はログアウトを妨げない
        if let Err(e) = state.sessions.delete(&session_id).await {
            tracing::warn!("セッション削除に失敗（無視）: {}", e);
        }
    }

    log_business_event!(
        event.category = event::category::AUTH,
        event.action = event::action::LOGOUT,
        event.entity_type = event::entity_type::SESSION,
        event.result = event::result::SUCCESS,
        "ログアウト"
    );

    let jar = jar.add(build_clear_cookie());
    (jar, redirect_to_home())
}
