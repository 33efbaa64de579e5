//! # Web サービスエラー定義
//!
//! Web サービス固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ステータスコードの方針
//!
//! 外部インターフェース契約に合わせ、重複ユーザー名と認証情報不一致は
//! いずれも 400 を返す（未登録ユーザーとパスワード不一致はステータスを
//! 共有し、detail の文言のみ異なる）。セッションなしでの退会は 401。
//! ストア障害などの内部要因は 500 で、detail は固定文言とする。

use aikotoba_shared::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Web サービスで発生するエラー
#[derive(Debug, Error)]
pub enum WebError {
    /// ユーザー名の重複（会員登録時）
    #[error("ユーザー名は既に使用されています: {0}")]
    DuplicateUsername(String),

    /// 未登録のユーザー名（ログイン・退会時）
    #[error("未登録のユーザー名です: {0}")]
    UnknownUsername(String),

    /// パスワード不一致（ログイン・退会時）
    #[error("パスワードが一致しません")]
    PasswordMismatch,

    /// セッションがない、または無効
    #[error("ログインしていません")]
    Unauthorized,

    /// 入力値の検証エラー
    #[error("{0}")]
    Validation(#[from] aikotoba_domain::DomainError),

    /// インフラエラー（ストア・セッション）
    #[error("インフラエラー: {0}")]
    Infra(#[from] aikotoba_infra::InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let response = match &self {
            WebError::DuplicateUsername(username) => ErrorResponse::new(
                "duplicate-username",
                "Duplicate Username",
                400,
                format!("ユーザー名は既に使用されています: {username}"),
            ),
            WebError::UnknownUsername(username) => ErrorResponse::new(
                "unknown-username",
                "Unknown Username",
                400,
                format!("未登録のユーザー名です: {username}"),
            ),
            WebError::PasswordMismatch => ErrorResponse::new(
                "password-mismatch",
                "Password Mismatch",
                400,
                "パスワードが一致しません",
            ),
            WebError::Unauthorized => ErrorResponse::unauthorized("ログインしていません"),
            WebError::Validation(e) => ErrorResponse::validation_error(e.to_string()),
            WebError::Infra(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    "インフラエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            WebError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status = StatusCode::from_u16(response.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_重複ユーザー名は400を返す() {
        let response = WebError::DuplicateUsername("alice".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_未登録ユーザー名は400を返す() {
        let response = WebError::UnknownUsername("ghost".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_パスワード不一致は400を返す() {
        let response = WebError::PasswordMismatch.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_未認証は401を返す() {
        let response = WebError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_インフラエラーは500を返す() {
        let err = WebError::Infra(aikotoba_infra::InfraError::unexpected("disk full"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_エラーボディはproblem_details形式() {
        let response = WebError::PasswordMismatch.into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            json["type"],
            "https://aikotoba.example.com/errors/password-mismatch"
        );
        assert_eq!(json["status"], 400);
        assert!(json["detail"].as_str().unwrap().contains("パスワード"));
    }
}
