//! # ヘルスチェックハンドラ

use aikotoba_shared::HealthResponse;
use axum::Json;

/// GET /health
///
/// サービスの稼働状態とバージョンを返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
