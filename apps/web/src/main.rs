//! # Aikotoba Web サーバー
//!
//! セッションベースの会員管理デモサービス。
//!
//! ## 役割
//!
//! - **会員登録 / ログイン / 退会**: フラットファイルのユーザーストアに対する
//!   パスワード認証付きの CRUD
//! - **セッション管理**: HTTPOnly Cookie に不透明なセッション ID を載せ、
//!   セッションデータ本体はサーバ側に保持する
//! - **静的ファイル配信**: ログイン・会員登録フォームを配信する
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Browser    │────▶│     Web      │────▶│  user.json   │
//! │              │     │  port: 3000  │     │ (フラットファイル) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │ セッション（メモリ） │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `WEB_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `WEB_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `USERS_FILE` | No | ユーザーストアファイル（デフォルト: `user.json`） |
//! | `STATIC_DIR` | No | 静的ファイルディレクトリ（デフォルト: `public`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p aikotoba-web
//!
//! # 本番環境
//! WEB_PORT=3000 LOG_FORMAT=json cargo run -p aikotoba-web --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use aikotoba_infra::{
    Argon2PasswordHasher,
    InMemorySessionStore,
    PasswordHasher,
    SessionStore,
    repository::{FileUserRepository, UserRepository},
};
use aikotoba_shared::observability::TracingConfig;
use aikotoba_web::{
    config::WebConfig,
    handler::{AppState, health_check, home, login, logout, signup, withdraw},
    usecase::AccountUseCaseImpl,
    view::PageRenderer,
};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Web サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ユーザーストアの読み込みと依存コンポーネントの初期化
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("web");
    aikotoba_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "web").entered();

    // 設定読み込み
    let config = WebConfig::from_env();

    tracing::info!("Web サーバーを起動します: {}:{}", config.host, config.port);

    // ユーザーストアを開く
    let user_repository: Arc<dyn UserRepository> = Arc::new(
        FileUserRepository::open(&config.users_file)
            .await
            .expect("ユーザーストアの読み込みに失敗しました"),
    );
    tracing::info!(
        "ユーザーストアを開きました: {}",
        config.users_file.display()
    );

    // 依存コンポーネントを初期化
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let usecase = AccountUseCaseImpl::new(user_repository, password_hasher);
    let pages = PageRenderer::new().expect("テンプレートの登録に失敗しました");

    let state = Arc::new(AppState {
        usecase: Arc::new(usecase),
        sessions,
        pages: Arc::new(pages),
    });

    // ルーター構築
    // 未定義のパスは静的ファイルディレクトリにフォールバックする
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(home))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/withdraw", post(withdraw))
        .with_state(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
