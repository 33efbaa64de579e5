//! 会員管理統合テスト
//!
//! 実際のファイルストアと Argon2 ハッシャを使用して、
//! 会員登録からプロフィール表示・ログイン・退会までの一連フローをテストする。
//!
//! ## テストケース
//!
//! - 会員登録 → プロフィール表示 → ログアウト → ログインの一連フロー
//! - 重複ユーザー名の登録が 400 でストアは変わらない
//! - ストアのハッシュが登録時のパスワードだけを受け入れる
//! - ログアウトはストアに触れない
//! - 退会（正しいパスワード / 誤ったパスワード / セッションなし）

use std::{path::PathBuf, sync::Arc};

use aikotoba_domain::{password::PlainPassword, user::Username};
use aikotoba_infra::{
    Argon2PasswordHasher,
    InMemorySessionStore,
    PasswordHasher,
    SessionStore,
    repository::{FileUserRepository, UserRepository},
};
use aikotoba_web::{
    handler::{AppState, health_check, home, login, logout, signup, withdraw},
    usecase::AccountUseCaseImpl,
    view::PageRenderer,
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    routing::{get, post},
};
use tower::ServiceExt;
use uuid::Uuid;

/// テスト用の一意なストアファイルパスを生成する
fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("aikotoba-flow-{}.json", Uuid::new_v4()))
}

/// テスト用アプリケーションを作成
///
/// 本番と同じコンポーネント構成（ファイルストア + Argon2 +
/// メモリセッション）でルーターを組み立てる。
async fn create_test_app(store_path: &PathBuf) -> (Router, Arc<dyn SessionStore>) {
    let user_repository: Arc<dyn UserRepository> = Arc::new(
        FileUserRepository::open(store_path)
            .await
            .expect("ストアを開けること"),
    );
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let usecase = AccountUseCaseImpl::new(user_repository, Arc::new(Argon2PasswordHasher::new()));

    let state = Arc::new(AppState {
        usecase: Arc::new(usecase),
        sessions: sessions.clone(),
        pages: Arc::new(PageRenderer::new().unwrap()),
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(home))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/withdraw", post(withdraw))
        .with_state(state);

    (app, sessions)
}

/// フォーム POST リクエストを作成
fn form_request(uri: &str, body: &str, session_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(session_id) = session_id {
        builder = builder.header("Cookie", format!("USER={}", session_id));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// GET リクエストを作成
fn get_request(uri: &str, session_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(session_id) = session_id {
        builder = builder.header("Cookie", format!("USER={}", session_id));
    }
    builder.body(Body::empty()).unwrap()
}

/// Set-Cookie ヘッダーからセッション ID を抽出
fn extract_session_id(set_cookie: &str) -> Option<String> {
    // "USER=xxx; Path=/; ..." の形式からセッション ID を抽出
    set_cookie
        .split(';')
        .next()
        .and_then(|s| s.strip_prefix("USER="))
        .map(|s| s.to_string())
}

/// レスポンスボディを文字列として読む
async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// ストアファイルの内容を読む（存在しない場合は空文字列）
async fn store_contents(path: &PathBuf) -> String {
    tokio::fs::read_to_string(path).await.unwrap_or_default()
}

// --- テストケース ---

#[tokio::test]
async fn test_会員登録からログインまでの一連フロー() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    // When: 会員登録
    let signup_response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();

    // Then: 302 + セッション Cookie
    assert_eq!(signup_response.status(), StatusCode::FOUND);
    let set_cookie = signup_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let session_id = extract_session_id(set_cookie).expect("セッション ID が設定されていない");
    assert!(!session_id.is_empty());

    // When: プロフィール表示
    let home_response = app
        .clone()
        .oneshot(get_request("/", Some(&session_id)))
        .await
        .unwrap();

    // Then: ユーザー名と表示名が出る（パスワードは出ない）
    assert_eq!(home_response.status(), StatusCode::OK);
    let html = body_string(home_response).await;
    assert!(html.contains("alice"));
    assert!(html.contains("Alice"));
    assert!(!html.contains("pw1"));
    assert!(!html.contains("argon2"));

    // When: ログアウト
    let logout_response = app
        .clone()
        .oneshot(get_request("/logout", Some(&session_id)))
        .await
        .unwrap();

    // Then: Cookie がクリアされる
    assert_eq!(logout_response.status(), StatusCode::FOUND);
    let clear_cookie = logout_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(clear_cookie.contains("Max-Age=0"));

    // When: ログアウト後のルートページ
    let anonymous_response = app
        .clone()
        .oneshot(get_request("/", Some(&session_id)))
        .await
        .unwrap();

    // Then: 未ログインページに戻る
    let html = body_string(anonymous_response).await;
    assert!(html.contains("ログインしていません"));

    // When: 再ログイン
    let login_response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=alice&password=pw1",
            None,
        ))
        .await
        .unwrap();

    // Then: 新しいセッション Cookie が発行される
    assert_eq!(login_response.status(), StatusCode::FOUND);
    let set_cookie = login_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let new_session_id = extract_session_id(set_cookie).unwrap();
    assert!(!new_session_id.is_empty());
    assert_ne!(new_session_id, session_id);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_会員登録でストアにレコードが1件追加される() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    // When
    let response = app
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::FOUND);

    let contents = store_contents(&path).await;
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["username"], "alice");
    assert_eq!(records[0]["name"], "Alice");
    // パスワードは平文では保存されない
    assert!(records[0]["password"].as_str().unwrap().starts_with("$argon2id$"));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_ストアのハッシュは登録時のパスワードだけを受け入れる() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    app.oneshot(form_request(
        "/signup",
        "username=alice&name=Alice&password=pw1",
        None,
    ))
    .await
    .unwrap();

    // When: ストアを直接開いてハッシュを検証する
    let repository = FileUserRepository::open(&path).await.unwrap();
    let user = repository
        .find_by_username(&Username::new("alice").unwrap())
        .await
        .unwrap()
        .expect("ユーザーが存在すること");

    // Then
    let hasher = Argon2PasswordHasher::new();
    let correct = hasher
        .verify(&PlainPassword::new("pw1"), user.password_hash())
        .unwrap();
    assert!(correct.is_match());

    let wrong = hasher
        .verify(&PlainPassword::new("pw2"), user.password_hash())
        .unwrap();
    assert!(wrong.is_mismatch());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_重複ユーザー名の会員登録は400でストアは変わらない() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    app.clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();
    let before = store_contents(&path).await;

    // When
    let response = app
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice+2&password=pw2",
            None,
        ))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("set-cookie").is_none());

    let after = store_contents(&path).await;
    assert_eq!(before, after, "ストアが変更されている");

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_誤ったパスワードと未登録ユーザーのログインは400() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    app.clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();

    // When: 誤ったパスワード
    let wrong_password = app
        .clone()
        .oneshot(form_request("/login", "username=alice&password=wrong", None))
        .await
        .unwrap();

    // Then
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert!(wrong_password.headers().get("set-cookie").is_none());

    // When: 未登録のユーザー名
    let unknown_user = app
        .oneshot(form_request("/login", "username=ghost&password=pw1", None))
        .await
        .unwrap();

    // Then
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);
    assert!(unknown_user.headers().get("set-cookie").is_none());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_ログアウトはストアに触れない() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    let signup_response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();
    let set_cookie = signup_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let session_id = extract_session_id(set_cookie).unwrap();
    let before = store_contents(&path).await;

    // When
    let response = app
        .oneshot(get_request("/logout", Some(&session_id)))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::FOUND);
    let after = store_contents(&path).await;
    assert_eq!(before, after, "ログアウトでストアが変更された");

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_退会で該当レコードだけが削除される() {
    // Given: alice と bob を登録
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    let signup_response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();
    let set_cookie = signup_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let alice_session = extract_session_id(set_cookie).unwrap();

    app.clone()
        .oneshot(form_request(
            "/signup",
            "username=bob&name=Bob&password=pw2",
            None,
        ))
        .await
        .unwrap();

    // When: alice が退会
    let response = app
        .clone()
        .oneshot(form_request("/withdraw", "password=pw1", Some(&alice_session)))
        .await
        .unwrap();

    // Then: 302 + Cookie クリア、ストアには bob だけが残る
    assert_eq!(response.status(), StatusCode::FOUND);
    let clear_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(clear_cookie.contains("Max-Age=0"));

    let contents = store_contents(&path).await;
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["username"], "bob");

    // 退会後のルートページは未ログイン表示
    let home_response = app
        .oneshot(get_request("/", Some(&alice_session)))
        .await
        .unwrap();
    let html = body_string(home_response).await;
    assert!(html.contains("ログインしていません"));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_誤ったパスワードでの退会は400でストアもセッションも変わらない() {
    // Given
    let path = temp_store_path();
    let (app, sessions) = create_test_app(&path).await;

    let signup_response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "username=alice&name=Alice&password=pw1",
            None,
        ))
        .await
        .unwrap();
    let set_cookie = signup_response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let session_id = extract_session_id(set_cookie).unwrap();
    let before = store_contents(&path).await;

    // When
    let response = app
        .clone()
        .oneshot(form_request("/withdraw", "password=wrong", Some(&session_id)))
        .await
        .unwrap();

    // Then: 400 でストア・セッションとも変わらない
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let after = store_contents(&path).await;
    assert_eq!(before, after, "ストアが変更されている");

    let session = sessions.get(&session_id).await.unwrap();
    assert!(session.is_some(), "セッションが誤って削除された");

    // ログイン状態のままプロフィールが見られる
    let home_response = app
        .oneshot(get_request("/", Some(&session_id)))
        .await
        .unwrap();
    let html = body_string(home_response).await;
    assert!(html.contains("alice"));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_セッションなしの退会は401() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    // When
    let response = app
        .oneshot(form_request("/withdraw", "password=pw1", None))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_healthエンドポイントが200を返す() {
    // Given
    let path = temp_store_path();
    let (app, _sessions) = create_test_app(&path).await;

    // When
    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
}
