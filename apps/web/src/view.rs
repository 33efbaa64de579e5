//! # ページレンダラー
//!
//! tera テンプレートエンジンでルートページの HTML を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **パスワード非表示**: プロフィールにはユーザー名と表示名のみを渡す

use tera::{Context, Tera};

use crate::error::WebError;

/// ページレンダラー
///
/// tera テンプレートエンジンをラップし、ルートページの HTML を生成する。
pub struct PageRenderer {
    engine: Tera,
}

impl PageRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, WebError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "home_authenticated.html",
                    include_str!("../templates/home_authenticated.html"),
                ),
                (
                    "home_anonymous.html",
                    include_str!("../templates/home_anonymous.html"),
                ),
            ])
            .map_err(|e| WebError::Internal(format!("テンプレート登録に失敗: {e}")))?;

        Ok(Self { engine })
    }

    /// ログイン済みユーザー向けのルートページを生成する
    ///
    /// プロフィールにはユーザー名と表示名のみを表示する
    /// （パスワードは平文もハッシュも出さない）。
    pub fn home_authenticated(&self, username: &str, name: &str) -> Result<String, WebError> {
        let mut context = Context::new();
        context.insert("username", username);
        context.insert("name", name);

        self.engine
            .render("home_authenticated.html", &context)
            .map_err(|e| WebError::Internal(format!("テンプレート描画に失敗: {e}")))
    }

    /// 未ログインユーザー向けのルートページを生成する
    pub fn home_anonymous(&self) -> Result<String, WebError> {
        self.engine
            .render("home_anonymous.html", &Context::new())
            .map_err(|e| WebError::Internal(format!("テンプレート描画に失敗: {e}")))
    }
}
