//! # aikotoba-web クレートルート
//!
//! バイナリ（main.rs）と統合テストの双方から利用できるよう、
//! モジュールをライブラリとして公開する。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
pub mod view;
