//! SmileSync CLI client.
//!
//! セッションに参加し、受信したブロードキャストを表示しながら
//! 入力行をコマンドまたはチャットとして送信します。

pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use domain::Identity;
pub use error::ClientError;
pub use runner::run_client;
