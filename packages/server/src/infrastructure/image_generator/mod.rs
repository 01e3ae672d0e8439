//! ご褒美画像生成の実装
//!
//! - `dalle`: DALL·E 互換 API を使った実装
//! - `disabled`: API が設定されていない場合の実装（常に `NotConfigured`）
//! - `prompt`: レベルと動物の種類からプロンプトを組み立てる

pub mod dalle;
pub mod disabled;
pub mod prompt;

pub use dalle::DalleImageGenerator;
pub use disabled::DisabledImageGenerator;
pub use prompt::build_prompt;
