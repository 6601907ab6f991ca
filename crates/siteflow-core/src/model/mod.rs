//! モデル定義
//!
//! siteflow のプロジェクト設定を表すデータモデル。

mod project;
mod provider;
mod site;

// Re-exports
pub use project::*;
pub use provider::*;
pub use site::*;
