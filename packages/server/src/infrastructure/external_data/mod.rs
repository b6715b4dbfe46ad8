//! ExternalDataSource の実装
//!
//! - `http`: 公開 API からニュース見出し・豆知識を取得する
//! - `cache`: 取得結果をプロセス全体で 5 分間共有し、失敗時は既定の文言に置き換える

pub mod cache;
pub mod http;

pub use cache::{CachedExternalDataSource, ContentKind};
pub use http::HttpExternalDataSource;
