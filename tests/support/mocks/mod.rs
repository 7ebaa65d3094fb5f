// tests/support/mocks/mod.rs
//! テストサポートモック再エクスポートモジュール
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_store;
pub mod media;
pub mod tags;
pub mod time;

// 時刻関連
pub use time::{FixedClock, SteppingClock, fixed_now};

// 記事ストア
pub use article_store::{FailPoint, InMemoryArticleStore};

// タグカタログ
pub use tags::InMemoryTagCatalog;

// メディア
pub use media::{FailingMediaStore, RecordingMediaStore};
