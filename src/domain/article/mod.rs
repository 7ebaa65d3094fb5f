pub mod entity;
pub mod identity;
pub mod kind;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    Article, ArticleExtension, ArticleRecord, ArticleUpdate, DiscussionExtension, MediaSlot,
    NewArticle, PostExtension,
};
pub use identity::{ArticleIdentity, StorageKey};
pub use kind::ArticleKind;
pub use repository::{ArticleReadRepository, ArticleUnitOfWork, ArticleWriteRepository};
pub use value_objects::{ArticleSlug, ArticleTitle, MediaRef};
