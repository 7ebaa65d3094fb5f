pub mod actor;
pub mod articles;
pub mod pagination;
pub mod serde_time;

pub use actor::AuthenticatedActor;
pub use articles::{ArticleDetailDto, ArticleExtensionDto, ArticleInput, ArticleSummaryDto};
pub use pagination::Page;
