use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_ID: &str = "articles_article_id_key";
const CNT_ARTICLE_PKEY: &str = "articles_pkey";
const CNT_ARTICLE_KIND_CHECK: &str = "articles_kind_chk";
const CNT_POST_ARTICLE: &str = "article_posts_article_fkey";
const CNT_DISCUSSION_ARTICLE: &str = "article_discussions_article_fkey";
const CNT_TAG_ARTICLE: &str = "article_tags_article_fkey";
const CNT_TAG_TAG: &str = "article_tags_tag_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_ARTICLE_ID | CNT_ARTICLE_PKEY => {
                        DomainError::Conflict("article id already exists".into())
                    }
                    CNT_ARTICLE_KIND_CHECK => {
                        DomainError::Validation("unsupported article kind".into())
                    }
                    CNT_POST_ARTICLE | CNT_DISCUSSION_ARTICLE | CNT_TAG_ARTICLE => {
                        DomainError::NotFound("article not found".into())
                    }
                    CNT_TAG_TAG => DomainError::NotFound("tag not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("record not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
