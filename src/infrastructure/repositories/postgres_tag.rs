// src/infrastructure/repositories/postgres_tag.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::tag::{Tag, TagId, TagRepository};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Debug, FromRow)]
struct TagRow {
    tag_id: i64,
    name: String,
}

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT tag_id, name FROM tags WHERE tag_id = ANY($1) ORDER BY tag_id",
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok(Tag {
                    id: TagId::new(row.tag_id)?,
                    name: row.name,
                })
            })
            .collect()
    }
}
