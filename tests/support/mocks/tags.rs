// tests/support/mocks/tags.rs
use async_trait::async_trait;
use folio_core::domain::errors::DomainResult;
use folio_core::domain::tag::{Tag, TagId, TagRepository};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// インメモリのタグカタログ
#[derive(Default)]
pub struct InMemoryTagCatalog {
    tags: Mutex<BTreeMap<TagId, String>>,
}

impl InMemoryTagCatalog {
    pub fn with_ids(ids: &[i64]) -> Self {
        let catalog = Self::default();
        for &id in ids {
            catalog.add(id, format!("tag-{id}"));
        }
        catalog
    }

    pub fn add(&self, id: i64, name: impl Into<String>) {
        self.tags
            .lock()
            .unwrap()
            .insert(TagId::new(id).unwrap(), name.into());
    }
}

#[async_trait]
impl TagRepository for InMemoryTagCatalog {
    async fn find_by_ids(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>> {
        let tags = self.tags.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| {
                tags.get(id).map(|name| Tag {
                    id: *id,
                    name: name.clone(),
                })
            })
            .collect())
    }
}
