use super::{prefix_successor, Document, DocumentStore, Mutation, WriteBatch};
use crate::constants::MAX_BATCH;
use crate::AdminError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;

type Collections = BTreeMap<String, BTreeMap<String, Document>>;

/// In-memory stand-in for the remote store. Backs the integration tests and
/// local dry runs; keeps a log of commit sizes so tests can assert on how a
/// run was chunked, and can be told to reject its nth commit.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    commit_sizes: Mutex<Vec<usize>>,
    fail_on_commit: Mutex<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, key: &str, doc: Document) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), doc);
    }

    pub fn contains(&self, collection: &str, key: &str) -> bool {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|c| c.contains_key(key))
            .unwrap_or(false)
    }

    pub fn collection_size(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|c| c.len())
            .unwrap_or(0)
    }

    pub fn keys(&self, collection: &str) -> Vec<String> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// sizes of every commit accepted or rejected so far, in order
    pub fn commit_sizes(&self) -> Vec<usize> {
        self.commit_sizes.lock().unwrap().clone()
    }

    /// makes the nth commit (1-based) fail; everything before it still applies
    pub fn fail_on_commit(&self, nth: usize) {
        *self.fail_on_commit.lock().unwrap() = Some(nth);
    }

    fn string_field<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
        doc.get(field).and_then(Value::as_str)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, AdminError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|c| c.get(key))
            .cloned())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<(String, Document)>, AdminError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|c| c.iter().map(|(k, d)| (k.clone(), d.clone())).collect())
            .unwrap_or_default())
    }

    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        lo: &str,
        hi: &str,
    ) -> Result<Vec<String>, AdminError> {
        let collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| {
                Self::string_field(doc, field).map_or(false, |v| lo <= v && v <= hi)
            })
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn query_prefix(
        &self,
        collection: &str,
        field: &str,
        prefix: &str,
    ) -> Result<Vec<String>, AdminError> {
        // mirror the indexed half-open range the real store runs, then the
        // starts_with check is a no-op safety net
        let upper = prefix_successor(prefix);
        let collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };
        Ok(docs
            .iter()
            .filter(|(_, doc)| {
                Self::string_field(doc, field).map_or(false, |v| {
                    v >= prefix
                        && upper.as_deref().map_or(true, |u| v < u)
                        && v.starts_with(prefix)
                })
            })
            .map(|(k, _)| k.clone())
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), AdminError> {
        if batch.len() > MAX_BATCH {
            return Err(AdminError::BatchTooLarge(batch.len()));
        }
        self.commit_sizes.lock().unwrap().push(batch.len());
        let nth = self.commit_sizes.lock().unwrap().len();
        if let Some(fail_at) = *self.fail_on_commit.lock().unwrap() {
            if nth == fail_at {
                return Err(AdminError::CommitFailed(format!(
                    "injected failure on commit {nth}"
                )));
            }
        }

        let mut collections = self.collections.lock().unwrap();
        // validate updates up front so the batch applies all-or-nothing
        for write in batch.writes() {
            if let Mutation::Update(_) = write.mutation {
                let exists = collections
                    .get(&write.collection)
                    .map(|c| c.contains_key(&write.key))
                    .unwrap_or(false);
                if !exists {
                    return Err(AdminError::MissingDocument {
                        collection: write.collection.clone(),
                        key: write.key.clone(),
                    });
                }
            }
        }
        for write in batch.writes() {
            let docs = collections.entry(write.collection.clone()).or_default();
            match &write.mutation {
                Mutation::Delete => {
                    // deleting an absent key is fine, same as the real store
                    docs.remove(&write.key);
                }
                Mutation::Set(fields) => {
                    docs.insert(write.key.clone(), fields.clone());
                }
                Mutation::Update(fields) => {
                    // validated above; a delete earlier in the same batch can
                    // still have removed the target, which is a caller bug
                    let doc = docs.get_mut(&write.key).ok_or_else(|| {
                        AdminError::MissingDocument {
                            collection: write.collection.clone(),
                            key: write.key.clone(),
                        }
                    })?;
                    for (name, value) in fields {
                        doc.insert(name.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_update_missing_document_is_an_error() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.update("teams", "nope", doc(json!({"logo": "x"})));
        let res = store.commit(batch).await;
        assert!(matches!(res, Err(AdminError::MissingDocument { .. })));
    }

    #[tokio::test]
    async fn test_update_failure_leaves_batch_unapplied() {
        let store = MemoryStore::new();
        store.insert("teams", "t1", doc(json!({"name": "one"})));
        let mut batch = WriteBatch::new();
        batch.update("teams", "t1", doc(json!({"name": "changed"})));
        batch.update("teams", "missing", doc(json!({"name": "x"})));
        assert!(store.commit(batch).await.is_err());
        let t1 = store.get("teams", "t1").await.unwrap().unwrap();
        assert_eq!(Some("one"), t1.get("name").and_then(|v| v.as_str()));
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        for i in 0..(MAX_BATCH + 1) {
            batch.delete("players", &format!("{i}"));
        }
        assert!(matches!(
            store.commit(batch).await,
            Err(AdminError::BatchTooLarge(_))
        ));
    }

    #[tokio::test]
    async fn test_set_then_update_merges_fields() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.set("teams", "t1", doc(json!({"name": "one", "logo": "old"})));
        store.commit(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.update("teams", "t1", doc(json!({"logo": "new"})));
        store.commit(batch).await.unwrap();

        let t1 = store.get("teams", "t1").await.unwrap().unwrap();
        assert_eq!(Some("one"), t1.get("name").and_then(|v| v.as_str()));
        assert_eq!(Some("new"), t1.get("logo").and_then(|v| v.as_str()));
    }
}
