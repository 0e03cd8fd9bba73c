use crate::config::CONFIG;
use crate::AdminError;
use async_trait::async_trait;
use serde_json::Value;

mod firestore;
mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// a document is just its field map; the key lives next to it
pub type Document = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Delete,
    /// replaces the whole document (creates it if absent)
    Set(Document),
    /// merges the named fields into an existing document
    Update(Document),
}

#[derive(Debug, Clone)]
pub struct Write {
    pub collection: String,
    pub key: String,
    pub mutation: Mutation,
}

/// pending writes for one atomic commit
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete(&mut self, collection: &str, key: &str) -> &mut Self {
        self.push(collection, key, Mutation::Delete)
    }

    pub fn set(&mut self, collection: &str, key: &str, fields: Document) -> &mut Self {
        self.push(collection, key, Mutation::Set(fields))
    }

    pub fn update(&mut self, collection: &str, key: &str, fields: Document) -> &mut Self {
        self.push(collection, key, Mutation::Update(fields))
    }

    fn push(&mut self, collection: &str, key: &str, mutation: Mutation) -> &mut Self {
        self.writes.push(Write {
            collection: collection.to_string(),
            key: key.to_string(),
            mutation,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }
}

/// The handle every script runs against. Implementations must apply a
/// committed batch atomically; nothing here retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, AdminError>;

    /// reads the entire collection; fine for the small collections these
    /// scripts touch, not for anything else
    async fn scan(&self, collection: &str) -> Result<Vec<(String, Document)>, AdminError>;

    /// keys of documents whose string `field` falls in `[lo, hi]` (both inclusive)
    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        lo: &str,
        hi: &str,
    ) -> Result<Vec<String>, AdminError>;

    /// keys of documents whose string `field` starts with `prefix`
    async fn query_prefix(
        &self,
        collection: &str,
        field: &str,
        prefix: &str,
    ) -> Result<Vec<String>, AdminError>;

    async fn commit(&self, batch: WriteBatch) -> Result<(), AdminError>;
}

pub fn store_from_env() -> Result<FirestoreStore, AdminError> {
    FirestoreStore::new(
        &CONFIG.project_id,
        &CONFIG.store_host,
        &CONFIG.auth_token,
    )
}

/// Smallest string strictly greater than every string starting with `prefix`,
/// if one exists. Used to turn a prefix match into a half-open range query.
pub(crate) fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(bumped) = char::from_u32(last as u32 + 1) {
            chars.push(bumped);
            return Some(chars.into_iter().collect());
        }
        // last char has no successor; carry into the one before it
    }
    None
}

#[cfg(test)]
mod tests {
    use super::prefix_successor;

    #[test]
    fn test_prefix_successor() {
        assert_eq!(Some("pvl_matci".to_string()), prefix_successor("pvl_match"));
        assert_eq!(Some("b".to_string()), prefix_successor("a"));
        assert_eq!(None, prefix_successor(""));
    }

    #[test]
    fn test_prefix_successor_bounds_the_prefix_family() {
        let succ = prefix_successor("assoc_player_pvl").unwrap();
        assert!("assoc_player_pvl" < succ.as_str());
        assert!("assoc_player_pvl_zzz" < succ.as_str());
        assert!("assoc_player_pvlzzzz" < succ.as_str());
        assert!("assoc_player_pvm" >= succ.as_str());
    }
}
