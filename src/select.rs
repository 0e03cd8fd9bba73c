use crate::store::{Document, DocumentStore};
use crate::AdminError;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// document ids in the cleaned-up scheme are plain integers
    pub static ref NUMERIC_ID: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Which records a migration step targets, as data rather than per-script
/// query code. Resolution always yields an ordered key list.
#[derive(Debug, Clone)]
pub enum Selection {
    /// a fixed, known-up-front key list; resolution drops keys that don't
    /// exist so counts reflect what a delete will actually remove
    Ids(Vec<String>),
    /// inclusive lexicographic range on a string field, served by the store's index
    FieldRange {
        field: String,
        lo: String,
        hi: String,
    },
    /// every document whose string field starts with `prefix`
    Prefix { field: String, prefix: String },
    /// full collection scan with an in-memory predicate; O(collection) reads
    Where(FieldPredicate),
}

#[derive(Debug, Clone)]
pub enum FieldPredicate {
    /// any of the named fields is absent, null, or the empty string
    MissingAnyOf(Vec<String>),
    Equals(String, Value),
    KeyMatches(Regex),
    Not(Box<FieldPredicate>),
}

impl FieldPredicate {
    pub fn matches(&self, key: &str, doc: &Document) -> bool {
        match self {
            FieldPredicate::MissingAnyOf(fields) => fields.iter().any(|f| missing(doc.get(f))),
            FieldPredicate::Equals(field, value) => doc.get(field) == Some(value),
            FieldPredicate::KeyMatches(re) => re.is_match(key),
            FieldPredicate::Not(inner) => !inner.matches(key, doc),
        }
    }
}

fn missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

impl Selection {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn field_range(field: &str, lo: &str, hi: &str) -> Self {
        Selection::FieldRange {
            field: field.to_string(),
            lo: lo.to_string(),
            hi: hi.to_string(),
        }
    }

    pub fn prefix(field: &str, prefix: &str) -> Self {
        Selection::Prefix {
            field: field.to_string(),
            prefix: prefix.to_string(),
        }
    }

    pub async fn resolve<S>(&self, store: &S, collection: &str) -> Result<Vec<String>, AdminError>
    where
        S: DocumentStore + ?Sized,
    {
        match self {
            Selection::Ids(ids) => {
                let mut existing = vec![];
                for id in ids {
                    if store.get(collection, id).await?.is_some() {
                        existing.push(id.clone());
                    }
                }
                Ok(existing)
            }
            Selection::FieldRange { field, lo, hi } => {
                store.query_range(collection, field, lo, hi).await
            }
            Selection::Prefix { field, prefix } => {
                store.query_prefix(collection, field, prefix).await
            }
            Selection::Where(predicate) => Ok(store
                .scan(collection)
                .await?
                .into_iter()
                .filter(|(key, doc)| predicate.matches(key, doc))
                .map(|(key, _)| key)
                .collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore as _, MemoryStore};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    fn player_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(
            "players",
            "1",
            doc(json!({
                "playerId": "1",
                "defaultCategory": "setter",
                "defaultCredits": 16.5,
                "nationality": "India"
            })),
        );
        store.insert(
            "players",
            "legacy_004",
            doc(json!({ "playerId": "legacy_004", "nationality": "" })),
        );
        store.insert(
            "players",
            "player_pvl_020",
            doc(json!({ "playerId": "player_pvl_020", "defaultCategory": "libero" })),
        );
        store
    }

    #[tokio::test]
    async fn test_literal_ids_filtered_to_existing() {
        let store = player_store();
        let sel = Selection::ids(["1", "legacy_004", "never_there"]);
        let keys = sel.resolve(&store, "players").await.unwrap();
        assert_eq!(vec!["1".to_string(), "legacy_004".to_string()], keys);
    }

    #[tokio::test]
    async fn test_range_upper_bound_inclusive() {
        let store = MemoryStore::new();
        for id in ["player_pvl_001", "player_pvl_500", "player_pvl_999"] {
            store.insert("players", id, doc(json!({ "playerId": id })));
        }
        // one unit past the bound must be excluded
        store.insert(
            "players",
            "player_pvl_99a",
            doc(json!({ "playerId": "player_pvl_99a" })),
        );
        let sel = Selection::field_range("playerId", "player_pvl_001", "player_pvl_999");
        let keys = sel.resolve(&store, "players").await.unwrap();
        assert_eq!(
            vec![
                "player_pvl_001".to_string(),
                "player_pvl_500".to_string(),
                "player_pvl_999".to_string()
            ],
            keys
        );
    }

    #[tokio::test]
    async fn test_prefix_catches_what_the_old_zzz_bound_missed() {
        let store = MemoryStore::new();
        for id in ["pvl_match_1", "pvl_match_zzz", "pvl_match_zzza"] {
            store.insert("matches", id, doc(json!({ "matchId": id })));
        }
        store.insert("matches", "pvm_match", doc(json!({ "matchId": "pvm_match" })));
        let sel = Selection::prefix("matchId", "pvl_match");
        let keys = sel.resolve(&store, "matches").await.unwrap();
        assert_eq!(3, keys.len());
        assert!(!keys.contains(&"pvm_match".to_string()));
    }

    #[tokio::test]
    async fn test_missing_field_predicate() {
        let store = player_store();
        let sel = Selection::Where(FieldPredicate::MissingAnyOf(vec![
            "defaultCategory".to_string(),
            "defaultCredits".to_string(),
            "nationality".to_string(),
        ]));
        let keys = sel.resolve(&store, "players").await.unwrap();
        // empty-string nationality counts as missing; the complete doc does not
        assert_eq!(
            vec!["legacy_004".to_string(), "player_pvl_020".to_string()],
            keys
        );
    }

    #[tokio::test]
    async fn test_equals_predicate() {
        let store = MemoryStore::new();
        store.insert("matches", "m1", doc(json!({ "matchId": "test123" })));
        store.insert("matches", "m2", doc(json!({ "matchId": "pvl_match_1" })));
        let sel = Selection::Where(FieldPredicate::Equals(
            "matchId".to_string(),
            json!("test123"),
        ));
        assert_eq!(
            vec!["m1".to_string()],
            sel.resolve(&store, "matches").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_key_regex_and_negation() {
        let store = MemoryStore::new();
        store.insert("players", "42", doc(json!({})));
        store.insert("players", "player_pvl_042", doc(json!({})));
        let old_format = Selection::Where(FieldPredicate::Not(Box::new(
            FieldPredicate::KeyMatches(NUMERIC_ID.clone()),
        )));
        assert_eq!(
            vec!["player_pvl_042".to_string()],
            old_format.resolve(&store, "players").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_double_delete_is_idempotent() {
        let store = player_store();
        let sel = Selection::ids(["1", "legacy_004"]);
        let first = sel.resolve(&store, "players").await.unwrap();
        crate::batch::delete_in_batches(&store, "players", &first)
            .await
            .unwrap();
        assert_eq!(2, first.len());

        let second = sel.resolve(&store, "players").await.unwrap();
        let n = crate::batch::delete_in_batches(&store, "players", &second)
            .await
            .unwrap();
        assert_eq!(0, n);
        assert!(store.get("players", "player_pvl_020").await.unwrap().is_some());
    }
}
