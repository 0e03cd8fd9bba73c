use super::{prefix_successor, Document, DocumentStore, Mutation, WriteBatch};
use crate::constants::MAX_BATCH;
use crate::AdminError;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};

/// Thin client over the Firestore v1 REST surface: document get/list,
/// `:runQuery` for indexed selections, `:commit` for atomic batches.
/// Auth is a bearer token supplied at construction; minting one from the
/// service-account key is the operator's problem, not this client's.
pub struct FirestoreStore {
    http: reqwest::Client,
    base: String,
    auth_token: String,
}

impl FirestoreStore {
    pub fn new(project_id: &str, host: &str, auth_token: &str) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base: format!(
                "{}/v1/projects/{}/databases/(default)/documents",
                host.trim_end_matches('/'),
                project_id
            ),
            auth_token: auth_token.to_string(),
        })
    }

    /// fully-qualified resource name the API wants in writes and filters
    fn doc_name(&self, collection: &str, key: &str) -> String {
        let path_start = self.base.find("/projects/").unwrap_or(0);
        format!("{}/{}/{}", &self.base[path_start + 1..], collection, key)
    }

    async fn check(&self, resp: reqwest::Response) -> Result<reqwest::Response, AdminError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(AdminError::StoreStatus { status, body })
    }

    async fn run_query(&self, structured_query: Value) -> Result<Vec<Value>, AdminError> {
        let url = format!("{}:runQuery", self.base);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&json!({ "structuredQuery": structured_query }))
            .send()
            .await?;
        let resp = self.check(resp).await?;
        let rows: Vec<Value> = resp.json().await?;
        Ok(rows)
    }

    fn field_filter(field: &str, op: &str, value: &str) -> Value {
        json!({
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": op,
                "value": { "stringValue": value }
            }
        })
    }

    fn keys_from_query_rows(rows: Vec<Value>) -> Result<Vec<String>, AdminError> {
        let mut keys = vec![];
        for row in rows {
            // rows without a document are query progress markers
            let Some(doc) = row.get("document") else {
                continue;
            };
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| AdminError::MalformedResponse("document missing name".into()))?;
            keys.push(key_from_name(name)?);
        }
        Ok(keys)
    }

    fn query_on_field(collection: &str, filters: Vec<Value>) -> Value {
        json!({
            "from": [{ "collectionId": collection }],
            "where": {
                "compositeFilter": { "op": "AND", "filters": filters }
            }
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, AdminError> {
        let url = format!("{}/{}/{}", self.base, collection, key);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = self.check(resp).await?;
        let body: Value = resp.json().await?;
        Ok(Some(decode_fields(body.get("fields"))?))
    }

    async fn scan(&self, collection: &str) -> Result<Vec<(String, Document)>, AdminError> {
        let mut out = vec![];
        let mut page_token: Option<String> = None;
        loop {
            let url = format!("{}/{}", self.base, collection);
            let mut req = self
                .http
                .get(&url)
                .bearer_auth(&self.auth_token)
                .query(&[("pageSize", "300")]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let resp = self.check(req.send().await?).await?;
            let body: Value = resp.json().await?;
            if let Some(docs) = body.get("documents").and_then(Value::as_array) {
                for doc in docs {
                    let name = doc.get("name").and_then(Value::as_str).ok_or_else(|| {
                        AdminError::MalformedResponse("document missing name".into())
                    })?;
                    out.push((key_from_name(name)?, decode_fields(doc.get("fields"))?));
                }
            }
            page_token = body
                .get("nextPageToken")
                .and_then(Value::as_str)
                .map(String::from);
            if page_token.is_none() {
                break;
            }
        }
        debug!("scan of {collection} read {} documents", out.len());
        Ok(out)
    }

    async fn query_range(
        &self,
        collection: &str,
        field: &str,
        lo: &str,
        hi: &str,
    ) -> Result<Vec<String>, AdminError> {
        let query = Self::query_on_field(
            collection,
            vec![
                Self::field_filter(field, "GREATER_THAN_OR_EQUAL", lo),
                Self::field_filter(field, "LESS_THAN_OR_EQUAL", hi),
            ],
        );
        Self::keys_from_query_rows(self.run_query(query).await?)
    }

    async fn query_prefix(
        &self,
        collection: &str,
        field: &str,
        prefix: &str,
    ) -> Result<Vec<String>, AdminError> {
        let mut filters = vec![Self::field_filter(field, "GREATER_THAN_OR_EQUAL", prefix)];
        if let Some(upper) = prefix_successor(prefix) {
            filters.push(Self::field_filter(field, "LESS_THAN", &upper));
        }
        let rows = self.run_query(Self::query_on_field(collection, filters)).await?;
        // belt over the range bounds: only keep genuine prefix matches
        let mut keys = vec![];
        for row in rows {
            let Some(doc) = row.get("document") else {
                continue;
            };
            let name = doc
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| AdminError::MalformedResponse("document missing name".into()))?;
            let fields = decode_fields(doc.get("fields"))?;
            let matches = fields
                .get(field)
                .and_then(Value::as_str)
                .map_or(false, |v| v.starts_with(prefix));
            if matches {
                keys.push(key_from_name(name)?);
            }
        }
        Ok(keys)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), AdminError> {
        if batch.len() > MAX_BATCH {
            return Err(AdminError::BatchTooLarge(batch.len()));
        }
        if batch.is_empty() {
            return Ok(());
        }
        let writes: Vec<Value> = batch
            .writes()
            .iter()
            .map(|w| {
                let name = self.doc_name(&w.collection, &w.key);
                match &w.mutation {
                    Mutation::Delete => json!({ "delete": name }),
                    Mutation::Set(fields) => json!({
                        "update": { "name": name, "fields": encode_fields(fields) }
                    }),
                    Mutation::Update(fields) => json!({
                        "update": { "name": name, "fields": encode_fields(fields) },
                        "updateMask": {
                            "fieldPaths": fields.keys().collect::<Vec<_>>()
                        },
                        "currentDocument": { "exists": true }
                    }),
                }
            })
            .collect();
        let url = format!("{}:commit", self.base);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&json!({ "writes": writes }))
            .send()
            .await?;
        self.check(resp).await?;
        debug!("committed batch of {} writes", batch.len());
        Ok(())
    }
}

fn key_from_name(name: &str) -> Result<String, AdminError> {
    name.rsplit('/')
        .next()
        .map(String::from)
        .ok_or_else(|| AdminError::MalformedResponse(format!("unparseable document name {name}")))
}

/// plain JSON -> Firestore typed value
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

fn encode_fields(fields: &Document) -> Value {
    let mut out = Map::new();
    for (name, value) in fields {
        out.insert(name.clone(), encode_value(value));
    }
    Value::Object(out)
}

/// Firestore typed value -> plain JSON
fn decode_value(value: &Value) -> Result<Value, AdminError> {
    let obj = value
        .as_object()
        .ok_or_else(|| AdminError::MalformedResponse("typed value is not an object".into()))?;
    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| AdminError::MalformedResponse("empty typed value".into()))?;
    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.clone(),
        "integerValue" => {
            let n: i64 = inner
                .as_str()
                .and_then(|s| s.parse().ok())
                .or_else(|| inner.as_i64())
                .ok_or_else(|| {
                    AdminError::MalformedResponse(format!("bad integerValue {inner}"))
                })?;
            json!(n)
        }
        "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            Value::Array(items.iter().map(decode_value).collect::<Result<_, _>>()?)
        }
        "mapValue" => Value::Object(decode_fields(inner.get("fields"))?),
        other => {
            return Err(AdminError::MalformedResponse(format!(
                "unsupported value kind {other}"
            )))
        }
    })
}

fn decode_fields(fields: Option<&Value>) -> Result<Document, AdminError> {
    let mut out = Document::new();
    let Some(fields) = fields.and_then(Value::as_object) else {
        return Ok(out);
    };
    for (name, value) in fields {
        out.insert(name.clone(), decode_value(value)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_codec_round_trip() {
        let doc: Document = json!({
            "playerId": "42",
            "defaultCredits": 16.5,
            "jerseyNumber": 7,
            "isActive": true,
            "team": { "name": "Chennai Blitz", "code": "CB" },
            "tags": ["a", "b"],
            "gone": null
        })
        .as_object()
        .unwrap()
        .clone();
        let decoded = decode_fields(Some(&encode_fields(&doc))).unwrap();
        assert_eq!(doc, decoded);
    }

    #[test]
    fn test_doc_name_includes_collection_and_key() {
        let store = FirestoreStore::new("fantasy-volleyball-21364", "http://localhost:8080", "owner")
            .unwrap();
        assert_eq!(
            "projects/fantasy-volleyball-21364/databases/(default)/documents/teams/team_pvl_69",
            store.doc_name("teams", "team_pvl_69")
        );
    }
}
