// Document store module
// File-backed collections of JSON documents

use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Document store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("collection {name} is not a JSON array of documents: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid collection name: {0}")]
    InvalidName(String),
}

/// Directory holding one `<collection>.json` file per collection
#[derive(Debug, Clone)]
pub struct DocumentStore {
    data_dir: PathBuf,
}

impl DocumentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Open a collection; a missing file is an empty collection
    pub async fn connect(&self, name: &str) -> Result<Collection, StoreError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        let path = self.data_dir.join(format!("{name}.json"));
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Collection {
                    documents: Vec::new(),
                })
            }
            Err(source) => {
                return Err(StoreError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        let documents: Vec<Value> =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
                name: name.to_string(),
                source,
            })?;

        Ok(Collection { documents })
    }
}

/// Snapshot of one collection in insertion order
#[derive(Debug, Clone)]
pub struct Collection {
    documents: Vec<Value>,
}

impl Collection {
    /// First document whose fields equal every field of `filter`
    pub fn find_one(&self, filter: &Map<String, Value>) -> Option<&Value> {
        self.documents.iter().find(|doc| {
            doc.as_object().is_some_and(|fields| {
                filter
                    .iter()
                    .all(|(key, expected)| fields.get(key) == Some(expected))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(value: &Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let collection = store.connect("Reports").await.unwrap();
        assert!(collection.find_one(&Map::new()).is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        assert!(matches!(
            store.connect("../etc/passwd").await,
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(store.connect("").await, Err(StoreError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_non_array_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Reports.json"), br#"{"url": "a"}"#)
            .await
            .unwrap();
        let store = DocumentStore::new(dir.path());

        assert!(matches!(
            store.connect("Reports").await,
            Err(StoreError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_one_matches_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let docs = json!([
            "not an object",
            {"url": "a.com", "timestamp": 1},
            {"url": "a.com", "timestamp": 2, "extra": true},
        ]);
        fs::write(dir.path().join("Reports.json"), docs.to_string())
            .await
            .unwrap();
        let collection = DocumentStore::new(dir.path())
            .connect("Reports")
            .await
            .unwrap();

        let found = collection
            .find_one(&filter(&json!({"url": "a.com", "timestamp": 2})))
            .unwrap();
        assert_eq!(found["extra"], true);

        let first = collection.find_one(&filter(&json!({"url": "a.com"}))).unwrap();
        assert_eq!(first["timestamp"], 1);

        assert!(collection
            .find_one(&filter(&json!({"url": "a.com", "timestamp": "2"})))
            .is_none());
    }
}
