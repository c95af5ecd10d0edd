//! Remote object store backend
//!
//! Objects are addressed path-style: `{endpoint}/{bucket}/{key}`.
//! A single attempt is made per request.

use hyper::body::Bytes;
use reqwest::{header, Client, StatusCode};

use super::delivery::Asset;
use super::error::DeliveryError;
use super::locator::AssetPath;
use crate::config::RemoteStoreConfig;
use crate::http::mime;
use crate::logger;

/// HTTP object store client
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: String,
    bucket: String,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(endpoint: &str, bucket: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.trim_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(cfg: &RemoteStoreConfig) -> Result<Self, String> {
        let endpoint = cfg
            .endpoint
            .as_deref()
            .ok_or("remote.endpoint is not configured")?;
        let bucket = cfg
            .bucket
            .as_deref()
            .ok_or("remote.bucket is not configured")?;
        Ok(Self::new(endpoint, bucket, cfg.token.clone()))
    }

    /// Object URL with every key segment percent-encoded
    ///
    /// Keys must stay inside the bucket: empty and dot segments are rejected.
    pub fn object_url(&self, path: &AssetPath) -> Result<String, DeliveryError> {
        let mut segments = Vec::new();
        for segment in path.as_str().split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                logger::log_warning(&format!("Rejected object key: {path}"));
                return Err(DeliveryError::InvalidPath {
                    path: path.to_string(),
                });
            }
            segments.push(urlencoding::encode(segment).into_owned());
        }
        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, segments.join("/")))
    }

    /// Download the object
    pub async fn fetch(&self, path: &AssetPath) -> Result<Asset, DeliveryError> {
        let mut request = self.client.get(self.object_url(path)?);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| unavailable(path, &e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(DeliveryError::NotFound {
                    path: path.to_string(),
                })
            }
            status => return Err(unavailable(path, &format!("object store answered {status}"))),
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or_else(
                || mime::get_content_type(path.extension()).to_string(),
                ToString::to_string,
            );

        let data = response
            .bytes()
            .await
            .map_err(|e| unavailable(path, &e.to_string()))?;

        Ok(Asset { data, content_type })
    }

    /// Upload the object
    pub async fn store(&self, path: &AssetPath, data: Bytes) -> Result<(), DeliveryError> {
        let mut request = self
            .client
            .put(self.object_url(path)?)
            .header(header::CONTENT_TYPE, mime::get_content_type(path.extension()))
            .body(data);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| unavailable(path, &e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(unavailable(
                path,
                &format!("object store answered {}", response.status()),
            ))
        }
    }
}

fn unavailable(path: &AssetPath, reason: &str) -> DeliveryError {
    DeliveryError::Unavailable {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_stub, StubReply};

    #[test]
    fn test_object_url() {
        let store = RemoteStore::new("http://127.0.0.1:9000/", "/cdn/", None);
        let path = AssetPath::locate(None, "example.com", "my shot.png");
        assert_eq!(
            store.object_url(&path).unwrap(),
            "http://127.0.0.1:9000/cdn/screenshots/example.com/my%20shot.png"
        );
    }

    #[test]
    fn test_object_url_rejects_dot_segments() {
        let store = RemoteStore::new("http://127.0.0.1:9000", "cdn", None);
        let path = AssetPath::locate(None, "../other-bucket", "shot.png");
        assert!(matches!(
            store.object_url(&path),
            Err(DeliveryError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_from_config_requires_bucket() {
        let cfg = RemoteStoreConfig {
            endpoint: Some("http://localhost".to_string()),
            bucket: None,
            token: None,
        };
        assert!(RemoteStore::from_config(&cfg).is_err());
    }

    #[tokio::test]
    async fn test_fetch_object() {
        let stub =
            spawn_stub(|_| StubReply::new(200, "text/javascript", b"alert(1)".to_vec())).await;

        let store = RemoteStore::new(&stub.url(), "cdn", Some("secret".to_string()));
        let asset = store
            .fetch(&AssetPath::locate(Some("scripts"), "example.com", "fix.js"))
            .await
            .unwrap();
        assert_eq!(asset.data.as_ref(), b"alert(1)");
        assert_eq!(asset.content_type, "text/javascript");

        let req = stub.only_request();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/cdn/scripts/example.com/fix.js");
        assert_eq!(req.authorization.as_deref(), Some("Bearer secret"));
    }

    #[tokio::test]
    async fn test_fetch_missing_object() {
        let stub = spawn_stub(|_| StubReply::new(404, "text/plain", b"NotFound".to_vec())).await;

        let store = RemoteStore::new(&stub.url(), "cdn", None);
        let err = store
            .fetch(&AssetPath::locate(None, "example.com", "shot1.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_unavailable() {
        let stub = spawn_stub(|_| StubReply::new(503, "text/plain", Vec::new())).await;

        let store = RemoteStore::new(&stub.url(), "cdn", None);
        let err = store
            .fetch(&AssetPath::locate(None, "example.com", "shot1.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let addr = crate::testing::unused_addr().await;
        let store = RemoteStore::new(&format!("http://{addr}"), "cdn", None);
        let err = store
            .fetch(&AssetPath::locate(None, "example.com", "shot1.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_store_object() {
        let stub = spawn_stub(|_| StubReply::new(200, "text/plain", Vec::new())).await;

        let store = RemoteStore::new(&stub.url(), "cdn", None);
        store
            .store(
                &AssetPath::locate(None, "example.com", "shot1.png"),
                Bytes::from_static(b"png-bytes"),
            )
            .await
            .unwrap();

        let req = stub.only_request();
        assert_eq!(req.method, "PUT");
        assert_eq!(req.path, "/cdn/screenshots/example.com/shot1.png");
        assert_eq!(req.content_type.as_deref(), Some("image/png"));
        assert_eq!(req.body, b"png-bytes");
    }
}
