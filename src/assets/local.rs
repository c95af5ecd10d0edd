//! Local disk backend
//!
//! Resolves asset paths against the configured root directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use hyper::body::Bytes;
use tokio::fs;

use super::delivery::Asset;
use super::error::DeliveryError;
use super::locator::AssetPath;
use crate::http::mime;
use crate::logger;

/// Files under a root directory
#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read the asset from disk
    pub async fn fetch(&self, path: &AssetPath) -> Result<Asset, DeliveryError> {
        let file_path = self.resolve(path)?;

        // Missing files are the common case, no need to log here
        let canonical = fs::canonicalize(&file_path)
            .await
            .map_err(|e| io_error(path, &e))?;
        self.ensure_contained(path, &canonical).await?;

        let metadata = fs::metadata(&canonical)
            .await
            .map_err(|e| io_error(path, &e))?;
        if !metadata.is_file() {
            return Err(DeliveryError::NotFound {
                path: path.to_string(),
            });
        }

        let data = fs::read(&canonical).await.map_err(|e| io_error(path, &e))?;

        Ok(Asset {
            data: Bytes::from(data),
            content_type: mime::get_content_type(path.extension()).to_string(),
        })
    }

    /// Write the asset to disk, creating parent directories
    pub async fn store(&self, path: &AssetPath, data: Bytes) -> Result<(), DeliveryError> {
        let file_path = self.resolve(path)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, &e))?;
            let parent = fs::canonicalize(parent)
                .await
                .map_err(|e| io_error(path, &e))?;
            self.ensure_contained(path, &parent).await?;
        }

        // An existing leaf symlink would be followed by the write
        if let Ok(meta) = fs::symlink_metadata(&file_path).await {
            if meta.file_type().is_symlink() {
                logger::log_warning(&format!("Refusing to write through symlink: {path}"));
                return Err(DeliveryError::InvalidPath {
                    path: path.to_string(),
                });
            }
        }

        fs::write(&file_path, &data)
            .await
            .map_err(|e| io_error(path, &e))
    }

    /// Join the asset path onto the root, rejecting anything but plain segments
    fn resolve(&self, path: &AssetPath) -> Result<PathBuf, DeliveryError> {
        let relative = Path::new(path.as_str());
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !plain {
            logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
            return Err(DeliveryError::InvalidPath {
                path: path.to_string(),
            });
        }

        Ok(self.root.join(relative))
    }

    /// Symlinks may still point outside the root
    async fn ensure_contained(
        &self,
        path: &AssetPath,
        canonical: &Path,
    ) -> Result<(), DeliveryError> {
        let root = fs::canonicalize(&self.root).await.map_err(|e| {
            logger::log_warning(&format!(
                "Asset root not found or inaccessible '{}': {e}",
                self.root.display()
            ));
            DeliveryError::Unavailable {
                path: path.to_string(),
                reason: format!("asset root unavailable: {e}"),
            }
        })?;

        if canonical.starts_with(&root) {
            Ok(())
        } else {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {path} -> {}",
                canonical.display()
            ));
            Err(DeliveryError::InvalidPath {
                path: path.to_string(),
            })
        }
    }
}

fn io_error(path: &AssetPath, err: &io::Error) -> DeliveryError {
    if err.kind() == io::ErrorKind::NotFound {
        DeliveryError::NotFound {
            path: path.to_string(),
        }
    } else {
        DeliveryError::Unavailable {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }
}
