//! Delivery mode selection
//!
//! The backend is picked once from the configuration and shared by every
//! request for the lifetime of the process.

use hyper::body::Bytes;

use super::error::DeliveryError;
use super::local::LocalDisk;
use super::locator::AssetPath;
use super::remote::RemoteStore;
use crate::config::{Config, DeliveryMode};

/// Asset bytes plus the content type to answer with
#[derive(Debug, Clone)]
pub struct Asset {
    pub data: Bytes,
    pub content_type: String,
}

/// The active asset backend
#[derive(Debug, Clone)]
pub enum Delivery {
    Local(LocalDisk),
    Remote(RemoteStore),
}

impl Delivery {
    pub fn from_config(cfg: &Config) -> Result<Self, String> {
        match cfg.delivery.mode {
            DeliveryMode::Local => Ok(Self::Local(LocalDisk::new(&cfg.delivery.root_dir))),
            DeliveryMode::Remote => RemoteStore::from_config(&cfg.remote).map(Self::Remote),
        }
    }

    pub const fn mode(&self) -> DeliveryMode {
        match self {
            Self::Local(_) => DeliveryMode::Local,
            Self::Remote(_) => DeliveryMode::Remote,
        }
    }

    pub async fn fetch(&self, path: &AssetPath) -> Result<Asset, DeliveryError> {
        match self {
            Self::Local(disk) => disk.fetch(path).await,
            Self::Remote(store) => store.fetch(path).await,
        }
    }

    pub async fn store(&self, path: &AssetPath, data: Bytes) -> Result<(), DeliveryError> {
        match self {
            Self::Local(disk) => disk.store(path, data).await,
            Self::Remote(store) => store.store(path, data).await,
        }
    }
}
