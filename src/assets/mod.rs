//! Asset resolution and delivery
//!
//! Builds storage paths for scripts and screenshots and reads or writes
//! them through either the local disk or the remote object store.

mod delivery;
mod error;
mod local;
mod locator;
mod remote;

pub use delivery::Delivery;
pub use error::DeliveryError;
pub use locator::{AssetPath, SCREENSHOTS_FOLDER, SCRIPTS_FOLDER};
