//! Request handler module
//!
//! Responsible for request routing dispatch and the per-route handlers:
//! asset delivery and uploads, report lookup, and image detection.

mod assets;
mod body;
mod detect_image;
mod report;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
