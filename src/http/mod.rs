//! HTTP protocol layer module
//!
//! Response builders and content type detection shared by the handlers.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_asset_response,
    build_false_response, build_json_error, build_json_response, build_options_response,
};
