//! Routing module
//!
//! Provides the path pattern matcher and the server's static route table.

mod matcher;
mod table;

pub use matcher::PathParams;
pub use table::{RouteKind, RouteMatch, RouteTable};
