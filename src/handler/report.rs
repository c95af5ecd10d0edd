//! Report lookup handler

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;
use url::form_urlencoded;

use super::router::RequestContext;
use crate::config::AppState;
use crate::http;
use crate::reports;

/// `GET /report?url=..&timestamp=..`
pub async fn get_report(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(url) = query_param(ctx.query, "url").filter(|u| !u.is_empty()) else {
        return http::build_json_error(StatusCode::BAD_REQUEST, "missing url parameter");
    };

    let timestamp = match query_param(ctx.query, "timestamp").filter(|t| !t.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(ts) => Some(ts),
            Err(_) => {
                return http::build_json_error(StatusCode::BAD_REQUEST, "invalid timestamp");
            }
        },
    };

    match reports::get_report(&state.reports, &url, timestamp).await {
        Some(doc) => http::build_json_response(StatusCode::OK, &doc),
        None => http::build_json_response(StatusCode::NOT_FOUND, &Value::Null),
    }
}

/// First value of `name` in a form-encoded query string
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
