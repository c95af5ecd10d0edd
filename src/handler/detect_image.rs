//! Image detection handler

use std::error::Error;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::body::read_body;
use crate::config::AppState;
use crate::http;
use crate::logger;

#[derive(Deserialize)]
struct DetectPayload {
    img: Value,
}

/// `POST /detect-image` with `{"img": ...}`, forwarded as-is
pub async fn detect_image<B>(headers: &HeaderMap, body: B, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let Some(detector) = state.detector.as_ref() else {
        logger::log_warning("Image detection requested but detect.service_url is not set");
        return http::build_json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "image detection is not configured",
        );
    };

    let raw = match read_body(headers, body, state.config.http.max_body_size).await {
        Ok(raw) => raw,
        Err(resp) => return resp,
    };
    let payload: DetectPayload = match serde_json::from_slice::<DetectPayload>(&raw) {
        Ok(p) if !p.img.is_null() => p,
        Ok(_) => {
            logger::log_warning("detect-image body has a null img");
            return http::build_json_error(StatusCode::BAD_REQUEST, "img is required");
        }
        Err(e) => {
            logger::log_warning(&format!("Malformed detect-image body: {e}"));
            return http::build_json_error(StatusCode::BAD_REQUEST, "expected {\"img\": ...}");
        }
    };

    match detector.detect(&payload.img).await {
        Ok(data) => http::build_json_response(StatusCode::OK, &data),
        Err(e) => {
            logger::log_error(&format!("Image detection failed: {e}"));
            http::build_json_error(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}
