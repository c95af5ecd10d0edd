//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! method validation, and dispatching to the asset, report, and detection handlers.

use crate::assets::{SCREENSHOTS_FOLDER, SCRIPTS_FOLDER};
use crate::config::AppState;
use crate::handler::{assets, detect_image, report};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{PathParams, RouteKind, RouteMatch};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, REFERER, SERVER, USER_AGENT,
};
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use serde_json::json;
use std::convert::Infallible;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let ctx = RequestContext {
        method: &parts.method,
        path: parts.uri.path(),
        query: parts.uri.query(),
        is_head: parts.method == Method::HEAD,
    };

    let mut response = route_request(&ctx, &parts.headers, body, &state).await;

    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, name);
    }
    if state.config.http.enable_cors {
        response
            .headers_mut()
            .entry(ACCESS_CONTROL_ALLOW_ORIGIN)
            .or_insert(HeaderValue::from_static("*"));
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            parts.method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = format!("{:?}", parts.version)
            .trim_start_matches("HTTP/")
            .to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_string(&parts.headers, &REFERER);
        entry.user_agent = header_string(&parts.headers, &USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request<B>(
    ctx: &RequestContext<'_>,
    headers: &HeaderMap,
    body: B,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    match state.routes.resolve(ctx.method, ctx.path) {
        RouteMatch::Found { kind, params } => {
            dispatch(ctx, kind, &params, headers, body, state).await
        }
        RouteMatch::MethodNotAllowed { allow } if *ctx.method == Method::OPTIONS => {
            http::build_options_response(state.config.http.enable_cors, &allow)
        }
        RouteMatch::MethodNotAllowed { allow } => {
            logger::log_warning(&format!(
                "Method not allowed: {} {}",
                ctx.method, ctx.path
            ));
            http::build_405_response(&allow)
        }
        RouteMatch::NotFound => http::build_404_response(),
    }
}

async fn dispatch<B>(
    ctx: &RequestContext<'_>,
    kind: RouteKind,
    params: &PathParams,
    headers: &HeaderMap,
    body: B,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    match kind {
        RouteKind::Root => root_response(state),
        RouteKind::GetScript => assets::get_file(ctx, params, Some(SCRIPTS_FOLDER), state).await,
        RouteKind::GetScreenshot => assets::get_file(ctx, params, None, state).await,
        RouteKind::DownloadScript => assets::download_script(ctx, params, state).await,
        RouteKind::AddScript => {
            assets::add_file(headers, body, params, SCRIPTS_FOLDER, state).await
        }
        RouteKind::AddScreenshot => {
            assets::add_file(headers, body, params, SCREENSHOTS_FOLDER, state).await
        }
        RouteKind::DetectImage => detect_image::detect_image(headers, body, state).await,
        RouteKind::GetReport => report::get_report(ctx, state).await,
    }
}

fn root_response(state: &AppState) -> Response<Full<Bytes>> {
    http::build_json_response(
        StatusCode::OK,
        &json!({
            "status": "ok",
            "server": state.config.http.server_name,
            "delivery": state.delivery.mode().to_string(),
        }),
    )
}

fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
