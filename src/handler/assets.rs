//! Asset delivery and upload handlers

use std::error::Error;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{HeaderMap, Response, StatusCode};
use serde_json::json;

use super::body::read_body;
use super::router::RequestContext;
use crate::assets::{AssetPath, DeliveryError, SCRIPTS_FOLDER};
use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::routing::PathParams;

/// Serve an asset, `false` when it cannot be delivered
pub async fn get_file(
    ctx: &RequestContext<'_>,
    params: &PathParams,
    folder: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    deliver(ctx, params, folder, state, false).await
}

/// Serve a script as a download
pub async fn download_script(
    ctx: &RequestContext<'_>,
    params: &PathParams,
    state: &AppState,
) -> Response<Full<Bytes>> {
    deliver(ctx, params, Some(SCRIPTS_FOLDER), state, true).await
}

async fn deliver(
    ctx: &RequestContext<'_>,
    params: &PathParams,
    folder: Option<&str>,
    state: &AppState,
    attachment: bool,
) -> Response<Full<Bytes>> {
    let Some(path) = locate(params, folder) else {
        return http::build_404_response();
    };

    match state.delivery.fetch(&path).await {
        Ok(asset) => http::build_asset_response(
            asset.data,
            &asset.content_type,
            ctx.is_head,
            attachment.then(|| path.leaf()),
        ),
        Err(e) => failed(&e, ctx.is_head),
    }
}

/// Store the request body at `{folder}/{domain}/{cdnPath}`
pub async fn add_file<B>(
    headers: &HeaderMap,
    body: B,
    params: &PathParams,
    folder: &str,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let Some(path) = locate(params, Some(folder)) else {
        return http::build_404_response();
    };

    let data = match read_body(headers, body, state.config.http.max_body_size).await {
        Ok(data) => data,
        Err(resp) => return resp,
    };
    if data.is_empty() {
        return http::build_json_error(StatusCode::BAD_REQUEST, "empty upload");
    }

    let size = data.len();
    match state.delivery.store(&path, data).await {
        Ok(()) => {
            logger::log_info(&format!("Stored {path} ({size} bytes)"));
            http::build_json_response(
                StatusCode::CREATED,
                &json!({ "path": path.as_str(), "size": size }),
            )
        }
        Err(e) => failed(&e, false),
    }
}

fn locate(params: &PathParams, folder: Option<&str>) -> Option<AssetPath> {
    let domain = params.get("domain")?;
    let leaf = params.get("cdnPath")?;
    Some(AssetPath::locate(folder, domain, leaf))
}

fn failed(err: &DeliveryError, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_error(&format!("[{}] {err}", err.kind()));
    http::build_false_response(err.status(), is_head)
}
