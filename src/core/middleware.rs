//! 核心中间件模块

use axum::{
    body::{to_bytes, Body},
    extract::{MatchedPath, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde::de::IgnoredAny;
use std::time::Instant;
use tracing::{info, warn};

use super::{
    error::AppError,
    extract::{has_json_content_type, malformed},
};

/// 请求体上限，与 axum `DefaultBodyLimit` 的默认值一致
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// 请求日志中间件
///
/// 记录匹配到的路由模板，未匹配的请求记为 `-`。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, %uri, route = %route, status, latency_ms, "request failed");
    } else {
        info!(%method, %uri, route = %route, status, latency_ms, "request completed");
    }

    response
}

/// JSON 请求体检查
///
/// 对所有路由生效：`Content-Type` 为 JSON 且请求体不是合法 JSON 时，在进入处理器前返回 400。
/// 检查通过后用缓冲的字节重建请求。
pub async fn json_body_guard(req: Request, next: Next) -> Response {
    if !has_json_content_type(req.headers()) {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) if exceeds_limit(&e) => {
            return AppError::PayloadTooLarge(format!(
                "Request body exceeds the {BODY_LIMIT} byte limit"
            ))
            .into_response();
        }
        Err(e) => {
            return AppError::BadRequest(format!("Failed to read request body: {e}"))
                .into_response();
        }
    };

    if !bytes.is_empty() {
        if let Err(e) = serde_json::from_slice::<IgnoredAny>(&bytes) {
            if e.is_syntax() || e.is_eof() {
                return malformed(&e).into_response();
            }
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
