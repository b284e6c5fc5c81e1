//! JSON 请求体提取器
//!
//! 只有 `Content-Type` 为 JSON 且请求体非空时才解析请求体，否则按空对象 `{}` 处理，
//! 缺失的必填字段随后由反序列化报告为 400。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::error::AppError;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;

        let body: &[u8] = if json && !bytes.is_empty() { &bytes[..] } else { b"{}" };

        serde_json::from_slice(body)
            .map(JsonBody)
            .map_err(|e| match e.classify() {
                Category::Syntax | Category::Eof => malformed(&e),
                Category::Data | Category::Io => {
                    AppError::BadRequest(format!("Invalid request body: {e}"))
                }
            })
    }
}

pub(crate) fn malformed(err: &serde_json::Error) -> AppError {
    AppError::BadRequest(format!("Malformed JSON body: {err}"))
}

pub(crate) fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
