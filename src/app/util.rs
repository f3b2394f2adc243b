use crate::app::api::AppResult;
use crate::app::error::{ErrorExt, ErrorKind};
use anyhow::Context;
use axum::body;
use http::{header, Response, StatusCode};
use serde::Serialize;

pub fn json_response<T: Serialize>(status: StatusCode, value: &T, what: &str) -> AppResult {
    let body = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize {}", what))
        .error(ErrorKind::SerializationFailed)?;

    let resp = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body::boxed(body::Full::from(body)))
        .with_context(|| format!("Failed to build response for {}", what))
        .error(ErrorKind::ResponseBuildFailed)?;

    Ok(resp)
}
