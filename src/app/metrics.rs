use crate::app::api::AppResult;
use crate::app::error::{ErrorExt, ErrorKind};
use crate::roster::Operation;
use anyhow::Context;
use axum::body;
use http::{header, Response};
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder, TEXT_FORMAT,
};

pub static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

pub struct Metrics {
    auth_attempts: IntCounterVec,
    roster_mutations: IntCounterVec,
}

impl Metrics {
    fn new() -> Self {
        Self {
            auth_attempts: register_int_counter_vec!(
                "auth_attempts",
                "Teacher authentication attempts",
                &["status"]
            )
            .expect("failed to register auth_attempts"),
            roster_mutations: register_int_counter_vec!(
                "roster_mutations",
                "Roster signup and unregister requests",
                &["operation", "status"]
            )
            .expect("failed to register roster_mutations"),
        }
    }

    pub fn auth_attempt(&self, success: bool) -> IntCounter {
        self.auth_attempts.with_label_values(&[status_label(success)])
    }

    pub fn roster_mutation(&self, operation: Operation, success: bool) -> IntCounter {
        self.roster_mutations
            .with_label_values(&[operation.as_str(), status_label(success)])
    }
}

fn status_label(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

pub async fn handler() -> AppResult {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .context("Failed to encode metrics")
        .error(ErrorKind::SerializationFailed)?;

    let resp = Response::builder()
        .header(header::CONTENT_TYPE, TEXT_FORMAT)
        .body(body::boxed(body::Full::from(buffer)))
        .context("Failed to build response for metrics")
        .error(ErrorKind::ResponseBuildFailed)?;

    Ok(resp)
}
