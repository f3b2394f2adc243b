use crate::app::{
    api::{authenticate, AppError, AppResult, Credentials},
    error::{ErrorExt, ErrorKind},
    metrics::METRICS,
    state::State,
    util::json_response,
};
use crate::roster::{Confirmation, Operation, RosterError};
use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use http::StatusCode;
use serde_derive::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl From<Confirmation> for MessageResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            message: confirmation.to_string(),
        }
    }
}

/// Query problems are reported only after authentication succeeds.
fn email(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<String, AppError> {
    query
        .map(|Query(query)| query.email)
        .context("Invalid query")
        .error(ErrorKind::InvalidQuery)
}

pub async fn list<S: State>(Extension(state): Extension<S>) -> AppResult {
    do_list(state)
}

fn do_list<S: State>(state: S) -> AppResult {
    let roster = state.roster().snapshot()?;
    json_response(StatusCode::OK, &roster, "activities")
}

pub async fn signup<S: State>(
    Extension(state): Extension<S>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    authorization: Option<TypedHeader<Authorization<Basic>>>,
) -> AppResult {
    let credentials = authorization.map(|TypedHeader(header)| Credentials::from(header));
    do_signup(state, activity_name, email(query), credentials).await
}

async fn do_signup<S: State>(
    state: S,
    activity_name: String,
    email: Result<String, AppError>,
    credentials: Option<Credentials>,
) -> AppResult {
    let teacher = authenticate(&state, credentials.as_ref()).await?;
    let email = email?;

    let result = state.roster().signup(&activity_name, &email, &teacher);
    mutation_done(Operation::Signup, &result);
    let confirmation = result?;

    info!(
        activity = %confirmation.activity,
        email = %confirmation.email,
        teacher = %confirmation.teacher,
        "Signed up participant"
    );

    json_response(
        StatusCode::OK,
        &MessageResponse::from(confirmation),
        "signup confirmation",
    )
}

pub async fn unregister<S: State>(
    Extension(state): Extension<S>,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    authorization: Option<TypedHeader<Authorization<Basic>>>,
) -> AppResult {
    let credentials = authorization.map(|TypedHeader(header)| Credentials::from(header));
    do_unregister(state, activity_name, email(query), credentials).await
}

async fn do_unregister<S: State>(
    state: S,
    activity_name: String,
    email: Result<String, AppError>,
    credentials: Option<Credentials>,
) -> AppResult {
    let teacher = authenticate(&state, credentials.as_ref()).await?;
    let email = email?;

    let result = state.roster().unregister(&activity_name, &email, &teacher);
    mutation_done(Operation::Unregister, &result);
    let confirmation = result?;

    info!(
        activity = %confirmation.activity,
        email = %confirmation.email,
        teacher = %confirmation.teacher,
        "Unregistered participant"
    );

    json_response(
        StatusCode::OK,
        &MessageResponse::from(confirmation),
        "unregister confirmation",
    )
}

fn mutation_done(operation: Operation, result: &Result<Confirmation, RosterError>) {
    METRICS
        .roster_mutation(operation, result.is_ok())
        .inc();
}
