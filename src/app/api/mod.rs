use crate::app::{
    error::{ErrorExt, ErrorKind},
    metrics::METRICS,
    state::State,
};
use crate::auth::{self as teacher_auth, AuthError, TeacherId};
use axum::{
    extract::Extension,
    headers::{authorization::Basic, Authorization},
    response::{Redirect, Response},
};
use tracing::warn;

pub mod activity;
pub mod auth;

pub type AppError = crate::app::error::Error;
pub type AppResult = Result<Response, AppError>;

/// Username and password taken from an HTTP Basic `Authorization` header.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }
}

impl From<Authorization<Basic>> for Credentials {
    fn from(header: Authorization<Basic>) -> Self {
        Self::new(header.username(), header.password())
    }
}

/// Resolves the calling teacher. A missing header counts as bad credentials.
pub async fn authenticate<S: State>(
    state: &S,
    credentials: Option<&Credentials>,
) -> Result<TeacherId, AppError> {
    let Some(credentials) = credentials else {
        METRICS.auth_attempt(false).inc();
        return Err(AuthError::InvalidCredentials.into());
    };

    let table = state
        .teacher_store()
        .teachers()
        .await
        .map_err(|e| {
            METRICS.auth_attempt(false).inc();
            e
        })
        .error(ErrorKind::TeacherStoreFailed)?;

    match teacher_auth::authenticate(&credentials.username, &credentials.password, &table) {
        Ok(teacher) => {
            METRICS.auth_attempt(true).inc();
            Ok(teacher)
        }
        Err(e) => {
            METRICS.auth_attempt(false).inc();
            warn!(username = %credentials.username, "Teacher authentication failed");
            Err(e.into())
        }
    }
}

pub async fn index<S: State>(Extension(state): Extension<S>) -> Redirect {
    Redirect::temporary(&state.config().redirect_url)
}

pub async fn healthz() -> &'static str {
    "Ok"
}
