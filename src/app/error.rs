use crate::{auth::AuthError, roster::RosterError};
use axum::body::{self};
use axum::response::{IntoResponse, Response};
use http::{header, StatusCode};
use serde_derive::Serialize;
use std::error::Error as StdError;
use std::fmt;
use tracing::error;

struct ErrorKindProperties {
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    is_internal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCredentials,
    InvalidQuery,
    ActivityNotFound,
    AlreadyRegistered,
    NotRegistered,
    TeacherStoreFailed,
    RosterUnavailable,
    SerializationFailed,
    ResponseBuildFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let properties: ErrorKindProperties = self.to_owned().into();
        write!(f, "{}", properties.title)
    }
}

impl From<ErrorKind> for ErrorKindProperties {
    fn from(k: ErrorKind) -> Self {
        match k {
            ErrorKind::InvalidCredentials => ErrorKindProperties {
                status: StatusCode::UNAUTHORIZED,
                kind: "invalid_credentials",
                title: "Invalid credentials",
                is_internal: false,
            },
            ErrorKind::InvalidQuery => ErrorKindProperties {
                status: StatusCode::BAD_REQUEST,
                kind: "invalid_query",
                title: "Invalid query",
                is_internal: false,
            },
            ErrorKind::ActivityNotFound => ErrorKindProperties {
                status: StatusCode::NOT_FOUND,
                kind: "activity_not_found",
                title: "Activity not found",
                is_internal: false,
            },
            ErrorKind::AlreadyRegistered => ErrorKindProperties {
                status: StatusCode::BAD_REQUEST,
                kind: "already_registered",
                title: "Student is already signed up",
                is_internal: false,
            },
            ErrorKind::NotRegistered => ErrorKindProperties {
                status: StatusCode::BAD_REQUEST,
                kind: "not_registered",
                title: "Student is not signed up for this activity",
                is_internal: false,
            },
            ErrorKind::TeacherStoreFailed => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "teacher_store_failed",
                title: "Teacher store failed",
                is_internal: true,
            },
            ErrorKind::RosterUnavailable => ErrorKindProperties {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                kind: "roster_unavailable",
                title: "Roster unavailable",
                is_internal: true,
            },
            ErrorKind::SerializationFailed => ErrorKindProperties {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                kind: "serialization_failed",
                title: "Serialization failed",
                is_internal: true,
            },
            ErrorKind::ResponseBuildFailed => ErrorKindProperties {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                kind: "response_build_failed",
                title: "Response build failed",
                is_internal: true,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: String,
    kind: &'a str,
}

pub struct Error {
    kind: ErrorKind,
    source: Box<dyn AsRef<dyn StdError + Send + Sync + 'static> + Send + Sync + 'static>,
}

impl Error {
    pub fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: AsRef<dyn StdError + Send + Sync + 'static> + Send + Sync + 'static,
    {
        Self {
            kind,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn detail(&self) -> String {
        self.source.as_ref().as_ref().to_string()
    }
}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        let kind = match e {
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
        };
        Self::new(kind, anyhow::Error::from(e))
    }
}

impl From<RosterError> for Error {
    fn from(e: RosterError) -> Self {
        let kind = match e {
            RosterError::ActivityNotFound => ErrorKind::ActivityNotFound,
            RosterError::AlreadyRegistered => ErrorKind::AlreadyRegistered,
            RosterError::NotRegistered => ErrorKind::NotRegistered,
            RosterError::Unavailable => ErrorKind::RosterUnavailable,
        };
        Self::new(kind, anyhow::Error::from(e))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let properties: ErrorKindProperties = self.kind().into();

        if properties.is_internal {
            error!(kind = properties.kind, error = %self.detail(), "Request failed");
        }

        let body = ErrorBody {
            detail: self.detail(),
            kind: properties.kind,
        };
        let body = serde_json::to_string(&body).unwrap_or_default();

        // No WWW-Authenticate on 401 so browsers don't pop a credential prompt.
        let mut resp = Response::new(body::boxed(body::Full::from(body)));
        *resp.status_mut() = properties.status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        resp
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source.as_ref().as_ref())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.source.as_ref().as_ref())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref().as_ref())
    }
}

pub trait ErrorExt<T> {
    fn error(self, kind: ErrorKind) -> Result<T, Error>;
}

impl<T, E: AsRef<dyn StdError + Send + Sync + 'static> + Send + Sync + 'static> ErrorExt<T>
    for Result<T, E>
{
    fn error(self, kind: ErrorKind) -> Result<T, Error> {
        self.map_err(|source| Error::new(kind, source))
    }
}
