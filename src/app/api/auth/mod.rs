use crate::app::{
    api::{authenticate, AppResult, Credentials},
    state::State,
    util::json_response,
};
use crate::auth::TeacherId;
use axum::{
    extract::Extension,
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use http::StatusCode;
use serde_derive::Serialize;

#[derive(Serialize, Debug)]
pub struct VerifyResponse {
    pub authenticated: bool,
    pub username: TeacherId,
}

pub async fn verify<S: State>(
    Extension(state): Extension<S>,
    authorization: Option<TypedHeader<Authorization<Basic>>>,
) -> AppResult {
    let credentials = authorization.map(|TypedHeader(header)| Credentials::from(header));
    do_verify(state, credentials).await
}

async fn do_verify<S: State>(state: S, credentials: Option<Credentials>) -> AppResult {
    let teacher = authenticate(&state, credentials.as_ref()).await?;

    let resp = VerifyResponse {
        authenticated: true,
        username: teacher,
    };

    json_response(StatusCode::OK, &resp, "verification")
}
