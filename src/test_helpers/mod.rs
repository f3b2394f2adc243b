use axum::body::HttpBody;
use axum::response::Response;

pub mod state;
pub mod teachers;

pub mod prelude {
    pub use super::{body_json, state::TestState, teachers};
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let mut body = resp.into_body();
    let body = body.data().await.unwrap().expect("Failed to get body");

    serde_json::from_slice(&body).expect("Failed to parse body")
}
