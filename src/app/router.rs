use crate::app::{
    api::{self, activity, auth},
    metrics,
    state::State,
};
use axum::{
    extract::Extension,
    routing::{delete, get, post},
    Router,
};

pub fn router<S: State>(state: S) -> Router {
    Router::new()
        .route("/", get(api::index::<S>))
        .route("/healthz", get(api::healthz))
        .route("/activities", get(activity::list::<S>))
        .route(
            "/activities/:activity_name/signup",
            post(activity::signup::<S>),
        )
        .route(
            "/activities/:activity_name/unregister",
            delete(activity::unregister::<S>),
        )
        .route("/auth/verify", post(auth::verify::<S>))
        .layer(Extension(state))
}

pub fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics::handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::prelude::*;
    use axum::{
        body::Body,
        headers::{Authorization, HeaderMapExt},
        response::Response,
    };
    use http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    const SIGNUP: &str = "/activities/Chess%20Club/signup?email=nina@mergington.edu";
    const UNREGISTER: &str = "/activities/Chess%20Club/unregister?email=nina@mergington.edu";

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request")
    }

    fn as_jones(mut req: Request<Body>) -> Request<Body> {
        req.headers_mut()
            .typed_insert(Authorization::basic("jones", teachers::JONES_PASSWORD));
        req
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.expect("Failed to send request")
    }

    async fn chess_participants(app: &Router) -> usize {
        let resp = send(app, request(Method::GET, "/activities")).await;
        let body = body_json(resp).await;

        body["Chess Club"]["participants"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn healthz_and_index() {
        let app = router(TestState::new());

        let resp = send(&app, request(Method::GET, "/healthz")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, request(Method::GET, "/")).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some("/static/index.html".as_bytes())
        );
    }

    #[tokio::test]
    async fn list_activities() {
        let app = router(TestState::new());

        let resp = send(&app, request(Method::GET, "/activities")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body.as_object().map(|o| o.len()), Some(9));
    }

    #[tokio::test]
    async fn signup_then_unregister() {
        let app = router(TestState::new());

        let resp = send(&app, as_jones(request(Method::POST, SIGNUP))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body["message"],
            "Signed up nina@mergington.edu for Chess Club by teacher mr.jones"
        );
        assert_eq!(chess_participants(&app).await, 3);

        let resp = send(&app, as_jones(request(Method::POST, SIGNUP))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["kind"], "already_registered");

        let resp = send(&app, as_jones(request(Method::DELETE, UNREGISTER))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body["message"],
            "Unregistered nina@mergington.edu from Chess Club by teacher mr.jones"
        );
        assert_eq!(chess_participants(&app).await, 2);

        let resp = send(&app, as_jones(request(Method::DELETE, UNREGISTER))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["kind"], "not_registered");
    }

    #[tokio::test]
    async fn unknown_activity() {
        let app = router(TestState::new());
        let uri = "/activities/Knitting%20Club/signup?email=nina@mergington.edu";

        let resp = send(&app, as_jones(request(Method::POST, uri))).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["detail"], "Activity not found");
    }

    #[tokio::test]
    async fn missing_or_garbage_authorization() {
        let app = router(TestState::new());

        let mut garbage = request(Method::POST, SIGNUP);
        garbage.headers_mut().insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_static("Basic !!!"),
        );

        for req in [request(Method::POST, SIGNUP), garbage] {
            let resp = send(&app, req).await;

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_none());
            assert_eq!(
                resp.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
                Some("application/json".as_bytes())
            );
            assert_eq!(body_json(resp).await["kind"], "invalid_credentials");
        }

        assert_eq!(chess_participants(&app).await, 2);
    }

    #[tokio::test]
    async fn missing_email() {
        let app = router(TestState::new());
        let uri = "/activities/Chess%20Club/signup";

        let resp = send(&app, request(Method::POST, uri)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(&app, as_jones(request(Method::POST, uri))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["kind"], "invalid_query");
    }

    #[tokio::test]
    async fn verify_credentials() {
        let app = router(TestState::new());

        let resp = send(&app, as_jones(request(Method::POST, "/auth/verify"))).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["authenticated"], true);
    }

    #[tokio::test]
    async fn wrong_method() {
        let app = router(TestState::new());

        let resp = send(&app, as_jones(request(Method::GET, SIGNUP))).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = send(&app, as_jones(request(Method::POST, UNREGISTER))).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        assert_eq!(chess_participants(&app).await, 2);
    }
}
