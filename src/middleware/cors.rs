use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};

/// Methods the ranking API accepts from other origins
const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Middleware layer function for appending CORS headers to API requests
/// and responding to preflight OPTIONS requests
///
/// `req`  The request to handle
/// `next` The next layer to use
pub async fn cors_layer(req: Request, next: Next) -> Response {
    let mut res: Response = if req.method() == Method::OPTIONS {
        let mut res = Response::default();
        *res.status_mut() = StatusCode::NO_CONTENT;
        let headers = res.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        // Submissions are sent as JSON
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
        res
    } else {
        next.run(req).await
    };

    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    res
}

#[cfg(test)]
mod test {
    use super::cors_layer;
    use axum::{
        body::Body,
        http::{
            header::{
                ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
                ACCESS_CONTROL_ALLOW_ORIGIN,
            },
            Method, Request, StatusCode,
        },
        middleware::from_fn,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/ranking", get(|| async { "[]" }))
            .layer(from_fn(cors_layer))
    }

    #[tokio::test]
    async fn test_preflight() {
        let req = Request::builder()
            .uri("/api/ranking")
            .method(Method::OPTIONS)
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let headers = res.headers();
        assert_eq!(
            headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "content-type");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }

    #[tokio::test]
    async fn test_get() {
        let req = Request::builder()
            .uri("/api/ranking")
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();
        let res = app().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }
}
