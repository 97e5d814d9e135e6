//! Security headers middleware.
//!
//! The storefront shows catalog images from whatever host the listing
//! endpoint points at, so `img-src` allows any `https:` origin. The only
//! script is HTMX from its CDN.

use axum::{
    extract::Request,
    http::{
        HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content Security Policy applied to every response.
pub const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'none'; \
     script-src 'self' https://unpkg.com; \
     style-src 'self'; \
     img-src 'self' https:; \
     connect-src 'self'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'";

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Content-Security-Policy` (see [`CONTENT_SECURITY_POLICY_VALUE`])
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CONTENT_SECURITY_POLICY_VALUE),
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_headers_are_added() {
        let app = Router::new()
            .route("/", get(|| async { "hi" }))
            .layer(axum::middleware::from_fn(security_headers_middleware));

        let response = app
            .oneshot(HttpRequest::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        let headers = response.headers();
        assert_eq!(headers[X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[REFERRER_POLICY], "no-referrer");
        assert!(
            headers[CONTENT_SECURITY_POLICY]
                .to_str()
                .expect("ascii")
                .contains("img-src 'self' https:")
        );
    }
}
