use crate::{app_url, test_app};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use sqlx::{Pool, Sqlite};
use tower::Service;

mod location;

async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not utf8")
}

async fn get_page(app: &mut Router, path: &str) -> Response {
    let request = Request::builder()
        .uri(app_url(path))
        .method("GET")
        .body(Body::empty())
        .expect("Failed to build request");
    app.as_service()
        .call(request)
        .await
        .expect("Failed to execute request")
}

async fn post_form(app: &mut Router, path: &str, fields: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(fields).expect("Failed to encode form");
    let request = Request::builder()
        .uri(app_url(path))
        .method("POST")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("Failed to build request");
    app.as_service()
        .call(request)
        .await
        .expect("Failed to execute request")
}

const BOUNDARY: &str = "spotsweb-test-boundary";

/// Build a multipart/form-data body with an optional file part (named
/// `image`) and an optional text part (named `location`), the way a browser
/// would submit the sidebar upload form.
fn multipart_body(file: Option<(&str, &[u8])>, location: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"image\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(loc) = location {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"location\"\r\n\r\n{loc}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_multipart(
    app: &mut Router,
    path: &str,
    file: Option<(&str, &[u8])>,
    location: Option<&str>,
) -> Response {
    let request = Request::builder()
        .uri(app_url(path))
        .method("POST")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(file, location)))
        .expect("Failed to build request");
    app.as_service()
        .call(request)
        .await
        .expect("Failed to execute request")
}
