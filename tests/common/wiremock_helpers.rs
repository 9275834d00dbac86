use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock lookup-source server: responds to GET at `url_path` with the
/// given JSON body, requiring the expected bearer credential and the
/// `phone` query parameter.
pub async fn mock_source_server(
    url_path: &str,
    phone: &str,
    credential: &str,
    body: serde_json::Value,
) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(url_path))
        .and(query_param("phone", phone))
        .and(header("authorization", format!("Bearer {}", credential).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    server
}

/// Mock server that returns the specified HTTP error status for any GET.
pub async fn mock_error_server(status_code: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status_code))
        .mount(&server)
        .await;

    server
}

/// Mock server that delays responses to simulate a network timeout.
pub async fn mock_timeout_server(delay_ms: u64) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("delayed response")
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(&server)
        .await;

    server
}

/// Mock geocoding server returning one candidate in the Google-style
/// response shape.
pub async fn mock_geocode_server(lat: f64, lng: f64) -> MockServer {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            { "geometry": { "location": { "lat": lat, "lng": lng } } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    server
}

/// Mock geocoding server reporting an API-level error status.
pub async fn mock_geocode_error_server(status: &str) -> MockServer {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": status, "results": [] });

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    server
}
