use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server_uri: &str, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let client = AirtableClient::with_base_url("pat-test", "appTEST", 30, "baze-test", server_uri)
        .expect("client");
    build_app(
        AppState {
            airtable: Arc::new(client),
            settings: Arc::new(ReviewSettings::default()),
        },
        auth,
        rate_limit,
    )
}

fn open_app(server_uri: &str) -> Router {
    app_for(
        server_uri,
        AuthState::from_keys(&[], true).expect("auth"),
        default_rate_limit_state(),
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json parse")
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("unauthorized", StatusCode::UNAUTHORIZED),
        ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("anything_else", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        assert_eq!(ApiError::new("req", code, "msg").into_response().status(), status);
    }
}

#[test]
fn missing_record_id_is_a_validation_error() {
    let err = map_airtable_error(
        "req".to_string(),
        &AirtableError::MissingRecordId {
            table: "lavoratori_selezionati".to_string(),
        },
    );
    assert_eq!(err.error.code, "validation_error");
}

#[test]
fn upstream_error_message_carries_status() {
    let with_status = map_airtable_error(
        "req".to_string(),
        &AirtableError::ExternalApi {
            status: 422,
            body: "INVALID_FILTER_BY_FORMULA".to_string(),
        },
    );
    assert_eq!(with_status.error.code, "upstream_error");
    assert_eq!(
        with_status.error.message,
        "airtable request failed with status 422"
    );
    assert!(!with_status.error.message.contains("INVALID_FILTER"));

    let without_status = map_airtable_error(
        "req".to_string(),
        &AirtableError::PaginationLimit {
            table: "lavoratori_selezionati".to_string(),
            max_pages: 100,
        },
    );
    assert_eq!(without_status.error.message, "airtable request failed");
}

#[tokio::test]
async fn health_echoes_request_id() {
    let server = MockServer::start().await;
    let response = open_app(&server.uri())
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "req-42");
}

#[tokio::test]
async fn protected_routes_require_a_known_bearer_token() {
    let server = MockServer::start().await;
    let app = app_for(
        &server.uri(),
        AuthState::from_keys(&["secret".to_string()], false).expect("auth"),
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/processes")
                .header("authorization", "Bearer wrong")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn rate_limit_applies_to_protected_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/appTEST/operatori"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/appTEST/processo_res"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .mount(&server)
        .await;

    let app = app_for(
        &server.uri(),
        AuthState::from_keys(&[], true).expect("auth"),
        RateLimitState::new(1, Duration::from_secs(60)),
    );

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/processes")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/processes")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn decision_patches_target_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v0/appTEST/lavoratori_selezionati/recX"))
        .and(header_eq("authorization", "Bearer pat-test"))
        .and(body_json(json!({ "fields": { "stato_selezione": "Da colloquiare" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "recX",
            "fields": { "stato_selezione": "Da colloquiare" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = open_app(&server.uri())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/candidates/recX/decision")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"verdict":"pass","flags":["interview_transcript"]}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["record_id"], "recX");
    assert_eq!(json["data"]["verdict"], "pass");
    assert_eq!(json["data"]["status"], "Da colloquiare");
}

#[tokio::test]
async fn decision_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v0/appTEST/lavoratori_selezionati/recX"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let response = open_app(&server.uri())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/candidates/recX/decision")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"verdict":"no_pass"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "upstream_error");
    assert_eq!(
        json["error"]["message"],
        "airtable request failed with status 503"
    );
}

#[tokio::test]
async fn unknown_recruiter_returns_empty_candidate_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/appTEST/operatori"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{ "id": "recOpA", "fields": { "nome": "Anna" } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/appTEST/processo_res"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{
                "id": "recP1",
                "fields": {
                    "stato_res": "fare ricerca",
                    "recruiter_ricerca_e_selezione": ["recOpA"],
                    "record_id_processo": "P1"
                }
            }]
        })))
        .mount(&server)
        .await;

    let response = open_app(&server.uri())
        .oneshot(
            Request::builder()
                .uri("/api/v1/candidates?recruiter=Nobody&processo_res=all")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["lavoratori"], json!([]));
    assert_eq!(json["data"]["recruiters"][0]["name"], "Anna");
    assert_eq!(json["data"]["processoInfo"]["recP1"]["display_id"], "P1");
}

#[tokio::test]
async fn sync_reports_per_candidate_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/appTEST/Candidates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "recNew", "fields": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let response = open_app(&server.uri())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/sync")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"candidates":[{"id":"c1","name":"Anna","email":"a@example.com","role":"Colf","status":"pending"}]}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["message"], "Synced 1 of 1 candidates");
    assert_eq!(json["data"]["results"][0]["success"], true);
}
