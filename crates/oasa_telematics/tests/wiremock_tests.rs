//! Integration tests for the telematics client (wiremock-based)

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oasa_telematics::{
    Error, OasaTelematicsClient, TelematicsClient, TelematicsConfig, Transport,
};

fn config_for_mock(base_url: &str) -> TelematicsConfig {
    TelematicsConfig {
        base_url: base_url.to_string(),
        ..TelematicsConfig::for_testing()
    }
}

fn client_for_mock(base_url: &str) -> OasaTelematicsClient {
    OasaTelematicsClient::new(&config_for_mock(base_url)).unwrap()
}

const fn sample_lines_json() -> &'static str {
    r#"[
        { "line_code": "962", "line_id": "608", "line_descr": "ΓΑΛΑΤΣΙ - ΑΚΑΔΗΜΙΑ" },
        { "line_code": "1151", "line_id": "054", "line_descr": "ΣΤ. ΝΟΜΙΣΜΑΤΟΚΟΠΕΙΟ - ΠΑΛΛΗΝΗ" }
    ]"#
}

const fn sample_schedule_json() -> &'static str {
    r#"{
        "come": [
            { "sde_start1": "05:30", "sde_end1": "06:10" },
            { "sde_start1": "06:00", "sde_end1": "06:40" }
        ],
        "go": [
            { "sde_start2": "23:10", "sde_end2": "23:50" }
        ]
    }"#
}

#[tokio::test]
async fn test_lines_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "webGetLines"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_lines_json()))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let table = client.lines().await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.columns(), ["line_code", "line_id", "line_descr"]);
    assert_eq!(table.get(0, "line_code"), Some(&json!("962")));
    assert_eq!(table.get(1, "line_id"), Some(&json!("054")));
}

#[tokio::test]
async fn test_line_name_sends_positional_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getLineName"))
        .and(query_param("p1", "962"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{ "line_descr": "ΓΑΛΑΤΣΙ - ΑΚΑΔΗΜΙΑ" }]"#),
        )
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let table = client.line_name(962).await.unwrap();

    assert_eq!(table.len(), 1);
}

#[tokio::test]
async fn test_daily_schedule_uses_named_param_and_splits_directions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getDailySchedule"))
        .and(query_param("line_code", "962"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_schedule_json()))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let schedule = client.daily_schedule(962).await.unwrap();

    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule["come"].len(), 2);
    assert_eq!(schedule["go"].len(), 1);
    assert_eq!(schedule["come"].get(0, "sde_start1"), Some(&json!("05:30")));
}

#[tokio::test]
async fn test_sched_lines_sends_three_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getSchedLines"))
        .and(query_param("p1", "9"))
        .and(query_param("p2", "54"))
        .and(query_param("p3", "962"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_schedule_json()))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let schedule = client.sched_lines(9, 54, 962).await.unwrap();

    assert!(schedule.contains_key("come"));
    assert!(schedule.contains_key("go"));
}

#[tokio::test]
async fn test_route_details_and_stops_grouped() {
    let server = MockServer::start().await;

    let body = r#"{
        "details": [{ "routed_x": "23.6607", "routed_y": "38.0025", "routed_order": "1" }],
        "stops": [
            { "StopCode": "10001", "StopDescr": "ΠΛΑΤΕΙΑ" },
            { "StopCode": "10002", "StopDescr": "ΣΧΟΛΕΙΟ" }
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "webGetRoutesDetailsAndStops"))
        .and(query_param("p1", "2045"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let result = client.route_details_and_stops(2045).await.unwrap();

    assert_eq!(result["details"].len(), 1);
    assert_eq!(result["stops"].len(), 2);
    assert_eq!(result["stops"].get(1, "StopCode"), Some(&json!("10002")));
}

#[tokio::test]
async fn test_closest_stops_sends_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getClosestStops"))
        .and(query_param("p1", "23.72"))
        .and(query_param("p2", "37.98"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{ "StopCode": "60991", "distance": "0.1" }]"#),
        )
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let table = client.closest_stops(23.72, 37.98).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0, "StopCode"), Some(&json!("60991")));
}

#[tokio::test]
async fn test_unpopulated_action_yields_empty_table() {
    let server = MockServer::start().await;

    // The remote never populates this action; it answers a bare null.
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getLinesAndRoutesForMlandLCode"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let table = client
        .lines_and_routes_for_master_line_and_line(9, 962)
        .await
        .unwrap();

    assert!(table.is_empty());
    assert!(table.columns().is_empty());
}

#[tokio::test]
async fn test_null_body_on_grouped_action_yields_empty_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("act", "getDailySchedule"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let schedule = client.daily_schedule(962).await.unwrap();

    assert!(schedule.is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_api_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{ "error": "boom" }"#),
        )
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.master_lines().await.unwrap_err();

    assert!(matches!(err, Error::ApiStatus { status: 500, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_bad_json_maps_to_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.master_lines().await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_bad_json_wins_over_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.master_lines().await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_connection_error_maps_to_transport() {
    // Nothing listens here; the connection is refused before any response.
    let client = client_for_mock("http://127.0.0.1:1");
    let err = client.master_lines().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_scalar_payload_maps_to_unexpected_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#""invalid""#))
        .mount(&server)
        .await;

    let client = client_for_mock(&server.uri());
    let err = client.master_lines().await.unwrap_err();

    assert!(matches!(err, Error::UnexpectedShape { .. }));
}

#[tokio::test]
async fn test_transport_get_exposes_raw_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "data": "value" }"#))
        .mount(&server)
        .await;

    let transport = Transport::new(&config_for_mock(&server.uri())).unwrap();
    let outcome = transport
        .get(&[("act", "webGetMasterLines".to_string())])
        .await
        .unwrap();

    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.message, "OK");
    assert_eq!(outcome.payload["data"], json!("value"));
}

#[tokio::test]
async fn test_transport_post_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .and(query_param("act", "webGetMasterLines"))
        .and(body_json(json!({ "key": "value" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let transport = Transport::new(&config_for_mock(&server.uri())).unwrap();
    let body: Value = json!({ "key": "value" });
    let outcome = transport
        .post(&[("act", "webGetMasterLines".to_string())], Some(&body))
        .await
        .unwrap();

    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.payload, json!([]));
}

#[tokio::test]
async fn test_client_is_shareable_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_lines_json()))
        .mount(&server)
        .await;

    let client = std::sync::Arc::new(client_for_mock(&server.uri()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = std::sync::Arc::clone(&client);
        handles.push(tokio::spawn(async move { client.lines().await }));
    }

    for handle in handles {
        let table = handle.await.unwrap().unwrap();
        assert_eq!(table.len(), 2);
    }
}
