use super::*;
use crate::test_helpers::MemoryBackend;
use serde_json::json;

// =============================================================================
// parse_collection
// =============================================================================

#[test]
fn collection_returns_data_records_in_order() {
    let records = parse_collection(r#"{"data":[{"id":2,"nombre":"B"},{"id":1,"nombre":"A"}]}"#).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], json!(2));
    assert_eq!(records[1]["nombre"], json!("A"));
}

#[test]
fn collection_preserves_key_order() {
    let records = parse_collection(r#"{"data":[{"nombre":"A","id":1,"email":"a@x"}]}"#).unwrap();
    let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["nombre", "id", "email"]);
}

#[test]
fn missing_or_empty_data_means_no_records() {
    assert!(parse_collection(r#"{"data":[]}"#).unwrap().is_empty());
    assert!(parse_collection("{}").unwrap().is_empty());
    assert!(parse_collection(r#"{"data":null}"#).unwrap().is_empty());
    assert!(parse_collection(r#"{"data":"nope"}"#).unwrap().is_empty());
}

#[test]
fn non_object_items_are_skipped() {
    let records = parse_collection(r#"{"data":[1,{"id":1},"x"]}"#).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn malformed_body_is_an_error() {
    assert!(matches!(parse_collection("<html>"), Err(ApiError::Malformed(_))));
    assert!(matches!(parse_collection("\"text\""), Err(ApiError::Malformed(_))));
}

// =============================================================================
// error_message
// =============================================================================

#[test]
fn error_message_reads_error_field() {
    assert_eq!(error_message(r#"{"error":"Invalid field"}"#), Some("Invalid field".to_owned()));
}

#[test]
fn error_message_ignores_blank_missing_or_non_string() {
    assert_eq!(error_message(r#"{"error":""}"#), None);
    assert_eq!(error_message(r#"{"mensaje":"ok"}"#), None);
    assert_eq!(error_message(r#"{"error":42}"#), None);
    assert_eq!(error_message("Internal Server Error"), None);
}

#[test]
fn api_error_exposes_server_message_only_for_rejections() {
    let rejected = ApiError::Rejected { status: 400, message: Some("bad".to_owned()) };
    assert_eq!(rejected.server_message(), Some("bad"));
    assert_eq!(ApiError::Transport("down".to_owned()).server_message(), None);
}

#[test]
fn response_success_range() {
    assert!(ApiResponse::new(200, "").is_success());
    assert!(ApiResponse::new(204, "").is_success());
    assert!(!ApiResponse::new(302, "").is_success());
    assert!(!ApiResponse::new(404, "").is_success());
}

// =============================================================================
// RecordClient
// =============================================================================

#[tokio::test]
async fn fetch_records_reads_backend_collection() {
    let backend = MemoryBackend::new();
    backend.seed("datos", vec![json!({ "id": 1, "nombre": "Ana" })]);
    let client = RecordClient::new(backend);
    let records = client.fetch_records("/api/datos").await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn fetch_records_surfaces_transport_failure() {
    let backend = MemoryBackend::new();
    backend.set_offline(true);
    let client = RecordClient::new(backend);
    let err = client.fetch_records("/api/datos").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn execute_maps_rejection_body() {
    let backend = MemoryBackend::new();
    backend.seed("datos", vec![json!({ "id": 1, "nombre": "Ana" })]);
    backend.reject_next(400, r#"{"error":"Invalid field"}"#);
    let client = RecordClient::new(backend);
    let err = client.execute(ApiRequest::put("/api/datos/1", json!({ "nombre": "B" }))).await.unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 400, message: Some("Invalid field".to_owned()) });
}
