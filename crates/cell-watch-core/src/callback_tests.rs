//! Tests for callback payload classification and parsing.

use super::*;

#[test]
fn test_challenge_payload_classified_as_challenge() {
    let payload: CallbackPayload = serde_json::from_value(serde_json::json!({
        "challenge": "abc123",
        "webhookId": 123456789
    }))
    .expect("challenge payload should parse");

    assert!(matches!(payload.kind(), CallbackKind::Challenge("abc123")));
}

#[test]
fn test_event_batch_payload_classified_as_events() {
    let payload: CallbackPayload = serde_json::from_value(serde_json::json!({
        "nonce": "9d5e1db1-2cb4-4bea-a6a2-a4e2e9ac7bba",
        "timestamp": "2023-04-24T22:29:53.120+0000",
        "webhookId": 123456789,
        "scope": "sheet",
        "scopeObjectId": 4583173393803140u64,
        "events": [
            {
                "objectType": "cell",
                "eventType": "updated",
                "rowId": 6572427401553796u64,
                "columnId": 7960873114331012u64
            },
            {
                "objectType": "row",
                "eventType": "created",
                "rowId": 1408490960181124u64
            }
        ]
    }))
    .expect("event payload should parse");

    assert!(matches!(payload.kind(), CallbackKind::Events(_)));
    assert_eq!(payload.scope.as_deref(), Some("sheet"));

    let events = payload.events.as_ref().expect("events should be present");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].object_type, "cell");
    assert_eq!(events[0].row_id, Some(RowId::new(6572427401553796)));
    assert_eq!(events[1].object_type, "row");
    assert_eq!(events[1].column_id, None);
}

#[test]
fn test_status_payload_classified_as_status_change() {
    let payload: CallbackPayload = serde_json::from_value(serde_json::json!({
        "webhookId": 123456789,
        "newWebHookStatus": "DISABLED_SCOPE_INACCESSIBLE"
    }))
    .expect("status payload should parse");

    assert!(matches!(
        payload.kind(),
        CallbackKind::StatusChange("DISABLED_SCOPE_INACCESSIBLE")
    ));
}

#[test]
fn test_unrecognized_payload_classified_as_unknown() {
    let payload: CallbackPayload =
        serde_json::from_value(serde_json::json!({ "somethingElse": true }))
            .expect("unknown payloads should still parse");

    assert!(matches!(payload.kind(), CallbackKind::Unknown));
}

#[test]
fn test_challenge_takes_precedence_over_other_fields() {
    // The shapes are mutually exclusive in practice; the classification
    // order (challenge, events, status) decides if a payload ever carries
    // more than one discriminating field.
    let payload: CallbackPayload = serde_json::from_value(serde_json::json!({
        "challenge": "abc123",
        "events": [],
        "newWebHookStatus": "ENABLED"
    }))
    .expect("payload should parse");

    assert!(matches!(payload.kind(), CallbackKind::Challenge(_)));
}

#[test]
fn test_challenge_response_serializes_to_vendor_key() {
    let response = ChallengeResponse::new("abc123");

    let body = serde_json::to_value(&response).expect("response should serialize");
    assert_eq!(body, serde_json::json!({ "smartsheetHookResponse": "abc123" }));
}
