//! Tests for event batch processing.

use super::*;
use async_trait::async_trait;
use smartsheet_sdk::{CreateWebhookRequest, Sheet, UpdateWebhookRequest, Webhook, WebhookId};
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Recording Smartsheet client
// ============================================================================

/// Test double that records every `get_sheet` call and serves queued
/// responses in order.
struct RecordingClient {
    responses: Mutex<VecDeque<Result<Sheet, ApiError>>>,
    calls: Mutex<Vec<(SheetId, GetSheetOptions)>>,
}

impl RecordingClient {
    fn new(responses: Vec<Result<Sheet, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(SheetId, GetSheetOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmartsheetApi for RecordingClient {
    async fn get_sheet(
        &self,
        sheet_id: SheetId,
        options: &GetSheetOptions,
    ) -> Result<Sheet, ApiError> {
        self.calls.lock().unwrap().push((sheet_id, options.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::NotFound))
    }

    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_webhook(&self, _request: &CreateWebhookRequest) -> Result<Webhook, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn update_webhook(
        &self,
        _webhook_id: WebhookId,
        _request: &UpdateWebhookRequest,
    ) -> Result<Webhook, ApiError> {
        Err(ApiError::NotFound)
    }
}

// ============================================================================
// Test helpers
// ============================================================================

fn cell_event(row_id: u64, column_id: u64) -> serde_json::Value {
    serde_json::json!({
        "objectType": "cell",
        "eventType": "updated",
        "rowId": row_id,
        "columnId": column_id
    })
}

fn events_payload(scope: &str, events: Vec<serde_json::Value>) -> CallbackPayload {
    serde_json::from_value(serde_json::json!({
        "scope": scope,
        "scopeObjectId": 42,
        "events": events
    }))
    .expect("payload should parse")
}

fn one_cell_sheet(row_id: u64, column_id: u64, display_value: &str) -> Sheet {
    serde_json::from_value(serde_json::json!({
        "id": 42,
        "name": "Project Tracker",
        "columns": [{ "id": column_id, "title": "Status" }],
        "rows": [{
            "id": row_id,
            "rowNumber": 4,
            "cells": [{ "columnId": column_id, "displayValue": display_value }]
        }]
    }))
    .expect("sheet should parse")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_non_sheet_scope_performs_no_reads() {
    // Arrange
    let client = Arc::new(RecordingClient::new(Vec::new()));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload("workspace", vec![cell_event(111, 222)]);

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    assert!(client.calls().is_empty(), "non-sheet scopes must be a no-op");
    assert_eq!(summary, ProcessingSummary::default());
}

#[tokio::test]
async fn test_cell_event_triggers_one_scoped_read() {
    // Arrange
    let client = Arc::new(RecordingClient::new(vec![Ok(one_cell_sheet(
        111, 222, "Complete",
    ))]));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload("sheet", vec![cell_event(111, 222)]);

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    let calls = client.calls();
    assert_eq!(calls.len(), 1, "exactly one follow-up read per cell event");

    let (sheet_id, options) = &calls[0];
    assert_eq!(*sheet_id, SheetId::new(42));
    assert_eq!(options.row_ids, vec![RowId::new(111)]);
    assert_eq!(options.column_ids, vec![ColumnId::new(222)]);
    assert_eq!(options.page_size, None);

    assert_eq!(summary.cells_processed, 1);
    assert_eq!(summary.failures, 0);
}

#[tokio::test]
async fn test_non_cell_events_are_skipped_without_reads() {
    // Arrange
    let client = Arc::new(RecordingClient::new(Vec::new()));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload(
        "sheet",
        vec![
            serde_json::json!({ "objectType": "row", "eventType": "created", "rowId": 111 }),
            serde_json::json!({ "objectType": "column", "eventType": "updated", "columnId": 222 }),
        ],
    );

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    assert!(client.calls().is_empty());
    assert_eq!(summary.events_skipped, 2);
    assert_eq!(summary.cells_processed, 0);
}

#[tokio::test]
async fn test_events_are_processed_in_delivery_order() {
    // Arrange
    let client = Arc::new(RecordingClient::new(vec![
        Ok(one_cell_sheet(111, 222, "First")),
        Ok(one_cell_sheet(333, 444, "Second")),
    ]));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload("sheet", vec![cell_event(111, 222), cell_event(333, 444)]);

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1.row_ids, vec![RowId::new(111)]);
    assert_eq!(calls[1].1.row_ids, vec![RowId::new(333)]);
    assert_eq!(summary.cells_processed, 2);
}

#[tokio::test]
async fn test_failing_event_does_not_abort_batch() {
    // Arrange
    let client = Arc::new(RecordingClient::new(vec![
        Err(ApiError::HttpError {
            status: 500,
            message: "boom".to_string(),
        }),
        Ok(one_cell_sheet(333, 444, "Survivor")),
    ]));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload("sheet", vec![cell_event(111, 222), cell_event(333, 444)]);

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    assert_eq!(client.calls().len(), 2, "second event must still be read");
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.cells_processed, 1);
}

#[tokio::test]
async fn test_cell_event_without_ids_counts_as_failure() {
    // Arrange
    let client = Arc::new(RecordingClient::new(Vec::new()));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload(
        "sheet",
        vec![serde_json::json!({ "objectType": "cell", "eventType": "updated" })],
    );

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    assert!(client.calls().is_empty(), "thin event without ids cannot be read");
    assert_eq!(summary.failures, 1);
}

#[tokio::test]
async fn test_empty_readback_counts_as_failure() {
    // Arrange
    let empty_sheet: Sheet = serde_json::from_value(serde_json::json!({
        "id": 42,
        "name": "Project Tracker",
        "columns": [],
        "rows": []
    }))
    .expect("sheet should parse");

    let client = Arc::new(RecordingClient::new(vec![Ok(empty_sheet)]));
    let processor = EventProcessor::new(client.clone());
    let payload = events_payload("sheet", vec![cell_event(111, 222)]);

    // Act
    let summary = processor.process(&payload).await;

    // Assert
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.cells_processed, 0);
}
