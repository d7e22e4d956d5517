//! Wire types for the Smartsheet REST API.
//!
//! Field names follow Smartsheet's camelCase JSON convention via serde
//! renames. Only the fields cell_watch consumes are modelled; unknown fields
//! in responses are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifier Types
// ============================================================================

/// Numeric identifier for a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(u64);

impl SheetId {
    /// Create new sheet ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier for a webhook subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookId(u64);

impl WebhookId {
    /// Create new webhook ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier for a row within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Create new row ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier for a column within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(u64);

impl ColumnId {
    /// Create new column ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Sheet Types
// ============================================================================

/// A sheet, possibly filtered down to a subset of rows and columns.
///
/// When fetched with [`GetSheetOptions`] row/column filters, `rows` and
/// `columns` contain only the requested subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Sheet identifier
    pub id: SheetId,

    /// Sheet display name
    pub name: String,

    /// Permanent URL to the sheet in the Smartsheet UI
    #[serde(default)]
    pub permalink: Option<String>,

    /// Total number of rows in the sheet (not the returned subset)
    #[serde(default)]
    pub total_row_count: Option<u64>,

    /// Column metadata for the returned columns
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Returned rows
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Column metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column identifier
    pub id: ColumnId,

    /// Column title
    pub title: String,

    /// Zero-based column position
    #[serde(default)]
    pub index: Option<u32>,

    /// Column type (e.g. "TEXT_NUMBER")
    #[serde(rename = "type", default)]
    pub column_type: Option<String>,
}

/// A row with its returned cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Row identifier
    pub id: RowId,

    /// One-based row position in the sheet
    pub row_number: u64,

    /// Returned cells
    #[serde(default)]
    pub cells: Vec<Cell>,
}

/// A single cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Column this cell belongs to
    pub column_id: ColumnId,

    /// Raw cell value
    #[serde(default)]
    pub value: Option<serde_json::Value>,

    /// Formatted value as shown in the Smartsheet UI
    #[serde(default)]
    pub display_value: Option<String>,
}

/// Query options for a get-sheet request.
///
/// All fields are optional; unset fields are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct GetSheetOptions {
    /// Limit the number of returned rows
    pub page_size: Option<u64>,

    /// Restrict the response to these rows
    pub row_ids: Vec<RowId>,

    /// Restrict the response to these columns
    pub column_ids: Vec<ColumnId>,
}

impl GetSheetOptions {
    /// Limit the response to the first `page_size` rows.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Restrict the response to a single row.
    pub fn with_row_id(mut self, row_id: RowId) -> Self {
        self.row_ids.push(row_id);
        self
    }

    /// Restrict the response to a single column.
    pub fn with_column_id(mut self, column_id: ColumnId) -> Self {
        self.column_ids.push(column_id);
        self
    }

    /// Render the options as query parameters.
    ///
    /// Row and column id lists are comma-joined, matching the Smartsheet
    /// `rowIds`/`columnIds` format.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }

        if !self.row_ids.is_empty() {
            let joined = self
                .row_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("rowIds".to_string(), joined));
        }

        if !self.column_ids.is_empty() {
            let joined = self
                .column_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("columnIds".to_string(), joined));
        }

        pairs
    }
}

// ============================================================================
// Webhook Types
// ============================================================================

/// A webhook subscription owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook identifier
    pub id: WebhookId,

    /// Display name chosen at creation
    pub name: String,

    /// Scope the subscription is attached to (always "sheet" here)
    pub scope: String,

    /// Identifier of the scoped object (the sheet id for sheet scope)
    pub scope_object_id: u64,

    /// URL Smartsheet delivers callbacks to
    pub callback_url: String,

    /// Whether the subscription is currently enabled
    #[serde(default)]
    pub enabled: bool,

    /// Vendor-reported status (e.g. "ENABLED", "DISABLED_VERIFICATION_FAILED")
    #[serde(default)]
    pub status: Option<String>,

    /// Subscribed event filter
    #[serde(default)]
    pub events: Vec<String>,

    /// Webhook API version
    #[serde(default)]
    pub version: Option<u32>,
}

/// Request body for creating a webhook subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhookRequest {
    /// Display name for the subscription
    pub name: String,

    /// URL Smartsheet should deliver callbacks to
    pub callback_url: String,

    /// Scope type ("sheet")
    pub scope: String,

    /// Identifier of the scoped object
    pub scope_object_id: u64,

    /// Event filter; `["*.*"]` subscribes to all event types
    pub events: Vec<String>,

    /// Webhook API version
    pub version: u32,
}

impl CreateWebhookRequest {
    /// Build a sheet-scoped subscription with the wildcard event filter.
    pub fn for_sheet(
        sheet_id: SheetId,
        name: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            callback_url: callback_url.into(),
            scope: "sheet".to_string(),
            scope_object_id: sheet_id.as_u64(),
            events: vec!["*.*".to_string()],
            version: 1,
        }
    }
}

/// Request body for updating a webhook subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookRequest {
    /// Desired enabled state
    pub enabled: bool,

    /// New callback URL, when it should be refreshed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

// ============================================================================
// Response Envelopes
// ============================================================================

/// Smartsheet's paged list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse<T> {
    /// One-based page number
    #[serde(default)]
    pub page_number: Option<u64>,

    /// Requested page size
    #[serde(default)]
    pub page_size: Option<u64>,

    /// Total number of pages
    #[serde(default)]
    pub total_pages: Option<u64>,

    /// Total number of items across all pages
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Items on this page
    pub data: Vec<T>,
}

/// Smartsheet's mutation envelope wrapping the affected object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    /// Vendor result code (0 on success)
    #[serde(default)]
    pub result_code: Option<i32>,

    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<String>,

    /// The created or updated object
    pub result: T,
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod models_tests;
