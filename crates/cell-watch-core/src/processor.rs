//! Event processor.
//!
//! Change events are "thin": they name the affected row and column but carry
//! no values, so the processor issues a follow-up read for exactly that cell
//! and logs the updated value. This sample implementation only logs; a real
//! integration would forward the data elsewhere.
//!
//! Beware of infinite loops if a downstream integration writes back to the
//! same sheet.

use std::sync::Arc;

use smartsheet_sdk::{ApiError, ColumnId, GetSheetOptions, RowId, SheetId, SmartsheetApi};
use thiserror::Error;
use tracing::{info, warn};

use crate::callback::{CallbackEvent, CallbackPayload};

/// Outcome of processing one event batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Cell events whose follow-up read succeeded
    pub cells_processed: usize,

    /// Events of ignored kinds (anything but "cell")
    pub events_skipped: usize,

    /// Cell events that failed to resolve
    pub failures: usize,
}

/// Why a single cell event could not be resolved.
#[derive(Debug, Error)]
enum CellEventError {
    /// The event did not carry both a row id and a column id.
    #[error("Cell event is missing row or column id")]
    MissingIds,

    /// The scoped read returned no row or no cell.
    #[error("Scoped read of row {row_id}, column {column_id} returned no cell")]
    EmptyReadback { row_id: RowId, column_id: ColumnId },

    /// The returned sheet metadata did not include the cell's column.
    #[error("Column {column_id} missing from returned sheet metadata")]
    MissingColumn { column_id: ColumnId },

    /// The follow-up read failed.
    #[error("Follow-up read failed: {0}")]
    Api(#[from] ApiError),
}

/// Processes event-batch callbacks by re-reading changed cells.
pub struct EventProcessor {
    client: Arc<dyn SmartsheetApi>,
}

impl EventProcessor {
    /// Create a new processor over the given API client.
    pub fn new(client: Arc<dyn SmartsheetApi>) -> Self {
        Self { client }
    }

    /// Process each event in the payload independently and in delivery order.
    ///
    /// Payloads whose scope is not "sheet" are a no-op. Only "cell" events
    /// trigger a follow-up read; other object types are counted as skipped.
    /// A failing event is logged and counted but does not abort the rest of
    /// the batch.
    pub async fn process(&self, payload: &CallbackPayload) -> ProcessingSummary {
        let mut summary = ProcessingSummary::default();

        if payload.scope.as_deref() != Some("sheet") {
            return summary;
        }

        let Some(sheet_id) = payload.scope_object_id else {
            warn!("Event callback with sheet scope but no scopeObjectId; dropping batch");
            return summary;
        };

        let events = payload.events.as_deref().unwrap_or_default();
        info!(count = events.len(), sheet_id = %sheet_id, "Processing event callback");

        for event in events {
            if event.object_type != "cell" {
                summary.events_skipped += 1;
                continue;
            }

            match self.process_cell_event(sheet_id, event).await {
                Ok(()) => summary.cells_processed += 1,
                Err(error) => {
                    warn!(
                        row_id = event.row_id.map(|id| id.as_u64()),
                        column_id = event.column_id.map(|id| id.as_u64()),
                        error = %error,
                        "Failed to process cell event; continuing with batch"
                    );
                    summary.failures += 1;
                }
            }
        }

        summary
    }

    /// Re-read a single changed cell and log its new value.
    async fn process_cell_event(
        &self,
        sheet_id: SheetId,
        event: &CallbackEvent,
    ) -> Result<(), CellEventError> {
        let (Some(row_id), Some(column_id)) = (event.row_id, event.column_id) else {
            return Err(CellEventError::MissingIds);
        };

        info!(row_id = %row_id, column_id = %column_id, "Cell changed");

        // Just read the one affected row and column.
        let options = GetSheetOptions::default()
            .with_row_id(row_id)
            .with_column_id(column_id);
        let sheet = self.client.get_sheet(sheet_id, &options).await?;

        let row = sheet
            .rows
            .first()
            .ok_or(CellEventError::EmptyReadback { row_id, column_id })?;
        let cell = row
            .cells
            .first()
            .ok_or(CellEventError::EmptyReadback { row_id, column_id })?;
        let column = sheet
            .columns
            .iter()
            .find(|column| column.id == cell.column_id)
            .ok_or(CellEventError::MissingColumn {
                column_id: cell.column_id,
            })?;

        info!(
            display_value = cell.display_value.as_deref().unwrap_or(""),
            column_title = %column.title,
            row_number = row.row_number,
            "New cell value"
        );

        Ok(())
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod processor_tests;
