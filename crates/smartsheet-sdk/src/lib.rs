//! # Smartsheet SDK
//!
//! Typed client for the subset of the Smartsheet REST API that cell_watch
//! consumes: reading sheets and managing webhook subscriptions.
//!
//! The client authenticates every request with a bearer access token and
//! exposes its operations behind the [`SmartsheetApi`] trait so callers can
//! inject test doubles.
//!
//! ## Usage
//!
//! ```no_run
//! use smartsheet_sdk::{ClientConfig, GetSheetOptions, SheetId, SmartsheetApi, SmartsheetClient};
//!
//! # async fn example() -> Result<(), smartsheet_sdk::ApiError> {
//! let client = SmartsheetClient::new("access-token", ClientConfig::default())?;
//! let sheet = client
//!     .get_sheet(SheetId::new(4583173393803140), &GetSheetOptions::default().with_page_size(1))
//!     .await?;
//! println!("Found sheet: {}", sheet.name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{ClientConfig, SmartsheetApi, SmartsheetClient};
pub use error::ApiError;
pub use models::{
    ApiResult, Cell, Column, ColumnId, CreateWebhookRequest, GetSheetOptions, IndexResponse, Row,
    RowId, Sheet, SheetId, UpdateWebhookRequest, Webhook, WebhookId,
};
