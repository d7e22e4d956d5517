//! Callback payload model.
//!
//! Smartsheet delivers three payload shapes to a registered callback URL,
//! discriminated by field presence rather than a type tag: a verification
//! challenge, a batch of change events, or a subscription status change.
//! [`CallbackPayload`] models all three as optional fields and
//! [`CallbackPayload::kind`] classifies a payload by checking those fields in
//! a fixed order.

use serde::{Deserialize, Serialize};
use smartsheet_sdk::{ColumnId, RowId, SheetId};

/// A callback body POSTed by Smartsheet.
///
/// Transient input; never persisted. Unknown fields are ignored so vendor
/// additions do not break parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    /// Verification token; present only on the subscription handshake
    #[serde(default)]
    pub challenge: Option<String>,

    /// Scope of the subscription that fired ("sheet")
    #[serde(default)]
    pub scope: Option<String>,

    /// Identifier of the scoped object (the sheet id for sheet scope)
    #[serde(default)]
    pub scope_object_id: Option<SheetId>,

    /// Change events; present only on event-batch callbacks
    #[serde(default)]
    pub events: Option<Vec<CallbackEvent>>,

    /// New subscription status; present only on status-change callbacks
    #[serde(rename = "newWebHookStatus", default)]
    pub new_webhook_status: Option<String>,

    /// Identifier of the subscription that fired
    #[serde(default)]
    pub webhook_id: Option<u64>,

    /// Vendor-assigned delivery nonce
    #[serde(default)]
    pub nonce: Option<String>,
}

impl CallbackPayload {
    /// Classify the payload by field presence.
    ///
    /// Checks are ordered challenge, events, status — the shapes are mutually
    /// exclusive in practice, but the order is part of the contract.
    pub fn kind(&self) -> CallbackKind<'_> {
        if let Some(challenge) = &self.challenge {
            CallbackKind::Challenge(challenge)
        } else if let Some(events) = &self.events {
            CallbackKind::Events(events)
        } else if let Some(status) = &self.new_webhook_status {
            CallbackKind::StatusChange(status)
        } else {
            CallbackKind::Unknown
        }
    }
}

/// The three recognized callback shapes, plus a permissive catch-all.
#[derive(Debug, Clone, Copy)]
pub enum CallbackKind<'a> {
    /// Verification handshake; the endpoint must echo the challenge token
    Challenge(&'a str),
    /// A batch of change events
    Events(&'a [CallbackEvent]),
    /// The subscription's status changed (e.g. disabled by the vendor)
    StatusChange(&'a str),
    /// None of the known fields present; acknowledged and otherwise ignored
    Unknown,
}

/// A single change event within an event-batch callback.
///
/// Event data is "thin": it identifies what changed but carries no values,
/// so the processor issues a follow-up read for the affected cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackEvent {
    /// Kind of object that changed ("cell", "row", "column", ...)
    pub object_type: String,

    /// What happened to it ("created", "updated", ...)
    #[serde(default)]
    pub event_type: Option<String>,

    /// Affected row, for row- and cell-level events
    #[serde(default)]
    pub row_id: Option<RowId>,

    /// Affected column, for column- and cell-level events
    #[serde(default)]
    pub column_id: Option<ColumnId>,
}

/// Response body for the verification handshake.
///
/// Smartsheet requires the echoed token under exactly this key.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeResponse {
    #[serde(rename = "smartsheetHookResponse")]
    pub smartsheet_hook_response: String,
}

impl ChallengeResponse {
    /// Echo the given challenge token.
    pub fn new(challenge: impl Into<String>) -> Self {
        Self {
            smartsheet_hook_response: challenge.into(),
        }
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod callback_tests;
