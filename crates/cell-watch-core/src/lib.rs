//! # Cell-Watch Core
//!
//! Domain logic for the cell_watch webhook callback service.
//!
//! This crate contains the parts of the system that are independent of the
//! HTTP surface:
//! - the callback payload model and its shape-based classification,
//! - the webhook registrar that finds-or-creates the sheet subscription,
//! - the event processor that re-reads changed cells.
//!
//! All vendor access goes through the `SmartsheetApi` trait from
//! `smartsheet-sdk`, injected as a trait object so tests can substitute
//! recording doubles.

pub mod callback;
pub mod processor;
pub mod registrar;

pub use callback::{CallbackEvent, CallbackKind, CallbackPayload, ChallengeResponse};
pub use processor::{EventProcessor, ProcessingSummary};
pub use registrar::{HookTarget, RegistrarError, WebhookRegistrar};
