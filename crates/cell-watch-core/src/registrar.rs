//! Webhook registrar.
//!
//! A subscription only needs to be created once, but Smartsheet disables
//! hooks when verification or delivery fails. On every startup the registrar
//! therefore looks for an existing matching subscription to reuse, creates
//! one if none exists, and then unconditionally re-enables it with the
//! current callback URL.

use std::sync::Arc;

use smartsheet_sdk::{
    ApiError, CreateWebhookRequest, SheetId, SmartsheetApi, UpdateWebhookRequest, Webhook,
};
use thiserror::Error;
use tracing::info;

/// The subscription the registrar must converge on.
#[derive(Debug, Clone)]
pub struct HookTarget {
    /// Sheet the subscription is attached to
    pub sheet_id: SheetId,

    /// Display name identifying this application's hook
    pub name: String,

    /// Publicly reachable URL Smartsheet should deliver callbacks to
    pub callback_url: String,
}

impl HookTarget {
    /// True when `webhook` is this application's subscription for this sheet
    /// and URL.
    fn matches(&self, webhook: &Webhook) -> bool {
        webhook.scope_object_id == self.sheet_id.as_u64()
            && webhook.name == self.name
            && webhook.callback_url == self.callback_url
    }
}

/// Errors from the registrar, tagged with the failing phase.
///
/// The caller is expected to log and swallow these: registration is
/// best-effort and the service keeps running without a working subscription.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Listing existing subscriptions failed.
    #[error("Failed to list webhook subscriptions: {0}")]
    List(#[source] ApiError),

    /// Creating a new subscription failed.
    #[error("Failed to create webhook subscription: {0}")]
    Create(#[source] ApiError),

    /// Enabling the subscription failed.
    #[error("Failed to enable webhook subscription: {0}")]
    Enable(#[source] ApiError),
}

/// Ensures exactly one enabled subscription exists for a hook target.
pub struct WebhookRegistrar {
    client: Arc<dyn SmartsheetApi>,
}

impl WebhookRegistrar {
    /// Create a new registrar over the given API client.
    pub fn new(client: Arc<dyn SmartsheetApi>) -> Self {
        Self { client }
    }

    /// Find or create the subscription for `target`, then enable it and point
    /// it at the current callback URL.
    ///
    /// Idempotent: a second run with the same target reuses the existing
    /// subscription instead of creating a duplicate. The unconditional update
    /// covers both freshly created hooks (which start disabled) and existing
    /// hooks the vendor disabled after failed deliveries.
    pub async fn ensure(&self, target: &HookTarget) -> Result<Webhook, RegistrarError> {
        let existing = self
            .client
            .list_webhooks()
            .await
            .map_err(RegistrarError::List)?;
        info!(count = existing.len(), "Found webhook subscriptions owned by user");

        let webhook = match existing.into_iter().find(|hook| target.matches(hook)) {
            Some(hook) => {
                info!(webhook_id = %hook.id, "Reusing matching webhook subscription");
                hook
            }
            None => {
                let request = CreateWebhookRequest::for_sheet(
                    target.sheet_id,
                    target.name.clone(),
                    target.callback_url.clone(),
                );
                let created = self
                    .client
                    .create_webhook(&request)
                    .await
                    .map_err(RegistrarError::Create)?;
                info!(webhook_id = %created.id, "Created new webhook subscription");
                created
            }
        };

        let update = UpdateWebhookRequest {
            enabled: true,
            callback_url: Some(target.callback_url.clone()),
        };
        let updated = self
            .client
            .update_webhook(webhook.id, &update)
            .await
            .map_err(RegistrarError::Enable)?;

        info!(
            webhook_id = %updated.id,
            enabled = updated.enabled,
            status = updated.status.as_deref().unwrap_or("unknown"),
            "Webhook subscription enabled"
        );

        Ok(updated)
    }
}

#[cfg(test)]
#[path = "registrar_tests.rs"]
mod registrar_tests;
