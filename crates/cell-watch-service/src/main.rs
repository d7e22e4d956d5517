//! # Cell-Watch Service
//!
//! Binary entry point for the cell_watch HTTP service.
//!
//! This executable:
//! - Loads configuration from environment and files
//! - Initializes logging
//! - Probes the watched sheet (fatal if unreachable)
//! - Kicks off best-effort webhook registration in the background
//! - Starts the HTTP server from cell-watch-api

use std::sync::Arc;

use cell_watch_api::{start_server, AppState, ServiceConfig, ServiceError};
use cell_watch_core::{EventProcessor, HookTarget, WebhookRegistrar};
use smartsheet_sdk::{
    ClientConfig, GetSheetOptions, SheetId, SmartsheetApi, SmartsheetClient,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order — later sources override earlier ones):
    //  1. /etc/cell-watch/service.yaml     — system-wide defaults
    //  2. ./config/service.yaml            — deployment-local override
    //  3. Path given by CW_CONFIG_FILE env — operator-specified file
    //  4. Environment variables prefixed CW__ (double-underscore separator)
    //     e.g. CW__SERVER__PORT=8080 sets server.port = 8080
    //
    // All fields carry serde defaults, so absent files produce a valid config
    // that validate() then checks for the required Smartsheet settings. A
    // malformed file IS a hard error because it indicates
    // deliberate-but-broken operator configuration.
    // -------------------------------------------------------------------------
    let mut config_builder = config::Config::builder()
        .add_source(
            config::File::with_name("/etc/cell-watch/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("CW_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let config = match config_builder
        .add_source(config::Environment::with_prefix("CW").separator("__"))
        .build()
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to build configuration; aborting: {}", e);
            std::process::exit(3);
        }
    };

    let mut service_config: ServiceConfig = match config.try_deserialize() {
        Ok(sc) => sc,
        Err(e) => {
            eprintln!(
                "Could not deserialize service configuration; aborting. \
                 Fix the configuration and restart: {}",
                e
            );
            std::process::exit(3);
        }
    };

    // The access token may come from the conventional Smartsheet environment
    // variable instead of the config file.
    if service_config.smartsheet.access_token.is_empty() {
        if let Ok(token) = std::env::var("SMARTSHEET_ACCESS_TOKEN") {
            service_config.smartsheet.access_token = token;
        }
    }

    // -------------------------------------------------------------------------
    // Initialize logging
    // -------------------------------------------------------------------------
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "cell_watch_service={level},cell_watch_api={level},cell_watch_core={level},\
             smartsheet_sdk={level},tower_http=debug",
            level = service_config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if service_config.logging.json_format {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("Starting Cell-Watch Service");

    if let Err(e) = service_config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    // -------------------------------------------------------------------------
    // Build the Smartsheet client
    // -------------------------------------------------------------------------
    let client_config =
        ClientConfig::default().with_api_url(service_config.smartsheet.api_url.clone());
    let client = match SmartsheetClient::new(
        service_config.smartsheet.access_token.clone(),
        client_config,
    ) {
        Ok(client) => Arc::new(client) as Arc<dyn SmartsheetApi>,
        Err(e) => {
            error!(error = %e, "Failed to construct Smartsheet client; aborting");
            std::process::exit(3);
        }
    };

    // -------------------------------------------------------------------------
    // Probe the watched sheet
    //
    // Sanity check that the token and sheet id actually work before we
    // register anything. Only the first row is requested to keep the payload
    // small. Failure here is fatal: serving callbacks for a sheet we cannot
    // read is pointless.
    // -------------------------------------------------------------------------
    let sheet_id = SheetId::new(service_config.smartsheet.sheet_id);
    info!(sheet_id = %sheet_id, "Checking for sheet");

    match client
        .get_sheet(sheet_id, &GetSheetOptions::default().with_page_size(1))
        .await
    {
        Ok(sheet) => {
            info!(
                name = %sheet.name,
                permalink = sheet.permalink.as_deref().unwrap_or("unknown"),
                "Found sheet"
            );
        }
        Err(e) => {
            error!(error = %e, sheet_id = %sheet_id, "Cannot access target sheet; aborting");
            std::process::exit(4);
        }
    }

    // -------------------------------------------------------------------------
    // Kick off webhook registration
    //
    // Runs in the background because Smartsheet verifies the callback URL
    // during registration — the server must already be accepting requests.
    // Registration is best-effort: on failure the service keeps serving
    // without a working subscription.
    // -------------------------------------------------------------------------
    let hook_target = HookTarget {
        sheet_id,
        name: service_config.smartsheet.webhook_name.clone(),
        callback_url: service_config.smartsheet.callback_url.clone(),
    };
    let registrar = WebhookRegistrar::new(client.clone());

    tokio::spawn(async move {
        match registrar.ensure(&hook_target).await {
            Ok(webhook) => {
                info!(
                    webhook_id = %webhook.id,
                    enabled = webhook.enabled,
                    "Webhook subscription ready"
                );
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Webhook registration failed; serving without an active subscription"
                );
            }
        }
    });

    // -------------------------------------------------------------------------
    // Start the HTTP server
    // -------------------------------------------------------------------------
    let processor = Arc::new(EventProcessor::new(client));
    let state = AppState::new(service_config, processor);

    if let Err(e) = start_server(state).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
            ServiceError::Configuration(_) => 3,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}
