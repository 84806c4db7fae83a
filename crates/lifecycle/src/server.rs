//! HTTP server for GitHub comment webhooks.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::client::LabelClient;
use crate::config::Config;
use crate::event::{CommentAction, CommentEvent};
use crate::help::command_help;
use crate::reconcile::handle_comment;
use crate::webhooks::{verify_webhook_signature, IssueCommentEvent};

type HandlerError = (StatusCode, Json<Value>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Label store. `None` when no GitHub token is configured.
    pub label_client: Option<Arc<dyn LabelClient>>,
}

/// Build the HTTP router for the lifecycle service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhooks/github", post(handle_github_webhook))
        .route("/help", get(help))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `listener` until the server stops.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn run_server(state: AppState, listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read local address")?;
    info!(%addr, "Lifecycle service listening");

    axum::serve(listener, build_router(state))
        .await
        .context("Server error")
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Readiness check endpoint.
async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if state.label_client.is_none() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!({ "status": "ready" })))
}

/// Command usage.
async fn help() -> Json<Value> {
    Json(json!({ "commands": [command_help()] }))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(json!({
            "status": "error",
            "error": message.into()
        })),
    )
}

fn ignored(reason: &str) -> Json<Value> {
    Json(json!({
        "status": "ignored",
        "reason": reason
    }))
}

/// Handle GitHub webhook.
///
/// This handler:
/// 1. Verifies the webhook signature (if a secret is configured)
/// 2. Filters to newly created issue and PR comments
/// 3. Applies every lifecycle command in the comment
pub async fn handle_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, HandlerError> {
    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let delivery_id = headers
        .get("X-GitHub-Delivery")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info!(
        event_type = %event_type,
        delivery_id = %delivery_id,
        "Received GitHub webhook"
    );

    if let Some(secret) = &state.config.webhook_secret {
        let Some(signature) = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok())
        else {
            warn!("Missing X-Hub-Signature-256 header");
            return Err(error_response(StatusCode::UNAUTHORIZED, "missing signature"));
        };

        if !verify_webhook_signature(&body, signature, secret) {
            warn!("Invalid webhook signature");
            return Err(error_response(StatusCode::UNAUTHORIZED, "invalid signature"));
        }
    }

    if event_type != "issue_comment" {
        debug!(event_type = %event_type, "Ignoring non-issue_comment event");
        return Ok(ignored("not_issue_comment_event"));
    }

    let payload: IssueCommentEvent = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse GitHub webhook payload");
        error_response(StatusCode::BAD_REQUEST, format!("invalid payload: {e}"))
    })?;
    let event = CommentEvent::from(payload);

    if event.action != CommentAction::Created {
        debug!(action = ?event.action, "Ignoring comment that was not newly created");
        return Ok(ignored("not_created_comment"));
    }

    let Some(client) = &state.label_client else {
        error!("GitHub label client not configured");
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "GitHub client not configured",
        ));
    };

    match handle_comment(&**client, &event).await {
        Ok(commands) => {
            if commands > 0 {
                info!(
                    item = %event.item,
                    actor = %event.actor,
                    commands = commands,
                    "Processed lifecycle commands"
                );
            }
            Ok(Json(json!({
                "status": "processed",
                "commands": commands
            })))
        }
        Err(e) => {
            error!(item = %event.item, error = %e, "Failed to apply lifecycle command");
            Err(error_response(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
