//! Session Routes
//!
//! Server-side idle-session monitors, one per open dashboard.
//!
//! - POST /api/v1/sessions - Open a session
//! - GET /api/v1/sessions/:id - Current countdown
//! - POST /api/v1/sessions/:id/activity - Report user activity
//! - POST /api/v1/sessions/:id/extend - "Stay logged in"
//! - POST /api/v1/sessions/:id/expire - "Log out now"
//! - POST /api/v1/sessions/:id/restart - "Log in again"
//! - DELETE /api/v1/sessions/:id - Close the session
//! - GET /api/v1/sessions/:id/ws - Event stream

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::api::dto::{
    ActivityRequest, ClientMessage, CreateSessionRequest, ServerMessage, SessionCommandResponse,
    SessionResponse, SessionSettingsView,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session::{ActivityKind, SessionConfig, SessionMonitor};

fn parse_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation(format!("Invalid session id: {}", id)))
}

async fn lookup(state: &AppState, id: &str) -> ApiResult<Arc<SessionMonitor>> {
    Ok(state.sessions.get(parse_id(id)?).await?)
}

async fn command_response(monitor: &SessionMonitor, applied: bool) -> Json<SessionCommandResponse> {
    Json(SessionCommandResponse {
        applied,
        state: monitor.snapshot().await,
    })
}

/// POST /api/v1/sessions
///
/// The body is optional; omitted timings fall back to the server defaults.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateSessionRequest>>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let defaults = state.sessions.default_config();

    let config = if req.timeout_minutes.is_none() && req.warning_minutes.is_none() {
        defaults
    } else {
        SessionConfig::new(
            req.timeout_minutes.unwrap_or(defaults.timeout_minutes()),
            req.warning_minutes.unwrap_or(defaults.warning_minutes()),
        )?
        .tick_interval(defaults.tick_period())
    };

    let (id, monitor) = state.sessions.open(Some(config)).await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id,
            config: SessionSettingsView::from(monitor.config()),
            state: monitor.snapshot().await,
        }),
    ))
}

/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let monitor = lookup(&state, &id).await?;

    Ok(Json(SessionResponse {
        id: parse_id(&id)?,
        config: SessionSettingsView::from(monitor.config()),
        state: monitor.snapshot().await,
    }))
}

/// POST /api/v1/sessions/:id/activity
pub async fn record_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<ActivityRequest>>,
) -> ApiResult<Json<SessionCommandResponse>> {
    let monitor = lookup(&state, &id).await?;
    let kind = body
        .and_then(|Json(r)| r.kind)
        .unwrap_or(ActivityKind::Click);

    let applied = monitor.on_user_activity(kind).await;
    Ok(command_response(&monitor, applied).await)
}

/// POST /api/v1/sessions/:id/extend
pub async fn extend_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionCommandResponse>> {
    let monitor = lookup(&state, &id).await?;
    let applied = monitor.extend_session().await;
    Ok(command_response(&monitor, applied).await)
}

/// POST /api/v1/sessions/:id/expire
pub async fn expire_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionCommandResponse>> {
    let monitor = lookup(&state, &id).await?;
    let applied = monitor.expire_now().await;
    Ok(command_response(&monitor, applied).await)
}

/// POST /api/v1/sessions/:id/restart
pub async fn restart_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionCommandResponse>> {
    let monitor = lookup(&state, &id).await?;
    monitor.restart().await;
    Ok(command_response(&monitor, true).await)
}

/// DELETE /api/v1/sessions/:id
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.sessions.close(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/ws
///
/// Sends a snapshot, then every [`SessionEvent`](crate::session::SessionEvent)
/// as it is published. Clients may report activity over the same socket.
pub async fn session_stream(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let monitor = lookup(&state, &id).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, monitor)))
}

async fn send_message(
    sender: &mut futures_util::stream::SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> bool {
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            true
        }
    }
}

async fn handle_socket(socket: WebSocket, monitor: Arc<SessionMonitor>) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = monitor.subscribe();

    let snapshot = ServerMessage::Snapshot {
        state: monitor.snapshot().await,
    };
    if !send_message(&mut sender, &snapshot).await {
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if !send_message(&mut sender, &ServerMessage::Event { event }).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Session stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let reply = handle_client_text(&monitor, &text).await;
                    if let Some(reply) = reply {
                        if !send_message(&mut sender, &reply).await {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!("Session stream client closed");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "WebSocket receive error");
                    break;
                }
            },
        }
    }
}

/// Apply a client message; returns the direct reply, if any
async fn handle_client_text(monitor: &SessionMonitor, text: &str) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Activity { kind }) => {
            monitor
                .on_user_activity(kind.unwrap_or(ActivityKind::Click))
                .await;
            None
        }
        Ok(ClientMessage::Extend) => {
            monitor.extend_session().await;
            None
        }
        Ok(ClientMessage::Ping) => Some(ServerMessage::Pong),
        Err(e) => Some(ServerMessage::Error {
            message: format!("Invalid message format: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_text_handling() {
        let monitor = SessionMonitor::start(SessionConfig::default());

        assert!(matches!(
            handle_client_text(&monitor, r#"{"type":"ping"}"#).await,
            Some(ServerMessage::Pong)
        ));
        assert!(handle_client_text(&monitor, r#"{"type":"activity"}"#)
            .await
            .is_none());
        assert!(matches!(
            handle_client_text(&monitor, "nonsense").await,
            Some(ServerMessage::Error { .. })
        ));
    }
}
