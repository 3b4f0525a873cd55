use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use log::*;
use serde::{Deserialize, Serialize};
use sse::Message;
use utoipa::ToSchema;

use crate::{AppState, Error};

/// Request body for publishing an arbitrary message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SayRequest {
    /// Single-line text to broadcast to every connected `/sse` client.
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SayResponse {
    /// The message that was published.
    pub message: String,
    /// Number of subscribers whose mailbox accepted the message.
    pub delivered: usize,
}

/// GET publish the next numbered greeting ("hello 1", "hello 2", ...)
#[utoipa::path(
    get,
    path = "/say",
    responses(
        (status = 200, description = "Successfully published a greeting", body = SayResponse),
    )
)]
pub async fn greet(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let greeting = app_state.next_greeting();
    debug!("GET Say: {greeting}");

    publish(&app_state, greeting)
}

/// POST publish a message supplied by the caller
#[utoipa::path(
    post,
    path = "/say",
    request_body = SayRequest,
    responses(
        (status = 200, description = "Successfully published the message", body = SayResponse),
        (status = 400, description = "Message contains a line break"),
    )
)]
pub async fn say(
    State(app_state): State<AppState>,
    Json(request): Json<SayRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Say: {:?}", request.message);

    publish(&app_state, request.message)
}

fn publish(app_state: &AppState, text: String) -> Result<Json<SayResponse>, Error> {
    let message = Message::new(text)?;
    let delivery = app_state.hub.publish(message.clone());

    if delivery.dropped > 0 {
        warn!(
            "Message dropped for {} slow subscriber(s)",
            delivery.dropped
        );
    }

    Ok(Json(SayResponse {
        message: message.to_string(),
        delivered: delivery.delivered,
    }))
}
