use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures::StreamExt;
use log::*;
use service::AppState;
use std::convert::Infallible;

/// SSE handler that establishes a long-lived connection and streams every
/// published message as one `data:` event.
///
/// The stream ends when the server shuts down. When the client disconnects
/// (or a write fails) hyper drops the stream, which closes the subscription.
#[utoipa::path(
    get,
    path = "/sse",
    responses(
        (status = 200, description = "Event stream of published messages", content_type = "text/event-stream", body = String),
    )
)]
pub(crate) async fn sse_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let subscription = app_state.hub.register();
    debug!(
        "Establishing SSE connection {} (active={})",
        subscription.id().as_str(),
        app_state.hub.subscriber_count()
    );

    let cancel = app_state.shutdown.child_token();
    let events = subscription
        .into_stream(cancel)
        .map(|message| Ok::<_, Infallible>(Event::default().data(message.as_str())));

    (
        [(header::CONNECTION, "keep-alive")],
        Sse::new(events).keep_alive(
            KeepAlive::new().interval(app_state.config.keep_alive_interval()),
        ),
    )
}

