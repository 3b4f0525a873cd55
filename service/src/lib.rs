use config::Config;
use log::info;
use sse::Hub;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod config;
pub mod logging;

// Service-level state shared by every request handler.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hub: Hub,
    /// Cancelled on process shutdown; each SSE stream watches a child token.
    pub shutdown: CancellationToken,
    greeting_counter: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(app_config: Config) -> Self {
        let hub = Hub::new(app_config.mailbox_capacity);
        info!(
            "Broadcast hub ready: mailbox_capacity={}",
            hub.capacity()
        );

        Self {
            config: app_config,
            hub,
            shutdown: CancellationToken::new(),
            greeting_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Next numbered greeting for the `/say` producer: "hello 1", "hello 2", ...
    pub fn next_greeting(&self) -> String {
        let n = self.greeting_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("hello {n}")
    }
}
