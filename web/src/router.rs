use crate::{
    controller::{health_check_controller, say_controller},
    middleware::cors::allow_any_origin,
    sse::handler as sse_handler,
    AppState,
};
use axum::{middleware::from_fn, routing::get, Router};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "SSE Hub API"
        ),
        paths(
            health_check_controller::health_check,
            say_controller::greet,
            say_controller::say,
            sse_handler::sse_handler,
        ),
        components(
            schemas(
                say_controller::SayRequest,
                say_controller::SayResponse,
            )
        ),
        tags(
            (name = "sse_hub", description = "Server-Sent Events broadcast API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(say_routes(app_state.clone()))
        .merge(sse_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        // Outermost, so preflight requests never reach a handler
        .layer(from_fn(allow_any_origin))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn say_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/say",
            get(say_controller::greet).post(say_controller::say),
        )
        .with_state(app_state)
}

fn sse_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sse", get(sse_handler::sse_handler))
        .with_state(app_state)
}
