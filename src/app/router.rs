use crate::app::AppState;
use crate::handler::health::{health_handler, ready_handler, test_probe_handler};
use crate::handler::layout::{assign_anonymous_layouts_handler, assign_layouts_handler};
use axum::Router;
use axum::routing::{get, post};

/// Build the HTTP router (health probes + layout assignment).
pub fn main_router(state: AppState) -> Router {
    let v1_health_router = Router::new()
        .route("/v1/health", get(health_handler))
        .route("/test", get(test_probe_handler));

    let layout_router = Router::new()
        .route("/v1/ready", get(ready_handler))
        .route("/assign-layouts", post(assign_anonymous_layouts_handler))
        .route("/assign-layouts/{user_id}", post(assign_layouts_handler))
        .with_state(state);

    Router::new().merge(v1_health_router).merge(layout_router)
}
