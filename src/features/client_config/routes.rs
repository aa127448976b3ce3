use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::client_config::handlers::{self, ClientConfigDto};

pub fn routes(config: Arc<ClientConfigDto>) -> Router {
    Router::new()
        .route("/api/config", get(handlers::get_client_config))
        .with_state(config)
}
