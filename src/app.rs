use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/offers", get(handlers::list_offers).post(handlers::create_offer))
        .route(
            "/api/offers/:id",
            get(handlers::get_offer).delete(handlers::delete_offer),
        )
        .route("/api/offers/:id/snapshots", post(handlers::record_snapshot))
        .route("/api/offers/:id/pin", post(handlers::toggle_pin))
        .route("/api/offers/:id/favorite", post(handlers::toggle_favorite))
        .route("/api/offers/:id/archive", post(handlers::toggle_archive))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/refresh", post(handlers::refresh))
        .with_state(state)
}
