use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;

use crate::application::services::roster_service::RosterService;

mod roster_routes;


/// State shared by every handler
#[derive(Clone)]
pub struct ApiState {
    pub roster_service: Arc<RosterService>,
}

/// Assemble the board's REST surface
pub fn build_router(roster_service: Arc<RosterService>) -> Router {
    Router::new()
        .route("/health", get(roster_routes::health))
        .route(
            "/students",
            get(roster_routes::get_students).post(roster_routes::save_students),
        )
        .route("/students/new", post(roster_routes::add_student))
        .route("/students/:id/points", put(roster_routes::award_points))
        .route("/students/:id/homework", put(roster_routes::record_homework))
        .route("/students/:id/group", put(roster_routes::move_student))
        .route("/groups/:old_name", put(roster_routes::rename_group))
        .route("/reset", delete(roster_routes::reset_all))
        .route("/stats", get(roster_routes::class_stats))
        .route("/leaderboard", get(roster_routes::leaderboard))
        .route("/export", get(roster_routes::export_roster))
        .layer(CorsLayer::permissive())
        .with_state(ApiState { roster_service })
}
