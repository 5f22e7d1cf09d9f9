use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::movies::handlers;
use crate::features::movies::services::MovieService;

/// Create routes for the movies feature
pub fn routes(service: Arc<MovieService>) -> Router {
    Router::new()
        .route(
            "/movies",
            get(handlers::list_movies).post(handlers::create_movie),
        )
        .route(
            "/movies/{id}",
            get(handlers::get_movie)
                .put(handlers::update_movie)
                .patch(handlers::update_movie)
                .delete(handlers::delete_movie),
        )
        .with_state(service)
}
