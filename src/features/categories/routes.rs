use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature, including the association endpoints
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/category", post(handlers::create_category))
        .route(
            "/category/{id}",
            get(handlers::get_category)
                .patch(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/category/{id}/add-movie/{movieId}",
            post(handlers::add_movie),
        )
        .route(
            "/category/{id}/remove-movie/{movieId}",
            delete(handlers::remove_movie),
        )
        .route(
            "/category/{id}/movies",
            get(handlers::list_category_movies),
        )
        .route(
            "/movie/{id}/categories",
            get(handlers::list_movie_categories),
        )
        .with_state(service)
}
