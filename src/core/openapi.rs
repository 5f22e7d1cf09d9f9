use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::movies::{dtos as movies_dtos, handlers as movies_handlers};
use crate::shared::hal::{HalResource, Link, Links};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Movies
        movies_handlers::list_movies,
        movies_handlers::get_movie,
        movies_handlers::create_movie,
        movies_handlers::update_movie,
        movies_handlers::delete_movie,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::add_movie,
        categories_handlers::remove_movie,
        categories_handlers::list_category_movies,
        categories_handlers::list_movie_categories,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Link,
            Links,
            // Movies
            movies_dtos::CreateMovieDto,
            movies_dtos::UpdateMovieDto,
            movies_dtos::MovieResponseDto,
            ApiResponse<HalResource<movies_dtos::MovieResponseDto>>,
            ApiResponse<Vec<HalResource<movies_dtos::MovieResponseDto>>>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<HalResource<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<HalResource<categories_dtos::CategoryResponseDto>>>,
        )
    ),
    tags(
        (name = "movies", description = "Movie catalog; every movie is returned with HAL `_links`"),
        (name = "categories", description = "Categories and their movie associations"),
    ),
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "Movies and categories with HAL links",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
