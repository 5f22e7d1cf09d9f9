use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::features::movies::dtos::MovieResponseDto;
use crate::shared::hal::{hal_collection, HalLinks, HalResource};
use crate::shared::types::{ApiResponse, Meta};

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories (HAL resources)", body = ApiResponse<Vec<HalResource<CategoryResponseDto>>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<HalResource<CategoryResponseDto>>>>> {
    let categories = service.list().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(hal_collection(categories)),
        None,
        Some(Meta { total }),
    )))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found (HAL resource)", body = ApiResponse<HalResource<CategoryResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<HalResource<CategoryResponseDto>>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category.into_hal()), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<HalResource<CategoryResponseDto>>),
        (status = 400, description = "Missing body or name"),
        (status = 422, description = "Validation error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<HalResource<CategoryResponseDto>>>,
)> {
    dto.validate()?;

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category.into_hal()),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// Rename a category
#[utoipa::path(
    patch,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<HalResource<CategoryResponseDto>>),
        (status = 400, description = "Missing body or name"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<HalResource<CategoryResponseDto>>>> {
    dto.validate()?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into_hal()),
        Some("Category updated successfully".to_string()),
        None,
    )))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

/// Add a movie to a category
#[utoipa::path(
    post,
    path = "/category/{id}/add-movie/{movieId}",
    params(
        ("id" = i64, Path, description = "Category ID"),
        ("movieId" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie added to category"),
        (status = 404, description = "Category or movie not found")
    ),
    tag = "categories"
)]
pub async fn add_movie(
    State(service): State<Arc<CategoryService>>,
    AppPath((id, movie_id)): AppPath<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.add_movie(id, movie_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Movie added to category successfully".to_string()),
        None,
    )))
}

/// Remove a movie from a category
#[utoipa::path(
    delete,
    path = "/category/{id}/remove-movie/{movieId}",
    params(
        ("id" = i64, Path, description = "Category ID"),
        ("movieId" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie removed from category"),
        (status = 404, description = "Category or movie not found")
    ),
    tag = "categories"
)]
pub async fn remove_movie(
    State(service): State<Arc<CategoryService>>,
    AppPath((id, movie_id)): AppPath<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_movie(id, movie_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Movie removed from category successfully".to_string()),
        None,
    )))
}

/// List the movies of a category
#[utoipa::path(
    get,
    path = "/category/{id}/movies",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Movies in the category (HAL resources)", body = ApiResponse<Vec<HalResource<MovieResponseDto>>>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn list_category_movies(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<HalResource<MovieResponseDto>>>>> {
    let movies = service.list_movies(id).await?;
    let total = movies.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(hal_collection(movies)),
        None,
        Some(Meta { total }),
    )))
}

/// List the categories of a movie
#[utoipa::path(
    get,
    path = "/movie/{id}/categories",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Categories of the movie (HAL resources)", body = ApiResponse<Vec<HalResource<CategoryResponseDto>>>),
        (status = 404, description = "Movie not found")
    ),
    tag = "categories"
)]
pub async fn list_movie_categories(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<HalResource<CategoryResponseDto>>>>> {
    let categories = service.list_for_movie(id).await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(hal_collection(categories)),
        None,
        Some(Meta { total }),
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::features::categories::{routes, CategoryService};
    use crate::shared::test_helpers::lazy_pool;

    // Every request below is rejected before the service issues any SQL.
    fn server() -> TestServer {
        let service = std::sync::Arc::new(CategoryService::new(lazy_pool()));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_create_without_body_is_bad_request() {
        let response = server().post("/category").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_without_name_is_bad_request() {
        let response = server()
            .post("/category")
            .json(&json!({ "label": "Horror" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_blank_name_is_unprocessable() {
        let response = server().post("/category").json(&json!({ "name": "" })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_without_name_is_bad_request() {
        let response = server().patch("/category/1").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_ids_are_bad_request() {
        let server = server();

        server
            .get("/category/drama")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .post("/category/1/add-movie/abc")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/movie/x/categories")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
