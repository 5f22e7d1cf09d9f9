use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::movies::dtos::{CreateMovieDto, MovieResponseDto, UpdateMovieDto};
use crate::features::movies::services::MovieService;
use crate::shared::hal::{hal_collection, HalLinks, HalResource};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List movies, one page at a time
///
/// Each movie carries `_links.self` and `_links.categories`.
#[utoipa::path(
    get,
    path = "/movies",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of movies (HAL resources)", body = ApiResponse<Vec<HalResource<MovieResponseDto>>>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "movies"
)]
pub async fn list_movies(
    State(service): State<Arc<MovieService>>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<HalResource<MovieResponseDto>>>>> {
    params.validate()?;

    let (movies, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(hal_collection(movies)),
        None,
        Some(Meta { total }),
    )))
}

/// Get a movie by ID
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie found (HAL resource)", body = ApiResponse<HalResource<MovieResponseDto>>),
        (status = 404, description = "Movie not found")
    ),
    tag = "movies"
)]
pub async fn get_movie(
    State(service): State<Arc<MovieService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<HalResource<MovieResponseDto>>>> {
    let movie = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(movie.into_hal()), None, None)))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movies",
    request_body = CreateMovieDto,
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<HalResource<MovieResponseDto>>),
        (status = 400, description = "Missing or malformed body"),
        (status = 422, description = "Validation error")
    ),
    tag = "movies"
)]
pub async fn create_movie(
    State(service): State<Arc<MovieService>>,
    AppJson(dto): AppJson<CreateMovieDto>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<HalResource<MovieResponseDto>>>,
)> {
    dto.validate()?;

    let movie = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(movie.into_hal()),
            Some("Movie created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a movie
///
/// Accepts `name`, `description`, `releaseAt`, `rating` and `duration`;
/// anything else in the body is ignored.
#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieDto,
    responses(
        (status = 200, description = "Movie updated", body = ApiResponse<HalResource<MovieResponseDto>>),
        (status = 400, description = "Missing or malformed body"),
        (status = 404, description = "Movie not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "movies"
)]
pub async fn update_movie(
    State(service): State<Arc<MovieService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateMovieDto>,
) -> Result<Json<ApiResponse<HalResource<MovieResponseDto>>>> {
    dto.validate()?;

    let movie = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(movie.into_hal()),
        Some("Movie updated successfully".to_string()),
        None,
    )))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found")
    ),
    tag = "movies"
)]
pub async fn delete_movie(
    State(service): State<Arc<MovieService>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
