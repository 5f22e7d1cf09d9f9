use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::movies::dtos::{CreateMovieDto, MovieResponseDto, UpdateMovieDto};
use crate::features::movies::models::Movie;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::parse_release_at;

const MOVIE_COLUMNS: &str = "id, name, description, release_at, rating, duration";

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Movie with id {} not found", id))
}

/// Convert an already-validated release string into a timestamp
fn release_instant(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            parse_release_at(raw)
                .ok_or_else(|| AppError::Internal(format!("Unparsable releaseAt value: {}", raw)))
        })
        .transpose()
}

/// Narrow an already range-checked request number to its INTEGER column
fn integer_column(field: &str, value: Option<i64>) -> Result<Option<i32>> {
    value
        .map(|v| {
            i32::try_from(v)
                .map_err(|_| AppError::Internal(format!("{} out of column range: {}", field, v)))
        })
        .transpose()
}

/// Service for movie persistence
pub struct MovieService {
    pool: PgPool,
}

impl MovieService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of movies in insertion order, plus the total movie count
    pub async fn list(&self, params: &PaginationQuery) -> Result<(Vec<MovieResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let query = format!(
            "SELECT {} FROM movie ORDER BY id ASC LIMIT $1 OFFSET $2",
            MOVIE_COLUMNS
        );
        let movies: Vec<Movie> = sqlx::query_as(&query)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list movies: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((
            movies.into_iter().map(MovieResponseDto::from).collect(),
            total,
        ))
    }

    /// Get movie by ID
    pub async fn get_by_id(&self, id: i64) -> Result<MovieResponseDto> {
        let query = format!("SELECT {} FROM movie WHERE id = $1", MOVIE_COLUMNS);
        let movie: Movie = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| not_found(id))?;

        Ok(movie.into())
    }

    /// Insert a new movie; the database assigns its id
    pub async fn create(&self, dto: CreateMovieDto) -> Result<MovieResponseDto> {
        let release_at = release_instant(dto.release_at.as_deref())?;
        let rating = integer_column("rating", dto.rating)?;
        let duration = integer_column("duration", dto.duration)?;

        let query = format!(
            r#"
            INSERT INTO movie (name, description, release_at, rating, duration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        );
        let movie: Movie = sqlx::query_as(&query)
            .bind(&dto.name)
            .bind(dto.description.unwrap_or_default())
            .bind(release_at)
            .bind(rating)
            .bind(duration)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create movie: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Movie created: id={}, name={:?}", movie.id, movie.name);

        Ok(movie.into())
    }

    /// Apply the allow-listed fields that are present, keeping the others
    pub async fn update(&self, id: i64, dto: UpdateMovieDto) -> Result<MovieResponseDto> {
        let release_at = release_instant(dto.release_at.as_deref())?;
        let rating = integer_column("rating", dto.rating)?;
        let duration = integer_column("duration", dto.duration)?;

        let query = format!(
            r#"
            UPDATE movie
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                release_at = COALESCE($3, release_at),
                rating = COALESCE($4, rating),
                duration = COALESCE($5, duration)
            WHERE id = $6
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        );
        let movie: Movie = sqlx::query_as(&query)
            .bind(dto.name)
            .bind(dto.description)
            .bind(release_at)
            .bind(rating)
            .bind(duration)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Movie updated: id={}", movie.id);

        Ok(movie.into())
    }

    /// Delete a movie; its category links go with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Movie deleted: id={}", id);

        Ok(())
    }
}
