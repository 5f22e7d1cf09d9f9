use sqlx::{PgConnection, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::features::movies::dtos::MovieResponseDto;
use crate::features::movies::models::Movie;

fn category_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Category with id {} not found", id))
}

fn movie_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Movie with id {} not found", id))
}

/// Convert database error to a more specific AppError
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Foreign key violation (PostgreSQL error code 23503): the other side
        // was deleted between the existence check and the write
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::NotFound("Category or movie not found".to_string());
        }
    }

    AppError::Database(e)
}

async fn category_exists(conn: &mut PgConnection, id: i64) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM category WHERE id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(AppError::Database)
}

async fn movie_exists(conn: &mut PgConnection, id: i64) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movie WHERE id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(AppError::Database)
}

/// Both ends of an association must exist before the join row is touched
async fn ensure_pair_exists(conn: &mut PgConnection, category_id: i64, movie_id: i64) -> Result<()> {
    if !category_exists(&mut *conn, category_id).await? {
        return Err(category_not_found(category_id));
    }
    if !movie_exists(&mut *conn, movie_id).await? {
        return Err(movie_not_found(movie_id));
    }
    Ok(())
}

/// Service for category operations and the movie/category association
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories: Vec<Category> =
            sqlx::query_as("SELECT id, name FROM category ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list categories: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i64) -> Result<CategoryResponseDto> {
        let category: Category = sqlx::query_as("SELECT id, name FROM category WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by id: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| category_not_found(id))?;

        Ok(category.into())
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category: Category =
            sqlx::query_as("INSERT INTO category (name) VALUES ($1) RETURNING id, name")
                .bind(&dto.name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create category: {:?}", e);
                    AppError::Database(e)
                })?;

        tracing::info!("Category created: id={}, name={:?}", category.id, category.name);

        Ok(category.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category: Category =
            sqlx::query_as("UPDATE category SET name = $1 WHERE id = $2 RETURNING id, name")
                .bind(&dto.name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?
                .ok_or_else(|| category_not_found(id))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Delete a category; its movie links go with it, the movies stay
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(category_not_found(id));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }

    /// Link a movie to a category. Linking an already linked pair is a no-op.
    pub async fn add_movie(&self, category_id: i64, movie_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        ensure_pair_exists(&mut tx, category_id, movie_id).await?;

        sqlx::query(
            r#"
            INSERT INTO movies_categories (category_id, movie_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(category_id)
        .bind(movie_id)
        .execute(&mut *tx)
        .await
        .map_err(handle_db_error)?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Movie linked to category: category_id={}, movie_id={}",
            category_id,
            movie_id
        );

        Ok(())
    }

    /// Unlink a movie from a category. The single join row backs both
    /// directions, so neither side lists the other afterwards.
    pub async fn remove_movie(&self, category_id: i64, movie_id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        ensure_pair_exists(&mut tx, category_id, movie_id).await?;

        let result =
            sqlx::query("DELETE FROM movies_categories WHERE category_id = $1 AND movie_id = $2")
                .bind(category_id)
                .bind(movie_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Movie unlinked from category: category_id={}, movie_id={}, removed={}",
            category_id,
            movie_id,
            result.rows_affected()
        );

        Ok(())
    }

    /// Movies linked to a category
    pub async fn list_movies(&self, category_id: i64) -> Result<Vec<MovieResponseDto>> {
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;

        if !category_exists(&mut conn, category_id).await? {
            return Err(category_not_found(category_id));
        }

        let movies: Vec<Movie> = sqlx::query_as(
            r#"
            SELECT m.id, m.name, m.description, m.release_at, m.rating, m.duration
            FROM movie m
            INNER JOIN movies_categories mc ON mc.movie_id = m.id
            WHERE mc.category_id = $1
            ORDER BY m.id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list movies of category: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(movies.into_iter().map(MovieResponseDto::from).collect())
    }

    /// Categories a movie belongs to
    pub async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<CategoryResponseDto>> {
        let mut conn = self.pool.acquire().await.map_err(AppError::Database)?;

        if !movie_exists(&mut conn, movie_id).await? {
            return Err(movie_not_found(movie_id));
        }

        let categories: Vec<Category> = sqlx::query_as(
            r#"
            SELECT c.id, c.name
            FROM category c
            INNER JOIN movies_categories mc ON mc.category_id = c.id
            WHERE mc.movie_id = $1
            ORDER BY c.id ASC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories of movie: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::movies::dtos::CreateMovieDto;
    use crate::features::movies::MovieService;

    async fn seed_movie(pool: &PgPool, name: &str) -> i64 {
        MovieService::new(pool.clone())
            .create(CreateMovieDto {
                name: name.to_string(),
                description: None,
                release_at: None,
                rating: None,
                duration: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_category(service: &CategoryService, name: &str) -> i64 {
        service
            .create(CreateCategoryDto {
                name: name.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
        items.iter().map(id).collect()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_association_is_visible_from_both_sides(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let movie = seed_movie(&pool, "Heat").await;
        let category = seed_category(&service, "Crime").await;

        service.add_movie(category, movie).await.unwrap();
        // linking twice is harmless
        service.add_movie(category, movie).await.unwrap();

        let movies = service.list_movies(category).await.unwrap();
        assert_eq!(ids(&movies, |m| m.id), vec![movie]);

        let categories = service.list_for_movie(movie).await.unwrap();
        assert_eq!(ids(&categories, |c| c.id), vec![category]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_remove_unlinks_both_directions(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let movie = seed_movie(&pool, "Ronin").await;
        let category = seed_category(&service, "Thriller").await;

        service.add_movie(category, movie).await.unwrap();
        service.remove_movie(category, movie).await.unwrap();

        assert!(service.list_movies(category).await.unwrap().is_empty());
        assert!(service.list_for_movie(movie).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_delete_category_cascades_join_rows_only(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let movie = seed_movie(&pool, "Collateral").await;
        let doomed = seed_category(&service, "Doomed").await;
        let kept = seed_category(&service, "Kept").await;

        service.add_movie(doomed, movie).await.unwrap();
        service.add_movie(kept, movie).await.unwrap();
        service.delete(doomed).await.unwrap();

        let join_rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM movies_categories WHERE category_id = $1")
                .bind(doomed)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(join_rows, 0);

        let categories = service.list_for_movie(movie).await.unwrap();
        assert_eq!(ids(&categories, |c| c.id), vec![kept]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_association_requires_both_sides(pool: PgPool) {
        let service = CategoryService::new(pool.clone());
        let movie = seed_movie(&pool, "Thief").await;
        let category = seed_category(&service, "Neo-noir").await;

        assert!(matches!(
            service.add_movie(category, movie + 100).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.remove_movie(category + 100, movie).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.list_movies(category + 100).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.list_for_movie(movie + 100).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_empty_catalog_lists_nothing(pool: PgPool) {
        let service = CategoryService::new(pool);
        assert!(service.list().await.unwrap().is_empty());
    }
}
