use chrono::{DateTime, Duration, Utc};
use fake::faker::chrono::en::DateTimeBetween;
use fake::faker::lorem::en::{Paragraph, Words};
use fake::Fake;
use sqlx::PgPool;

const DESCRIPTION_MAX_CHARS: usize = 2048;
const RELEASE_WINDOW_DAYS: i64 = 20 * 365;

/// A generated movie row
#[derive(Debug, Clone)]
struct DemoMovie {
    name: String,
    description: String,
    release_at: DateTime<Utc>,
    rating: i32,
    duration: i32,
}

fn title_case(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn demo_movie(now: DateTime<Utc>) -> DemoMovie {
    let words: Vec<String> = Words(1..4).fake();
    let description: String = Paragraph(1..4).fake();

    DemoMovie {
        name: title_case(&words).chars().take(128).collect(),
        description: description.chars().take(DESCRIPTION_MAX_CHARS).collect(),
        release_at: DateTimeBetween(now - Duration::days(RELEASE_WINDOW_DAYS), now).fake(),
        rating: (1..6).fake(),
        duration: (75..181).fake(),
    }
}

/// Insert `count` generated movies when the movie table is empty.
///
/// Returns the number of rows inserted (zero when data already exists).
pub async fn seed_demo_movies(pool: &PgPool, count: usize) -> Result<u64, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!("Skipping demo seed: {} movies already present", existing);
        return Ok(0);
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for _ in 0..count {
        let movie = demo_movie(now);
        sqlx::query(
            r#"
            INSERT INTO movie (name, description, release_at, rating, duration)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&movie.name)
        .bind(&movie.description)
        .bind(movie.release_at)
        .bind(movie.rating)
        .bind(movie.duration)
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        let words = vec!["the".to_string(), "third".to_string(), "man".to_string()];
        assert_eq!(title_case(&words), "The Third Man");
        assert_eq!(title_case(&[]), "");
    }

    #[test]
    fn test_demo_movie_respects_constraints() {
        let now = Utc::now();
        for _ in 0..50 {
            let movie = demo_movie(now);
            assert!(!movie.name.is_empty());
            assert!(movie.name.chars().count() <= 128);
            assert!(movie.description.chars().count() <= DESCRIPTION_MAX_CHARS);
            assert!((1..=5).contains(&movie.rating));
            assert!((0..=240).contains(&movie.duration));
            assert!(movie.release_at <= now);
            assert!(movie.release_at >= now - Duration::days(RELEASE_WINDOW_DAYS));
        }
    }
}
