use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::movies::models::Movie;
use crate::shared::hal::{HalLinks, Links};
use crate::shared::validation::{format_release_at, validate_release_at, RELEASE_AT_REGEX};

/// Request DTO for creating a movie
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    /// Absent or `null` is stored as an empty description
    #[validate(length(max = 2048, message = "Description must not exceed 2048 characters"))]
    pub description: Option<String>,

    /// ISO-8601 date-time with offset, e.g. `2024-04-26T08:10:44+02:00`
    #[serde(default, alias = "release_at")]
    #[validate(
        regex(path = *RELEASE_AT_REGEX, message = "releaseAt must be an ISO-8601 date-time with offset (YYYY-MM-DDTHH:MM:SS+HH:MM)"),
        custom(function = "validate_release_at")
    )]
    pub release_at: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    /// Running time in minutes
    #[validate(range(min = 0, max = 240, message = "Duration must be between 0 and 240"))]
    pub duration: Option<i64>,
}

/// Request DTO for updating a movie.
///
/// Only these fields can change; absent or `null` fields keep their stored value
/// and any other key in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieDto {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2048, message = "Description must not exceed 2048 characters"))]
    pub description: Option<String>,

    #[serde(default, alias = "release_at")]
    #[validate(
        regex(path = *RELEASE_AT_REGEX, message = "releaseAt must be an ISO-8601 date-time with offset (YYYY-MM-DDTHH:MM:SS+HH:MM)"),
        custom(function = "validate_release_at")
    )]
    pub release_at: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i64>,

    #[validate(range(min = 0, max = 240, message = "Duration must be between 0 and 240"))]
    pub duration: Option<i64>,
}

/// Response DTO for movie
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_at: Option<String>,
    pub rating: Option<i32>,
    pub duration: Option<i32>,
}

impl From<Movie> for MovieResponseDto {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            release_at: m.release_at.as_ref().map(format_release_at),
            rating: m.rating,
            duration: m.duration,
        }
    }
}

impl HalLinks for MovieResponseDto {
    fn links(&self) -> Links {
        Links::for_entity("/movies", self.id, "/movie", "categories")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn valid_create() -> CreateMovieDto {
        CreateMovieDto {
            name: "Le Samouraï".to_string(),
            description: Some("A hitman's alibi unravels.".to_string()),
            release_at: Some("1967-10-25T00:00:00+01:00".to_string()),
            rating: Some(5),
            duration: Some(105),
        }
    }

    #[test]
    fn test_create_valid_movie() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_create_name_too_long() {
        let dto = CreateMovieDto {
            name: "x".repeat(129),
            ..valid_create()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let at_limit = CreateMovieDto {
            name: "x".repeat(128),
            ..valid_create()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_create_rating_bounds() {
        for rating in [0, 6, -1] {
            let dto = CreateMovieDto {
                rating: Some(rating),
                ..valid_create()
            };
            assert!(dto.validate().is_err(), "rating {} should be rejected", rating);
        }

        let no_rating = CreateMovieDto {
            rating: None,
            ..valid_create()
        };
        assert!(no_rating.validate().is_ok());
    }

    #[test]
    fn test_create_duration_bounds() {
        let too_long = CreateMovieDto {
            duration: Some(241),
            ..valid_create()
        };
        assert!(too_long.validate().is_err());

        let zero = CreateMovieDto {
            duration: Some(0),
            ..valid_create()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_create_release_at_format() {
        let date_only = CreateMovieDto {
            release_at: Some("1967-10-25".to_string()),
            ..valid_create()
        };
        let errors = date_only.validate().unwrap_err();
        assert!(errors
            .field_errors()
            .keys()
            .any(|field| field.to_lowercase().contains("release")));

        let bad_month = CreateMovieDto {
            release_at: Some("1967-13-25T00:00:00+01:00".to_string()),
            ..valid_create()
        };
        assert!(bad_month.validate().is_err());
    }

    #[test]
    fn test_create_description_may_be_absent_or_null() {
        let dto: CreateMovieDto = serde_json::from_value(serde_json::json!({
            "name": "Playtime",
            "releaseAt": "1967-12-16T00:00:00+01:00"
        }))
        .unwrap();
        assert!(dto.description.is_none());
        assert_eq!(dto.release_at.as_deref(), Some("1967-12-16T00:00:00+01:00"));
        assert!(dto.validate().is_ok());

        let null_description: CreateMovieDto = serde_json::from_value(serde_json::json!({
            "name": "Playtime",
            "description": null
        }))
        .unwrap();
        assert!(null_description.description.is_none());
        assert!(null_description.validate().is_ok());
    }

    #[test]
    fn test_create_oversized_rating_reaches_validation() {
        let dto: CreateMovieDto = serde_json::from_value(serde_json::json!({
            "name": "A",
            "rating": 10_000_000_000_i64
        }))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rating"));
    }

    #[test]
    fn test_update_ignores_unknown_keys() {
        let dto: UpdateMovieDto = serde_json::from_value(serde_json::json!({
            "id": 999,
            "rating": 4,
            "isAdmin": true
        }))
        .unwrap();
        assert_eq!(dto.rating, Some(4));
        assert!(dto.name.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let empty = UpdateMovieDto::default();
        assert!(empty.validate().is_ok());

        let blank_name = UpdateMovieDto {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_response_serializes_camel_case_with_links() {
        let movie = Movie {
            id: 12,
            name: "Stalker".to_string(),
            description: String::new(),
            release_at: Some(Utc.with_ymd_and_hms(1979, 5, 25, 0, 0, 0).unwrap()),
            rating: Some(5),
            duration: None,
        };
        let value = serde_json::to_value(MovieResponseDto::from(movie).into_hal()).unwrap();

        assert_eq!(value["releaseAt"], "1979-05-25T00:00:00+00:00");
        assert_eq!(value["_links"]["self"]["href"], "/movies/12");
        assert_eq!(value["_links"]["categories"]["href"], "/movie/12/categories");
    }
}
