use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::hal::{HalLinks, Links};

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Request DTO for renaming a category; `name` is required
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

impl HalLinks for CategoryResponseDto {
    fn links(&self) -> Links {
        Links::for_entity("/category", self.id, "/category", "movies")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required() {
        let missing = serde_json::from_value::<CreateCategoryDto>(serde_json::json!({}));
        assert!(missing.is_err());

        let update_missing =
            serde_json::from_value::<UpdateCategoryDto>(serde_json::json!({ "title": "x" }));
        assert!(update_missing.is_err());
    }

    #[test]
    fn test_name_length() {
        assert!(CreateCategoryDto {
            name: String::new()
        }
        .validate()
        .is_err());
        assert!(CreateCategoryDto {
            name: "a".repeat(256)
        }
        .validate()
        .is_err());
        assert!(CreateCategoryDto {
            name: "Film noir".to_string()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_category_links() {
        let dto = CategoryResponseDto::from(Category {
            id: 4,
            name: "Western".to_string(),
        });
        let value = serde_json::to_value(dto.into_hal()).unwrap();

        assert_eq!(value["name"], "Western");
        assert_eq!(value["_links"]["self"]["href"], "/category/4");
        assert_eq!(value["_links"]["movies"]["href"], "/category/4/movies");
    }
}
