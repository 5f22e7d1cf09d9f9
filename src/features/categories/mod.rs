//! Category resources and the movie <-> category association.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories` | All categories |
//! | GET | `/category/{id}` | Single category |
//! | POST | `/category` | Create |
//! | PATCH | `/category/{id}` | Rename |
//! | DELETE | `/category/{id}` | Delete (join rows cascade) |
//! | POST | `/category/{id}/add-movie/{movieId}` | Link a movie |
//! | DELETE | `/category/{id}/remove-movie/{movieId}` | Unlink a movie |
//! | GET | `/category/{id}/movies` | Movies in a category |
//! | GET | `/movie/{id}/categories` | Categories of a movie |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
