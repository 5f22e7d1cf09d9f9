//! Movie resources.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/movies?page&limit` | Paginated list |
//! | GET | `/movies/{id}` | Single movie |
//! | POST | `/movies` | Create |
//! | PUT/PATCH | `/movies/{id}` | Partial update of allow-listed fields |
//! | DELETE | `/movies/{id}` | Delete (join rows cascade) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MovieService;
