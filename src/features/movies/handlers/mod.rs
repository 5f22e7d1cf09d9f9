pub mod movie_handler;

pub use movie_handler::*;
