pub mod movie_dto;

pub use movie_dto::{CreateMovieDto, MovieResponseDto, UpdateMovieDto};
