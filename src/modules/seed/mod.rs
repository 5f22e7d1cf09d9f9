mod demo_data;

pub use demo_data::seed_demo_movies;
