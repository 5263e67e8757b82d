pub mod client;
pub mod types;

pub use client::{DEFAULT_LANGUAGE, MovieDatabase, TmdbClient, TmdbError};
