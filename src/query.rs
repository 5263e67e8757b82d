//! Shapes a movie card into the flat record downstream consumers expect.

use serde::Serialize;
use tracing::{error, info};

use crate::card::MovieCard;
use crate::tmdb::{MovieDatabase, TmdbError};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    #[error("release date {0:?} does not start with a four-digit year")]
    InvalidReleaseDate(String),
}

/// Outcome reported for every lookup, found or not.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryStatus {
    pub message: String,
    pub success: bool,
}

impl QueryStatus {
    pub fn success() -> Self {
        Self {
            message: "Success".to_string(),
            success: true,
        }
    }

    pub fn not_found(title: &str) -> Self {
        Self {
            message: format!("Error: Movie {title} not found"),
            success: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MovieRecord {
    #[serde(flatten)]
    pub card: MovieCard,
    /// Same value as `tmdb_id`.
    pub id: i64,
    pub query: String,
    pub year: i32,
    /// Not sourced from TMDb; always `None`.
    pub first_week_sales: Option<u64>,
}

pub async fn query_movie_data_from_title(
    client: &impl MovieDatabase,
    title: &str,
) -> Result<(Option<MovieRecord>, QueryStatus), QueryError> {
    let Some(card) = client.find_movie_features(title).await? else {
        let status = QueryStatus::not_found(title);
        error!("{}", status.message);
        return Ok((None, status));
    };

    let year = release_year(&card.details.release_date)?;
    info!(%title, movie_id = card.details.tmdb_id, year, "movie resolved");
    let record = MovieRecord {
        id: card.details.tmdb_id,
        query: title.to_string(),
        year,
        first_week_sales: None,
        card,
    };
    Ok((Some(record), QueryStatus::success()))
}

/// Year from the first four characters of `release_date`, which must all be ASCII digits.
fn release_year(release_date: &str) -> Result<i32, QueryError> {
    let invalid = || QueryError::InvalidReleaseDate(release_date.to_string());
    let prefix = release_date
        .get(..4)
        .filter(|p| p.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(invalid)?;
    prefix.parse().map_err(|_| invalid())
}
