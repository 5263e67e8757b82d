use std::env;

use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiError, CreditsResponse, DetailsResponse, SearchResponse};
use crate::card::{MovieCard, MovieCast, MovieDetails, unmarshal_credits, unmarshal_details};

const API_BASE: &str = "https://api.themoviedb.org/3";

/// Locale used for every request unless the caller picks another one.
pub const DEFAULT_LANGUAGE: &str = "fr-FR";

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("TMDB_API_KEY not set. Get one at https://www.themoviedb.org/settings/api")]
    ApiKeyNotSet,

    #[error("TMDb rejected the API key: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("TMDb API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("TMDb API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Title and id lookups against a movie database.
/// Implemented by `TmdbClient` for production; in-memory doubles are used in tests.
pub trait MovieDatabase {
    /// Id of the most relevant match for `title`, as ranked by the service.
    async fn find_movie_id(&self, title: &str) -> Result<Option<i64>, TmdbError>;

    async fn get_movie_details(&self, movie_id: i64) -> Result<MovieDetails, TmdbError>;

    async fn get_movie_cast(&self, movie_id: i64) -> Result<MovieCast, TmdbError>;

    /// Resolves `title`, then fetches details and cast for the match.
    /// `None` when the search has no result.
    async fn find_movie_features(&self, title: &str) -> Result<Option<MovieCard>, TmdbError> {
        let Some(movie_id) = self.find_movie_id(title).await? else {
            return Ok(None);
        };
        let details = self.get_movie_details(movie_id).await?;
        let cast = self.get_movie_cast(movie_id).await?;
        Ok(Some(MovieCard { details, cast }))
    }
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// HTTP client for the TMDb v3 REST API, pinned to one locale.
#[derive(Clone, Debug)]
pub struct TmdbClient {
    http: Client,
    api_key: ApiKey,
    language: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(http: Client, api_key: &str, language: &str) -> Self {
        Self {
            http,
            api_key: ApiKey(api_key.to_string()),
            language: language.to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Create a client authenticated with `TMDB_API_KEY`.
    pub fn from_env(http: Client, language: &str) -> Result<Self, TmdbError> {
        let api_key = env::var("TMDB_API_KEY").map_err(|_| TmdbError::ApiKeyNotSet)?;
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TmdbError::ApiKeyNotSet);
        }
        Ok(Self::new(http, api_key, language))
    }

    #[cfg(test)]
    fn with_base_url(http: Client, base_url: &str, language: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::new(http, "test-key", language)
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("User-Agent", crate::USER_AGENT)
            .query(&[
                ("api_key", self.api_key.0.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => Ok(response
                .json()
                .await
                .map_err(reqwest::Error::without_url)?),
            429 => {
                warn!("TMDb API rate limited");
                Err(TmdbError::RateLimited)
            }
            code => {
                let message = extract_error_message(
                    &response
                        .text()
                        .await
                        .unwrap_or_else(|_| format!("HTTP {status}")),
                );
                warn!(status = %status, %message, "TMDb API error");
                Err(match code {
                    401 => TmdbError::Unauthorized(message),
                    404 => TmdbError::NotFound(message),
                    _ => TmdbError::Api { code, message },
                })
            }
        }
    }
}

impl MovieDatabase for TmdbClient {
    async fn find_movie_id(&self, title: &str) -> Result<Option<i64>, TmdbError> {
        let response: SearchResponse = self
            .get_json("/search/movie", &[("query", title)])
            .await?;

        let Some(first) = response.results.first() else {
            debug!(%title, "no search results");
            return Ok(None);
        };
        debug!(
            %title,
            movie_id = first.id,
            matched = first.title.as_deref().unwrap_or_default(),
            release_date = first.release_date.as_deref().unwrap_or_default(),
            total = response.total_results,
            "search matched"
        );
        Ok(Some(first.id))
    }

    async fn get_movie_details(&self, movie_id: i64) -> Result<MovieDetails, TmdbError> {
        let raw: DetailsResponse = self.get_json(&format!("/movie/{movie_id}"), &[]).await?;
        Ok(unmarshal_details(raw))
    }

    async fn get_movie_cast(&self, movie_id: i64) -> Result<MovieCast, TmdbError> {
        let raw: CreditsResponse = self
            .get_json(&format!("/movie/{movie_id}/credits"), &[])
            .await?;
        Ok(unmarshal_credits(raw))
    }
}

fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(ApiError {
            status_code: Some(code),
            status_message: Some(message),
        }) => format!("{message} (TMDb status {code})"),
        Ok(ApiError {
            status_message: Some(message),
            ..
        }) => message,
        _ => body.chars().take(200).collect(),
    }
}
