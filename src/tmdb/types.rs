use serde::{Deserialize, Deserializer};

/// TMDb sends `null` for unknown values; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response from `GET /search/movie`.
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u64,
}

#[derive(Deserialize, Debug)]
pub struct SearchResult {
    pub id: i64,
    pub title: Option<String>,
    pub release_date: Option<String>,
}

/// Response from `GET /movie/{id}`.
#[derive(Deserialize, Debug)]
pub struct DetailsResponse {
    pub id: i64,
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_companies: Vec<Company>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_countries: Vec<Country>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct Genre {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Company {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Country {
    pub iso_3166_1: String,
}

/// Response from `GET /movie/{id}/credits`. Crew is not deserialized.
#[derive(Deserialize, Debug)]
pub struct CreditsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastEntry>,
}

#[derive(Deserialize, Debug)]
pub struct CastEntry {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub character: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: u8,
}

/// Error body TMDb returns alongside non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub status_code: Option<u32>,
    pub status_message: Option<String>,
}
