//! Domain records built from TMDb responses: details, cast, and the combined movie card.

use serde::Serialize;

use crate::tmdb::types::{CastEntry, CreditsResponse, DetailsResponse};

/// Static attributes of one movie.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub tmdb_id: i64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub original_title: String,
    pub original_language: String,
    pub overview: String,
    pub tagline: Option<String>,
    /// `YYYY-MM-DD`, or empty when TMDb has no date.
    pub release_date: String,
    pub runtime: Option<u32>,
    pub budget: u64,
    pub revenue: u64,
    pub genres: Vec<String>,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    pub status: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CastMember {
    pub tmdb_id: i64,
    pub name: String,
    pub character: String,
    pub order: u32,
    pub gender: u8,
}

/// Cast members in billing order.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct MovieCast(pub Vec<CastMember>);

/// Details and cast of a single movie. Never built without both halves.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MovieCard {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub cast: MovieCast,
}

pub fn unmarshal_details(raw: DetailsResponse) -> MovieDetails {
    MovieDetails {
        tmdb_id: raw.id,
        imdb_id: raw.imdb_id.filter(|id| !id.is_empty()),
        title: raw.title,
        original_title: raw.original_title,
        original_language: raw.original_language,
        overview: raw.overview.unwrap_or_default(),
        tagline: raw.tagline.filter(|t| !t.is_empty()),
        release_date: raw.release_date.unwrap_or_default(),
        runtime: raw.runtime,
        budget: raw.budget,
        revenue: raw.revenue,
        genres: raw.genres.into_iter().map(|g| g.name).collect(),
        production_companies: raw.production_companies.into_iter().map(|c| c.name).collect(),
        production_countries: raw
            .production_countries
            .into_iter()
            .map(|c| c.iso_3166_1)
            .collect(),
        vote_average: raw.vote_average,
        vote_count: raw.vote_count,
        popularity: raw.popularity,
        status: raw.status,
    }
}

pub fn unmarshal_credits(raw: CreditsResponse) -> MovieCast {
    let mut members: Vec<CastMember> = raw.cast.into_iter().map(cast_member).collect();
    members.sort_by_key(|m| m.order);
    MovieCast(members)
}

fn cast_member(entry: CastEntry) -> CastMember {
    CastMember {
        tmdb_id: entry.id,
        name: entry.name,
        character: entry.character.unwrap_or_default(),
        order: entry.order,
        gender: entry.gender,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joker_details() -> DetailsResponse {
        serde_json::from_value(serde_json::json!({
            "id": 475557,
            "imdb_id": "tt7286456",
            "title": "Joker",
            "original_title": "Joker",
            "original_language": "en",
            "overview": "Dans les années 1980, à Gotham City...",
            "tagline": "",
            "release_date": "2019-10-09",
            "runtime": 122,
            "budget": 55000000,
            "revenue": 1074251311,
            "genres": [{"id": 80, "name": "Crime"}, {"id": 53, "name": "Thriller"}],
            "production_companies": [{"id": 174, "name": "Warner Bros. Pictures", "origin_country": "US"}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "vote_average": 8.2,
            "vote_count": 24000,
            "popularity": 90.5,
            "status": "Released"
        }))
        .unwrap()
    }

    #[test]
    fn details_flatten_nested_lists_to_names() {
        let details = unmarshal_details(joker_details());

        assert_eq!(details.tmdb_id, 475557);
        assert_eq!(details.genres, vec!["Crime", "Thriller"]);
        assert_eq!(details.production_companies, vec!["Warner Bros. Pictures"]);
        assert_eq!(details.production_countries, vec!["US"]);
        assert_eq!(details.runtime, Some(122));
    }

    #[test]
    fn empty_tagline_becomes_none() {
        assert!(unmarshal_details(joker_details()).tagline.is_none());
    }

    #[test]
    fn missing_release_date_is_empty_string() {
        let raw: DetailsResponse =
            serde_json::from_value(serde_json::json!({"id": 2, "release_date": null})).unwrap();
        assert_eq!(unmarshal_details(raw).release_date, "");
    }

    #[test]
    fn cast_sorted_by_billing_order() {
        let raw: CreditsResponse = serde_json::from_value(serde_json::json!({
            "cast": [
                {"id": 2, "name": "Robert De Niro", "character": "Murray Franklin", "order": 2},
                {"id": 1, "name": "Joaquin Phoenix", "character": "Arthur Fleck", "order": 0},
                {"id": 3, "name": "Zazie Beetz", "character": null, "order": 1}
            ]
        }))
        .unwrap();

        let cast = unmarshal_credits(raw);
        let names: Vec<&str> = cast.0.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Joaquin Phoenix", "Zazie Beetz", "Robert De Niro"]);
        assert_eq!(cast.0[1].character, "");
    }

    #[test]
    fn card_serializes_details_flat_with_cast_array() {
        let card = MovieCard {
            details: unmarshal_details(joker_details()),
            cast: MovieCast(vec![CastMember {
                tmdb_id: 73421,
                name: "Joaquin Phoenix".into(),
                character: "Arthur Fleck".into(),
                order: 0,
                gender: 2,
            }]),
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["tmdb_id"], 475557);
        assert_eq!(json["title"], "Joker");
        assert_eq!(json["cast"][0]["name"], "Joaquin Phoenix");
        assert!(json.get("details").is_none());
    }
}
