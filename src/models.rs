use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Minimal movie record used by list and grid views.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
}

/// Full metadata for one movie, used for detail rendering. Decoding is
/// stricter than for `MovieSummary`: `overview` and `genres` must be
/// present or the whole document is rejected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub tagline: Option<String>,
    pub original_language: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Cast and crew listing for one movie.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Credits {
    pub id: Option<i64>,
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub job: Option<String>,
    pub profile_path: Option<String>,
}

/// Related movies for one movie, possibly empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecommendationSet {
    pub results: Vec<MovieSummary>,
}

/// Merges paginated result pages into one list, keeping the first
/// occurrence of each id. The catalog client itself never deduplicates;
/// callers combining overlapping pages do it here.
pub fn merge_unique(pages: impl IntoIterator<Item = Vec<MovieSummary>>) -> Vec<MovieSummary> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for page in pages {
        for movie in page {
            if seen.insert(movie.id) {
                merged.push(movie);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            vote_average: None,
            release_date: None,
        }
    }

    #[test]
    fn merge_unique_keeps_first_occurrence_in_order() {
        let merged = merge_unique([
            vec![summary(1, "A"), summary(2, "B")],
            vec![summary(2, "B again"), summary(3, "C")],
        ]);
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(merged[1].title, "B");
    }

    #[test]
    fn summary_decodes_with_nullable_fields_absent() {
        let movie: MovieSummary =
            serde_json::from_str(r#"{"id": 42, "title": "Some Movie"}"#).unwrap();
        assert_eq!(movie.id, 42);
        assert!(movie.poster_path.is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn details_rejects_missing_title() {
        let result = serde_json::from_str::<MovieDetails>(
            r#"{"id": 42, "overview": "An overview.", "genres": []}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn details_decodes_full_document() {
        let details: MovieDetails = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "overview": "A hacker learns the truth.",
                "poster_path": "/matrix.jpg",
                "backdrop_path": null,
                "release_date": "1999-03-30",
                "runtime": 136,
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                "vote_average": 8.2,
                "vote_count": 24000,
                "budget": 63000000,
                "revenue": 463517383,
                "tagline": "Welcome to the Real World.",
                "original_language": "en",
                "status": "Released",
                "homepage": null
            }"#,
        )
        .unwrap();
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres[1].name, "Science Fiction");
    }

    #[test]
    fn credits_default_to_empty_crew() {
        let credits: Credits = serde_json::from_str(
            r#"{"id": 603, "cast": [{"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/neo.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(credits.cast[0].character.as_deref(), Some("Neo"));
        assert!(credits.crew.is_empty());
    }
}
