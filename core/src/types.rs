//! Domain DTOs for the movie API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates. Field
//! names are camelCase on the wire. Descriptive fields default when the
//! remote API omits them, so a sparse record still deserializes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque movie identifier assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A movie record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_year: i32,
    /// Running time in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub director: String,
    /// Landscape artwork (288x162), used by landscape carousels.
    #[serde(default)]
    pub poster_url: String,
    /// Portrait artwork (200x300).
    #[serde(default)]
    pub backdrop_url: String,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_top_rated: bool,
}

/// Request payload for creating a movie or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub duration: u32,
    pub rating: f64,
    pub genres: Vec<String>,
    pub director: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub is_trending: bool,
    pub is_top_rated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_uses_camel_case_on_the_wire() {
        let movie: Movie = serde_json::from_str(
            r#"{"id":"7","title":"Dune","releaseYear":2021,"isTrending":true,"posterUrl":"p.jpg"}"#,
        )
        .unwrap();
        assert_eq!(movie.id, MovieId::new("7"));
        assert_eq!(movie.release_year, 2021);
        assert!(movie.is_trending);
        assert!(!movie.is_top_rated);
        assert_eq!(movie.poster_url, "p.jpg");
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn movie_requires_id_and_title() {
        assert!(serde_json::from_str::<Movie>(r#"{"title":"No id"}"#).is_err());
        assert!(serde_json::from_str::<Movie>(r#"{"id":"1"}"#).is_err());
    }

    #[test]
    fn movie_input_serializes_every_field() {
        let input = MovieInput {
            title: "Heat".to_string(),
            rating: 4.5,
            is_top_rated: true,
            ..MovieInput::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["title"], "Heat");
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["isTopRated"], true);
        assert_eq!(json["backdropUrl"], "");
        assert!(json.get("id").is_none());
    }
}
