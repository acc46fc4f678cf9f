//! Admin movie form: raw field values and their validation into a payload.
//!
//! Validation is purely local; a form that fails it never reaches the
//! service. Numeric fields are lenient: blank or unparsable input falls back
//! to a default instead of failing.

use chrono::Datelike;

use crate::error::ValidationError;
use crate::types::{Movie, MovieInput};

/// Field values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieForm {
    pub title: String,
    pub description: String,
    pub release_year: String,
    pub duration: String,
    pub rating: String,
    pub genres: Vec<String>,
    pub director: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub is_trending: bool,
    pub is_top_rated: bool,
}

impl MovieForm {
    /// Prefill the form for editing `movie`. Zero numbers show as blank.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_year: blank_if_zero(movie.release_year),
            duration: blank_if_zero(movie.duration),
            rating: if movie.rating == 0.0 {
                String::new()
            } else {
                movie.rating.to_string()
            },
            genres: movie.genres.clone(),
            director: movie.director.clone(),
            poster_url: movie.poster_url.clone(),
            backdrop_url: movie.backdrop_url.clone(),
            is_trending: movie.is_trending,
            is_top_rated: movie.is_top_rated,
        }
    }

    /// Validate against the current calendar year.
    pub fn validate(&self) -> Result<MovieInput, ValidationError> {
        self.validate_with_year(chrono::Local::now().year())
    }

    /// Validate, defaulting a missing release year to `current_year`.
    pub fn validate_with_year(&self, current_year: i32) -> Result<MovieInput, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let release_year = match self.release_year.trim().parse::<i32>() {
            Ok(year) if year != 0 => year,
            _ => current_year,
        };
        let duration = self.duration.trim().parse::<u32>().unwrap_or(0);
        let rating = match self.rating.trim().parse::<f64>() {
            Ok(r) if r.is_finite() => r,
            _ => 0.0,
        };
        if !(0.0..=5.0).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }

        Ok(MovieInput {
            title: self.title.clone(),
            description: self.description.clone(),
            release_year,
            duration,
            rating,
            genres: self.genres.clone(),
            director: self.director.clone(),
            poster_url: self.poster_url.clone(),
            backdrop_url: self.backdrop_url.clone(),
            is_trending: self.is_trending,
            is_top_rated: self.is_top_rated,
        })
    }
}

fn blank_if_zero<N: PartialEq + Default + ToString>(n: N) -> String {
    if n == N::default() {
        String::new()
    } else {
        n.to_string()
    }
}
