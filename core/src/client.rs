//! Stateless HTTP request builder and response parser for the movie API.
//!
//! # Design
//! `MovieClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The `decode_*` helpers parse an already status-checked body; the service
//! uses them for payloads served from the cache.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Movie, MovieId, MovieInput};

/// Bytes escaped inside one path segment: the URL path set plus `/` and `%`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Which slice of the catalog a list request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieFilter {
    All,
    Trending,
    TopRated,
}

impl MovieFilter {
    fn query(self) -> &'static str {
        match self {
            MovieFilter::All => "",
            MovieFilter::Trending => "?isTrending=true",
            MovieFilter::TopRated => "?isTopRated=true",
        }
    }
}

/// Synchronous, stateless client for the movie API.
#[derive(Debug, Clone)]
pub struct MovieClient {
    base_url: String,
}

impl MovieClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn movie_path(&self, id: &MovieId) -> String {
        format!("{}/movies/{}", self.base_url, utf8_percent_encode(id.as_str(), SEGMENT))
    }

    pub fn build_list_movies(&self, filter: MovieFilter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/movies{}", self.base_url, filter.query()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_movie(&self, id: &MovieId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.movie_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_movie(&self, input: &MovieInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/movies", self.base_url),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_movie(
        &self,
        id: &MovieId,
        input: &MovieInput,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.movie_path(id),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_movie(&self, id: &MovieId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.movie_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_movies(&self, response: HttpResponse) -> Result<Vec<Movie>, ApiError> {
        check_status(&response, &[200])?;
        decode_movies(&response.body)
    }

    pub fn parse_get_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response, &[200])?;
        decode_movie(&response.body)
    }

    pub fn parse_create_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response, &[200, 201])?;
        decode_movie(&response.body)
    }

    pub fn parse_update_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response, &[200])?;
        decode_movie(&response.body)
    }

    pub fn parse_delete_movie(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])?;
        Ok(())
    }
}

pub fn decode_movies(body: &str) -> Result<Vec<Movie>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

pub fn decode_movie(body: &str) -> Result<Movie, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn encode(input: &MovieInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_JSON: &str = r#"{"id":"1","title":"Alien","description":"In space","releaseYear":1979,"duration":117,"rating":4.6,"genres":["Horror","Sci-Fi"],"director":"Ridley Scott","posterUrl":"","backdropUrl":"","isTrending":false,"isTopRated":true}"#;

    fn client() -> MovieClient {
        MovieClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_movies_per_filter() {
        let c = client();
        let req = c.build_list_movies(MovieFilter::All);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/movies");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());

        assert_eq!(
            c.build_list_movies(MovieFilter::Trending).path,
            "http://localhost:3000/movies?isTrending=true"
        );
        assert_eq!(
            c.build_list_movies(MovieFilter::TopRated).path,
            "http://localhost:3000/movies?isTopRated=true"
        );
    }

    #[test]
    fn build_get_movie_produces_correct_request() {
        let req = client().build_get_movie(&MovieId::new("42"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/movies/42");
    }

    #[test]
    fn movie_id_is_encoded_as_one_path_segment() {
        let c = client();
        let id = MovieId::new("a/b?c#d e%");
        let expected = "http://localhost:3000/movies/a%2Fb%3Fc%23d%20e%25";
        assert_eq!(c.build_get_movie(&id).path, expected);
        assert_eq!(c.build_delete_movie(&id).path, expected);
        let update = c.build_update_movie(&id, &MovieInput::default()).unwrap();
        assert_eq!(update.path, expected);

        assert_eq!(
            c.build_get_movie(&MovieId::new("6f1c-9a")).path,
            "http://localhost:3000/movies/6f1c-9a"
        );
    }

    #[test]
    fn build_create_movie_produces_correct_request() {
        let input = MovieInput {
            title: "Arrival".to_string(),
            description: "Linguistics".to_string(),
            release_year: 2016,
            ..MovieInput::default()
        };
        let req = client().build_create_movie(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/movies");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Arrival");
        assert_eq!(body["releaseYear"], 2016);
    }

    #[test]
    fn build_update_movie_produces_correct_request() {
        let input = MovieInput {
            title: "Arrival (2016)".to_string(),
            ..MovieInput::default()
        };
        let req = client().build_update_movie(&MovieId::new("9"), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/movies/9");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Arrival (2016)");
    }

    #[test]
    fn build_delete_movie_produces_correct_request() {
        let req = client().build_delete_movie(&MovieId::new("9"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/movies/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_movies_success() {
        let response = HttpResponse::new(200, format!("[{MOVIE_JSON}]"));
        let movies = client().parse_list_movies(response).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Alien");
        assert_eq!(movies[0].genres, vec!["Horror", "Sci-Fi"]);
    }

    #[test]
    fn parse_get_movie_not_found() {
        let err = client().parse_get_movie(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_movie_accepts_200_and_201() {
        let c = client();
        for status in [200, 201] {
            let movie = c.parse_create_movie(HttpResponse::new(status, MOVIE_JSON)).unwrap();
            assert_eq!(movie.title, "Alien");
        }
    }

    #[test]
    fn parse_create_movie_wrong_status() {
        let err = client()
            .parse_create_movie(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_movie_accepts_200_and_204() {
        let c = client();
        assert!(c.parse_delete_movie(HttpResponse::new(204, "")).is_ok());
        assert!(c.parse_delete_movie(HttpResponse::new(200, MOVIE_JSON)).is_ok());
        assert!(matches!(
            c.parse_delete_movie(HttpResponse::new(404, "")).unwrap_err(),
            ApiError::NotFound
        ));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = MovieClient::new("http://localhost:3000/");
        assert_eq!(
            client.build_list_movies(MovieFilter::All).path,
            "http://localhost:3000/movies"
        );
    }

    #[test]
    fn parse_list_movies_bad_json() {
        let err = client()
            .parse_list_movies(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
