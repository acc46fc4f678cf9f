use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
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

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_year: i32,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub backdrop_url: String,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub is_top_rated: bool,
}

impl MovieInput {
    fn into_movie(self, id: String) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            duration: self.duration,
            rating: self.rating,
            genres: self.genres,
            director: self.director,
            poster_url: self.poster_url,
            backdrop_url: self.backdrop_url,
            is_trending: self.is_trending,
            is_top_rated: self.is_top_rated,
        }
    }
}

/// List filters; an absent flag does not filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilter {
    pub is_trending: Option<bool>,
    pub is_top_rated: Option<bool>,
}

impl MovieFilter {
    fn matches(&self, movie: &Movie) -> bool {
        self.is_trending.map_or(true, |t| movie.is_trending == t)
            && self.is_top_rated.map_or(true, |t| movie.is_top_rated == t)
    }
}

/// Movies keyed by id. Kept ordered by insertion through `order`.
#[derive(Default)]
pub struct Store {
    movies: HashMap<String, Movie>,
    order: Vec<String>,
}

impl Store {
    fn insert(&mut self, movie: Movie) {
        if !self.movies.contains_key(&movie.id) {
            self.order.push(movie.id.clone());
        }
        self.movies.insert(movie.id.clone(), movie);
    }

    fn remove(&mut self, id: &str) -> Option<Movie> {
        let removed = self.movies.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    fn list(&self, filter: &MovieFilter) -> Vec<Movie> {
        self.order
            .iter()
            .filter_map(|id| self.movies.get(id))
            .filter(|movie| filter.matches(movie))
            .cloned()
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router preloaded with `movies`.
pub fn app_with(movies: Vec<Movie>) -> Router {
    let mut store = Store::default();
    for movie in movies {
        store.insert(movie);
    }
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_movies(State(db): State<Db>, Query(filter): Query<MovieFilter>) -> Json<Vec<Movie>> {
    Json(db.read().await.list(&filter))
}

async fn create_movie(
    State(db): State<Db>,
    Json(input): Json<MovieInput>,
) -> (StatusCode, Json<Movie>) {
    let movie = input.into_movie(Uuid::new_v4().to_string());
    tracing::info!(id = %movie.id, title = %movie.title, "movie created");
    db.write().await.insert(movie.clone());
    (StatusCode::CREATED, Json(movie))
}

async fn get_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, StatusCode> {
    let store = db.read().await;
    store.movies.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<MovieInput>,
) -> Result<Json<Movie>, StatusCode> {
    let mut store = db.write().await;
    if !store.movies.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let movie = input.into_movie(id);
    tracing::info!(id = %movie.id, "movie updated");
    store.insert(movie.clone());
    Ok(Json(movie))
}

async fn delete_movie(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id = %removed.id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
