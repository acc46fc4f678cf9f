//! Admin panel: list, create, edit and delete movies.
//!
//! After every successful write the list is reloaded. `load` drops the
//! all-movies entry before reading so the panel always shows server state.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::error::{ApiError, ValidationError};
use crate::forms::MovieForm;
use crate::service::{MovieService, ReadOp};
use crate::transport::Transport;
use crate::types::{Movie, MovieId};

#[derive(Debug, Clone, Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AdminPanel<T> {
    service: Arc<MovieService<T>>,
    movies: Vec<Movie>,
    loading: bool,
    error: Option<String>,
    selected: Option<Movie>,
    form: MovieForm,
    form_open: bool,
}

impl<T: Transport> AdminPanel<T> {
    pub fn new(service: Arc<MovieService<T>>) -> Self {
        Self {
            service,
            movies: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            form: MovieForm::default(),
            form_open: false,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &MovieForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut MovieForm {
        &mut self.form
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    /// Refetch the movie list, bypassing any cached copy.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        self.service.invalidate(&ReadOp::AllMovies.cache_key());
        let result = self.service.all_movies().await;
        self.loading = false;
        match result {
            Ok(movies) => {
                self.movies = movies;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some("Failed to load movies".to_string());
                Err(err)
            }
        }
    }

    /// Refresh the list after a successful write. A failed reload only sets
    /// `error`; the write itself is still reported as done.
    async fn reload_after_write(&mut self) {
        if let Err(err) = self.load().await {
            debug!(error = %err, "reload after write failed");
        }
    }

    /// Open the form prefilled with `movie`; the next submit updates it.
    pub fn edit(&mut self, movie: &Movie) {
        self.selected = Some(movie.clone());
        self.form = MovieForm::from_movie(movie);
        self.form_open = true;
    }

    /// Validate the form, then update the selected movie or add a new one.
    /// Returns a confirmation notice.
    pub async fn submit(&mut self) -> Result<String, AdminError> {
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };

        self.loading = true;
        let result = match &self.selected {
            Some(movie) => self
                .service
                .update_movie(&movie.id, &input)
                .await
                .map(|saved| format!("Movie \"{}\" updated", saved.title)),
            None => self
                .service
                .add_movie(&input)
                .await
                .map(|saved| format!("Movie \"{}\" added", saved.title)),
        };
        self.loading = false;

        match result {
            Ok(notice) => {
                info!("{notice}");
                self.reset();
                self.reload_after_write().await;
                Ok(notice)
            }
            Err(err) => {
                let verb = if self.selected.is_some() { "update" } else { "add" };
                self.error = Some(format!("Failed to {verb} movie: {err}"));
                Err(err.into())
            }
        }
    }

    pub async fn delete(&mut self, id: &MovieId, title: &str) -> Result<String, ApiError> {
        self.loading = true;
        let result = self.service.delete_movie(id).await;
        self.loading = false;

        match result {
            Ok(()) => {
                let notice = format!("Movie \"{title}\" deleted");
                info!("{notice}");
                self.reload_after_write().await;
                Ok(notice)
            }
            Err(err) => {
                self.error = Some(format!("Failed to delete movie: {err}"));
                Err(err)
            }
        }
    }

    /// Clear the selection, close the form and dismiss any error.
    pub fn reset(&mut self) {
        self.selected = None;
        self.form = MovieForm::default();
        self.form_open = false;
        self.error = None;
    }
}
