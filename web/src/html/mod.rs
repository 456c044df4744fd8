use crate::state::AppState;
use axum::Router;
use libspots::location::Category;
use serde::Serialize;
use strum::IntoEnumIterator;

pub(crate) mod gallery;
pub(crate) mod location;
#[cfg(test)]
mod tests;

#[derive(Serialize)]
pub(crate) enum FlashMessageKind {
    Success,
    Error,
}

/// A short status message shown at the top of the page after a form
/// submission
#[derive(Serialize)]
pub(crate) struct FlashMessage {
    pub kind: FlashMessageKind,
    pub msg: String,
}

/// The options for the sidebar's closed-choice category selector
pub(crate) fn category_options() -> Vec<String> {
    Category::iter().map(|c| c.to_string()).collect()
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(location::router())
        .merge(gallery::router())
}
