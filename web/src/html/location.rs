use super::{FlashMessage, FlashMessageKind, category_options};
use crate::{TemplateKey, error::Error, state::AppState};
use axum::{
    Form, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use libspots::{
    empty_string_as_none,
    location::{Category, Location},
};
use minijinja::context;
use serde::{Deserialize, Serialize};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(map_page))
        .route("/location/new", post(new_location))
}

/// The map page: a marker for every location plus the full location table.
/// This is the default page of the app.
async fn map_page(
    TemplateKey(key): TemplateKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let locations = Location::load_all(&state.db).await?;
    Ok(state.render_template(&key, context!(locations, categories => category_options())))
}

#[derive(Debug, Deserialize, Serialize)]
struct LocationParams {
    #[serde(deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    latitude: Option<f64>,
    #[serde(deserialize_with = "empty_string_as_none")]
    longitude: Option<f64>,
    category: Category,
}

async fn do_insert(params: &LocationParams, state: &AppState) -> Result<Location, Error> {
    let mut loc = Location::new(
        params
            .name
            .as_ref()
            .ok_or_else(|| Error::RequiredParameterMissing("name".to_string()))?
            .clone(),
        params
            .latitude
            .ok_or_else(|| Error::RequiredParameterMissing("latitude".to_string()))?,
        params
            .longitude
            .ok_or_else(|| Error::RequiredParameterMissing("longitude".to_string()))?,
        params.category,
    );
    // the form widgets constrain the coordinate ranges, but a direct POST
    // bypasses them, so the bounds are re-checked here
    loc.validate()?;
    loc.insert(&state.db).await?;
    Ok(loc)
}

async fn new_location(
    State(state): State<AppState>,
    Form(params): Form<LocationParams>,
) -> Result<impl IntoResponse, Error> {
    let (message, request) = match do_insert(&params, &state).await {
        Ok(loc) => (
            FlashMessage {
                kind: FlashMessageKind::Success,
                msg: format!("Added {}!", loc.name),
            },
            None,
        ),
        Err(e) => (
            FlashMessage {
                kind: FlashMessageKind::Error,
                msg: e.to_string(),
            },
            Some(&params),
        ),
    };
    // re-render the map page from a fresh read so the new marker shows up
    let locations = Location::load_all(&state.db).await?;
    Ok(state.render_template(
        "_INDEX.html.j2",
        context!(locations, categories => category_options(), message, request),
    ))
}
