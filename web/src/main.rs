use anyhow::Result;
use axum::{
    RequestPartsExt, Router,
    extract::{FromRequestParts, MatchedPath, rejection::MatchedPathRejection},
    http::request::Parts,
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_template::engine::Engine;
use clap::Parser;
use minijinja::Environment;
use state::{AppState, SharedState};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod error;
mod html;
mod state;

const APP_PREFIX: &str = "/app/";

pub(crate) fn app_url(value: &str) -> String {
    [APP_PREFIX, value.trim_start_matches('/')].join("")
}

pub(crate) type TemplateEngine = Engine<Environment<'static>>;

/// Build the template engine for the templates found under `datadir`
pub(crate) fn template_engine(datadir: &Path) -> TemplateEngine {
    let mut jinja = Environment::new();
    jinja.set_loader(minijinja::path_loader(datadir.join("templates")));
    // minijinja only looks at the final extension, so .html.j2 templates
    // would not get html escaping by default
    jinja.set_auto_escape_callback(|name| {
        if name.ends_with(".html.j2") {
            minijinja::AutoEscape::Html
        } else {
            minijinja::AutoEscape::None
        }
    });
    jinja.add_filter("app_url", app_url);
    Engine::from(jinja)
}

// Because minijinja loads an entire folder, we need to remove the `/` prefix
// and add a `.html.j2` suffix. We can implement our own custom key extractor
// that transforms the key
pub(crate) struct TemplateKey(pub String);

impl<S> FromRequestParts<S> for TemplateKey
where
    S: Send + Sync,
{
    type Rejection = MatchedPathRejection;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let mut key = parts
            .extract::<MatchedPath>()
            .await?
            .as_str()
            .trim_start_matches(APP_PREFIX)
            .replace('/', "_");

        if key.is_empty() {
            key = "_INDEX".to_string();
        }
        key.push_str(".html.j2");
        Ok(TemplateKey(key))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// path of the sqlite database file (created on first start)
    #[arg(short, long, default_value = "cityspots.sqlite")]
    pub database: String,
    #[arg(short, long, default_value = "localhost")]
    pub listen: String,
    #[arg(short, long, default_value = "8080")]
    pub port: u16,
    /// directory that contains the `templates` and `static` directories
    #[arg(long, default_value = "web")]
    pub datadir: PathBuf,
    /// directory where uploaded pictures are stored
    #[arg(short, long, default_value = "pics")]
    pub uploads_dir: PathBuf,
}

fn build_app(state: AppState) -> Router {
    let static_dir = state.datadir.join("static");
    let uploads_dir = state.uploads_dir.clone();
    Router::new()
        .route("/", get(root))
        .nest(APP_PREFIX, html::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .nest_service("/pics", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("SPOTSWEB_LOG"))
        .init();
    let args = Cli::parse();
    debug!("using database '{}'", args.database);

    let state = Arc::new(SharedState::new(&args.database, args.datadir, args.uploads_dir).await?);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind((args.listen.as_str(), args.port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn root() -> impl IntoResponse {
    Redirect::permanent(APP_PREFIX)
}

#[cfg(test)]
pub(crate) fn test_app(pool: sqlx::Pool<sqlx::Sqlite>) -> (Router, AppState, tempfile::TempDir) {
    let uploads = tempfile::tempdir().expect("failed to create uploads dir");
    let state = Arc::new(SharedState::test(pool, uploads.path().join("pics")));
    (build_app(state.clone()), state, uploads)
}
