use crate::{TemplateEngine, template_engine};
use anyhow::{Context, Result};
use axum_template::RenderHtml;
use libspots::Database;
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use tracing::trace;

#[derive(Debug)]
pub struct SharedState {
    pub db: Database,
    pub tmpl: TemplateEngine,
    pub datadir: PathBuf,
    pub uploads_dir: PathBuf,
}

impl SharedState {
    pub async fn new(database: &str, datadir: PathBuf, uploads_dir: PathBuf) -> Result<Self> {
        trace!("Creating shared app state");
        let db = Database::open(database)
            .await
            .with_context(|| format!("Unable to open database {database}"))?;
        Ok(Self {
            db,
            tmpl: template_engine(&datadir),
            datadir,
            uploads_dir,
        })
    }

    pub fn render_template<S: Serialize>(
        &self,
        key: &str,
        ctx: S,
    ) -> RenderHtml<String, TemplateEngine, S> {
        RenderHtml(key.to_string(), self.tmpl.clone(), ctx)
    }

    #[cfg(test)]
    pub fn test(pool: sqlx::Pool<sqlx::Sqlite>, uploads_dir: PathBuf) -> Self {
        // tests run with the package root as working directory, so the
        // templates are found at ./templates
        Self {
            db: pool.into(),
            tmpl: template_engine(std::path::Path::new(".")),
            datadir: ".".into(),
            uploads_dir,
        }
    }
}

pub type AppState = Arc<SharedState>;
