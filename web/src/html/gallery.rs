use super::{FlashMessage, FlashMessageKind, category_options};
use crate::{TemplateKey, error::Error, state::AppState};
use axum::{
    Router,
    body::Bytes,
    extract::{Multipart, State},
    response::IntoResponse,
    routing::{get, post},
};
use libspots::image::Image;
use minijinja::context;
use std::path::Path;
use tracing::warn;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/pics", get(show_gallery))
        .route("/pics/upload", post(upload_image))
}

/// The file types that the upload form offers. The `accept` attribute on the
/// file input enforces this in the browser; the handler re-checks it because
/// a direct POST can send anything.
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "png"];

#[derive(serde::Serialize)]
struct GalleryItem {
    filename: String,
    location: String,
    available: bool,
}

/// Turn the image rows into renderable gallery entries. A row whose file is
/// missing on disk gets a placeholder instead of taking down the whole page.
async fn gallery_items(state: &AppState) -> Result<Vec<GalleryItem>, Error> {
    let images = Image::load_all(&state.db).await?;
    Ok(images
        .into_iter()
        .map(|img| {
            let available = img.file_path(&state.uploads_dir).is_file();
            if !available {
                warn!(
                    "image file '{}' is missing from the uploads directory",
                    img.filename
                );
            }
            GalleryItem {
                filename: img.filename,
                location: img.location,
                available,
            }
        })
        .collect())
}

async fn show_gallery(
    TemplateKey(key): TemplateKey,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let images = gallery_items(&state).await?;
    Ok(state.render_template(&key, context!(images, categories => category_options())))
}

struct UploadParts {
    filename: Option<String>,
    content: Option<Bytes>,
    location: Option<String>,
}

async fn read_multipart(multipart: &mut Multipart) -> Result<UploadParts, Error> {
    let mut parts = UploadParts {
        filename: None,
        content: None,
        location: None,
    };
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                parts.filename = field.file_name().map(str::to_string);
                parts.content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| Error::InvalidUpload(e.to_string()))?,
                );
            }
            Some("location") => {
                parts.location = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::InvalidUpload(e.to_string()))?,
                );
            }
            _ => {}
        }
    }
    Ok(parts)
}

/// Store an uploaded picture. Returns `None` (a no-op) unless both a file
/// and a non-empty reference location were submitted.
async fn store_upload(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<Option<FlashMessage>, Error> {
    let parts = read_multipart(multipart).await?;
    let (Some(filename), Some(content)) = (parts.filename, parts.content) else {
        return Ok(None);
    };
    let Some(location) = parts.location.filter(|l| !l.is_empty()) else {
        return Ok(None);
    };

    // browsers send a bare file name, but don't trust the client: keep only
    // the final path component
    let filename = Path::new(&filename)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidUpload("the file name is not usable".to_string()))?
        .to_string();
    let extension_ok = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !extension_ok {
        return Ok(Some(FlashMessage {
            kind: FlashMessageKind::Error,
            msg: format!(
                "Only {} files can be uploaded",
                ACCEPTED_EXTENSIONS.join("/")
            ),
        }));
    }

    let mut img = Image::new(filename, location);
    img.save(&content, &state.uploads_dir, &state.db).await?;
    Ok(Some(FlashMessage {
        kind: FlashMessageKind::Success,
        msg: format!("Uploaded {} for {}!", img.filename, img.location),
    }))
}

async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let message = store_upload(&state, &mut multipart).await?;
    // re-render the gallery from a fresh read so the new picture shows up
    let images = gallery_items(&state).await?;
    Ok(state.render_template(
        "pics.html.j2",
        context!(images, categories => category_options(), message),
    ))
}
