use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::pages::PageError;
use crate::site::PageData;
use crate::{Site, partials};

/// Outcome of the route loader.
pub(crate) enum Loaded {
    /// The request named the folder's index article directly.
    Redirect(String),
    Page(Box<PageData>),
}

/// Resolve the folder, pick the effective article id and load its page data.
///
/// `id` is `None` on the folder index route, where the folder's own index id
/// is used instead.
pub(crate) async fn load(
    site: Site,
    folder_name: &str,
    id: Option<&str>,
) -> Result<Loaded, PageError> {
    let (folder, root) = {
        let site = site.lock().unwrap();
        let Some(folder) = site.folder(folder_name) else {
            tracing::debug!(folder = folder_name, "unknown folder");
            return Err(PageError::NotFound);
        };
        (folder.clone(), site.root().to_path_buf())
    };

    // The index article lives at the folder's bare path.
    if id == Some(folder.index.as_str()) {
        return Ok(Loaded::Redirect(format!("/{folder_name}")));
    }

    let id = id.unwrap_or(&folder.index).to_owned();
    let page = tokio::task::spawn_blocking(move || PageData::load(&root, &folder, &id))
        .await
        .map_err(|_| PageError::Internal)?
        .map_err(|err| {
            tracing::error!(%err, folder = folder_name, "failed to load article");
            PageError::NotFound
        })?;

    Ok(Loaded::Page(Box::new(page)))
}

/// Serve one article of a folder.
pub(crate) async fn article(
    State(site): State<Site>,
    Path((folder, id)): Path<(String, String)>,
) -> Result<Response, PageError> {
    match load(site, &folder, Some(&id)).await? {
        Loaded::Redirect(to) => Ok(Redirect::to(&to).into_response()),
        Loaded::Page(page) => Ok(partials::article::page(&page).into_response()),
    }
}

/// Serve the folder's canonical index article.
pub(crate) async fn index(
    State(site): State<Site>,
    Path(folder): Path<String>,
) -> Result<Response, PageError> {
    match load(site, &folder, None).await? {
        Loaded::Redirect(to) => Ok(Redirect::to(&to).into_response()),
        Loaded::Page(page) => Ok(partials::article::page(&page).into_response()),
    }
}
