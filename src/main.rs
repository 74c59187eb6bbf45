mod assets;
mod blocks;
mod pages;
mod partials;
mod site;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use futures_concurrency::future::Join;
use notify::event::{AccessKind, AccessMode};
use notify::{EventKind, Watcher};

/// The shared [`site::Site`].
pub(crate) type Site = Arc<Mutex<site::Site>>;

/// Reload the site config whenever it is written.
async fn watch(site: Site) -> Result<()> {
    let root = site.lock().unwrap().root().to_path_buf();

    tokio::task::spawn_blocking(move || {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |result| {
            if let Ok(notify::Event { kind, paths, .. }) = result
                && matches!(
                    kind,
                    EventKind::Access(AccessKind::Close(AccessMode::Write))
                )
            {
                for path in paths.into_iter() {
                    if path
                        .file_name()
                        .map(|name| name == site::CONFIG_FILE)
                        .unwrap_or(false)
                    {
                        tracing::debug!(?path, "changed");
                        tx.send(path).unwrap();
                    }
                }
            }
        })?;

        watcher.watch(&root, notify::RecursiveMode::NonRecursive)?;

        while rx.recv().is_ok() {
            match site.lock().unwrap().reload() {
                Ok(()) => tracing::info!("reloaded site config"),
                Err(err) => tracing::warn!(%err, "failed to reload site config"),
            }
        }

        Ok::<_, anyhow::Error>(())
    })
    .await??;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let root = std::env::var("FOLIO_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    let site = Arc::new(Mutex::new(site::Site::load(root)?));

    let app = Router::new()
        .route("/", get(pages::home::home))
        .route("/{folder}", get(pages::article::index))
        .route("/{folder}/{id}", get(pages::article::article))
        .route("/app.css", get(assets::css))
        .fallback(pages::not_found)
        .with_state(site.clone());

    tracing::info!("serving on localhost:8000");
    let listener = tokio::net::TcpListener::bind("localhost:8000").await?;
    let _ = (watch(site), axum::serve(listener, app)).join().await;

    Ok(())
}
