use axum::extract::State;
use maud::{DOCTYPE, Markup, html};

use crate::{Site, partials};

/// Landing page listing the site's folders.
pub(crate) async fn home(State(site): State<Site>) -> Markup {
    let folders: Vec<(String, String)> = {
        let site = site.lock().unwrap();
        site.folders()
            .iter()
            .map(|folder| (folder.name.clone(), folder.title.clone()))
            .collect()
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            (partials::head::head("folio"))
            body {
                main class="content" {
                    h1 class="title" { "folio" }
                    ul class="folders" {
                        @for (name, title) in &folders {
                            li { a href={ "/" (name) } { (title) } }
                        }
                    }
                }
            }
        }
    }
}
