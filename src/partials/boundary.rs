use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::partials;

/// Error page for a caught non-2xx status. Shows the status line verbatim.
pub(crate) fn not_found(status: StatusCode) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (partials::head::head("Article was not found"))
            body {
                main class="content" {
                    h1 class="title" {
                        (status.as_str()) " " (status.canonical_reason().unwrap_or_default())
                    }
                    div { "Article was not found" }
                }
            }
        }
    }
}

/// Fallback page for unhandled errors. Says nothing about the cause.
pub(crate) fn error() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (partials::head::head("folio"))
            body {
                main class="content" {
                    div { "Something went wrong." }
                }
            }
        }
    }
}
