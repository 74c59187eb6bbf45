use maud::{Markup, html};

use crate::site::FooterLink;

/// Render the footer navigation links.
pub(crate) fn footer(links: &[FooterLink]) -> Markup {
    html! {
        footer class="footer" {
            nav {
                @for link in links {
                    a href=(link.url) { (link.title) }
                }
            }
        }
    }
}
