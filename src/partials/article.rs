use maud::{DOCTYPE, Markup, html};

use crate::blocks;
use crate::partials;
use crate::site::PageData;

/// Author list and date. The author header is skipped entirely when the
/// article names no authors.
fn header(article: &PageData) -> Markup {
    html! {
        @if let Some(date) = article.frontmatter.date {
            time class="date" datetime=(date) { (date) }
        }
        @if !article.frontmatter.author.is_empty() {
            header class="authors" {
                ol {
                    @for author in &article.frontmatter.author {
                        li { (author) }
                    }
                }
            }
        }
    }
}

/// Render a full article page: title, authors, content blocks in order and
/// the footer navigation. Every block render gets the page's reference table.
pub(crate) fn page(article: &PageData) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (partials::head::head(&article.frontmatter.title))
            body {
                main class="content" {
                    h1 class="title" { (article.frontmatter.title) }
                    (header(article))
                    @for (index, node) in article.blocks().iter().enumerate() {
                        (blocks::content_block(index, node, &article.references))
                    }
                    (partials::footer::footer(&article.footer))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Folder, PageEntry};

    fn folder() -> Folder {
        Folder {
            name: "docs".to_owned(),
            title: "Docs".to_owned(),
            index: "intro".to_owned(),
            pages: vec![
                PageEntry {
                    id: "intro".to_owned(),
                    title: "Introduction".to_owned(),
                },
                PageEntry {
                    id: "guide".to_owned(),
                    title: "Guide".to_owned(),
                },
            ],
        }
    }

    #[test]
    fn authors_render_as_ordered_list() {
        let source = "+++\ntitle = \"Guide\"\nauthor = [\"Ada\", \"Grace\"]\n+++\n\nBody.\n";
        let page_data = PageData::from_source(source, &folder(), "guide").expect("loading page");

        let html = page(&page_data).into_string();
        assert!(html.contains("<ol><li>Ada</li><li>Grace</li></ol>"));
    }

    #[test]
    fn no_author_list_without_authors() {
        let source = "+++\ntitle = \"Guide\"\n+++\n\nBody.\n";
        let page_data = PageData::from_source(source, &folder(), "guide").expect("loading page");

        let html = page(&page_data).into_string();
        assert!(!html.contains("class=\"authors\""));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn blocks_rendered_in_order_with_footer() {
        let source = "+++\ntitle = \"Guide\"\n+++\n\nOne.\n\nTwo.\n";
        let page_data = PageData::from_source(source, &folder(), "guide").expect("loading page");

        let html = page(&page_data).into_string();
        let first = html.find("id=\"0\"").expect("block 0");
        let second = html.find("id=\"1\"").expect("block 1");
        assert!(first < second);
        // Previous page in the folder's reading order is the index article.
        assert!(html.contains("href=\"/docs\">Introduction"));
    }

    #[test]
    fn title_and_date_render() {
        let source = "+++\ntitle = \"Guide\"\ndate = \"2024-05-01\"\n+++\n\nBody.\n";
        let page_data = PageData::from_source(source, &folder(), "guide").expect("loading page");

        let html = page(&page_data).into_string();
        assert!(html.contains("<h1 class=\"title\">Guide</h1>"));
        assert!(html.contains("datetime=\"2024-05-01\""));
    }
}
