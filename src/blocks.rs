//! Render article content blocks as HTML.

use std::sync::LazyLock;

use maud::{Markup, PreEscaped, html};
use regex::Regex;

use crate::site::References;

/// Citation tokens like `@smith2020` inside running text.
static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z][\w:-]*").expect("compiling regex"));

/// Resolve citation tokens through the reference table and keep the rest of
/// the text untouched.
fn text_to_html(node: &markdown::mdast::Text, references: &References) -> Markup {
    enum Part<'a> {
        Text(&'a str),
        Cite(&'a str),
    }

    let mut parts = Vec::new();
    let mut cursor = 0;

    for found in CITATION.find_iter(&node.value) {
        if found.start() > cursor {
            parts.push(Part::Text(&node.value[cursor..found.start()]));
        }
        parts.push(Part::Cite(&node.value[found.start() + 1..found.end()]));
        cursor = found.end();
    }

    if cursor < node.value.len() {
        parts.push(Part::Text(&node.value[cursor..]));
    }

    html! {
        @for part in parts {
            @match part {
                Part::Text(text) => { (text) },
                Part::Cite(key) => {
                    @if let Some(reference) = references.get(key) {
                        a href=(reference.url) class="citation" {
                            (reference.label.as_deref().unwrap_or(key))
                        }
                    } @else {
                        "@" (key)
                    }
                },
            }
        }
    }
}

/// Turn one [`markdown::mdast::Node`] into servable [`Markup`].
fn node_to_html(node: &markdown::mdast::Node, references: &References) -> Markup {
    match node {
        markdown::mdast::Node::Root(root) => html! {
            @for node in &root.children {
                (node_to_html(node, references))
            }
        },
        markdown::mdast::Node::Paragraph(paragraph) => html! {
            p {
                @for node in &paragraph.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::Heading(heading) => {
            let children = html! {
                @for node in &heading.children {
                    (node_to_html(node, references))
                }
            };

            match heading.depth {
                1 => html! { h1 { (children) } },
                2 => html! { h2 { (children) } },
                3 => html! { h3 { (children) } },
                4 => html! { h4 { (children) } },
                5 => html! { h5 { (children) } },
                _ => html! { h6 { (children) } },
            }
        }
        markdown::mdast::Node::Text(text) => html! {
            (text_to_html(text, references))
        },
        markdown::mdast::Node::Emphasis(emphasis) => html! {
            em {
                @for node in &emphasis.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::Strong(strong) => html! {
            strong {
                @for node in &strong.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::Delete(delete) => html! {
            del {
                @for node in &delete.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::InlineCode(code) => html! {
            code { (code.value) }
        },
        markdown::mdast::Node::Code(code) => html! {
            pre {
                code class=[code.lang.as_deref().map(|lang| format!("language-{lang}"))] {
                    (code.value)
                }
            }
        },
        markdown::mdast::Node::InlineMath(math) => html! {
            span class="math math-inline" { (math.value) }
        },
        markdown::mdast::Node::Math(math) => html! {
            div class="math math-display" { (math.value) }
        },
        markdown::mdast::Node::Blockquote(blockquote) => html! {
            blockquote {
                @for node in &blockquote.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::List(list) => html! {
            @if list.ordered {
                ol {
                    @for node in &list.children {
                        li { (node_to_html(node, references)) }
                    }
                }
            }
            @else {
                ul {
                    @for node in &list.children {
                        li { (node_to_html(node, references)) }
                    }
                }
            }
        },
        markdown::mdast::Node::ListItem(item) => html! {
            @for node in &item.children {
                (node_to_html(node, references))
            }
        },
        markdown::mdast::Node::Link(link) => {
            let text = html! {
                @for node in &link.children {
                    (node_to_html(node, references))
                }
            };

            html! {
                a href=(link.url) title=[link.title.as_deref()] { (text) }
            }
        }
        markdown::mdast::Node::LinkReference(reference) => {
            let text = html! {
                @for node in &reference.children {
                    (node_to_html(node, references))
                }
            };

            match references.get(&reference.identifier) {
                Some(target) => html! {
                    a href=(target.url) class="reference" title=[target.label.as_deref()] {
                        (text)
                    }
                },
                // Unresolved references degrade to the literal bracket form.
                None => html! { "[" (text) "]" },
            }
        }
        markdown::mdast::Node::Image(image) => html! {
            img src=(image.url) alt=(image.alt) title=[image.title.as_deref()];
        },
        markdown::mdast::Node::ImageReference(reference) => {
            match references.get(&reference.identifier) {
                Some(target) => html! {
                    img src=(target.url) alt=(reference.alt);
                },
                None => html! { (reference.alt) },
            }
        }
        markdown::mdast::Node::FootnoteDefinition(definition) => html! {
            aside class="footnote" id={ "fn-" (definition.identifier) } {
                @for node in &definition.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::FootnoteReference(reference) => html! {
            sup class="footnote-reference" {
                a href={ "#fn-" (reference.identifier) } { "[" (reference.identifier) "]" }
            }
        },
        markdown::mdast::Node::Table(table) => html! {
            table {
                @for node in &table.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::TableRow(row) => html! {
            tr {
                @for node in &row.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::TableCell(cell) => html! {
            td {
                @for node in &cell.children {
                    (node_to_html(node, references))
                }
            }
        },
        markdown::mdast::Node::ThematicBreak(_) => html! {
            hr;
        },
        markdown::mdast::Node::Break(_) => html! {
            br;
        },
        markdown::mdast::Node::Html(node) => html! {
            (PreEscaped(node.value.clone()))
        },
        // Definitions were collected into the reference table at load time;
        // MDX and frontmatter nodes cannot appear with our parse options.
        _ => html! {},
    }
}

/// Render one top-level article node, keyed by its position.
pub(crate) fn content_block(index: usize, node: &markdown::mdast::Node, references: &References) -> Markup {
    html! {
        section class="block" id=(index) {
            (node_to_html(node, references))
        }
    }
}
