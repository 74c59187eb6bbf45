//! Site storage: folder configuration and article loading.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use markdown::mdast::Node;
use serde::Deserialize;

/// Config file name, relative to the content root.
pub const CONFIG_FILE: &str = "folio.json";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read from disk: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to parse markdown: {0}")]
    Markdown(String),
    #[error("failed to parse frontmatter: {0}")]
    Frontmatter(#[from] toml::de::Error),
    #[error("article has no frontmatter")]
    MissingFrontmatter,
}

/// One entry in a folder's ordered page list.
#[derive(Deserialize, Debug, Clone)]
pub struct PageEntry {
    pub id: String,
    pub title: String,
}

/// A folder of articles.
#[derive(Deserialize, Debug, Clone)]
pub struct Folder {
    pub name: String,
    pub title: String,
    /// Id of the canonical index article.
    pub index: String,
    /// Articles in reading order, used for footer navigation.
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    pub folders: Vec<Folder>,
}

/// Article metadata from the TOML frontmatter block.
#[derive(Deserialize, Debug, Clone)]
pub struct Frontmatter {
    pub title: String,
    #[serde(default)]
    pub author: Vec<String>,
    pub date: Option<jiff::civil::Date>,
}

/// A resolvable cross-reference target.
#[derive(Debug, Clone)]
pub struct Reference {
    pub label: Option<String>,
    pub url: String,
}

/// Maps reference identifiers to [`Reference`] targets.
#[derive(Debug, Clone, Default)]
pub struct References {
    entries: HashMap<String, Reference>,
}

impl References {
    /// Collect link and image definitions from the whole tree.
    fn collect(node: &Node) -> Self {
        let mut references = Self::default();
        references.visit(node);
        references
    }

    fn visit(&mut self, node: &Node) {
        if let Node::Definition(definition) = node {
            self.entries.insert(
                definition.identifier.clone(),
                Reference {
                    label: definition.title.clone(),
                    url: definition.url.clone(),
                },
            );
        }

        if let Some(children) = node.children() {
            for child in children {
                self.visit(child);
            }
        }
    }

    /// Look up a target. Identifiers are stored normalized, the way the
    /// parser normalizes them on reference nodes.
    pub fn get(&self, identifier: &str) -> Option<&Reference> {
        self.entries.get(&identifier.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A footer navigation link.
#[derive(Debug, Clone)]
pub struct FooterLink {
    pub title: String,
    pub url: String,
}

impl Folder {
    /// Previous/next navigation links around `id` in reading order.
    pub fn footer(&self, id: &str) -> Vec<FooterLink> {
        let Some(position) = self.pages.iter().position(|page| page.id == id) else {
            return vec![];
        };

        let mut links = Vec::new();

        if let Some(previous) = position.checked_sub(1).and_then(|i| self.pages.get(i)) {
            links.push(FooterLink {
                title: previous.title.clone(),
                url: self.page_url(&previous.id),
            });
        }

        if let Some(next) = self.pages.get(position + 1) {
            links.push(FooterLink {
                title: next.title.clone(),
                url: self.page_url(&next.id),
            });
        }

        links
    }

    /// The index article is served at the folder's bare path.
    fn page_url(&self, id: &str) -> String {
        if id == self.index {
            format!("/{}", self.name)
        } else {
            format!("/{}/{}", self.name, id)
        }
    }
}

/// Loaded data for one article page.
#[derive(Debug, Clone)]
pub struct PageData {
    pub frontmatter: Frontmatter,
    pub mdast: Node,
    pub references: References,
    pub footer: Vec<FooterLink>,
}

fn parse_options() -> markdown::ParseOptions {
    let mut options = markdown::ParseOptions::gfm();
    options.constructs.frontmatter = true;
    options.constructs.math_flow = true;
    options.constructs.math_text = true;
    options
}

impl PageData {
    pub fn load(root: &Path, folder: &Folder, id: &str) -> Result<Self, Error> {
        let path = root.join(&folder.name).join(format!("{id}.md"));
        let source = fs::read_to_string(path)?;
        Self::from_source(&source, folder, id)
    }

    /// Parse article source into page data.
    pub fn from_source(source: &str, folder: &Folder, id: &str) -> Result<Self, Error> {
        let mut mdast = markdown::to_mdast(source, &parse_options())
            .map_err(|message| Error::Markdown(message.to_string()))?;

        let frontmatter = extract_frontmatter(&mut mdast)?;
        let references = References::collect(&mdast);
        let footer = folder.footer(id);

        Ok(Self {
            frontmatter,
            mdast,
            references,
            footer,
        })
    }

    /// Top-level content blocks of the article.
    pub fn blocks(&self) -> &[Node] {
        match &self.mdast {
            Node::Root(root) => &root.children,
            _ => &[],
        }
    }
}

/// Parse the leading TOML frontmatter node and strip it from the tree so it
/// never shows up as a content block.
fn extract_frontmatter(mdast: &mut Node) -> Result<Frontmatter, Error> {
    let Node::Root(root) = mdast else {
        return Err(Error::MissingFrontmatter);
    };

    let value = match root.children.first() {
        Some(Node::Toml(toml)) => toml.value.clone(),
        _ => return Err(Error::MissingFrontmatter),
    };

    root.children.remove(0);

    Ok(toml::from_str(&value)?)
}

/// The site: a content root plus its folder configuration.
pub struct Site {
    root: PathBuf,
    config: Config,
}

impl Site {
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        let config = load_config(&root)?;
        Ok(Self { root, config })
    }

    /// Re-read the config from disk. The current config stays in place when
    /// the new one fails to parse.
    pub fn reload(&mut self) -> Result<(), Error> {
        self.config = load_config(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the folder with the given name or `None`.
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.config.folders.iter().find(|folder| folder.name == name)
    }

    pub fn folders(&self) -> &[Folder] {
        &self.config.folders
    }
}

fn load_config(root: &Path) -> Result<Config, Error> {
    let source = fs::read_to_string(root.join(CONFIG_FILE))?;
    Ok(serde_json::from_str(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

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
                PageEntry {
                    id: "faq".to_owned(),
                    title: "FAQ".to_owned(),
                },
            ],
        }
    }

    #[test]
    fn config_from_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "folders": [
                    {"name": "docs", "title": "Docs", "index": "intro",
                     "pages": [{"id": "intro", "title": "Introduction"}]}
                ]
            }"#,
        )
        .expect("parsing config");

        assert_eq!(config.folders.len(), 1);
        assert_eq!(config.folders[0].index, "intro");
        assert_eq!(config.folders[0].pages[0].title, "Introduction");
    }

    #[test]
    fn footer_neighbors() {
        let folder = folder();

        let links = folder.footer("guide");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Introduction");
        // The index article links to the folder's bare path.
        assert_eq!(links[0].url, "/docs");
        assert_eq!(links[1].title, "FAQ");
        assert_eq!(links[1].url, "/docs/faq");
    }

    #[test]
    fn footer_at_edges() {
        let folder = folder();

        let first = folder.footer("intro");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "Guide");

        let last = folder.footer("faq");
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].title, "Guide");

        assert!(folder.footer("unlisted").is_empty());
    }

    #[test]
    fn frontmatter_parsed_and_stripped() {
        let source = "+++\ntitle = \"Hello\"\nauthor = [\"Ada\", \"Grace\"]\ndate = \"2024-05-01\"\n+++\n\nFirst paragraph.\n\nSecond paragraph.\n";
        let page = PageData::from_source(source, &folder(), "guide").expect("loading page");

        assert_eq!(page.frontmatter.title, "Hello");
        assert_eq!(page.frontmatter.author, vec!["Ada", "Grace"]);
        assert_eq!(
            page.frontmatter.date,
            Some(jiff::civil::date(2024, 5, 1))
        );
        // The frontmatter node must not show up as a content block.
        assert_eq!(page.blocks().len(), 2);
    }

    #[test]
    fn missing_frontmatter_is_an_error() {
        let result = PageData::from_source("Just a paragraph.\n", &folder(), "guide");
        assert!(matches!(result, Err(Error::MissingFrontmatter)));
    }

    #[test]
    fn references_collected_from_definitions() {
        let source = "+++\ntitle = \"Refs\"\n+++\n\nSee [the guide][guide].\n\n[guide]: /docs/guide \"The Guide\"\n";
        let page = PageData::from_source(source, &folder(), "intro").expect("loading page");

        assert_eq!(page.references.len(), 1);
        let reference = page.references.get("guide").expect("reference");
        assert_eq!(reference.url, "/docs/guide");
        assert_eq!(reference.label.as_deref(), Some("The Guide"));

        // Lookup is case-insensitive, matching parser normalization.
        assert!(page.references.get("GUIDE").is_some());
        assert!(page.references.get("nope").is_none());
    }

    #[test]
    fn site_load_and_lookup() {
        let dir = tempfile::tempdir().expect("creating temp dir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"folders": [{"name": "docs", "title": "Docs", "index": "intro"}]}"#,
        )
        .expect("writing config");

        let site = Site::load(dir.path()).expect("loading site");
        assert!(site.folder("docs").is_some());
        assert!(site.folder("blog").is_none());
        assert_eq!(site.folders().len(), 1);
    }

    #[test]
    fn page_load_from_disk() {
        let dir = tempfile::tempdir().expect("creating temp dir");
        std::fs::create_dir(dir.path().join("docs")).expect("creating folder");
        std::fs::write(
            dir.path().join("docs/guide.md"),
            "+++\ntitle = \"Guide\"\n+++\n\nBody.\n",
        )
        .expect("writing article");

        let page = PageData::load(dir.path(), &folder(), "guide").expect("loading page");
        assert_eq!(page.frontmatter.title, "Guide");

        let missing = PageData::load(dir.path(), &folder(), "nope");
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
