//! Page content providers.
//!
//! Each documentation page is a markdown document compiled into the binary.
//! The route table only sees the [`PageProvider`] trait.

use std::collections::HashMap;
use std::sync::Arc;

use crate::markdown::{Snippet, render_markdown};

/// Page content ready for the layout viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Page title.
    pub title: String,
    /// HTML body.
    pub html: String,
    /// Copyable snippets in document order.
    pub snippets: Vec<Snippet>,
}

/// Renderable page unit.
pub trait PageProvider: Send + Sync {
    /// Page title, used for the document `<title>`.
    fn title(&self) -> &str;

    /// Render the page body.
    fn render(&self) -> RenderedPage;
}

/// Page backed by a markdown document.
pub struct MarkdownPage {
    title: String,
    source: &'static str,
}

impl MarkdownPage {
    /// Create a page from a title and markdown source.
    pub fn new(title: impl Into<String>, source: &'static str) -> Self {
        Self {
            title: title.into(),
            source,
        }
    }
}

impl PageProvider for MarkdownPage {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> RenderedPage {
        let rendered = render_markdown(self.source);
        RenderedPage {
            title: self.title.clone(),
            html: rendered.html,
            snippets: rendered.snippets,
        }
    }
}

/// Fallback page for paths with no route.
pub struct NotFoundPage;

impl PageProvider for NotFoundPage {
    fn title(&self) -> &str {
        "Page Not Found"
    }

    fn render(&self) -> RenderedPage {
        MarkdownPage::new(self.title(), include_str!("../content/not-found.md")).render()
    }
}

/// Page providers keyed by URL path, plus the not-found page.
pub struct PageLibrary {
    pages: HashMap<String, Arc<dyn PageProvider>>,
    not_found: Arc<dyn PageProvider>,
}

impl PageLibrary {
    /// Create an empty library with the given fallback page.
    pub fn new(not_found: Arc<dyn PageProvider>) -> Self {
        Self {
            pages: HashMap::new(),
            not_found,
        }
    }

    /// Register `provider` for `href`, replacing any previous one.
    #[must_use]
    pub fn with_page(mut self, href: impl Into<String>, provider: Arc<dyn PageProvider>) -> Self {
        self.pages.insert(href.into(), provider);
        self
    }

    /// The faker-api documentation pages.
    pub fn builtin() -> Self {
        let page = |title: &str, source: &'static str| -> Arc<dyn PageProvider> {
            Arc::new(MarkdownPage::new(title, source))
        };

        Self::new(Arc::new(NotFoundPage))
            .with_page("/", page("Introduction", include_str!("../content/introduction.md")))
            .with_page(
                "/installation",
                page("Installation", include_str!("../content/installation.md")),
            )
            .with_page(
                "/quick-start",
                page("Quick Start", include_str!("../content/quick-start.md")),
            )
            .with_page(
                "/cli-commands",
                page("CLI Commands", include_str!("../content/cli-commands.md")),
            )
            .with_page(
                "/configuration",
                page("Configuration", include_str!("../content/configuration.md")),
            )
            .with_page("/examples", page("Examples", include_str!("../content/examples.md")))
            .with_page("/versions", page("Versions", include_str!("../content/versions.md")))
            .with_page(
                "/contributing",
                page("Contributing", include_str!("../content/contributing.md")),
            )
    }

    /// Provider registered for `href`.
    pub fn get(&self, href: &str) -> Option<Arc<dyn PageProvider>> {
        self.pages.get(href).map(Arc::clone)
    }

    /// Fallback provider.
    pub fn not_found(&self) -> Arc<dyn PageProvider> {
        Arc::clone(&self.not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationRegistry;

    #[test]
    fn test_builtin_library_covers_registry() {
        let registry = NavigationRegistry::builtin().unwrap();
        let library = PageLibrary::builtin();

        for entry in registry.list() {
            let page = library
                .get(&entry.href)
                .unwrap_or_else(|| panic!("missing page for {}", entry.href));
            assert_eq!(page.title(), entry.title);
        }
    }

    #[test]
    fn test_builtin_pages_render_headings() {
        let library = PageLibrary::builtin();

        let intro = library.get("/").unwrap().render();

        assert!(intro.html.contains("<h1>faker-api</h1>"));
        assert!(!intro.snippets.is_empty());
    }

    #[test]
    fn test_not_found_page() {
        let page = NotFoundPage.render();

        assert_eq!(page.title, "Page Not Found");
        assert!(page.html.contains("404"));
        assert!(page.html.contains(r#"href="/""#));
    }

    #[test]
    fn test_with_page_replaces() {
        let library = PageLibrary::new(Arc::new(NotFoundPage))
            .with_page("/a", Arc::new(MarkdownPage::new("First", "# One")))
            .with_page("/a", Arc::new(MarkdownPage::new("Second", "# Two")));

        assert_eq!(library.get("/a").unwrap().title(), "Second");
        assert!(library.get("/b").is_none());
    }
}
