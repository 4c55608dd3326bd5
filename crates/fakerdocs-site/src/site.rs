//! Site aggregate.
//!
//! [`Site`] ties the navigation registry, the page library and the route
//! table together. Everything is validated in [`Site::builtin`], so a
//! constructed site can answer any path without failing.
//!
//! # Example
//!
//! ```
//! use fakerdocs_site::{Site, SiteConfig};
//!
//! let site = Site::builtin(SiteConfig::default()).unwrap();
//!
//! let page = site.render("/installation");
//! assert!(page.matched);
//!
//! let missing = site.render("/nope");
//! assert!(!missing.matched);
//! ```

use crate::markdown::Snippet;
use crate::navigation::{NavigationRegistry, RegistryError};
use crate::page::PageLibrary;
use crate::routes::{RouteError, RouteMatch, RouteTable};
use crate::sections::{SectionGroup, SidebarSection, group_by_section, sidebar};

/// Site identity shown in the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Brand label.
    pub title: String,
    /// Repository link in the header.
    pub repository_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "faker-api".to_owned(),
            repository_url: "https://github.com/amandollar/faker-api".to_owned(),
        }
    }
}

/// Startup failure building the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Page selected for a path, rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Page title.
    pub title: String,
    /// HTML body for the viewport.
    pub html: String,
    /// Copyable snippets in document order.
    pub snippets: Vec<Snippet>,
    /// False when the not-found page was selected.
    pub matched: bool,
}

/// The documentation site.
pub struct Site {
    config: SiteConfig,
    registry: NavigationRegistry,
    routes: RouteTable,
}

impl Site {
    /// Assemble a site from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Route`] if a registry entry has no page in `library`.
    pub fn new(
        config: SiteConfig,
        registry: NavigationRegistry,
        library: &PageLibrary,
    ) -> Result<Self, SiteError> {
        let routes = RouteTable::compose(&registry, library)?;
        tracing::debug!(pages = routes.len(), "Composed route table");
        Ok(Self {
            config,
            registry,
            routes,
        })
    }

    /// The built-in faker-api documentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in navigation or pages are inconsistent.
    pub fn builtin(config: SiteConfig) -> Result<Self, SiteError> {
        Self::new(config, NavigationRegistry::builtin()?, &PageLibrary::builtin())
    }

    /// Site identity.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Navigation registry.
    pub fn registry(&self) -> &NavigationRegistry {
        &self.registry
    }

    /// Navigation entries grouped by section.
    pub fn sections(&self) -> Vec<SectionGroup<'_>> {
        group_by_section(self.registry.list())
    }

    /// Sidebar with `path` highlighted.
    pub fn sidebar(&self, path: &str) -> Vec<SidebarSection> {
        sidebar(self.registry.list(), path)
    }

    /// Page provider selected for `path`.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        self.routes.resolve(path)
    }

    /// Render the page selected for `path`.
    ///
    /// Unknown paths render the not-found page; that is not an error.
    pub fn render(&self, path: &str) -> PageView {
        let RouteMatch { provider, matched } = self.resolve(path);
        if !matched {
            tracing::warn!(path, "No route for path, serving not-found page");
        }

        let page = provider.render();
        PageView {
            title: page.title,
            html: page.html,
            snippets: page.snippets,
            matched,
        }
    }
}
