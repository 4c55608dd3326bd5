//! Route table mapping URL paths to page providers.
//!
//! Exact routes are looked up by string equality. The catch-all route is
//! stored apart from them and consulted only after every exact route has
//! failed to match, so it can never shadow a real page regardless of the
//! order routes were declared in.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::navigation::{CATCH_ALL_PATH, NavigationRegistry};
use crate::page::{PageLibrary, PageProvider};

/// Path a route answers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoutePath {
    /// Matches exactly this path.
    Exact(String),
    /// Matches any path no exact route claims.
    CatchAll,
}

impl RoutePath {
    /// Parse a declared path; `"*"` is the catch-all.
    pub fn parse(path: &str) -> Self {
        if path == CATCH_ALL_PATH {
            Self::CatchAll
        } else {
            Self::Exact(path.to_owned())
        }
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => f.write_str(path),
            Self::CatchAll => f.write_str(CATCH_ALL_PATH),
        }
    }
}

/// Route table configuration defect.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    /// Two exact routes share a path.
    #[error("Duplicate route for '{0}'")]
    DuplicatePath(String),
    /// More than one catch-all route was declared.
    #[error("Only one catch-all route may be registered")]
    DuplicateCatchAll,
    /// No catch-all route was declared.
    #[error("Route table has no catch-all route")]
    MissingCatchAll,
    /// A navigation entry has no page content.
    #[error("No page registered for navigation path '{0}'")]
    MissingPage(String),
}

/// Result of resolving a path.
#[derive(Clone)]
pub struct RouteMatch {
    /// Selected page.
    pub provider: Arc<dyn PageProvider>,
    /// False when the catch-all was selected.
    pub matched: bool,
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("page", &self.provider.title())
            .field("matched", &self.matched)
            .finish()
    }
}

/// Builder collecting routes before validation.
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<(RoutePath, Arc<dyn PageProvider>)>,
}

impl RouteTableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a route. `"*"` declares the catch-all.
    #[must_use]
    pub fn route(mut self, path: &str, provider: Arc<dyn PageProvider>) -> Self {
        self.routes.push((RoutePath::parse(path), provider));
        self
    }

    /// Declare the catch-all route.
    #[must_use]
    pub fn catch_all(mut self, provider: Arc<dyn PageProvider>) -> Self {
        self.routes.push((RoutePath::CatchAll, provider));
        self
    }

    /// Validate and build the table.
    ///
    /// # Errors
    ///
    /// Fails on duplicate exact paths, a repeated catch-all, or a missing catch-all.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        let mut order = Vec::with_capacity(self.routes.len());
        let mut exact = HashMap::with_capacity(self.routes.len());
        let mut catch_all = None;

        for (path, provider) in self.routes {
            match path {
                RoutePath::Exact(path) => {
                    if exact.contains_key(&path) {
                        return Err(RouteError::DuplicatePath(path));
                    }
                    order.push(path.clone());
                    exact.insert(path, provider);
                }
                RoutePath::CatchAll => {
                    if catch_all.replace(provider).is_some() {
                        return Err(RouteError::DuplicateCatchAll);
                    }
                }
            }
        }

        let catch_all = catch_all.ok_or(RouteError::MissingCatchAll)?;

        Ok(RouteTable {
            order,
            exact,
            catch_all,
        })
    }
}

/// Validated route table.
pub struct RouteTable {
    order: Vec<String>,
    exact: HashMap<String, Arc<dyn PageProvider>>,
    catch_all: Arc<dyn PageProvider>,
}

impl RouteTable {
    /// Start declaring routes.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// One route per navigation entry plus the library's not-found page.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingPage`] if an entry has no page content.
    pub fn compose(registry: &NavigationRegistry, library: &PageLibrary) -> Result<Self, RouteError> {
        let builder = registry
            .list()
            .iter()
            .try_fold(Self::builder(), |builder, entry| -> Result<_, RouteError> {
                let provider = library
                    .get(&entry.href)
                    .ok_or_else(|| RouteError::MissingPage(entry.href.clone()))?;
                Ok(builder.route(&entry.href, provider))
            })?;

        builder.catch_all(library.not_found()).build()
    }

    /// Select the page for `path`, falling back to the catch-all.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        match self.exact.get(path) {
            Some(provider) => RouteMatch {
                provider: Arc::clone(provider),
                matched: true,
            },
            None => RouteMatch {
                provider: Arc::clone(&self.catch_all),
                matched: false,
            },
        }
    }

    /// Exact paths in declaration order.
    pub fn paths(&self) -> &[String] {
        &self.order
    }

    /// Number of exact routes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if only the catch-all is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::navigation::NavEntry;
    use crate::page::{MarkdownPage, NotFoundPage};

    fn page(title: &str) -> Arc<dyn PageProvider> {
        Arc::new(MarkdownPage::new(title, "# Page"))
    }

    fn builtin_table() -> RouteTable {
        let registry = NavigationRegistry::builtin().unwrap();
        RouteTable::compose(&registry, &PageLibrary::builtin()).unwrap()
    }

    #[test]
    fn test_compose_builtin_routes() {
        let table = builtin_table();

        assert_eq!(table.len(), 8);
        assert_eq!(table.paths()[0], "/");
        assert_eq!(table.paths()[7], "/contributing");
    }

    #[test]
    fn test_resolve_exact_match() {
        let table = builtin_table();

        let found = table.resolve("/quick-start");

        assert!(found.matched);
        assert_eq!(found.provider.title(), "Quick Start");
    }

    #[test]
    fn test_resolve_unknown_path_uses_catch_all() {
        let table = builtin_table();

        let found = table.resolve("/does-not-exist");

        assert!(!found.matched);
        assert_eq!(found.provider.title(), "Page Not Found");
    }

    #[test]
    fn test_resolve_trailing_slash_is_not_a_match() {
        let table = builtin_table();
        assert!(!table.resolve("/installation/").matched);
    }

    #[test]
    fn test_catch_all_declared_first_does_not_shadow() {
        let table = RouteTable::builder()
            .route("*", Arc::new(NotFoundPage))
            .route("/a", page("A"))
            .build()
            .unwrap();

        let found = table.resolve("/a");

        assert!(found.matched);
        assert_eq!(found.provider.title(), "A");
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let err = RouteTable::builder()
            .route("/a", page("A"))
            .route("/a", page("B"))
            .catch_all(Arc::new(NotFoundPage))
            .build()
            .err();

        assert_eq!(err, Some(RouteError::DuplicatePath("/a".to_owned())));
    }

    #[test]
    fn test_missing_catch_all_rejected() {
        let err = RouteTable::builder().route("/a", page("A")).build().err();
        assert_eq!(err, Some(RouteError::MissingCatchAll));
    }

    #[test]
    fn test_second_catch_all_rejected() {
        let err = RouteTable::builder()
            .catch_all(Arc::new(NotFoundPage))
            .route("*", Arc::new(NotFoundPage))
            .build()
            .err();
        assert_eq!(err, Some(RouteError::DuplicateCatchAll));
    }

    #[test]
    fn test_compose_missing_page() {
        let registry = NavigationRegistry::new(vec![NavEntry::new("Ghost", "/ghost", "A")]).unwrap();
        let library = PageLibrary::new(Arc::new(NotFoundPage));

        let err = RouteTable::compose(&registry, &library).err();

        assert_eq!(err, Some(RouteError::MissingPage("/ghost".to_owned())));
    }

    #[test]
    fn test_route_path_parse_and_display() {
        assert_eq!(RoutePath::parse("*"), RoutePath::CatchAll);
        assert_eq!(RoutePath::parse("/a"), RoutePath::Exact("/a".to_owned()));
        assert_eq!(RoutePath::CatchAll.to_string(), "*");
    }

    proptest! {
        #[test]
        fn prop_unregistered_paths_resolve_to_catch_all(path in "/[a-z0-9/_-]{0,24}") {
            let table = builtin_table();
            let found = table.resolve(&path);

            prop_assert_eq!(found.matched, table.paths().contains(&path));
            if !found.matched {
                prop_assert_eq!(found.provider.title(), "Page Not Found");
            }
        }
    }
}
