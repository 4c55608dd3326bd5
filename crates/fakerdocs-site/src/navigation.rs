//! Navigation registry.
//!
//! The ordered list of navigation entries is the single source of truth for
//! both the sidebar and the route table. It is validated once at startup and
//! never mutated afterwards.

use std::collections::HashSet;

use serde::Serialize;

/// Section label for entries that don't declare one.
pub const DEFAULT_SECTION: &str = "Other";

/// Reserved path of the catch-all route.
pub const CATCH_ALL_PATH: &str = "*";

/// One addressable page reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display label.
    pub title: String,
    /// Absolute URL path, unique across the registry.
    pub href: String,
    /// Sidebar section, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl NavEntry {
    /// Create an entry inside a section.
    pub fn new(title: impl Into<String>, href: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            section: Some(section.into()),
        }
    }

    /// Create an entry without a section.
    pub fn unsectioned(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            section: None,
        }
    }

    /// Section this entry is grouped under.
    ///
    /// Absent and empty sections both fall back to [`DEFAULT_SECTION`].
    /// No case or whitespace normalization is applied.
    pub fn section_key(&self) -> &str {
        match self.section.as_deref() {
            Some(section) if !section.is_empty() => section,
            _ => DEFAULT_SECTION,
        }
    }
}

/// Navigation configuration defect detected at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Entry has an empty title.
    #[error("Navigation entry for '{0}' has an empty title")]
    EmptyTitle(String),
    /// Entry path is not absolute.
    #[error("Navigation path '{0}' must start with '/'")]
    RelativeHref(String),
    /// Entry claims the catch-all path.
    #[error("Navigation path '{CATCH_ALL_PATH}' is reserved for the catch-all route")]
    ReservedHref,
    /// Two entries share a path.
    #[error("Duplicate navigation path '{0}'")]
    DuplicateHref(String),
}

/// Authoritative ordered list of navigation entries.
#[derive(Clone, Debug)]
pub struct NavigationRegistry {
    entries: Vec<NavEntry>,
}

impl NavigationRegistry {
    /// Build a registry, rejecting malformed or colliding entries.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found, in declaration order.
    pub fn new(entries: Vec<NavEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entries.len());

        for entry in &entries {
            if entry.href == CATCH_ALL_PATH {
                return Err(RegistryError::ReservedHref);
            }
            if !entry.href.starts_with('/') {
                return Err(RegistryError::RelativeHref(entry.href.clone()));
            }
            if entry.title.is_empty() {
                return Err(RegistryError::EmptyTitle(entry.href.clone()));
            }
            if !seen.insert(entry.href.as_str()) {
                return Err(RegistryError::DuplicateHref(entry.href.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The faker-api documentation pages.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in list itself is edited into an invalid state.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(vec![
            NavEntry::new("Introduction", "/", "Getting Started"),
            NavEntry::new("Installation", "/installation", "Getting Started"),
            NavEntry::new("Quick Start", "/quick-start", "Getting Started"),
            NavEntry::new("CLI Commands", "/cli-commands", "Reference"),
            NavEntry::new("Configuration", "/configuration", "Reference"),
            NavEntry::new("Examples", "/examples", "Usage"),
            NavEntry::new("Versions", "/versions", "Resources"),
            NavEntry::new("Contributing", "/contributing", "Resources"),
        ])
    }

    /// All entries in declaration order.
    pub fn list(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Entry registered for `href`.
    pub fn get(&self, href: &str) -> Option<&NavEntry> {
        self.entries.iter().find(|entry| entry.href == href)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether the menu entry for `href` is the current page.
///
/// Exact string equality: every target is a leaf page, so no prefix
/// matching or trailing-slash normalization.
pub fn is_active(current_path: &str, href: &str) -> bool {
    current_path == href
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_builtin_registry_order() {
        let registry = NavigationRegistry::builtin().unwrap();
        let hrefs: Vec<&str> = registry.list().iter().map(|e| e.href.as_str()).collect();

        assert_eq!(
            hrefs,
            vec![
                "/",
                "/installation",
                "/quick-start",
                "/cli-commands",
                "/configuration",
                "/examples",
                "/versions",
                "/contributing",
            ]
        );
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_get_by_href() {
        let registry = NavigationRegistry::builtin().unwrap();

        assert_eq!(registry.get("/examples").unwrap().title, "Examples");
        assert!(registry.get("/examples/").is_none());
    }

    #[test]
    fn test_duplicate_href_rejected() {
        let err = NavigationRegistry::new(vec![
            NavEntry::new("A", "/a", "One"),
            NavEntry::new("B", "/a", "Two"),
        ])
        .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateHref("/a".to_owned()));
    }

    #[test]
    fn test_relative_href_rejected() {
        let err = NavigationRegistry::new(vec![NavEntry::unsectioned("A", "a")]).unwrap_err();
        assert_eq!(err, RegistryError::RelativeHref("a".to_owned()));
    }

    #[test]
    fn test_catch_all_href_reserved() {
        let err = NavigationRegistry::new(vec![NavEntry::unsectioned("All", "*")]).unwrap_err();
        assert_eq!(err, RegistryError::ReservedHref);
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = NavigationRegistry::new(vec![NavEntry::unsectioned("", "/a")]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyTitle("/a".to_owned()));
    }

    #[test]
    fn test_section_key_defaults() {
        assert_eq!(NavEntry::unsectioned("A", "/a").section_key(), "Other");
        assert_eq!(NavEntry::new("A", "/a", "").section_key(), "Other");
        assert_eq!(NavEntry::new("A", "/a", " Usage").section_key(), " Usage");
    }

    #[test]
    fn test_is_active_exact_only() {
        assert!(is_active("/installation", "/installation"));
        assert!(!is_active("/installation/", "/installation"));
        assert!(!is_active("/installation", "/"));
        assert!(!is_active("/Installation", "/installation"));
    }

    proptest! {
        #[test]
        fn prop_is_active_iff_identical(a in "[/a-zA-Z-]{0,12}", b in "[/a-zA-Z-]{0,12}") {
            prop_assert_eq!(is_active(&a, &b), a == b);
        }

        #[test]
        fn prop_is_active_reflexive(path in "/[a-z-]{0,16}") {
            prop_assert!(is_active(&path, &path));
        }
    }
}
