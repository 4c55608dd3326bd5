//! Navigation, routing and page composition for the faker-api documentation.
//!
//! This crate provides:
//! - [`NavigationRegistry`]: the ordered list of pages, validated at startup
//! - [`group_by_section`] and [`sidebar`]: first-seen-order section grouping
//! - [`RouteTable`]: exact-path routing with a catch-all that never shadows
//! - [`LayoutFrame`]: the header, sidebar and viewport shell
//! - [`SnippetState`]: copy-to-clipboard state with timed reset
//! - [`ThemePreference`]: persisted light/dark/system preference
//!
//! # Quick Start
//!
//! ```
//! use fakerdocs_site::{LayoutFrame, Site, SiteConfig, Theme};
//!
//! let site = Site::builtin(SiteConfig::default()).unwrap();
//!
//! let html = LayoutFrame::new("/quick-start").render(&site, Theme::System);
//! assert!(html.contains(r#"aria-current="page""#));
//! ```

mod layout;
mod markdown;
mod navigation;
mod page;
mod routes;
mod sections;
mod site;
mod snippet;
mod theme;

pub use layout::{LayoutFrame, SIDEBAR_TOGGLE_PATH};
pub use markdown::{DEFAULT_SNIPPET_LANGUAGE, RenderedMarkdown, Snippet, render_markdown, render_snippet};
pub use navigation::{
    CATCH_ALL_PATH, DEFAULT_SECTION, NavEntry, NavigationRegistry, RegistryError, is_active,
};
pub use page::{MarkdownPage, NotFoundPage, PageLibrary, PageProvider, RenderedPage};
pub use routes::{RouteError, RouteMatch, RoutePath, RouteTable, RouteTableBuilder};
pub use sections::{SectionGroup, SidebarItem, SidebarSection, flatten, group_by_section, sidebar};
pub use site::{PageView, Site, SiteConfig, SiteError};
pub use snippet::{Clipboard, ClipboardError, DEFAULT_RESET_DELAY, SnippetState, SystemClipboard};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore, Theme,
    ThemePreference, UnknownTheme,
};
