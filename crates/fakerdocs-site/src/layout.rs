//! Layout frame: header, sidebar and content viewport.
//!
//! The frame owns exactly one piece of state, whether the sidebar is open on
//! narrow viewports. It only changes on an explicit toggle, unless the frame
//! was configured to close the sidebar whenever the path changes.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::sections::SidebarSection;
use crate::site::Site;
use crate::theme::Theme;

/// Path of the no-script sidebar toggle endpoint.
pub const SIDEBAR_TOGGLE_PATH: &str = "/-/sidebar/toggle";

/// Persistent shell around the selected page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutFrame {
    sidebar_open: bool,
    close_on_navigate: bool,
    current_path: String,
}

impl LayoutFrame {
    /// Frame at `current_path` with the sidebar closed.
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            sidebar_open: false,
            close_on_navigate: false,
            current_path: current_path.into(),
        }
    }

    /// Close the sidebar on every path change.
    #[must_use]
    pub fn with_close_on_navigate(mut self, close_on_navigate: bool) -> Self {
        self.close_on_navigate = close_on_navigate;
        self
    }

    /// Start with the sidebar open or closed.
    #[must_use]
    pub fn with_sidebar_open(mut self, open: bool) -> Self {
        self.sidebar_open = open;
        self
    }

    /// Whether the sidebar is visible.
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Path of the page in the viewport.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Flip sidebar visibility, returning the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// Show or hide the sidebar.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    /// Move to `path`.
    ///
    /// The sidebar stays as it is unless close-on-navigate is enabled and the
    /// path actually changed.
    pub fn navigate(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.close_on_navigate && path != self.current_path {
            self.sidebar_open = false;
        }
        self.current_path = path;
    }

    /// Render the full HTML document for the current path.
    ///
    /// Header, sidebar and viewport appear in that order. Unknown paths get
    /// the not-found page inside the same frame.
    pub fn render(&self, site: &Site, theme: Theme) -> String {
        let page = site.render(&self.current_path);
        let config = site.config();

        let mut out = String::with_capacity(page.html.len() + 4096);
        write!(
            out,
            r#"<!DOCTYPE html><html lang="en" data-theme="{theme}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{} | {}</title><link rel="stylesheet" href="/assets/shell.css"><script src="/assets/shell.js" defer></script></head><body>"#,
            encode_text(&page.title),
            encode_text(&config.title),
        )
        .unwrap();

        self.render_header(site, theme, &mut out);

        out.push_str(r#"<div class="shell">"#);
        self.render_sidebar(&site.sidebar(&self.current_path), &mut out);
        write!(
            out,
            r#"<main class="viewport" data-path="{}">{}</main>"#,
            encode_double_quoted_attribute(&self.current_path),
            page.html,
        )
        .unwrap();
        out.push_str("</div></body></html>");

        out
    }

    fn render_header(&self, site: &Site, theme: Theme, out: &mut String) {
        let config = site.config();
        let toggle_href = format!(
            "{SIDEBAR_TOGGLE_PATH}?return={}",
            utf8_percent_encode(&self.current_path, NON_ALPHANUMERIC)
        );

        write!(
            out,
            r#"<header class="site-header"><a class="sidebar-toggle" href="{}" aria-controls="sidebar" aria-expanded="{}"><span aria-hidden="true">&#9776;</span><span class="sr-only">Toggle Menu</span></a><a class="brand" href="/">{}</a><nav class="header-actions"><a class="github-link" href="{}" target="_blank" rel="noreferrer">GitHub</a><button type="button" class="theme-toggle" data-theme="{theme}" data-theme-next="{}" aria-label="Switch theme">{theme}</button></nav></header>"#,
            encode_double_quoted_attribute(&toggle_href),
            self.sidebar_open,
            encode_text(&config.title),
            encode_double_quoted_attribute(&config.repository_url),
            theme.next(),
        )
        .unwrap();
    }

    fn render_sidebar(&self, sections: &[SidebarSection], out: &mut String) {
        let class = if self.sidebar_open { "sidebar open" } else { "sidebar" };
        write!(out, r#"<aside id="sidebar" class="{class}"><nav aria-label="Documentation">"#).unwrap();

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                out.push_str(r#"<hr class="sidebar-separator">"#);
            }
            write!(
                out,
                r#"<p class="sidebar-section">{}</p><ul>"#,
                encode_text(&section.name)
            )
            .unwrap();
            for item in &section.items {
                let (class, current) = if item.active {
                    ("sidebar-link active", r#" aria-current="page""#)
                } else {
                    ("sidebar-link", "")
                };
                write!(
                    out,
                    r#"<li><a class="{class}" href="{}"{current}>{}</a></li>"#,
                    encode_double_quoted_attribute(&item.href),
                    encode_text(&item.title),
                )
                .unwrap();
            }
            out.push_str("</ul>");
        }

        out.push_str("</nav></aside>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::site::SiteConfig;

    fn site() -> Site {
        Site::builtin(SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut frame = LayoutFrame::new("/");
        assert!(!frame.sidebar_open());

        assert!(frame.toggle_sidebar());
        assert!(!frame.toggle_sidebar());

        frame.set_sidebar_open(true);
        assert!(frame.sidebar_open());
    }

    #[test]
    fn test_navigate_keeps_sidebar_by_default() {
        let mut frame = LayoutFrame::new("/").with_sidebar_open(true);

        frame.navigate("/installation");

        assert!(frame.sidebar_open());
        assert_eq!(frame.current_path(), "/installation");
    }

    #[test]
    fn test_navigate_closes_sidebar_when_enabled() {
        let mut frame = LayoutFrame::new("/")
            .with_close_on_navigate(true)
            .with_sidebar_open(true);

        frame.navigate("/");
        assert!(frame.sidebar_open());

        frame.navigate("/installation");
        assert!(!frame.sidebar_open());
    }

    #[test]
    fn test_render_order_header_sidebar_viewport() {
        let html = LayoutFrame::new("/quick-start").render(&site(), Theme::Dark);

        let header = html.find("<header").unwrap();
        let sidebar = html.find("<aside").unwrap();
        let main = html.find("<main").unwrap();

        assert!(header < sidebar && sidebar < main);
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("<title>Quick Start | faker-api</title>"));
    }

    #[test]
    fn test_render_marks_active_item() {
        let html = LayoutFrame::new("/versions").render(&site(), Theme::System);

        assert!(html.contains(
            r#"<a class="sidebar-link active" href="/versions" aria-current="page">Versions</a>"#
        ));
        assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
    }

    #[test]
    fn test_render_separators_between_sections() {
        let site = site();
        let html = LayoutFrame::new("/").render(&site, Theme::Light);

        assert_eq!(
            html.matches("sidebar-separator").count(),
            site.sections().len() - 1
        );
    }

    #[test]
    fn test_render_header_controls() {
        let html = LayoutFrame::new("/cli-commands")
            .with_sidebar_open(true)
            .render(&site(), Theme::Light);

        assert!(html.contains(r#"href="/-/sidebar/toggle?return=%2Fcli%2Dcommands""#));
        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains(r#"<aside id="sidebar" class="sidebar open">"#));
        assert!(html.contains("Toggle Menu"));
        assert!(html.contains(r#"<a class="brand" href="/">faker-api</a>"#));
        assert!(html.contains(r#"data-theme-next="dark""#));
        assert!(html.contains("https://github.com/amandollar/faker-api"));
    }

    #[test]
    fn test_render_unknown_path_inside_frame() {
        let html = LayoutFrame::new("/nope").render(&site(), Theme::System);

        assert!(html.contains("<title>Page Not Found | faker-api</title>"));
        assert!(html.contains("<aside"));
        assert!(!html.contains("aria-current"));
    }

    #[test]
    fn test_render_escapes_path() {
        let html = LayoutFrame::new("/\"><script>").render(&site(), Theme::System);
        assert!(!html.contains("<script>"));
    }
}
