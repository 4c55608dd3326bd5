//! Sidebar section grouping.
//!
//! Groups the flat navigation list into named sections. Section order is the
//! order in which each section's first entry appears; entries keep their
//! declaration order inside a section. The result is recomputed per render
//! and never cached.

use std::collections::HashMap;

use serde::Serialize;

use crate::navigation::{NavEntry, is_active};

/// Entries sharing a section key, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    /// Section key.
    pub name: &'a str,
    /// Entries in this section.
    pub entries: Vec<&'a NavEntry>,
}

/// Group `entries` by section key in first-seen order.
///
/// Folds into an ordered vector of buckets with a side index from key to
/// bucket position, so ordering never depends on map iteration order.
pub fn group_by_section(entries: &[NavEntry]) -> Vec<SectionGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();

    entries.iter().fold(Vec::new(), |mut groups, entry| {
        let key = entry.section_key();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(SectionGroup {
                name: key,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].entries.push(entry);
        groups
    })
}

/// Concatenate bucket contents in section order.
pub fn flatten<'a>(groups: &[SectionGroup<'a>]) -> Vec<&'a NavEntry> {
    groups
        .iter()
        .flat_map(|group| group.entries.iter().copied())
        .collect()
}

/// Sidebar menu item with its highlight state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub href: String,
    /// True if this item is the current page.
    pub active: bool,
}

/// Sidebar section ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Section label.
    pub name: String,
    /// Menu items.
    pub items: Vec<SidebarItem>,
}

/// Build the sidebar view for `current_path`.
pub fn sidebar(entries: &[NavEntry], current_path: &str) -> Vec<SidebarSection> {
    group_by_section(entries)
        .into_iter()
        .map(|group| SidebarSection {
            name: group.name.to_owned(),
            items: group
                .entries
                .into_iter()
                .map(|entry| SidebarItem {
                    title: entry.title.clone(),
                    href: entry.href.clone(),
                    active: is_active(current_path, &entry.href),
                })
                .collect(),
        })
        .collect()
}
