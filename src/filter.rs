//! Search and tag filtering over the catalog.

use std::collections::BTreeSet;

use crate::model::{Catalog, EnrichedProject};

/// Projects currently matching the filters, in catalog order.
pub type VisibleSet<'a> = Vec<&'a EnrichedProject>;

/// Current search text and active tag selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    tags: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercased, trimmed search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = normalize(text);
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Flips membership of `tag`, returning whether it is now active.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_string());
            true
        }
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether any filter narrows the catalog.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.tags.is_empty()
    }

    pub fn apply<'a>(&self, catalog: &'a Catalog) -> VisibleSet<'a> {
        apply_filters(catalog, &self.search, &self.tags)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Selects the projects matching both the search text and the tag selection.
///
/// The search matches case-insensitively against the name, the description
/// and each tag. Active tags are OR-ed: a project needs any one of them.
pub fn apply_filters<'a>(
    catalog: &'a Catalog,
    search: &str,
    tags: &BTreeSet<String>,
) -> VisibleSet<'a> {
    let search = normalize(search);

    catalog
        .iter()
        .filter(|project| matches_search(project, &search) && matches_tags(project, tags))
        .collect()
}

fn matches_search(project: &EnrichedProject, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let record = &project.record;

    record.name.to_lowercase().contains(search)
        || record.description.to_lowercase().contains(search)
        || record.tags.iter().any(|tag| tag.to_lowercase().contains(search))
}

fn matches_tags(project: &EnrichedProject, tags: &BTreeSet<String>) -> bool {
    tags.is_empty() || project.tags().iter().any(|tag| tags.contains(tag))
}

/// The "N projects found" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCount(pub usize);

impl ResultCount {
    /// The indicator is only shown while some filter is active.
    pub fn for_state(state: &FilterState, visible: &VisibleSet<'_>) -> Option<Self> {
        state.is_active().then_some(Self(visible.len()))
    }
}

impl std::fmt::Display for ResultCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.0 == 1 { "" } else { "s" };
        write!(f, "{} project{plural} found", self.0)
    }
}
