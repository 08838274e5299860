//! Data shapes shared by the loader, the filter engine and the renderer.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A person credited on a project card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub name: String,
    /// Profile handle on the code-hosting site.
    #[serde(rename = "github")]
    pub handle: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// A single entry of the static project feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    /// Repository coordinate, e.g. `owner/name`.
    #[serde(rename = "github_repo")]
    pub repo: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Defines the initial position of the card in the gallery.
    pub order: i64,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default, rename = "detailPage")]
    pub detail_page: Option<String>,
    /// Whether live statistics should be looked up for this project at all.
    #[serde(default = "enrich_by_default")]
    pub enrich: bool,
}

fn enrich_by_default() -> bool {
    true
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Live statistics merged onto a static record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    /// Canonical web URL of the repository.
    pub url: String,
    pub homepage: Option<String>,
    pub updated: DateTime<Utc>,
}

/// The unit the filter engine and renderer operate on. `stats` is `None` when
/// enrichment failed or was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedProject {
    pub record: ProjectRecord,
    pub stats: Option<EnrichmentResult>,
}

impl EnrichedProject {
    pub fn new(record: ProjectRecord, stats: Option<EnrichmentResult>) -> Self {
        Self { record, stats }
    }

    pub fn repo(&self) -> &str {
        &self.record.repo
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn tags(&self) -> &[String] {
        &self.record.tags
    }
}

/// The full ordered project list for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<EnrichedProject>,
}

impl Catalog {
    /// Builds a catalog ordered ascending by `order`. Projects sharing the
    /// same key keep their input order.
    pub fn new(mut projects: Vec<EnrichedProject>) -> Self {
        projects.sort_by_key(|project| project.record.order);
        Self { projects }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedProject> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, repo: &str) -> Option<&EnrichedProject> {
        self.projects.iter().find(|project| project.repo() == repo)
    }

    /// Union of every tag in the catalog, sorted ascending.
    pub fn all_tags(&self) -> Vec<String> {
        self.projects
            .iter()
            .flat_map(|project| project.tags().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EnrichedProject;
    type IntoIter = std::slice::Iter<'a, EnrichedProject>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(repo: &str, name: &str, order: i64, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            repo: repo.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            order,
            organization: None,
            contributors: Vec::new(),
            tags: tags.iter().map(ToString::to_string).collect(),
            featured: false,
            detail_page: None,
            enrich: true,
        }
    }

    #[test]
    fn test_record_defaults() {
        let json = r#"{"github_repo": "acme/alpha", "name": "Alpha", "order": 2}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.repo, "acme/alpha");
        assert_eq!(record.description, "");
        assert!(record.tags.is_empty());
        assert!(record.contributors.is_empty());
        assert!(!record.featured);
        assert!(record.enrich);
        assert_eq!(record.detail_page, None);
    }

    #[test]
    fn test_record_full() {
        let json = r#"{
            "github_repo": "acme/alpha",
            "name": "Alpha",
            "description": "First",
            "order": 1,
            "organization": "Acme",
            "contributors": [{"name": "Ada", "github": "ada", "role": "Lead"}],
            "tags": ["infra"],
            "featured": true,
            "detailPage": "alpha.html",
            "enrich": false
        }"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.organization.as_deref(), Some("Acme"));
        assert_eq!(record.contributors[0].handle, "ada");
        assert_eq!(record.contributors[0].role.as_deref(), Some("Lead"));
        assert_eq!(record.detail_page.as_deref(), Some("alpha.html"));
        assert!(record.featured);
        assert!(!record.enrich);
    }

    #[test]
    fn test_catalog_stable_order() {
        let catalog = Catalog::new(vec![
            EnrichedProject::new(record("a/c", "C", 2, &[]), None),
            EnrichedProject::new(record("a/a", "A", 1, &[]), None),
            EnrichedProject::new(record("a/d", "D", 2, &[]), None),
            EnrichedProject::new(record("a/b", "B", 1, &[]), None),
        ]);

        let names: Vec<_> = catalog.iter().map(EnrichedProject::name).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_all_tags() {
        let catalog = Catalog::new(vec![
            EnrichedProject::new(record("a/a", "A", 1, &["web", "infra"]), None),
            EnrichedProject::new(record("a/b", "B", 2, &["cli", "web"]), None),
        ]);

        assert_eq!(catalog.all_tags(), ["cli", "infra", "web"]);
    }
}
