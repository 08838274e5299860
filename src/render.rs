//! HTML rendering of the gallery.
//!
//! Every fragment is produced by `hypertext`, which escapes all interpolated
//! text and attribute values. Projects are first lowered into plain view
//! models ([`CardView`], [`TagButton`]) so the markup never reaches into feed
//! or provider data directly. The only raw insertions are the static icons
//! below and fragments this module rendered itself.

use hypertext::{Raw, prelude::*, rsx};

use crate::filter::{FilterState, ResultCount, VisibleSet};
use crate::model::EnrichedProject;

/// Base address of the code-hosting website, used for profile links and for
/// repository links when no enrichment is available.
pub const DEFAULT_WEB_BASE: &str = "https://github.com";

const ICON_ORGANIZATION: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2"></path><circle cx="9" cy="7" r="4"></circle><path d="M23 21v-2a4 4 0 0 0-3-3.87"></path><path d="M16 3.13a4 4 0 0 1 0 7.75"></path></svg>"#;

const ICON_GITHUB: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="currentColor"><path d="M12 0c-6.626 0-12 5.373-12 12 0 5.302 3.438 9.8 8.207 11.387.599.111.793-.261.793-.577v-2.234c-3.338.726-4.033-1.416-4.033-1.416-.546-1.387-1.333-1.756-1.333-1.756-1.089-.745.083-.729.083-.729 1.205.084 1.839 1.237 1.839 1.237 1.07 1.834 2.807 1.304 3.492.997.107-.775.418-1.305.762-1.604-2.665-.305-5.467-1.334-5.467-5.931 0-1.311.469-2.381 1.236-3.221-.124-.303-.535-1.524.117-3.176 0 0 1.008-.322 3.301 1.23.957-.266 1.983-.399 3.003-.404 1.02.005 2.047.138 3.006.404 2.291-1.552 3.297-1.23 3.297-1.23.653 1.653.242 2.874.118 3.176.77.84 1.235 1.911 1.235 3.221 0 4.609-2.807 5.624-5.479 5.921.43.372.823 1.102.823 2.222v3.293c0 .319.192.694.801.576 4.765-1.589 8.199-6.086 8.199-11.386 0-6.627-5.373-12-12-12z"/></svg>"#;

const ICON_STAR: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"></polygon></svg>"#;

const ICON_FORK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="3"></circle><path d="M12 1v6m0 6v6"></path><path d="M17.2 2.8l-4.2 4.2m0 6l-4.2 4.2m12.4 0l-4.2-4.2m0-6l-4.2-4.2"></path></svg>"#;

const ICON_CODE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="16 18 22 12 16 6"></polyline><polyline points="8 6 2 12 8 18"></polyline></svg>"#;

/// Browser-side copy of the filter rules for the pre-rendered cards, plus the
/// card navigation that ignores clicks on links and buttons.
const SCRIPT: &str = r#"
(function () {
    const search = document.getElementById('searchInput');
    const clear = document.getElementById('clearSearch');
    const counter = document.getElementById('resultsCount');
    const counterText = document.getElementById('resultText');
    const empty = document.getElementById('noResults');
    const cards = Array.from(document.querySelectorAll('.project-card'));
    const active = new Set();
    let query = '';

    function apply() {
        let count = 0;
        cards.forEach(function (card) {
            const fields = card.dataset.search.split('\n');
            const tags = card.dataset.tags ? card.dataset.tags.split('\n') : [];
            const matchesSearch = !query || fields.some(function (f) { return f.includes(query); });
            const matchesTags = active.size === 0 || tags.some(function (t) { return active.has(t); });
            const visible = matchesSearch && matchesTags;
            card.style.display = visible ? '' : 'none';
            if (visible) count += 1;
        });
        if (query || active.size > 0) {
            counter.style.display = 'block';
            counterText.textContent = count + ' project' + (count !== 1 ? 's' : '') + ' found';
        } else {
            counter.style.display = 'none';
        }
        if (empty) empty.style.display = count === 0 ? 'block' : 'none';
    }

    search.addEventListener('input', function (e) {
        query = e.target.value.toLowerCase().trim();
        clear.style.display = query ? 'block' : 'none';
        apply();
    });

    clear.addEventListener('click', function () {
        search.value = '';
        query = '';
        clear.style.display = 'none';
        apply();
    });

    document.querySelectorAll('.filter-tag').forEach(function (button) {
        button.addEventListener('click', function () {
            const tag = button.dataset.tag;
            if (active.has(tag)) {
                active.delete(tag);
                button.classList.remove('active');
            } else {
                active.add(tag);
                button.classList.add('active');
            }
            apply();
        });
    });

    cards.forEach(function (card) {
        if (!card.dataset.detailPage) return;
        card.addEventListener('click', function (e) {
            if (e.target.closest('a') || e.target.closest('button')) return;
            window.location.href = card.dataset.detailPage;
        });
    });
})();
"#;

const STYLE_HIDDEN: &str = "display: none";
const STYLE_BLOCK: &str = "display: block";
const STYLE_GRID: &str = "display: grid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorView {
    pub name: String,
    pub role: Option<String>,
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub stars: String,
    pub forks: String,
    pub language: Option<String>,
}

/// Everything a single card displays, already resolved to plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub description: String,
    pub featured: bool,
    pub organization: Option<String>,
    pub contributors: Vec<ContributorView>,
    pub tags: Vec<String>,
    pub stats: Option<StatsView>,
    /// Primary action target: the canonical URL when enriched, else a link
    /// derived from the repository coordinate.
    pub repo_href: String,
    pub detail_page: Option<String>,
    /// Lowercased searchable fields, one per line.
    pub search_index: String,
}

impl CardView {
    pub fn new(project: &EnrichedProject, web_base: &str) -> Self {
        let record = &project.record;
        let web_base = web_base.trim_end_matches('/');

        let contributors = record
            .contributors
            .iter()
            .map(|contributor| ContributorView {
                name: contributor.name.clone(),
                role: contributor.role.clone(),
                href: format!("{web_base}/{}", contributor.handle),
                title: format!("{} on GitHub", contributor.name),
            })
            .collect();

        let stats = project.stats.as_ref().map(|stats| StatsView {
            stars: stats.stars.to_string(),
            forks: stats.forks.to_string(),
            language: stats.language.clone(),
        });

        let repo_href = match &project.stats {
            Some(stats) => stats.url.clone(),
            None => format!("{web_base}/{}", record.repo),
        };

        let search_index = std::iter::once(record.name.as_str())
            .chain(std::iter::once(record.description.as_str()))
            .chain(record.tags.iter().map(String::as_str))
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            featured: record.featured,
            organization: record.organization.clone(),
            contributors,
            tags: record.tags.clone(),
            stats,
            repo_href,
            detail_page: record.detail_page.clone(),
            search_index,
        }
    }
}

/// A toggleable tag filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagButton {
    pub tag: String,
    pub active: bool,
}

/// One button per tag in `tags`, flagged with its state in the current
/// selection. `tags` is expected to come from
/// [`Catalog::all_tags`](crate::model::Catalog::all_tags).
pub fn tag_buttons(tags: &[String], state: &FilterState) -> Vec<TagButton> {
    tags.iter()
        .map(|tag| TagButton {
            tag: tag.clone(),
            active: state.is_tag_active(tag),
        })
        .collect()
}

/// Rendered fragments of the gallery for one filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub search: String,
    pub clear_visible: bool,
    pub tags: String,
    pub count: Option<ResultCount>,
    pub cards: String,
    /// Whether the container holds cards rather than the empty state.
    pub has_cards: bool,
}

pub fn render_card(view: &CardView) -> String {
    let class = if view.featured {
        "project-card featured"
    } else {
        "project-card"
    };
    let tags = view.tags.join("\n");

    let body = rsx! {
        <div class="project-header">
            <h3 class="project-title"> (view.name.as_str()) </h3>
            @if view.featured {
                <span class="featured-badge"> "Featured" </span>
            }
        </div>

        <p class="project-description"> (view.description.as_str()) </p>

        @if view.organization.is_some() || !view.contributors.is_empty() {
            <div class="project-meta">
                @if let Some(organization) = &view.organization {
                    <div class="project-organization">
                        (Raw::dangerously_create(ICON_ORGANIZATION.to_string()))
                        <span> <strong> "Organization:" </strong> " " (organization.as_str()) </span>
                    </div>
                }

                @if !view.contributors.is_empty() {
                    <div class="project-contributors">
                        <span class="contributors-label"> "Contributors:" </span>
                        <div class="contributors-list">
                            @for contributor in &view.contributors {
                                <a href=(contributor.href.as_str()) target="_blank" rel="noopener noreferrer external" class="contributor" title=(contributor.title.as_str())>
                                    (Raw::dangerously_create(ICON_GITHUB.to_string()))
                                    <span> (contributor.name.as_str()) </span>
                                    @if let Some(role) = &contributor.role {
                                        <span class="contributor-role"> "(" (role.as_str()) ")" </span>
                                    }
                                </a>
                            }
                        </div>
                    </div>
                }
            </div>
        }

        @if !view.tags.is_empty() {
            <div class="project-tags">
                @for tag in &view.tags {
                    <span class="project-tag"> (tag.as_str()) </span>
                }
            </div>
        }

        @if let Some(stats) = &view.stats {
            <div class="project-stats">
                <div class="project-stat">
                    (Raw::dangerously_create(ICON_STAR.to_string()))
                    <span> (stats.stars.as_str()) </span>
                </div>
                <div class="project-stat">
                    (Raw::dangerously_create(ICON_FORK.to_string()))
                    <span> (stats.forks.as_str()) </span>
                </div>
                @if let Some(language) = &stats.language {
                    <div class="project-stat">
                        (Raw::dangerously_create(ICON_CODE.to_string()))
                        <span> (language.as_str()) </span>
                    </div>
                }
            </div>
        }

        <div class="project-actions">
            <a href=(view.repo_href.as_str()) target="_blank" rel="noopener noreferrer external" class="project-btn project-btn-primary github-btn">
                (Raw::dangerously_create(ICON_GITHUB.to_string()))
                <span> "View on GitHub" </span>
            </a>
        </div>
    }
    .render()
    .into_inner();

    let body = Raw::dangerously_create(body);

    rsx! {
        @if let Some(page) = &view.detail_page {
            <div class={class} style="cursor: pointer" data-detail-page=(page.as_str()) data-search=(view.search_index.as_str()) data-tags=(tags.as_str())>
                (body)
            </div>
        } @else {
            <div class={class} data-search=(view.search_index.as_str()) data-tags=(tags.as_str())>
                (body)
            </div>
        }
    }
    .render()
    .into_inner()
}

/// The explicit "nothing matches" block.
pub fn render_empty_state(hidden: bool) -> String {
    let style = if hidden { STYLE_HIDDEN } else { STYLE_BLOCK };

    rsx! {
        <div id="noResults" class="no-results" style={style}>
            <h3> "No projects found" </h3>
            <p> "Try adjusting your search or filter criteria" </p>
        </div>
    }
    .render()
    .into_inner()
}

/// Renders the card container content for `visible`, replacing whatever was
/// there before.
pub fn render_cards(visible: &VisibleSet<'_>, web_base: &str) -> String {
    if visible.is_empty() {
        return render_empty_state(false);
    }

    visible
        .iter()
        .map(|project| render_card(&CardView::new(project, web_base)))
        .collect()
}

pub fn render_tag_buttons(buttons: &[TagButton]) -> String {
    rsx! {
        @for button in buttons {
            @let class = if button.active { "filter-tag active" } else { "filter-tag" };
            <button type="button" class={class} data-tag=(button.tag.as_str())>
                (button.tag.as_str())
            </button>
        }
    }
    .render()
    .into_inner()
}

pub fn render_result_count(count: Option<ResultCount>) -> String {
    let style = if count.is_some() { STYLE_BLOCK } else { STYLE_HIDDEN };
    let text = count.map(|count| count.to_string()).unwrap_or_default();

    rsx! {
        <div id="resultsCount" class="results-count" style={style}>
            <span id="resultText"> (text.as_str()) </span>
        </div>
    }
    .render()
    .into_inner()
}

/// Lifecycle of the gallery page.
#[derive(Debug, Clone, Copy)]
pub enum PageState<'a> {
    /// The catalog is still being loaded.
    Loading,
    /// The feed could not be loaded; terminal.
    Failed,
    Ready(&'a View),
}

/// Static settings of the page document.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    pub stylesheet: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Projects".to_string(),
            stylesheet: Some("projects.css".to_string()),
        }
    }
}

/// Renders the whole HTML document for the given page state.
pub fn render_page(state: PageState<'_>, options: &PageOptions) -> String {
    let (loading, error, container) = match state {
        PageState::Loading => (STYLE_BLOCK, STYLE_HIDDEN, STYLE_HIDDEN),
        PageState::Failed => (STYLE_HIDDEN, STYLE_BLOCK, STYLE_HIDDEN),
        PageState::Ready(_) => (STYLE_HIDDEN, STYLE_HIDDEN, STYLE_GRID),
    };

    let (search, clear, tags, count, cards, template, script) = match state {
        PageState::Ready(view) => (
            view.search.as_str(),
            if view.clear_visible { STYLE_BLOCK } else { STYLE_HIDDEN },
            view.tags.clone(),
            render_result_count(view.count),
            view.cards.clone(),
            // the browser script needs an empty state to reveal
            if view.has_cards {
                render_empty_state(true)
            } else {
                String::new()
            },
            SCRIPT,
        ),
        _ => (
            "",
            STYLE_HIDDEN,
            String::new(),
            render_result_count(None),
            String::new(),
            String::new(),
            "",
        ),
    };

    let tags = Raw::dangerously_create(tags);
    let count = Raw::dangerously_create(count);
    let cards = Raw::dangerously_create(cards);
    let template = Raw::dangerously_create(template);
    let script = Raw::dangerously_create(script.to_string());
    let title = options.title.as_str();

    rsx! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="UTF-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1.0" />
                <title> (title) </title>
                @if let Some(href) = &options.stylesheet {
                    <link rel="stylesheet" href=(href.as_str()) />
                }
            </head>
            <body>
                <main class="projects-page">
                    <h1> (title) </h1>

                    <div class="search-container">
                        <input type="search" id="searchInput" class="search-input" placeholder="Search projects..." autocomplete="off" value={search} />
                        <button type="button" id="clearSearch" class="clear-search" style={clear}> "Clear" </button>
                    </div>

                    <div id="filterTags" class="filter-tags">
                        (tags)
                    </div>

                    (count)

                    <div id="loading" class="loading" style={loading}>
                        <p> "Loading projects..." </p>
                    </div>

                    <div id="error-message" class="error-message" style={error}>
                        <p> "Failed to load projects. Please try again later." </p>
                    </div>

                    <div id="projects-container" class="projects-grid" style={container}>
                        (cards)
                    </div>

                    (template)
                </main>
                <script>
                    (script)
                </script>
            </body>
        </html>
    }
    .render()
    .into_inner()
}
