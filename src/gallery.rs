//! Interactive state of the gallery and the table mapping user events to
//! state changes.

use crate::filter::{FilterState, ResultCount, VisibleSet};
use crate::model::Catalog;
use crate::render::{self, View};

/// What was under the pointer when a card was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A link inside the card.
    Anchor,
    /// A button inside the card.
    Button,
    /// Anywhere else on the card.
    Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search box content changed.
    Search(String),
    ClearSearch,
    ToggleTag(String),
    /// A card was clicked. `index` is the card's position in the catalog,
    /// which stays unique when two records share a repository.
    CardClick { index: usize, target: ClickTarget },
}

/// Outcome of dispatching an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the rendered gallery with this view.
    Render(View),
    /// Leave the page for a project's detail page.
    Navigate(String),
    /// Nothing to do; the click belongs to a nested link or button, or the
    /// event refers to something that isn't on the page.
    Ignore,
}

/// A loaded catalog plus the current filter selection.
pub struct Gallery {
    catalog: Catalog,
    /// Tag buttons are fixed once, from the full catalog.
    tags: Vec<String>,
    state: FilterState,
    web_base: String,
}

impl Gallery {
    pub fn new(catalog: Catalog, web_base: impl Into<String>) -> Self {
        Self {
            tags: catalog.all_tags(),
            catalog,
            state: FilterState::new(),
            web_base: web_base.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn visible(&self) -> VisibleSet<'_> {
        self.state.apply(&self.catalog)
    }

    /// Renders the gallery for the current filter state.
    pub fn view(&self) -> View {
        let visible = self.visible();

        View {
            search: self.state.search().to_string(),
            clear_visible: !self.state.search().is_empty(),
            tags: render::render_tag_buttons(&render::tag_buttons(&self.tags, &self.state)),
            count: ResultCount::for_state(&self.state, &visible),
            cards: render::render_cards(&visible, &self.web_base),
            has_cards: !visible.is_empty(),
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Effect {
        match event {
            Event::Search(text) => {
                self.state.set_search(&text);
                Effect::Render(self.view())
            }
            Event::ClearSearch => {
                self.state.clear_search();
                Effect::Render(self.view())
            }
            Event::ToggleTag(tag) => {
                if !self.tags.contains(&tag) {
                    return Effect::Ignore;
                }
                self.state.toggle_tag(&tag);
                Effect::Render(self.view())
            }
            Event::CardClick { index, target } => {
                if target != ClickTarget::Card {
                    return Effect::Ignore;
                }
                self.catalog
                    .iter()
                    .nth(index)
                    .and_then(|project| project.record.detail_page.clone())
                    .map_or(Effect::Ignore, Effect::Navigate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnrichedProject;
    use crate::model::tests::record;
    use crate::render::DEFAULT_WEB_BASE;

    fn gallery() -> Gallery {
        let mut alpha = record("acme/alpha", "Alpha", 2, &["infra"]);
        alpha.detail_page = Some("alpha.html".to_string());

        Gallery::new(
            Catalog::new(vec![
                EnrichedProject::new(alpha, None),
                EnrichedProject::new(record("acme/beta", "Beta", 1, &["web"]), None),
            ]),
            DEFAULT_WEB_BASE,
        )
    }

    fn names(gallery: &Gallery) -> Vec<&str> {
        gallery.visible().into_iter().map(EnrichedProject::name).collect()
    }

    fn rendered(effect: Effect) -> View {
        match effect {
            Effect::Render(view) => view,
            other => panic!("expected a render, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_view() {
        let gallery = gallery();
        let view = gallery.view();

        assert_eq!(names(&gallery), ["Beta", "Alpha"]);
        assert_eq!(view.count, None);
        assert!(!view.clear_visible);
        assert!(view.has_cards);
        assert_eq!(gallery.tags(), ["infra", "web"]);
    }

    #[test]
    fn test_scenario() {
        let mut gallery = gallery();

        let view = rendered(gallery.dispatch(Event::Search("Alpha".to_string())));
        assert_eq!(names(&gallery), ["Alpha"]);
        assert_eq!(view.count, Some(ResultCount(1)));
        assert!(view.clear_visible);

        rendered(gallery.dispatch(Event::ClearSearch));
        rendered(gallery.dispatch(Event::ToggleTag("web".to_string())));
        assert_eq!(names(&gallery), ["Beta"]);

        let view = rendered(gallery.dispatch(Event::ToggleTag("infra".to_string())));
        assert_eq!(names(&gallery), ["Beta", "Alpha"]);
        assert_eq!(view.count, Some(ResultCount(2)));
        assert_eq!(view.tags.matches("filter-tag active").count(), 2);

        rendered(gallery.dispatch(Event::ToggleTag("web".to_string())));
        rendered(gallery.dispatch(Event::ToggleTag("infra".to_string())));
        assert_eq!(gallery.view().count, None);
    }

    #[test]
    fn test_repeated_event_is_stable() {
        let mut gallery = gallery();

        let first = rendered(gallery.dispatch(Event::Search("be".to_string())));
        let second = rendered(gallery.dispatch(Event::Search("be".to_string())));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_state() {
        let mut gallery = gallery();

        let view = rendered(gallery.dispatch(Event::Search("nothing".to_string())));
        assert!(!view.has_cards);
        assert_eq!(view.count, Some(ResultCount(0)));
        assert!(view.cards.contains("No projects found"));
    }

    #[test]
    fn test_empty_catalog_without_filters() {
        let gallery = Gallery::new(Catalog::default(), DEFAULT_WEB_BASE);
        let view = gallery.view();

        assert_eq!(view.count, None);
        assert!(view.cards.contains("No projects found"));
        assert!(gallery.tags().is_empty());
    }

    #[test]
    fn test_unknown_tag() {
        let mut gallery = gallery();
        assert_eq!(
            gallery.dispatch(Event::ToggleTag("rust".to_string())),
            Effect::Ignore
        );
        assert!(gallery.state().tags().is_empty());
    }

    #[test]
    fn test_card_click() {
        let mut gallery = gallery();

        let click = |index, target| Event::CardClick { index, target };

        // alpha sorts after beta
        assert_eq!(
            gallery.dispatch(click(1, ClickTarget::Card)),
            Effect::Navigate("alpha.html".to_string())
        );
        assert_eq!(gallery.dispatch(click(1, ClickTarget::Anchor)), Effect::Ignore);
        assert_eq!(gallery.dispatch(click(1, ClickTarget::Button)), Effect::Ignore);
        // no detail page
        assert_eq!(gallery.dispatch(click(0, ClickTarget::Card)), Effect::Ignore);
        assert_eq!(gallery.dispatch(click(2, ClickTarget::Card)), Effect::Ignore);
    }

    #[test]
    fn test_card_click_duplicate_repo() {
        let mut first = record("acme/alpha", "Alpha", 1, &[]);
        first.detail_page = Some("first.html".to_string());
        let mut second = record("acme/alpha", "Alpha again", 2, &[]);
        second.detail_page = Some("second.html".to_string());

        let mut gallery = Gallery::new(
            Catalog::new(vec![
                EnrichedProject::new(first, None),
                EnrichedProject::new(second, None),
            ]),
            DEFAULT_WEB_BASE,
        );

        assert_eq!(
            gallery.dispatch(Event::CardClick {
                index: 1,
                target: ClickTarget::Card
            }),
            Effect::Navigate("second.html".to_string())
        );
    }
}
