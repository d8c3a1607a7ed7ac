//! Summary cards and the detail block.

use super::{Action, RenderedNode, Renderer};
use crate::favourites::FavouritesStore;
use crate::movies::{MovieDetail, MovieSummary};

/// Image shown on cards when a movie has no poster.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/400x600?text=No+Image";

/// Image shown in the detail view when a movie has no poster.
pub const PLACEHOLDER_DETAIL_POSTER: &str = "https://via.placeholder.com/600x900";

/// Which affordances a summary card carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCapabilities {
    pub show_detail_action: bool,
    pub show_favourite_action: bool,
}

impl Default for CardCapabilities {
    fn default() -> Self {
        Self {
            show_detail_action: true,
            show_favourite_action: true,
        }
    }
}

/// Wording of the favourite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// "Add Fav" / "Remove Fav"
    Card,
    /// "Add Favourite" / "Remove Favourite"
    Detail,
}

impl LabelStyle {
    fn label(self, is_favourite: bool) -> &'static str {
        match (self, is_favourite) {
            (LabelStyle::Card, false) => "Add Fav",
            (LabelStyle::Card, true) => "Remove Fav",
            (LabelStyle::Detail, false) => "Add Favourite",
            (LabelStyle::Detail, true) => "Remove Favourite",
        }
    }
}

/// The favourite toggle button for a movie.
pub fn favourite_button(movie_id: &str, is_favourite: bool, style: LabelStyle) -> RenderedNode {
    RenderedNode::Button {
        label: style.label(is_favourite).to_string(),
        action: Action::ToggleFavourite {
            movie_id: movie_id.to_string(),
        },
        aria_label: None,
    }
}

fn poster_src(poster_url: Option<&str>, placeholder: &str) -> String {
    poster_url
        .filter(|p| !p.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Renders [`MovieSummary`] records as cards.
pub struct SummaryCardRenderer<'a> {
    favourites: &'a FavouritesStore,
    capabilities: CardCapabilities,
}

impl<'a> SummaryCardRenderer<'a> {
    pub fn new(favourites: &'a FavouritesStore, capabilities: CardCapabilities) -> Self {
        Self {
            favourites,
            capabilities,
        }
    }
}

impl Renderer<MovieSummary> for SummaryCardRenderer<'_> {
    fn render(&self, movie: &MovieSummary) -> RenderedNode {
        let mut actions = Vec::new();

        if self.capabilities.show_detail_action {
            actions.push(RenderedNode::Button {
                label: "Details".to_string(),
                action: Action::ShowDetail {
                    movie_id: movie.id.clone(),
                },
                aria_label: Some(format!("View details of {}", movie.title)),
            });
        }

        if self.capabilities.show_favourite_action {
            actions.push(favourite_button(
                &movie.id,
                self.favourites.contains(&movie.id),
                LabelStyle::Card,
            ));
        }

        RenderedNode::Card {
            movie_id: movie.id.clone(),
            children: vec![
                RenderedNode::Image {
                    src: poster_src(movie.poster_url.as_deref(), PLACEHOLDER_POSTER),
                    alt: movie.title.clone(),
                },
                RenderedNode::Heading {
                    level: 3,
                    text: movie.title.clone(),
                },
                RenderedNode::Text {
                    class: "meta".to_string(),
                    text: movie.year.clone(),
                },
                RenderedNode::Actions { children: actions },
            ],
        }
    }
}

/// Renders a [`MovieDetail`] as the detail block.
pub struct DetailRenderer<'a> {
    favourites: &'a FavouritesStore,
}

impl<'a> DetailRenderer<'a> {
    pub fn new(favourites: &'a FavouritesStore) -> Self {
        Self { favourites }
    }
}

impl Renderer<MovieDetail> for DetailRenderer<'_> {
    fn render(&self, movie: &MovieDetail) -> RenderedNode {
        let field = |label: &str, value: &str| RenderedNode::Field {
            label: label.to_string(),
            value: value.to_string(),
        };

        RenderedNode::Detail {
            movie_id: movie.id.clone(),
            children: vec![
                RenderedNode::Image {
                    src: poster_src(movie.poster_url.as_deref(), PLACEHOLDER_DETAIL_POSTER),
                    alt: movie.title.clone(),
                },
                RenderedNode::Heading {
                    level: 2,
                    text: format!("{} ({})", movie.title, movie.year),
                },
                field("Plot", &movie.plot),
                field("Genre", &movie.genre),
                field("Director", &movie.director),
                field("Actors", &movie.actors),
                field("IMDB Rating", &movie.rating),
                RenderedNode::Actions {
                    children: vec![
                        favourite_button(
                            &movie.id,
                            self.favourites.contains(&movie.id),
                            LabelStyle::Detail,
                        ),
                        RenderedNode::Button {
                            label: "Back".to_string(),
                            action: Action::NavigateBack,
                            aria_label: None,
                        },
                    ],
                },
            ],
        }
    }
}

/// Render one summary card with the given affordances.
pub fn render_summary_card(
    movie: &MovieSummary,
    capabilities: CardCapabilities,
    favourites: &FavouritesStore,
) -> RenderedNode {
    SummaryCardRenderer::new(favourites, capabilities).render(movie)
}

/// Render the detail block for a movie.
pub fn render_detail(movie: &MovieDetail, favourites: &FavouritesStore) -> RenderedNode {
    DetailRenderer::new(favourites).render(movie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use crate::testing::fixtures;
    use std::sync::Arc;

    fn store() -> FavouritesStore {
        FavouritesStore::load(Arc::new(SqliteStorage::in_memory().unwrap()))
    }

    fn image_src(node: &RenderedNode) -> String {
        match node.find(&|n| matches!(n, RenderedNode::Image { .. })) {
            Some(RenderedNode::Image { src, .. }) => src.clone(),
            _ => panic!("no image in node"),
        }
    }

    #[test]
    fn test_card_with_both_actions() {
        let favourites = store();
        let movie = fixtures::summary("tt0848228", "The Avengers");

        let card = render_summary_card(&movie, CardCapabilities::default(), &favourites);

        let buttons = card.buttons();
        assert_eq!(buttons.len(), 2);
        assert!(matches!(
            buttons[0],
            RenderedNode::Button { action: Action::ShowDetail { movie_id }, .. } if movie_id == "tt0848228"
        ));
        assert_eq!(card.favourite_label(), Some("Add Fav"));
    }

    #[test]
    fn test_card_respects_capabilities() {
        let favourites = store();
        let movie = fixtures::summary("tt1", "One");

        let only_fav = render_summary_card(
            &movie,
            CardCapabilities {
                show_detail_action: false,
                show_favourite_action: true,
            },
            &favourites,
        );
        assert_eq!(only_fav.buttons().len(), 1);
        assert!(only_fav.favourite_label().is_some());

        let none = render_summary_card(
            &movie,
            CardCapabilities {
                show_detail_action: false,
                show_favourite_action: false,
            },
            &favourites,
        );
        assert!(none.buttons().is_empty());
    }

    #[test]
    fn test_card_label_follows_store() {
        let favourites = store();
        let movie = fixtures::summary("tt1", "One");
        let renderer = SummaryCardRenderer::new(&favourites, CardCapabilities::default());

        assert_eq!(renderer.render(&movie).favourite_label(), Some("Add Fav"));
        favourites.toggle(&movie).unwrap();
        assert_eq!(renderer.render(&movie).favourite_label(), Some("Remove Fav"));
    }

    #[test]
    fn test_missing_poster_uses_placeholder() {
        let favourites = store();
        let movie = MovieSummary::new("tt1", "One", "2000", Some("N/A".to_string()));

        let card = render_summary_card(&movie, CardCapabilities::default(), &favourites);
        assert_eq!(image_src(&card), PLACEHOLDER_POSTER);

        let mut detail = fixtures::detail("tt1", "One");
        detail.poster_url = None;
        assert_eq!(image_src(&render_detail(&detail, &favourites)), PLACEHOLDER_DETAIL_POSTER);
    }

    #[test]
    fn test_detail_has_fields_and_back() {
        let favourites = store();
        let detail = fixtures::detail("tt0133093", "The Matrix");
        favourites.toggle(&detail.summary()).unwrap();

        let node = render_detail(&detail, &favourites);

        assert_eq!(node.favourite_label(), Some("Remove Favourite"));
        assert!(node
            .buttons()
            .iter()
            .any(|b| matches!(b, RenderedNode::Button { action: Action::NavigateBack, .. })));
        assert!(node
            .find(&|n| matches!(n, RenderedNode::Heading { text, .. } if text == "The Matrix (1999)"))
            .is_some());
        assert!(node
            .find(&|n| matches!(n, RenderedNode::Field { label, .. } if label == "IMDB Rating"))
            .is_some());
    }
}
