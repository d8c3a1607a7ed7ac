//! Framework-independent rendering of movie records.
//!
//! Renderers are pure: they map a record (plus the favourites state at
//! render time) to a [`RenderedNode`] tree that any front end can draw.
//! They never touch the network or storage themselves.

mod cards;
mod views;

pub use cards::{
    favourite_button, render_detail, render_summary_card, CardCapabilities, DetailRenderer,
    LabelStyle, SummaryCardRenderer, PLACEHOLDER_DETAIL_POSTER, PLACEHOLDER_POSTER,
};
pub use views::{
    DetailStatus, DetailView, FavouritesView, SearchView, MSG_DETAILS_FAILED,
    MSG_DETAILS_UNAVAILABLE, MSG_LOADING, MSG_NO_FAVOURITES, MSG_NO_SELECTION,
    MSG_SEARCH_FAILED,
};

use serde::Serialize;

/// A user action attached to a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Select the movie for the detail view.
    ShowDetail { movie_id: String },
    /// Add or remove the movie from favourites.
    ToggleFavourite { movie_id: String },
    /// Return to the previous view.
    NavigateBack,
    /// Fetch and append the given result page.
    LoadMore { page: u32 },
}

/// Description of a renderable UI element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedNode {
    /// Summary card for one movie.
    Card {
        movie_id: String,
        children: Vec<RenderedNode>,
    },
    /// Full detail block for one movie.
    Detail {
        movie_id: String,
        children: Vec<RenderedNode>,
    },
    /// Container of cards.
    Grid { children: Vec<RenderedNode> },
    Image { src: String, alt: String },
    Heading { level: u8, text: String },
    Text { class: String, text: String },
    /// Labelled value, e.g. "Director: ...".
    Field { label: String, value: String },
    /// Row of buttons.
    Actions { children: Vec<RenderedNode> },
    Button {
        label: String,
        action: Action,
        #[serde(skip_serializing_if = "Option::is_none")]
        aria_label: Option<String>,
    },
    /// Status or empty-state message.
    Message { text: String },
}

impl RenderedNode {
    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[RenderedNode] {
        match self {
            RenderedNode::Card { children, .. }
            | RenderedNode::Detail { children, .. }
            | RenderedNode::Grid { children }
            | RenderedNode::Actions { children } => children,
            _ => &[],
        }
    }

    /// Depth-first search for the first node matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&RenderedNode) -> bool) -> Option<&RenderedNode> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    /// Every button in the subtree, in document order.
    pub fn buttons(&self) -> Vec<&RenderedNode> {
        let mut out = Vec::new();
        self.collect_buttons(&mut out);
        out
    }

    fn collect_buttons<'a>(&'a self, out: &mut Vec<&'a RenderedNode>) {
        if matches!(self, RenderedNode::Button { .. }) {
            out.push(self);
        }
        for child in self.children() {
            child.collect_buttons(out);
        }
    }

    /// Label of the favourite toggle in this subtree, if any.
    pub fn favourite_label(&self) -> Option<&str> {
        self.buttons().into_iter().find_map(|b| match b {
            RenderedNode::Button {
                label,
                action: Action::ToggleFavourite { .. },
                ..
            } => Some(label.as_str()),
            _ => None,
        })
    }
}

/// Maps a record of type `T` to a renderable node.
pub trait Renderer<T: ?Sized> {
    fn render(&self, item: &T) -> RenderedNode;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serialization_is_tagged() {
        let node = RenderedNode::Button {
            label: "Back".to_string(),
            action: Action::NavigateBack,
            aria_label: None,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["action"]["action"], "navigate_back");
        assert!(json.get("aria_label").is_none());
    }

    #[test]
    fn test_buttons_in_document_order() {
        let node = RenderedNode::Grid {
            children: vec![RenderedNode::Actions {
                children: vec![
                    RenderedNode::Button {
                        label: "a".to_string(),
                        action: Action::NavigateBack,
                        aria_label: None,
                    },
                    RenderedNode::Button {
                        label: "b".to_string(),
                        action: Action::LoadMore { page: 2 },
                        aria_label: None,
                    },
                ],
            }],
        };

        let labels: Vec<_> = node
            .buttons()
            .into_iter()
            .filter_map(|b| match b {
                RenderedNode::Button { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert!(node.favourite_label().is_none());
    }
}
