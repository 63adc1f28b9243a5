//! Pure view derivation: everything the viewer shows is computed from the
//! canonical [`VoiceGraph`] and one [`ViewParameters`] value.

use std::fmt;

use clap::ValueEnum;
use tracing::debug;

use crate::voice::VoiceGraph;

mod camera;
mod detail;
mod filter;
mod highlight;
mod neighborhood;
mod search;

pub use camera::{CameraCommand, CameraDirector, CameraSurface, SelectionOrigin, ViewEvent};
pub use detail::{DetailPayload, resolve_detail};
pub use filter::filter_by_medium;
pub use highlight::{HighlightSet, build_highlight};
pub use neighborhood::expand_neighborhood;
pub use search::{find_first_match, fuzzy_suggestions};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediumFilter {
    #[default]
    All,
    Medium(String),
}

impl MediumFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Medium(medium) => medium,
        }
    }
}

impl fmt::Display for MediumFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which links the focus view may pull second-degree neighbors from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FocusScope {
    /// Re-expand over the whole graph, so focus can reach past the medium filter.
    #[default]
    FullGraph,
    /// Keep focus inside whatever the medium filter left.
    WithinFilter,
}

/// What happens to a pending camera fit when a newer filter/focus change arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FitTimerPolicy {
    /// Cancel the pending fit and restart the settle delay.
    #[default]
    Debounce,
    /// Keep every timer; each one fires its own fit.
    Stack,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub focus_scope: FocusScope,
    pub fit_timers: FitTimerPolicy,
}

/// Node references are indices into the canonical graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewParameters {
    pub filter: MediumFilter,
    pub focus: Option<usize>,
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
}

impl ViewParameters {
    pub fn with_filter(self, filter: MediumFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_hovered(self, hovered: Option<usize>) -> Self {
        Self { hovered, ..self }
    }

    pub fn with_selected(self, selected: Option<usize>) -> Self {
        Self { selected, ..self }
    }

    /// Leaves focus view if active, otherwise enters it on the selection.
    /// Without a selection there is nothing to focus and the value is unchanged.
    pub fn toggle_focus(self) -> Self {
        match (self.focus, self.selected) {
            (Some(_), _) => Self {
                focus: None,
                ..self
            },
            (None, Some(selected)) => Self {
                focus: Some(selected),
                ..self
            },
            (None, None) => self,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_some()
    }
}

/// An ordered selection of node and link indices from the canonical graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subgraph {
    pub nodes: Vec<usize>,
    pub links: Vec<usize>,
}

impl Subgraph {
    pub fn full(graph: &VoiceGraph) -> Self {
        Self {
            nodes: (0..graph.node_count()).collect(),
            links: (0..graph.link_count()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Medium filter first, then the focus neighborhood when a node is focused.
pub fn derive_subgraph(
    graph: &VoiceGraph,
    params: &ViewParameters,
    focus_scope: FocusScope,
) -> Subgraph {
    let filtered = filter_by_medium(graph, &params.filter);
    let derived = match params.focus {
        Some(focus) => expand_neighborhood(graph, &filtered, focus, focus_scope),
        None => filtered,
    };

    debug!(
        filter = %params.filter,
        focus = ?params.focus,
        nodes = derived.nodes.len(),
        links = derived.links.len(),
        "derived view subgraph"
    );
    derived
}
