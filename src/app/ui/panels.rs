use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};
use tracing::{debug, info};

use crate::view::{
    CameraDirector, EngineConfig, HighlightSet, MediumFilter, SelectionOrigin, ViewEvent,
    ViewParameters, build_highlight, find_first_match, fuzzy_suggestions, resolve_detail,
};
use crate::voice::VoiceGraph;

use super::super::ViewModel;
use super::super::camera::ViewCamera;

impl ViewModel {
    pub(in crate::app) const SUGGESTION_LIMIT: usize = 8;

    pub(in crate::app) fn new(graph: VoiceGraph, engine: EngineConfig) -> Self {
        Self {
            mediums: graph.mediums(),
            graph,
            engine,
            params: ViewParameters::default(),
            highlight: HighlightSet::default(),
            detail: None,
            search: String::new(),
            suggestions: Vec::new(),
            camera: ViewCamera::default(),
            director: CameraDirector::new(engine.fit_timers),
            queued_camera: Vec::new(),
            awaiting_first_frame: true,
            live_physics: true,
            dragged_node: None,
            graph_dirty: true,
            graph_cache: None,
            visible_node_count: 0,
            visible_link_count: 0,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        let now = ctx.input(|input| input.time);
        if self.awaiting_first_frame {
            self.awaiting_first_frame = false;
            self.queue_camera(ViewEvent::DataLoaded, now);
        }
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Voice Actor Graph");
                    ui.separator();
                    ui.label(format!("data: {}", data_path.display()));
                    ui.label(format!("nodes: {}", self.graph.node_count()));
                    ui.label(format!("links: {}", self.graph.link_count()));
                    if self.graph.dropped_links > 0 {
                        ui.label(format!("dropped: {}", self.graph.dropped_links));
                    }
                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if is_reloading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "rendered: {} nodes / {} links",
                            self.visible_node_count, self.visible_link_count
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui, now));

        if self.detail.is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| self.draw_details(ui, now));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    pub(in crate::app) fn set_filter(&mut self, filter: MediumFilter, now: f64) {
        if self.params.filter == filter {
            return;
        }

        info!(%filter, "medium filter changed");
        self.params = self.params.clone().with_filter(filter);
        self.graph_dirty = true;
        self.queue_camera(ViewEvent::FilterChanged, now);
    }

    pub(in crate::app) fn select_node(&mut self, node: usize, origin: SelectionOrigin, now: f64) {
        let Some(detail) = resolve_detail(&self.graph, node) else {
            return;
        };

        debug!(node, ?origin, title = %detail.title, "node selected");
        self.params = self.params.clone().with_selected(Some(node));
        self.detail = Some(detail);
        self.queue_camera(ViewEvent::NodeSelected { node, origin }, now);
    }

    /// Closing the details panel drops the selection but leaves focus view alone.
    pub(in crate::app) fn close_selection(&mut self) {
        self.params = self.params.clone().with_selected(None);
        self.detail = None;
    }

    pub(in crate::app) fn toggle_focus(&mut self, now: f64) {
        let next = self.params.clone().toggle_focus();
        if next.focus == self.params.focus {
            return;
        }

        info!(focus = ?next.focus, "focus view toggled");
        self.params = next;
        self.graph_dirty = true;
        self.queue_camera(ViewEvent::FocusChanged, now);
    }

    /// The highlight is rebuilt only when the hovered node actually changes.
    pub(in crate::app) fn set_hovered(&mut self, hovered: Option<usize>) {
        if self.params.hovered == hovered {
            return;
        }

        self.params = self.params.clone().with_hovered(hovered);
        self.highlight = build_highlight(&self.graph, hovered);
    }

    pub(in crate::app) fn submit_search(&mut self, now: f64) {
        self.suggestions = fuzzy_suggestions(&self.graph, &self.search, Self::SUGGESTION_LIMIT);

        match find_first_match(&self.graph, &self.search) {
            Some(node) => self.select_node(node, SelectionOrigin::Search, now),
            None => debug!(query = %self.search, "search found no match"),
        }
    }

    fn queue_camera(&mut self, event: ViewEvent, now: f64) {
        if let Some(command) = self.director.on_event(event, now) {
            self.queued_camera.push(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CameraCommand;
    use crate::voice::fixtures::*;

    fn model() -> ViewModel {
        ViewModel::new(two_actor_graph(), EngineConfig::default())
    }

    #[test]
    fn new_model_lists_mediums_and_starts_dirty() {
        let model = model();
        assert_eq!(model.mediums, vec!["anime".to_owned()]);
        assert!(model.graph_dirty);
        assert!(model.awaiting_first_frame);
        assert_eq!(model.params, ViewParameters::default());
    }

    #[test]
    fn filter_change_schedules_a_fit() {
        let mut model = model();
        model.graph_dirty = false;

        model.set_filter(MediumFilter::Medium("anime".into()), 1.0);
        assert!(model.graph_dirty);
        assert_eq!(model.director.next_deadline(), Some(1.5));

        let mut repeat = ViewModel::new(two_actor_graph(), EngineConfig::default());
        repeat.graph_dirty = false;
        repeat.set_filter(MediumFilter::All, 1.0);
        assert!(!repeat.graph_dirty);
        assert_eq!(repeat.director.next_deadline(), None);
    }

    #[test]
    fn selecting_resolves_details_and_flies() {
        let mut model = model();
        let a1 = idx(&model.graph, "A1");

        model.select_node(a1, SelectionOrigin::Click, 0.0);
        assert_eq!(model.params.selected, Some(a1));
        assert_eq!(
            model.detail.as_ref().map(|detail| detail.heading),
            Some("Credits")
        );
        assert!(matches!(
            model.queued_camera.as_slice(),
            [CameraCommand::FlyTo { node, .. }] if *node == a1
        ));
    }

    #[test]
    fn focus_toggle_needs_a_selection() {
        let mut model = model();
        model.graph_dirty = false;

        model.toggle_focus(0.0);
        assert_eq!(model.params.focus, None);
        assert!(!model.graph_dirty);

        let w2 = idx(&model.graph, "W2");
        model.select_node(w2, SelectionOrigin::Click, 0.0);
        model.toggle_focus(0.0);
        assert_eq!(model.params.focus, Some(w2));
        assert!(model.graph_dirty);

        model.close_selection();
        assert_eq!(model.params.selected, None);
        assert!(model.detail.is_none());
        assert_eq!(model.params.focus, Some(w2));

        model.toggle_focus(0.0);
        assert_eq!(model.params.focus, None);
    }

    #[test]
    fn hover_rebuilds_highlight_on_transitions() {
        let mut model = model();
        let a2 = idx(&model.graph, "A2");

        model.set_hovered(Some(a2));
        assert_eq!(model.highlight.links.len(), 1);
        assert!(model.highlight.contains_node(idx(&model.graph, "W2")));

        model.highlight = HighlightSet::default();
        model.set_hovered(Some(a2));
        assert!(model.highlight.is_empty());

        model.set_hovered(None);
        assert!(model.highlight.is_empty());
        assert_eq!(model.params.hovered, None);
    }

    #[test]
    fn search_selects_first_match_with_search_zoom() {
        let mut model = model();
        model.search = "w".into();

        model.submit_search(0.0);
        let w1 = idx(&model.graph, "W1");
        assert_eq!(model.params.selected, Some(w1));
        assert!(matches!(
            model.queued_camera.as_slice(),
            [CameraCommand::FlyTo { zoom, .. }] if *zoom == 3.0
        ));
        assert!(model.suggestions.contains(&w1));
    }

    #[test]
    fn search_without_match_changes_nothing() {
        let mut model = model();
        model.search = "zzz".into();

        model.submit_search(0.0);
        assert_eq!(model.params.selected, None);
        assert!(model.queued_camera.is_empty());
        assert!(model.suggestions.is_empty());
    }
}
