use eframe::egui::{RichText, Ui};

use crate::view::{MediumFilter, SelectionOrigin};
use crate::voice::NodeKind;

use super::super::ViewModel;
use super::super::physics::ALPHA_START;
use super::super::render_utils::node_color;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui, now: f64) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search")
            .on_hover_text("Selects the first node whose name contains the text.");
        let search_response = ui.text_edit_singleline(&mut self.search);
        if search_response.changed() {
            self.submit_search(now);
        }

        let mut picked = None;
        for &index in &self.suggestions {
            let Some(node) = self.graph.node(index) else {
                continue;
            };
            let text = RichText::new(&node.label).color(node_color(node.kind));
            if ui
                .selectable_label(self.params.selected == Some(index), text)
                .on_hover_text(node.kind.label())
                .clicked()
            {
                picked = Some(index);
            }
        }
        if let Some(index) = picked {
            self.select_node(index, SelectionOrigin::Search, now);
        }

        ui.separator();
        ui.label("Medium");
        let mut next_filter = None;
        ui.horizontal_wrapped(|ui| {
            let options = std::iter::once(MediumFilter::All).chain(
                self.mediums
                    .iter()
                    .map(|medium| MediumFilter::Medium(medium.clone())),
            );
            for option in options {
                if ui
                    .selectable_label(self.params.filter == option, option.label())
                    .clicked()
                {
                    next_filter = Some(option);
                }
            }
        });
        if let Some(filter) = next_filter {
            self.set_filter(filter, now);
        }

        if let Some(focus) = self.params.focus {
            ui.separator();
            let label = self.graph.label(focus).unwrap_or_default();
            ui.label(format!("Focused on {label}"));
            if ui.button("Exit Focus View").clicked() {
                self.toggle_focus(now);
            }
        }

        ui.separator();
        ui.checkbox(&mut self.live_physics, "Live physics")
            .on_hover_text("Freeze or resume the force layout.");
        if ui.button("Re-run layout").clicked()
            && let Some(cache) = self.graph_cache.as_mut()
        {
            cache.alpha = ALPHA_START;
        }

        ui.separator();
        ui.horizontal(|ui| {
            for kind in [NodeKind::Actor, NodeKind::Work] {
                ui.label(RichText::new("●").color(node_color(kind)));
                ui.label(kind.label());
            }
        });
        ui.label(format!(
            "Showing {} of {} nodes, {} of {} links",
            self.visible_node_count,
            self.graph.node_count(),
            self.visible_link_count,
            self.graph.link_count()
        ));
    }
}
