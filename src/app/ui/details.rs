use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

fn focus_button_text(is_focused: bool) -> &'static str {
    if is_focused {
        "Exit Focus View"
    } else {
        "Focus View"
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui, now: f64) {
        let Some(detail) = &self.detail else {
            ui.label("Select a node to see its details.");
            return;
        };

        ui.heading(detail.title.as_str());
        ui.label(RichText::new(detail.subtitle.as_str()).italics());
        ui.add_space(8.0);

        ui.label(RichText::new(detail.heading).strong());
        let summary = detail.summary();
        egui::ScrollArea::vertical()
            .max_height(260.0)
            .show(ui, |ui| {
                if summary.is_empty() {
                    ui.weak("None listed.");
                } else {
                    ui.label(summary);
                }
            });

        ui.add_space(8.0);
        let mut toggle = false;
        let mut close = false;
        ui.horizontal(|ui| {
            toggle = ui
                .button(focus_button_text(self.params.is_focused()))
                .clicked();
            close = ui.button("Close").clicked();
        });

        if toggle {
            self.toggle_focus(now);
        }
        if close {
            self.close_selection();
        }
    }
}
