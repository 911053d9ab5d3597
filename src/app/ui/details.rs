use eframe::egui::{self, RichText, Ui};

use crate::util::format_weight;

use super::super::ViewModel;

impl ViewModel {
    /// Details side panel: the selected related stack when one is focused,
    /// otherwise the focal entity, plus the full relation list.
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let shown_id = self
            .selection
            .focused_id()
            .unwrap_or(self.focal_id.as_str())
            .to_owned();

        let Some(entity) = self.dataset.entity(&shown_id).cloned() else {
            ui.label("Nothing selected.");
            return;
        };

        ui.add_space(6.0);
        ui.heading(&entity.display_name);
        if let Some(summary) = self.relation_summary(&entity.id) {
            ui.label(RichText::new(summary).weak());
        }
        if !entity.description.is_empty() {
            ui.add_space(4.0);
            ui.label(&entity.description);
        }
        if let Some(logo) = &entity.logo_ref {
            ui.hyperlink_to("logo asset", logo);
        }

        if self.selection.focused_id().is_some() && ui.button("Focus this stack").clicked() {
            self.set_focal_entity(&shown_id);
            return;
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new("Related stacks").strong());

        let related = self.related.as_ref().clone();
        if related.is_empty() {
            ui.weak("No recorded relations.");
            return;
        }

        let mut navigate_to = None;
        let mut toggle = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &related {
                let Some(target) = self.dataset.entity(&entry.entity_id) else {
                    continue;
                };

                ui.horizontal(|ui| {
                    let selected = self.selection.is_focused(&entry.entity_id);
                    if ui
                        .selectable_label(selected, &target.display_name)
                        .clicked()
                    {
                        toggle = Some(entry.entity_id.clone());
                    }
                    ui.weak(format!(
                        "{} ({})",
                        if entry.label.is_empty() { "related" } else { &entry.label },
                        format_weight(entry.weight)
                    ));
                    if ui.small_button("\u{2192}").on_hover_text("Open").clicked() {
                        navigate_to = Some(entry.entity_id.clone());
                    }
                });
            }
        });

        if let Some(id) = toggle {
            self.selection.toggle(&id);
        }
        if let Some(id) = navigate_to {
            self.set_focal_entity(&id);
        }
    }
}
