use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// Entity browser: fuzzy-searchable list of every stack in the dataset.
    /// Picking one opens the relation graph centered on it.
    pub(in crate::app) fn draw_browser(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.heading("Technology stacks");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.browser_search);
            if ui.button("\u{2715}").clicked() {
                self.browser_search.clear();
            }
        });
        ui.separator();

        let query = self.browser_search.trim().to_owned();
        let matcher = SkimMatcherV2::default();

        let mut rows = Vec::new();
        for entity in self.dataset.browser_order() {
            if !query.is_empty()
                && fuzzy_match_score(&matcher, &entity.display_name, &query).is_none()
                && fuzzy_match_score(&matcher, &entity.id, &query).is_none()
            {
                continue;
            }
            rows.push((
                entity.id.clone(),
                entity.display_name.clone(),
                self.dataset.related(&entity.id).len(),
            ));
        }

        if rows.is_empty() {
            ui.label("No stacks match the current search.");
            return;
        }

        let mut open_id = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (id, display_name, relation_count) in &rows {
                ui.horizontal(|ui| {
                    if ui.button(display_name).clicked() {
                        open_id = Some(id.clone());
                    }
                    ui.weak(format!("{relation_count} relations"));
                });
            }
        });

        if let Some(id) = open_id {
            self.set_focal_entity(&id);
        }
    }
}
