use eframe::egui::{self, Align, Context, Layout};

use crate::util::format_weight;

use super::super::{Screen, ViewMode, ViewModel};

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("stackgraph");
                    ui.separator();
                    ui.label(format!("stacks: {}", self.dataset.entity_count()));
                    ui.label(format!("relations: {}", self.dataset.relation_count));

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload dataset"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.screen == Screen::Graph
                            && let Some(focal) = self.dataset.entity(&self.focal_id)
                        {
                            ui.label(format!("focus: {}", focal.display_name));
                        }
                    });
                });
            });

        if self.screen == Screen::Browser {
            egui::CentralPanel::default().show(ctx, |ui| {
                if is_loading {
                    Self::loading_notice(ui);
                } else {
                    self.draw_browser(ui);
                }
            });
            return;
        }

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::TopBottomPanel::top("graph_toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.view_mode, ViewMode::Relations, "Relations");
                    ui.selectable_value(&mut self.view_mode, ViewMode::Categories, "Categories");
                    ui.separator();

                    let viewport = match self.view_mode {
                        ViewMode::Relations => &mut self.relations_viewport,
                        ViewMode::Categories => &mut self.categories_viewport,
                    };
                    if ui.button("\u{2212}").on_hover_text("Zoom out").clicked() {
                        viewport.zoom_out();
                    }
                    ui.label(format!("{:.0}%", viewport.scale * 100.0));
                    if ui.button("+").on_hover_text("Zoom in").clicked() {
                        viewport.zoom_in();
                    }
                    if ui.button("Reset view").clicked() {
                        viewport.reset();
                    }

                    if self.view_mode == ViewMode::Categories
                        && ui
                            .button("Restart layout")
                            .on_hover_text("Release pinned nodes and reheat")
                            .clicked()
                        && let Some(simulation) = self.simulation.as_mut()
                    {
                        simulation.restart();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            self.close_graph();
                        }
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                Self::loading_notice(ui);
                return;
            }

            match self.view_mode {
                ViewMode::Relations => self.draw_relations_graph(ui),
                ViewMode::Categories => self.draw_categories_graph(ui),
            }
        });
    }

    fn loading_notice(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading("Reloading relation dataset...");
            ui.add_space(8.0);
            ui.spinner();
        });
    }

    pub(in crate::app) fn relation_summary(&self, entity_id: &str) -> Option<String> {
        let entry = self
            .related
            .iter()
            .find(|entry| entry.entity_id == entity_id)?;
        let label = if entry.label.is_empty() {
            "related"
        } else {
            entry.label.as_str()
        };
        Some(format!("{label}, weight {}", format_weight(entry.weight)))
    }
}
