use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::data::{RelatedCache, RelatedStack, RelationDataset, load_dataset};

mod graph;
mod layout;
mod physics;
mod render_utils;
mod ui;
mod viewport;
mod visual;

use graph::GraphAction;
use physics::Simulation;
use viewport::Viewport;
use visual::Selection;

pub struct StackGraphApp {
    data_path: PathBuf,
    initial_focus: Option<String>,
    state: AppState,
    reload_rx: Option<Receiver<anyhow::Result<RelationDataset>>>,
}

enum AppState {
    Loading {
        rx: Receiver<anyhow::Result<RelationDataset>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Browser,
    Graph,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
    Relations,
    Categories,
}

pub(crate) struct ViewModel {
    dataset: RelationDataset,
    screen: Screen,
    view_mode: ViewMode,
    focal_id: String,
    related: Arc<Vec<RelatedStack>>,
    related_cache: RelatedCache,
    positions: HashMap<String, Vec2>,
    selection: Selection,
    relations_viewport: Viewport,
    categories_viewport: Viewport,
    simulation: Option<Simulation>,
    dragged_category: Option<usize>,
    browser_search: String,
}

impl ViewModel {
    fn new(dataset: RelationDataset, initial_focus: Option<&str>) -> Self {
        let focal_id = initial_focus
            .filter(|id| dataset.entity(id).is_some())
            .or_else(|| dataset.default_focus())
            .unwrap_or_default()
            .to_owned();

        let mut model = Self {
            dataset,
            screen: Screen::Graph,
            view_mode: ViewMode::Relations,
            focal_id: String::new(),
            related: Arc::new(Vec::new()),
            related_cache: RelatedCache::new(),
            positions: HashMap::new(),
            selection: Selection::None,
            relations_viewport: Viewport::default(),
            categories_viewport: Viewport::default(),
            simulation: None,
            dragged_category: None,
            browser_search: String::new(),
        };
        model.set_focal_entity(&focal_id);
        model
    }

    /// Re-centers the graph on a new focal entity. Selection, zoom, the
    /// related list, and layout positions all change in this one call so a
    /// frame never renders stale positions over new data.
    pub(crate) fn set_focal_entity(&mut self, entity_id: &str) {
        log::debug!("focal entity -> {entity_id}");

        self.focal_id = entity_id.to_owned();
        self.selection = Selection::None;
        self.relations_viewport.reset();
        self.categories_viewport.reset();

        self.related_cache.invalidate();
        self.related = self.related_cache.related_for(&self.dataset, entity_id);

        // The category simulation is released with the old focus; pins and
        // in-flight drags go with it.
        self.simulation = None;
        self.dragged_category = None;

        self.positions = layout::compute_positions(&self.related);
        self.screen = Screen::Graph;
    }

    /// Dismisses the graph view back to the entity browser.
    fn close_graph(&mut self) {
        self.screen = Screen::Browser;
        self.selection = Selection::None;
    }

    fn apply_graph_action(&mut self, action: GraphAction) {
        match action {
            GraphAction::ToggleSelect(entity_id) => self.selection.toggle(&entity_id),
            GraphAction::Navigate(entity_id) => self.set_focal_entity(&entity_id),
        }
    }
}

impl StackGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, focus: Option<String>) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            initial_focus: focus,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<anyhow::Result<RelationDataset>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            log::info!("loading relation dataset from {}", data_path.display());
            let result = load_dataset(&data_path);
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

fn ready_state(dataset: RelationDataset, initial_focus: Option<&str>) -> AppState {
    AppState::Ready(Box::new(ViewModel::new(dataset, initial_focus)))
}

impl eframe::App for StackGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let initial_focus = self.initial_focus.clone();

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(dataset) => ready_state(dataset, initial_focus.as_deref()),
                        Err(error) => AppState::Error(format!("{error:#}")),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading relation dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load relation dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(dataset) => ready_state(dataset, initial_focus.as_deref()),
                                Err(error) => AppState::Error(format!("{error:#}")),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StackEntity;

    fn dataset() -> RelationDataset {
        let mut entities = HashMap::new();
        for id in ["react", "redux", "vite", "vue"] {
            entities.insert(
                id.to_owned(),
                StackEntity {
                    id: id.to_owned(),
                    display_name: id.to_uppercase(),
                    logo_ref: None,
                    description: String::new(),
                },
            );
        }

        let mut relations = HashMap::new();
        relations.insert(
            "react".to_owned(),
            vec![
                RelatedStack {
                    entity_id: "redux".to_owned(),
                    weight: 7.0,
                    label: "state".to_owned(),
                },
                RelatedStack {
                    entity_id: "vite".to_owned(),
                    weight: 4.0,
                    label: "build".to_owned(),
                },
            ],
        );
        relations.insert(
            "vue".to_owned(),
            vec![RelatedStack {
                entity_id: "vite".to_owned(),
                weight: 9.0,
                label: "build".to_owned(),
            }],
        );

        RelationDataset {
            entities,
            relations,
            categories: Default::default(),
            relation_count: 3,
        }
    }

    #[test]
    fn focal_entity_swap_resets_selection_and_zoom() {
        let mut model = ViewModel::new(dataset(), Some("react"));
        model.selection.toggle("redux");
        for _ in 0..7 {
            model.relations_viewport.zoom_in();
            model.categories_viewport.zoom_in();
        }
        assert!(model.relations_viewport.scale > 1.6);
        model.categories_viewport.pan = Vec2::new(60.0, -20.0);

        model.ensure_simulation();
        assert!(model.simulation.is_some());

        model.set_focal_entity("vue");

        assert_eq!(model.selection, Selection::None);
        assert_eq!(model.relations_viewport.scale, 1.0);
        assert_eq!(model.categories_viewport, Viewport::default());
        assert!(model.simulation.is_none());
        assert_eq!(model.related.len(), 1);
        assert!(model.positions.contains_key("vite"));
        assert!(!model.positions.contains_key("redux"));
    }

    #[test]
    fn unknown_initial_focus_falls_back_to_default() {
        let model = ViewModel::new(dataset(), Some("missing"));
        assert!(model.dataset.entity(&model.focal_id).is_some());
    }

    #[test]
    fn entity_without_relations_renders_empty_ring() {
        let mut model = ViewModel::new(dataset(), Some("react"));
        model.set_focal_entity("redux");
        assert!(model.related.is_empty());
        assert!(model.positions.is_empty());
    }

    #[test]
    fn toggle_then_navigate_lands_unselected() {
        let mut model = ViewModel::new(dataset(), Some("react"));
        model.apply_graph_action(GraphAction::ToggleSelect("redux".to_owned()));
        assert!(model.selection.is_focused("redux"));

        model.apply_graph_action(GraphAction::ToggleSelect("redux".to_owned()));
        assert_eq!(model.selection, Selection::None);

        model.apply_graph_action(GraphAction::ToggleSelect("vite".to_owned()));
        model.apply_graph_action(GraphAction::Navigate("vite".to_owned()));
        assert_eq!(model.focal_id, "vite");
        assert_eq!(model.selection, Selection::None);
    }

    #[test]
    fn closing_the_graph_returns_to_the_browser() {
        let mut model = ViewModel::new(dataset(), Some("react"));
        model.close_graph();
        assert_eq!(model.screen, Screen::Browser);

        model.set_focal_entity("vue");
        assert_eq!(model.screen, Screen::Graph);
    }
}
