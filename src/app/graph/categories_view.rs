use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::app::physics::{SimParams, Simulation};
use crate::app::render_utils::{
    blend_color, circle_visible, draw_background, fade_color, placeholder_color, screen_to_world,
    world_to_screen,
};
use crate::data::CategoryGroup;

use super::super::ViewModel;

const HUB_RADIUS: f32 = 15.0;
const MEMBER_RADIUS: f32 = 9.0;
const HUB_FILL: Color32 = Color32::from_rgb(246, 206, 104);
const LINK_COLOR: Color32 = Color32::from_rgba_premultiplied(86, 94, 106, 200);
const HOVER_RING: Color32 = Color32::from_rgb(255, 164, 101);

impl ViewModel {
    /// Builds the simulation on first entry to the Categories view. The
    /// instance lives until the focal entity changes or the dataset
    /// reloads; pins accumulate in it.
    pub(in crate::app) fn ensure_simulation(&mut self) -> &mut Simulation {
        if self.simulation.is_none() {
            let categories = &self.dataset.categories;
            let ids = categories
                .nodes
                .iter()
                .map(|node| node.id.clone())
                .collect::<Vec<_>>();
            log::debug!(
                "starting category simulation: {} nodes, {} links",
                ids.len(),
                categories.links.len()
            );
            self.simulation = Some(Simulation::new(
                &ids,
                categories.links.clone(),
                SimParams::default(),
            ));
        }
        self.simulation.as_mut().expect("simulation just created")
    }

    /// Force-directed category graph with sticky node dragging.
    pub(in crate::app) fn draw_categories_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        Self::handle_wheel_zoom(ui, &response, &mut self.categories_viewport);
        Self::handle_pan(&response, &mut self.categories_viewport);
        let zoom = self.categories_viewport.scale;
        let pan = self.categories_viewport.pan;

        self.ensure_simulation();
        let node_count = self.dataset.categories.nodes.len();
        if node_count == 0 {
            ui.painter_at(rect).text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No category graph in this dataset",
                FontId::proportional(14.0),
                Color32::from_gray(180),
            );
            return;
        }

        let dragging = self.dragged_category.is_some();
        let simulation = self.simulation.as_mut().expect("ensured above");
        let active = simulation.tick();
        if active || dragging {
            ui.ctx().request_repaint();
        }

        let mut screen_positions = Vec::with_capacity(node_count);
        let mut screen_radii = Vec::with_capacity(node_count);
        for (node, sim_node) in self
            .dataset
            .categories
            .nodes
            .iter()
            .zip(simulation.nodes())
        {
            screen_positions.push(world_to_screen(rect, pan, zoom, sim_node.pos));
            let base = match node.group {
                CategoryGroup::Hub => HUB_RADIUS,
                CategoryGroup::Member => MEMBER_RADIUS,
            };
            screen_radii.push(base * zoom);
        }

        let hovered = Self::hovered_node(ui, &screen_positions, &screen_radii);

        // Drag lifecycle. The pin set here is never released on drop; the
        // node stays where the user left it (sticky drag).
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(index) = hovered {
                self.dragged_category = Some(index);
                simulation.drag_start(index);
            }
        }
        if let Some(index) = self.dragged_category {
            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = ui.input(|input| input.pointer.interact_pos())
            {
                simulation.drag_move(index, screen_to_world(rect, pan, zoom, pointer));
            }
            if response.drag_stopped() {
                simulation.drag_end();
                self.dragged_category = None;
            }
        }

        for &(from, to) in &self.dataset.categories.links {
            if from >= node_count || to >= node_count {
                continue;
            }
            painter.line_segment(
                [screen_positions[from], screen_positions[to]],
                Stroke::new((1.2 * zoom).clamp(0.6, 2.6), LINK_COLOR),
            );
        }

        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        for (index, node) in self.dataset.categories.nodes.iter().enumerate() {
            let position = screen_positions[index];
            let radius = screen_radii[index];
            if !circle_visible(rect, position, radius + 20.0) {
                continue;
            }

            let fill = match node.group {
                CategoryGroup::Hub => HUB_FILL,
                CategoryGroup::Member => placeholder_color(&node.name),
            };
            let is_hovered = hovered == Some(index);
            let color = if is_hovered {
                blend_color(fill, Color32::WHITE, 0.25)
            } else {
                fill
            };

            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );
            if is_hovered {
                painter.circle_stroke(position, radius + 3.0, Stroke::new(1.5, HOVER_RING));
            }

            // Labels are painter output only; hit testing sees just the
            // circles, so text never intercepts a drag.
            let label_alpha = if node.group == CategoryGroup::Hub || is_hovered || zoom > 0.8 {
                1.0
            } else {
                0.6
            };
            painter.text(
                position + vec2(0.0, radius + 11.0 * zoom),
                Align2::CENTER_CENTER,
                &node.name,
                FontId::proportional(12.0 * zoom.clamp(0.8, 1.4)),
                fade_color(Color32::from_gray(230), label_alpha),
            );
        }
    }
}
