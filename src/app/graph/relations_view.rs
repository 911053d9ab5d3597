use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::app::layout::{self, FOCAL_NODE_RADIUS};
use crate::app::render_utils::{
    blend_color, circle_visible, draw_background, draw_entity_badge, fade_color, world_to_screen,
};
use crate::app::visual::{self, NodeBase, NodeVisual, Selection};
use crate::util::format_weight;

use super::super::ViewModel;
use super::GraphAction;

const EDGE_COLOR: Color32 = Color32::from_rgb(110, 122, 138);
const HOVER_RING: Color32 = Color32::from_rgb(255, 164, 101);
const LABEL_COLOR: Color32 = Color32::from_gray(238);
const BASE_LABEL_FONT: f32 = 13.0;

impl ViewModel {
    /// Radial detail view: the focal entity in the center, related stacks
    /// on the ring, selection promoting a node to the center.
    pub(in crate::app) fn draw_relations_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        Self::handle_wheel_zoom(ui, &response, &mut self.relations_viewport);
        let zoom = self.relations_viewport.scale;
        let pan = eframe::egui::Vec2::ZERO;
        let time = ui.input(|input| input.time);

        let ordered = layout::ordered_by_weight(&self.related);
        let (min_weight, max_weight) = layout::weight_bounds(&self.related);
        let any_selected = self.selection.focused_id().is_some();

        // Per-node animated visuals. Two animation channels per node: one
        // for being the selection, one for being dimmed by someone else's.
        let mut screen_positions = Vec::with_capacity(ordered.len());
        let mut draw_positions = Vec::with_capacity(ordered.len());
        let mut screen_radii = Vec::with_capacity(ordered.len());
        let mut visuals = Vec::with_capacity(ordered.len());
        let mut animating = false;
        // Stand-in selection with an id no node carries, used to derive the
        // dimmed-sibling target from the same pure state function.
        let dim_selection = Selection::Focused(String::new());

        for entry in &ordered {
            let id = entry.entity_id.as_str();
            let base = NodeBase {
                offset: self
                    .positions
                    .get(id)
                    .copied()
                    .unwrap_or(eframe::egui::Vec2::ZERO),
                radius: layout::node_radius(entry.weight, min_weight, max_weight),
            };

            let is_selected = self.selection.is_focused(id);
            let select_mix = ui
                .ctx()
                .animate_bool(ui.make_persistent_id(("relation-select", id)), is_selected);
            let dim_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("relation-dim", id)),
                any_selected && !is_selected,
            );
            if (select_mix > 0.0 && select_mix < 1.0) || (dim_mix > 0.0 && dim_mix < 1.0) {
                animating = true;
            }

            let idle = visual::node_visual_state(&base, id, &Selection::None);
            let dimmed = visual::node_visual_state(&base, id, &dim_selection);
            let promoted =
                visual::node_visual_state(&base, id, &Selection::Focused(id.to_owned()));

            let mut current = NodeVisual::lerp(idle, dimmed, dim_mix);
            current = NodeVisual::lerp(current, promoted, select_mix);

            // Decorative float, damped out while the node is promoted. Only
            // the drawn position bobs; hit testing keeps the still position
            // so a click target never drifts under the pointer.
            let float = visual::float_offset(id, time) * (1.0 - select_mix);

            screen_positions.push(world_to_screen(rect, pan, zoom, current.offset));
            draw_positions.push(world_to_screen(rect, pan, zoom, current.offset + float));
            screen_radii.push(base.radius * current.scale * zoom);
            visuals.push((select_mix, dim_mix, current));
        }

        // Idle float runs continuously; the view repaints while shown.
        if animating || !ordered.is_empty() {
            ui.ctx().request_repaint();
        }

        // Edges first, so nodes draw over them. Each edge tracks its node's
        // animated position and disappears entirely for the promoted node.
        for (index, entry) in ordered.iter().enumerate() {
            let (select_mix, dim_mix, current) = visuals[index];
            let id = entry.entity_id.as_str();
            let (_, idle_opacity) = visual::edge_visual(&current, id, &Selection::None);
            let (_, dimmed_opacity) = visual::edge_visual(&current, id, &dim_selection);
            let opacity =
                (idle_opacity + (dimmed_opacity - idle_opacity) * dim_mix) * (1.0 - select_mix);
            if opacity <= 0.01 {
                continue;
            }

            let weight_ratio = if max_weight > min_weight {
                (entry.weight - min_weight) / (max_weight - min_weight)
            } else {
                1.0
            };
            let width = (1.0 + weight_ratio * 1.8) * zoom;

            painter.line_segment(
                [rect.center() + pan, draw_positions[index]],
                Stroke::new(width, fade_color(EDGE_COLOR, opacity)),
            );
        }

        // Focal entity, fading back while a related node is promoted.
        let focal_mix = ui
            .ctx()
            .animate_bool(ui.make_persistent_id("relation-focal-dim"), any_selected);
        if let Some(focal) = self.dataset.entity(&self.focal_id) {
            let focal_opacity = 1.0 - focal_mix * 0.75;
            let focal_radius = FOCAL_NODE_RADIUS * zoom;
            draw_entity_badge(
                &painter,
                rect.center() + pan,
                focal_radius,
                &focal.display_name,
                focal_opacity,
            );
            painter.text(
                rect.center() + pan + vec2(0.0, focal_radius + 16.0 * zoom),
                Align2::CENTER_CENTER,
                &focal.display_name,
                FontId::proportional(BASE_LABEL_FONT * visual::CENTER_LABEL_SCALE * zoom),
                fade_color(LABEL_COLOR, focal_opacity),
            );
        }

        let hovered = Self::hovered_node(ui, &screen_positions, &screen_radii);
        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        // Draw order: dimmed ring first, hovered above it, promoted last.
        let mut draw_order = (0..ordered.len()).collect::<Vec<_>>();
        draw_order.sort_by(|a, b| {
            let rank = |index: usize| {
                if visuals[index].0 > 0.0 {
                    2
                } else if hovered == Some(index) {
                    1
                } else {
                    0
                }
            };
            rank(*a).cmp(&rank(*b))
        });

        for index in draw_order {
            let entry = ordered[index];
            let (select_mix, _, current) = visuals[index];
            let position = draw_positions[index];
            let radius = screen_radii[index];
            if !circle_visible(rect, position, radius + 24.0) {
                continue;
            }

            let display_name = self
                .dataset
                .entity(&entry.entity_id)
                .map(|entity| entity.display_name.as_str())
                .unwrap_or(entry.entity_id.as_str());

            draw_entity_badge(&painter, position, radius, display_name, current.opacity);

            if hovered == Some(index) {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.6, blend_color(HOVER_RING, Color32::WHITE, select_mix * 0.4)),
                );
            }

            let label_font =
                BASE_LABEL_FONT * current.label_scale * current.scale * zoom;
            painter.text(
                position + vec2(0.0, radius + 14.0 * zoom),
                Align2::CENTER_CENTER,
                display_name,
                FontId::proportional(label_font),
                fade_color(LABEL_COLOR, current.opacity),
            );
        }

        if let Some(hovered_index) = hovered {
            let entry = ordered[hovered_index];
            let name = self
                .dataset
                .entity(&entry.entity_id)
                .map(|entity| entity.display_name.as_str())
                .unwrap_or(entry.entity_id.as_str());
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{name}  |  {}  |  weight {}",
                    if entry.label.is_empty() { "related" } else { &entry.label },
                    format_weight(entry.weight)
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        let action = if response.double_clicked() {
            hovered.map(|index| GraphAction::Navigate(ordered[index].entity_id.clone()))
        } else if response.clicked_by(egui::PointerButton::Primary) {
            hovered.map(|index| GraphAction::ToggleSelect(ordered[index].entity_id.clone()))
        } else {
            None
        };

        if let Some(action) = action {
            self.apply_graph_action(action);
        }
    }
}
