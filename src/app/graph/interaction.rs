use eframe::egui::{self, Pos2, Ui};

use super::super::ViewModel;

impl ViewModel {
    /// Stepped wheel zoom for whichever viewport the pointer is over.
    pub(in crate::app) fn handle_wheel_zoom(
        ui: &Ui,
        response: &egui::Response,
        viewport: &mut crate::app::viewport::Viewport,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        viewport.apply_wheel(scroll);
    }

    pub(in crate::app) fn handle_pan(
        response: &egui::Response,
        viewport: &mut crate::app::viewport::Viewport,
    ) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            viewport.pan += response.drag_delta();
        }
    }

    /// Closest node under the pointer, by screen-space distance. The
    /// positions passed in are the still hit positions, not the floated
    /// draw positions.
    pub(in crate::app) fn hovered_node(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        closest_node(pointer, screen_positions, screen_radii)
    }
}

fn closest_node(pointer: Pos2, screen_positions: &[Pos2], screen_radii: &[f32]) -> Option<usize> {
    screen_positions
        .iter()
        .zip(screen_radii)
        .enumerate()
        .filter_map(|(index, (position, radius))| {
            let distance = position.distance(pointer);
            (distance <= *radius).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
