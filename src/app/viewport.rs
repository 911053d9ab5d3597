use eframe::egui::Vec2;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 2.0;
pub const SCALE_STEP: f32 = 0.1;

/// Zoom and pan state for one graph view. Scale applies uniformly to the
/// whole subtree and is orthogonal to per-node visual state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Wheel handler: scroll-up zooms in, scroll-down zooms out, one step
    /// per event.
    pub fn apply_wheel(&mut self, scroll_y: f32) {
        if scroll_y > f32::EPSILON {
            self.zoom_in();
        } else if scroll_y < -f32::EPSILON {
            self.zoom_out();
        }
    }
}
