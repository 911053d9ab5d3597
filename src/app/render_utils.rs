use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use crate::util::{initials, stable_pair};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

/// Applies a [0, 1] opacity to a color; the dimmed-sibling treatment.
pub(super) fn fade_color(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

/// Deterministic badge color for an entity without a usable logo, derived
/// from a stable hash of the display name. Same name, same color, every
/// run.
pub(super) fn placeholder_color(display_name: &str) -> Color32 {
    let (hx, hy) = stable_pair(display_name);
    let hue = (hx + 1.0) * 180.0;
    let lift = (hy + 1.0) * 0.5;

    // Compact HSV-ish ramp tuned for the dark background.
    let sector = (hue / 120.0) as u8 % 3;
    let t = (hue % 120.0) / 120.0;
    let low = 70 + (lift * 40.0) as u8;
    let rise = low + ((255 - low) as f32 * t) as u8;
    let fall = 255 - ((255 - low) as f32 * t) as u8;

    match sector {
        0 => Color32::from_rgb(fall, rise, low),
        1 => Color32::from_rgb(low, fall, rise),
        _ => Color32::from_rgb(rise, low, fall),
    }
}

/// Circular initials badge standing in for an entity logo.
pub(super) fn draw_entity_badge(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    display_name: &str,
    opacity: f32,
) {
    let fill = fade_color(placeholder_color(display_name), opacity);
    painter.circle_filled(center, radius, fill);
    painter.circle_stroke(
        center,
        radius,
        Stroke::new(
            1.2,
            fade_color(Color32::from_rgba_unmultiplied(15, 15, 15, 200), opacity),
        ),
    );
    painter.text(
        center,
        Align2::CENTER_CENTER,
        initials(display_name),
        FontId::proportional((radius * 0.78).max(9.0)),
        fade_color(Color32::from_gray(245), opacity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn world_and_screen_transforms_round_trip() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let pan = vec2(14.0, -8.0);
        let zoom = 1.3;

        let world = vec2(120.0, -45.0);
        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);

        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn placeholder_color_is_stable_per_name() {
        assert_eq!(placeholder_color("React"), placeholder_color("React"));
    }

    #[test]
    fn fade_to_zero_is_fully_transparent() {
        let faded = fade_color(Color32::from_rgb(200, 100, 50), 0.0);
        assert_eq!(faded.a(), 0);
    }

    #[test]
    fn offscreen_circles_are_culled() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(50.0, 50.0), 5.0));
        assert!(circle_visible(rect, pos2(-3.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(-30.0, 50.0), 5.0));
    }
}
