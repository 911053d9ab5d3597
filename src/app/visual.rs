use eframe::egui::{Vec2, vec2};

use crate::util::stable_unit;

use super::layout::FOCAL_NODE_RADIUS;

pub const BASE_LABEL_SCALE: f32 = 1.0;
pub const CENTER_LABEL_SCALE: f32 = 1.3;
pub const DIMMED_OPACITY: f32 = 0.35;

const FLOAT_AMPLITUDE: f32 = 3.5;
const FLOAT_MIN_PERIOD: f32 = 2.2;
const FLOAT_MAX_PERIOD: f32 = 3.8;

/// Which node, if any, is promoted to the visual center. Clicking the
/// focused node again returns to `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Focused(String),
}

impl Selection {
    pub fn toggle(&mut self, entity_id: &str) {
        *self = match self {
            Self::Focused(current) if current == entity_id => Self::None,
            _ => Self::Focused(entity_id.to_owned()),
        };
    }

    pub fn is_focused(&self, entity_id: &str) -> bool {
        matches!(self, Self::Focused(current) if current == entity_id)
    }

    pub fn focused_id(&self) -> Option<&str> {
        match self {
            Self::Focused(id) => Some(id.as_str()),
            Self::None => None,
        }
    }
}

/// Static layout facts about one ring node.
#[derive(Clone, Copy, Debug)]
pub struct NodeBase {
    pub offset: Vec2,
    pub radius: f32,
}

/// Target visual state for one node under the current selection: offset
/// from center, scale and opacity multipliers, and the label scale. Pure
/// data, independent of the painter; the view animates between these
/// targets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual {
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub label_scale: f32,
}

impl NodeVisual {
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            offset: from.offset + (to.offset - from.offset) * t,
            scale: from.scale + (to.scale - from.scale) * t,
            opacity: from.opacity + (to.opacity - from.opacity) * t,
            label_scale: from.label_scale + (to.label_scale - from.label_scale) * t,
        }
    }
}

/// Scale applied to a promoted node so its rendered size matches the focal
/// node's nominal size.
pub fn position_scale_factor(base_radius: f32) -> f32 {
    FOCAL_NODE_RADIUS / base_radius.max(f32::EPSILON)
}

/// Counter-scale for a promoted node's label so the rendered label size is
/// identical to the true-center label no matter which ring the node came
/// from.
pub fn label_scale_correction(
    center_label_scale: f32,
    base_label_scale: f32,
    position_scale_factor: f32,
) -> f32 {
    center_label_scale / (base_label_scale * position_scale_factor).max(f32::EPSILON)
}

pub fn node_visual_state(base: &NodeBase, entity_id: &str, selection: &Selection) -> NodeVisual {
    if selection.is_focused(entity_id) {
        let scale = position_scale_factor(base.radius);
        return NodeVisual {
            offset: Vec2::ZERO,
            scale,
            opacity: 1.0,
            label_scale: label_scale_correction(CENTER_LABEL_SCALE, BASE_LABEL_SCALE, scale),
        };
    }

    let opacity = match selection {
        Selection::None => 1.0,
        Selection::Focused(_) => DIMMED_OPACITY,
    };

    NodeVisual {
        offset: base.offset,
        scale: 1.0,
        opacity,
        label_scale: BASE_LABEL_SCALE,
    }
}

/// Far endpoint and opacity for the line joining the center to a node.
/// The selected node's line collapses to the center and goes transparent,
/// so no zero-length stub is drawn over the promoted node.
pub fn edge_visual(visual: &NodeVisual, entity_id: &str, selection: &Selection) -> (Vec2, f32) {
    if selection.is_focused(entity_id) {
        (Vec2::ZERO, 0.0)
    } else {
        let opacity = match selection {
            Selection::None => 0.55,
            Selection::Focused(_) => 0.18,
        };
        (visual.offset, opacity)
    }
}

/// Decorative vertical bob for idle nodes. Period is randomized per entity
/// so the ring does not pulse in lockstep. Rendering only; hit testing and
/// layout never see this offset.
pub fn float_offset(entity_id: &str, time: f64) -> Vec2 {
    let unit = stable_unit(entity_id);
    let period = FLOAT_MIN_PERIOD + unit * (FLOAT_MAX_PERIOD - FLOAT_MIN_PERIOD);
    let phase = unit * std::f32::consts::TAU;
    let angle = (time as f32 / period) * std::f32::consts::TAU + phase;
    vec2(0.0, angle.sin() * FLOAT_AMPLITUDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NodeBase {
        NodeBase {
            offset: vec2(120.0, -40.0),
            radius: 20.0,
        }
    }

    #[test]
    fn toggling_the_same_node_returns_to_none() {
        let mut selection = Selection::None;
        selection.toggle("react");
        assert!(selection.is_focused("react"));
        selection.toggle("react");
        assert_eq!(selection, Selection::None);
    }

    #[test]
    fn toggling_another_node_moves_the_focus() {
        let mut selection = Selection::None;
        selection.toggle("react");
        selection.toggle("vue");
        assert!(selection.is_focused("vue"));
        assert!(!selection.is_focused("react"));
    }

    #[test]
    fn label_scale_correction_matches_the_formula() {
        let correction = label_scale_correction(2.0, 1.0, 0.5);
        assert!((correction - 4.0).abs() < 1e-6);
    }

    #[test]
    fn selected_node_promotes_to_center_at_focal_size() {
        let selection = Selection::Focused("react".to_owned());
        let visual = node_visual_state(&base(), "react", &selection);

        assert_eq!(visual.offset, Vec2::ZERO);
        assert!((visual.scale * base().radius - FOCAL_NODE_RADIUS).abs() < 1e-4);
        assert_eq!(visual.opacity, 1.0);
    }

    #[test]
    fn siblings_dim_while_a_selection_exists() {
        let selection = Selection::Focused("react".to_owned());
        let visual = node_visual_state(&base(), "vue", &selection);
        assert_eq!(visual.opacity, DIMMED_OPACITY);
        assert_eq!(visual.offset, base().offset);

        let visual = node_visual_state(&base(), "vue", &Selection::None);
        assert_eq!(visual.opacity, 1.0);
    }

    #[test]
    fn selected_nodes_edge_goes_transparent() {
        let selection = Selection::Focused("react".to_owned());
        let visual = node_visual_state(&base(), "react", &selection);
        let (endpoint, opacity) = edge_visual(&visual, "react", &selection);
        assert_eq!(endpoint, Vec2::ZERO);
        assert_eq!(opacity, 0.0);

        let sibling = node_visual_state(&base(), "vue", &selection);
        let (_, opacity) = edge_visual(&sibling, "vue", &selection);
        assert!(opacity > 0.0);
    }

    #[test]
    fn float_offset_is_vertical_and_bounded() {
        for time in [0.0, 0.7, 1.9, 12.4] {
            let offset = float_offset("react", time);
            assert_eq!(offset.x, 0.0);
            assert!(offset.y.abs() <= FLOAT_AMPLITUDE + 1e-5);
        }
    }

    #[test]
    fn visual_lerp_endpoints_match_inputs() {
        let selection = Selection::Focused("react".to_owned());
        let idle = node_visual_state(&base(), "react", &Selection::None);
        let target = node_visual_state(&base(), "react", &selection);

        assert_eq!(NodeVisual::lerp(idle, target, 0.0), idle);
        assert_eq!(NodeVisual::lerp(idle, target, 1.0), target);
    }
}
