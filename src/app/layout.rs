use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Vec2, vec2};

use crate::data::RelatedStack;

pub const BASE_RING_RADIUS: f32 = 150.0;
pub const WIDE_RING_RADIUS: f32 = 195.0;
pub const STAGGER_INNER_RADIUS: f32 = 150.0;
pub const STAGGER_OUTER_RADIUS: f32 = 220.0;

pub const MIN_NODE_RADIUS: f32 = 18.0;
pub const MAX_NODE_RADIUS: f32 = 34.0;
pub const FOCAL_NODE_RADIUS: f32 = 42.0;

/// Related entities in ring order: heaviest relation first, stable for
/// equal weights so adjacent input records stay adjacent on the ring.
pub fn ordered_by_weight(related: &[RelatedStack]) -> Vec<&RelatedStack> {
    let mut ordered = related.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ordered
}

fn ring_radius(index: usize, count: usize) -> f32 {
    if count > 8 {
        // Staggered rings; a coarse anti-overlap heuristic rather than real
        // collision handling, which dense sets would still defeat.
        if index % 2 == 0 {
            STAGGER_INNER_RADIUS
        } else {
            STAGGER_OUTER_RADIUS
        }
    } else if count > 4 {
        WIDE_RING_RADIUS
    } else {
        BASE_RING_RADIUS
    }
}

/// Offsets from the graph center for every related entity, keyed by id.
/// The single-entity case lands at the top of the ring (-90 degrees).
pub fn compute_positions(related: &[RelatedStack]) -> HashMap<String, Vec2> {
    let ordered = ordered_by_weight(related);
    let count = ordered.len();

    let mut positions = HashMap::with_capacity(count);
    for (index, entry) in ordered.iter().enumerate() {
        let angle = (index as f32 / count as f32) * TAU - FRAC_PI_2;
        let radius = ring_radius(index, count);
        positions.insert(
            entry.entity_id.clone(),
            vec2(angle.cos(), angle.sin()) * radius,
        );
    }
    positions
}

pub fn weight_bounds(related: &[RelatedStack]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for entry in related {
        min = min.min(entry.weight);
        max = max.max(entry.weight);
    }

    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

/// Node radius interpolated linearly by weight. Equal weights (including
/// the single-node set) normalize to 1, so every node gets the maximum
/// radius rather than dividing by a zero span.
pub fn node_radius(weight: f32, min_weight: f32, max_weight: f32) -> f32 {
    let span = max_weight - min_weight;
    let normalized = if span <= f32::EPSILON {
        1.0
    } else {
        ((weight - min_weight) / span).clamp(0.0, 1.0)
    };

    MIN_NODE_RADIUS + normalized * (MAX_NODE_RADIUS - MIN_NODE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn related(id: &str, weight: f32) -> RelatedStack {
        RelatedStack {
            entity_id: id.to_owned(),
            weight,
            label: String::new(),
        }
    }

    fn angle_of(position: Vec2) -> f32 {
        position.y.atan2(position.x)
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(compute_positions(&[]).is_empty());
    }

    #[test]
    fn single_entity_sits_at_top() {
        let positions = compute_positions(&[related("only", 3.0)]);
        let angle = angle_of(positions["only"]);
        assert!((angle + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn angles_are_evenly_distributed() {
        for count in [2usize, 3, 5, 8, 12] {
            let input = (0..count)
                .map(|i| related(&format!("n{i}"), (count - i) as f32))
                .collect::<Vec<_>>();
            let positions = compute_positions(&input);

            let mut angles = input
                .iter()
                .map(|entry| angle_of(positions[&entry.entity_id]))
                .collect::<Vec<_>>();
            angles.sort_by(f32::total_cmp);

            let expected_gap = TAU / count as f32;
            for pair in angles.windows(2) {
                assert!(
                    (pair[1] - pair[0] - expected_gap).abs() < 1e-4,
                    "uneven gap for n={count}: {:?}",
                    angles
                );
            }
        }
    }

    #[test]
    fn heaviest_relation_takes_the_first_slot() {
        let input = vec![related("light", 1.0), related("heavy", 9.0)];
        let positions = compute_positions(&input);
        let angle = angle_of(positions["heavy"]);
        assert!((angle + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn equal_weights_keep_input_order() {
        let input = vec![related("a", 2.0), related("b", 2.0), related("c", 2.0)];
        let ordered = ordered_by_weight(&input);
        let ids = ordered
            .iter()
            .map(|entry| entry.entity_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn dense_sets_alternate_between_two_rings() {
        let input = (0..10)
            .map(|i| related(&format!("n{i}"), 10.0 - i as f32))
            .collect::<Vec<_>>();
        let positions = compute_positions(&input);

        for (index, entry) in input.iter().enumerate() {
            let radius = positions[&entry.entity_id].length();
            let expected = if index % 2 == 0 {
                STAGGER_INNER_RADIUS
            } else {
                STAGGER_OUTER_RADIUS
            };
            assert!((radius - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn mid_sized_sets_use_the_wide_ring() {
        let input = (0..6)
            .map(|i| related(&format!("n{i}"), 1.0))
            .collect::<Vec<_>>();
        let positions = compute_positions(&input);
        for entry in &input {
            assert!((positions[&entry.entity_id].length() - WIDE_RING_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn equal_weights_all_get_the_maximum_radius() {
        let input = vec![related("a", 5.0), related("b", 5.0)];
        let (min, max) = weight_bounds(&input);
        for entry in &input {
            assert_eq!(node_radius(entry.weight, min, max), MAX_NODE_RADIUS);
        }
    }

    #[test]
    fn node_radius_interpolates_between_bounds() {
        assert_eq!(node_radius(0.0, 0.0, 10.0), MIN_NODE_RADIUS);
        assert_eq!(node_radius(10.0, 0.0, 10.0), MAX_NODE_RADIUS);
        let mid = node_radius(5.0, 0.0, 10.0);
        assert!(mid > MIN_NODE_RADIUS && mid < MAX_NODE_RADIUS);
    }
}
