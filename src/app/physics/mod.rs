mod charge;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

use charge::ChargeTree;

const BARNES_HUT_THETA: f32 = 0.81;

#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    pub link_distance: f32,
    pub link_strength: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Alpha target raised to while a drag is in progress so neighbors
    /// react to the pinned node.
    pub drag_alpha_target: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            link_distance: 110.0,
            link_strength: 0.04,
            charge_strength: 64_000.0,
            center_strength: 0.012,
            velocity_decay: 0.86,
            alpha_min: 0.003,
            alpha_decay: 0.035,
            drag_alpha_target: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SimNode {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed-position override. Set on drag-start and kept after drag-end:
    /// a dragged node stays pinned where it was dropped until the
    /// simulation is rebuilt or the node is dragged again.
    pub pin: Option<Vec2>,
}

/// Tick-driven force simulation for the category graph: spring links,
/// pairwise charge repulsion, and a centering pull, damped by a decaying
/// alpha. The simulation owns all node coordinates; callers only read
/// positions and drive the drag lifecycle.
pub struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<(usize, usize)>,
    params: SimParams,
    alpha: f32,
    alpha_target: f32,
    scratch: Vec<Vec2>,
}

impl Simulation {
    pub fn new(seed_ids: &[String], links: Vec<(usize, usize)>, params: SimParams) -> Self {
        let count = seed_ids.len();
        let ring_radius = (count as f32).sqrt() * 60.0;

        let nodes = seed_ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let angle = (index as f32 / count.max(1) as f32) * std::f32::consts::TAU;
                let (jx, jy) = stable_pair(id);
                SimNode {
                    pos: vec2(angle.cos(), angle.sin()) * ring_radius + vec2(jx, jy) * 24.0,
                    vel: Vec2::ZERO,
                    pin: None,
                }
            })
            .collect();

        Self {
            nodes,
            links,
            params,
            alpha: 1.0,
            alpha_target: 0.0,
            scratch: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_settled(&self) -> bool {
        self.alpha < self.params.alpha_min && self.alpha_target < self.params.alpha_min
    }

    /// Advances the simulation one step. Returns false once the alpha has
    /// decayed to rest and nothing is reheating it.
    pub fn tick(&mut self) -> bool {
        if self.is_settled() || self.nodes.is_empty() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

        let count = self.nodes.len();
        self.scratch.clear();
        self.scratch.extend(self.nodes.iter().map(|node| node.pos));

        let mut forces = vec![Vec2::ZERO; count];

        let tree = ChargeTree::build(&self.scratch, BARNES_HUT_THETA);
        for (index, force) in forces.iter_mut().enumerate() {
            *force += tree.force_on(index, &self.scratch, self.params.charge_strength * self.alpha);
        }

        for &(from, to) in &self.links {
            if from >= count || to >= count || from == to {
                continue;
            }

            let delta = self.scratch[to] - self.scratch[from];
            let distance = delta.length().max(0.5);
            let stretch = distance - self.params.link_distance;
            let pull = delta / distance * (stretch * self.params.link_strength * self.alpha);
            forces[from] += pull;
            forces[to] -= pull;
        }

        for (index, force) in forces.iter_mut().enumerate() {
            *force -= self.scratch[index] * self.params.center_strength * self.alpha;
        }

        for (node, force) in self.nodes.iter_mut().zip(forces) {
            if let Some(pin) = node.pin {
                node.pos = pin;
                node.vel = Vec2::ZERO;
                continue;
            }

            node.vel = (node.vel + force) * self.params.velocity_decay;
            node.pos += node.vel;
        }

        true
    }

    /// Drag lifecycle: pin the node at its current simulated position and
    /// heat the simulation so the neighborhood reacts.
    pub fn drag_start(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = Some(node.pos);
            node.vel = Vec2::ZERO;
        }
        self.alpha_target = self.params.drag_alpha_target;
        self.alpha = self.alpha.max(self.params.drag_alpha_target);
    }

    pub fn drag_move(&mut self, index: usize, pos: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = Some(pos);
            node.pos = pos;
        }
    }

    /// Cools the simulation back toward rest. The pin is intentionally left
    /// in place (sticky drag): dropped nodes stay put.
    pub fn drag_end(&mut self) {
        self.alpha_target = 0.0;
    }

    /// Releases every pin and reheats; used by the view's restart action.
    pub fn restart(&mut self) {
        for node in &mut self.nodes {
            node.pin = None;
        }
        self.alpha = 1.0;
        self.alpha_target = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("node-{i}")).collect()
    }

    fn chain_links(count: usize) -> Vec<(usize, usize)> {
        (1..count).map(|i| (i - 1, i)).collect()
    }

    #[test]
    fn simulation_settles_without_perturbation() {
        let mut sim = Simulation::new(&ids(6), chain_links(6), SimParams::default());
        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 10_000, "simulation never settled");
        }
        assert!(sim.is_settled());
        assert!(!sim.tick());
    }

    #[test]
    fn sticky_drag_keeps_the_pin_after_release() {
        let mut sim = Simulation::new(&ids(5), chain_links(5), SimParams::default());
        for _ in 0..30 {
            sim.tick();
        }

        let dropped_at = vec2(140.0, -90.0);
        sim.drag_start(2);
        sim.drag_move(2, vec2(60.0, -20.0));
        sim.drag_move(2, dropped_at);
        sim.drag_end();

        sim.tick();
        assert_eq!(sim.nodes()[2].pin, Some(dropped_at));
        assert_eq!(sim.nodes()[2].pos, dropped_at);

        for _ in 0..50 {
            sim.tick();
        }
        assert_eq!(sim.nodes()[2].pos, dropped_at);
    }

    #[test]
    fn drag_reheats_and_release_cools() {
        let mut sim = Simulation::new(&ids(4), chain_links(4), SimParams::default());
        while sim.tick() {}
        assert!(sim.is_settled());

        sim.drag_start(0);
        assert!(!sim.is_settled());
        assert!(sim.alpha() >= 0.3);

        sim.drag_end();
        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 10_000, "simulation never cooled after drag");
        }
    }

    #[test]
    fn restart_releases_pins() {
        let mut sim = Simulation::new(&ids(3), chain_links(3), SimParams::default());
        sim.drag_start(1);
        sim.drag_move(1, vec2(5.0, 5.0));
        sim.drag_end();

        sim.restart();
        assert!(sim.nodes().iter().all(|node| node.pin.is_none()));
        assert!(!sim.is_settled());
    }

    #[test]
    fn a_link_pulls_its_endpoints_together() {
        let mut linked = Simulation::new(&ids(4), vec![(0, 1)], SimParams::default());
        let mut free = Simulation::new(&ids(4), Vec::new(), SimParams::default());
        while linked.tick() {}
        while free.tick() {}

        let linked_distance = (linked.nodes()[0].pos - linked.nodes()[1].pos).length();
        let free_distance = (free.nodes()[0].pos - free.nodes()[1].pos).length();
        assert!(
            linked_distance < free_distance,
            "linked pair {linked_distance} should sit closer than free pair {free_distance}"
        );
    }

    #[test]
    fn empty_simulation_is_inert() {
        let mut sim = Simulation::new(&[], Vec::new(), SimParams::default());
        assert!(!sim.tick());
        assert_eq!(sim.node_count(), 0);
    }
}
