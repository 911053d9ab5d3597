use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;
const SOFTENING: f32 = 400.0;

#[derive(Clone, Copy)]
struct Quad {
    center: Vec2,
    half: f32,
}

impl Quad {
    fn around(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !max.x.is_finite() {
            return None;
        }

        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half: span * 0.5 + 1.0,
        })
    }

    fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half && (point.y - self.center.y).abs() <= self.half
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        ((point.x >= self.center.x) as usize) | (((point.y >= self.center.y) as usize) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half * 0.5;
        let dx = if quadrant & 1 == 1 { quarter } else { -quarter };
        let dy = if quadrant & 2 == 2 { quarter } else { -quarter };
        Self {
            center: self.center + vec2(dx, dy),
            half: quarter,
        }
    }
}

struct Cell {
    quad: Quad,
    center_of_charge: Vec2,
    count: f32,
    members: Vec<usize>,
    children: [Option<Box<Cell>>; 4],
}

impl Cell {
    fn build(quad: Quad, members: Vec<usize>, points: &[Vec2], depth: usize) -> Self {
        let mut center_of_charge = Vec2::ZERO;
        for &member in &members {
            center_of_charge += points[member];
        }
        let count = members.len() as f32;
        if count > 0.0 {
            center_of_charge /= count;
        }

        let mut cell = Self {
            quad,
            center_of_charge,
            count,
            members,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || cell.members.len() <= LEAF_CAPACITY {
            return cell;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &member in &cell.members {
            buckets[quad.quadrant_of(points[member])].push(member);
        }

        // A degenerate cluster that refuses to split stays a leaf.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return cell;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                cell.children[quadrant] = Some(Box::new(Self::build(
                    quad.child(quadrant),
                    bucket,
                    points,
                    depth + 1,
                )));
            }
        }
        cell.members.clear();
        cell
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Barnes-Hut accumulator for the pairwise charge force. Built once per
/// tick from current node positions.
pub struct ChargeTree {
    root: Option<Cell>,
    theta: f32,
}

impl ChargeTree {
    pub fn build(points: &[Vec2], theta: f32) -> Self {
        let root = Quad::around(points)
            .map(|quad| Cell::build(quad, (0..points.len()).collect(), points, 0));
        Self { root, theta }
    }

    /// Total repulsive force on `index` from every other point, with distant
    /// clusters approximated by their center of charge.
    pub fn force_on(&self, index: usize, points: &[Vec2], strength: f32) -> Vec2 {
        let mut force = Vec2::ZERO;
        if let Some(root) = &self.root {
            self.accumulate(root, index, points, strength, &mut force);
        }
        force
    }

    fn accumulate(
        &self,
        cell: &Cell,
        index: usize,
        points: &[Vec2],
        strength: f32,
        force: &mut Vec2,
    ) {
        if cell.count <= 0.0 {
            return;
        }

        if cell.is_leaf() {
            for &other in &cell.members {
                if other != index {
                    *force += pair_force(points[index], points[other], strength);
                }
            }
            return;
        }

        let delta = points[index] - cell.center_of_charge;
        let distance_sq = delta.length_sq().max(1e-4);
        let distance = distance_sq.sqrt();
        let far_enough = !cell.quad.contains(points[index])
            && (cell.quad.half * 2.0) / distance < self.theta;

        if far_enough {
            let scale = (strength * cell.count) / (distance_sq + SOFTENING);
            *force += (delta / distance) * scale;
            return;
        }

        for child in cell.children.iter().flatten() {
            self.accumulate(child, index, points, strength, force);
        }
    }
}

fn pair_force(point: Vec2, other: Vec2, strength: f32) -> Vec2 {
    let delta = point - other;
    let distance_sq = delta.length_sq();
    let direction = if distance_sq > 1e-8 {
        delta / distance_sq.sqrt()
    } else {
        vec2(1.0, 0.0)
    };
    direction * (strength / (distance_sq + SOFTENING))
}
