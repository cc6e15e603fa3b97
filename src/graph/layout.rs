use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use super::model::MailGraph;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Force simulation steps
    pub iterations: usize,
    /// Seed for the initial random placement
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
        }
    }
}

/// Fruchterman-Reingold force-directed layout.
///
/// Nodes start at random points in the unit square. Every pair repels with
/// `k²/d`, connected pairs attract with `d²/k` where `k = 1/√n`, and each step
/// moves a node at most the current temperature, which cools linearly to
/// zero. The result is centered and scaled into `[-1, 1]²`, indexed by node
/// position.
pub fn spring_layout(graph: &MailGraph, options: &LayoutOptions) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let adjacency = graph.neighbor_sets();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut pos: Vec<(f64, f64)> = (0..n).map(|_| (rng.r#gen(), rng.r#gen())).collect();

    let k = (1.0 / n as f64).sqrt();
    let mut t = 0.1 * spread(&pos);
    let dt = t / (options.iterations + 1) as f64;

    for _ in 0..options.iterations {
        let mut displacement = vec![(0.0, 0.0); n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let distance = (dx * dx + dy * dy).sqrt().max(0.01);
                let attraction = if adjacency[i].contains(&j) {
                    distance / k
                } else {
                    0.0
                };
                let force = k * k / (distance * distance) - attraction;
                displacement[i].0 += dx * force;
                displacement[i].1 += dy * force;
            }
        }

        for (p, (dx, dy)) in pos.iter_mut().zip(displacement) {
            let length = (dx * dx + dy * dy).sqrt().max(0.01);
            p.0 += dx * t / length;
            p.1 += dy * t / length;
        }

        t -= dt;
    }

    rescale(pos)
}

/// Largest extent of the point cloud along either axis
fn spread(pos: &[(f64, f64)]) -> f64 {
    let extent = |values: &mut dyn Iterator<Item = f64>| {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        max - min
    };
    let x = extent(&mut pos.iter().map(|p| p.0));
    let y = extent(&mut pos.iter().map(|p| p.1));
    x.max(y)
}

/// Center on the mean and scale so the farthest coordinate is 1
fn rescale(mut pos: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        lim = lim.max(p.0.abs()).max(p.1.abs());
    }

    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= lim;
            p.1 /= lim;
        }
    }
    pos
}
