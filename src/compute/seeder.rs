//! Initial grid construction from seed shapes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schema::{BlobLayout, Shape};

use super::{Cell, Grid};

/// Build the initial grid for a fresh run.
///
/// `rng_seed` only affects the blob shapes; passing `Some` makes their
/// placement reproducible. `Box` and `Circle` ignore it entirely.
pub fn seed_grid(shape: Shape, size: usize, rng_seed: Option<u64>) -> Grid {
    match shape.blobs() {
        None => match shape {
            Shape::Box => seed_box(size),
            Shape::Circle => seed_circle(size),
            _ => unreachable!("non-blob shapes are box and circle"),
        },
        Some(layout) => {
            let rng = match rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            seed_blobs(size, layout, rng)
        }
    }
}

/// Centered square covering the middle 20% of each axis, bounds inclusive.
fn seed_box(size: usize) -> Grid {
    let lo = 0.4 * size as f64;
    let hi = 0.6 * size as f64;
    seed_where(size, |x, y| x >= lo && x <= hi && y >= lo && y <= hi)
}

/// Centered disc of radius 0.15 * size.
fn seed_circle(size: usize) -> Grid {
    let center = size as f64 / 2.0;
    let radius_sq = (0.15 * size as f64).powi(2);
    seed_where(size, |x, y| {
        let dx = x - center;
        let dy = y - center;
        dx * dx + dy * dy <= radius_sq
    })
}

/// Randomly placed discs. Centers are drawn uniformly from an inset region
/// sized so each disc stays inside the grid.
fn seed_blobs(size: usize, layout: BlobLayout, mut rng: StdRng) -> Grid {
    let span = size as f64;
    let radius = layout.radius * span;
    let inset = span * layout.radius;
    let inner = span * (1.0 - 2.5 * layout.radius);

    let centers: Vec<(f64, f64)> = (0..layout.count)
        .map(|_| {
            let cx = inset + rng.gen_range(0.0..1.0) * inner;
            let cy = inset + rng.gen_range(0.0..1.0) * inner;
            (cx, cy)
        })
        .collect();

    let radius_sq = radius * radius;
    seed_where(size, |x, y| {
        centers.iter().any(|&(cx, cy)| {
            let dx = x - cx;
            let dy = y - cy;
            dx * dx + dy * dy <= radius_sq
        })
    })
}

/// Build a grid where cells satisfying `is_seeded` start as catalyst and the
/// rest as substrate.
fn seed_where(size: usize, is_seeded: impl Fn(f64, f64) -> bool) -> Grid {
    let mut grid = Grid::filled(size, Cell::SUBSTRATE);
    for y in 0..size {
        for x in 0..size {
            if is_seeded(x as f64, y as f64) {
                grid.set(x, y, Cell::SEEDED);
            }
        }
    }
    grid
}
