//! The Gray-Scott update step.
//!
//! Each step computes the next grid entirely from the current one:
//!
//! ```text
//! react = a * b^2
//! a' = a + (Da * lap(a) - react + F * (1 - a)) * dt
//! b' = b + (Db * lap(b) + react - (K + F) * b) * dt
//! ```
//!
//! where `lap` is the 3x3 Laplacian stencil over the toroidal neighborhood.
//! Values are never clamped.

use crate::schema::SimulationConfig;

use super::{Cell, Grid, stencil};

/// Compute one update step from `current` into `next`.
///
/// `next` is overwritten wholly; it must have the same size as `current`.
/// Writing into a separate buffer is required because every cell's diffusion
/// term reads eight unmodified neighbors.
pub fn step_into(current: &Grid, next: &mut Grid, config: &SimulationConfig) {
    debug_assert_eq!(current.size(), next.size());

    let size = current.size();
    let kill_plus_feed = config.kill_rate + config.feed_rate;

    for y in 0..size {
        for x in 0..size {
            let neighborhood = current.neighborhood(x, y);
            let (a_diffusion, b_diffusion) = stencil::diffusion(&neighborhood);
            let Cell { a, b } = neighborhood[4];

            let react = a * b * b;
            let a_next =
                a + (config.diffusion_rate_a * a_diffusion - react + config.feed_rate * (1.0 - a))
                    * config.dt;
            let b_next = b
                + (config.diffusion_rate_b * b_diffusion + react - kill_plus_feed * b) * config.dt;

            next.set(
                x,
                y,
                Cell {
                    a: a_next,
                    b: b_next,
                },
            );
        }
    }
}

/// Allocating convenience wrapper around [`step_into`].
pub fn step(current: &Grid, config: &SimulationConfig) -> Grid {
    let mut next = Grid::filled(current.size(), Cell::default());
    step_into(current, &mut next, config);
    next
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::compute::seed_grid;
    use crate::schema::Shape;

    fn test_config(size: usize) -> SimulationConfig {
        SimulationConfig {
            size,
            shape: Shape::Box,
            diffusion_rate_a: 1.0,
            diffusion_rate_b: 0.5,
            feed_rate: 0.055,
            kill_rate: 0.062,
            dt: 1.0,
            iterations: 1,
            snapshot_every: 1,
            rng_seed: None,
        }
    }

    /// Cyclically rotate a grid by (dx, dy).
    fn rotated(grid: &Grid, dx: usize, dy: usize) -> Grid {
        let n = grid.size();
        let mut out = Grid::filled(n, Cell::default());
        for y in 0..n {
            for x in 0..n {
                out.set((x + dx) % n, (y + dy) % n, grid.get(x, y));
            }
        }
        out
    }

    #[test]
    fn uniform_grid_evolves_by_reaction_only() {
        // A uniform field has zero diffusion everywhere, so one step applies
        // the pure reaction term identically to every cell.
        let config = test_config(8);
        let start = Cell { a: 0.6, b: 0.3 };
        let grid = Grid::filled(8, start);
        let next = step(&grid, &config);

        let react = start.a * start.b * start.b;
        let expect_a = start.a + (-react + config.feed_rate * (1.0 - start.a)) * config.dt;
        let expect_b =
            start.b + (react - (config.kill_rate + config.feed_rate) * start.b) * config.dt;

        for cell in next.cells() {
            assert!((cell.a - expect_a).abs() < 1e-12);
            assert!((cell.b - expect_b).abs() < 1e-12);
        }
    }

    #[test]
    fn step_is_deterministic_and_does_not_alias() {
        // Computing the step twice from the same input must agree exactly,
        // whatever buffer ends up holding the result.
        let config = test_config(10);
        let grid = seed_grid(Shape::Box, 10, None);

        let once = step(&grid, &config);
        let mut reused = once.clone();
        step_into(&grid, &mut reused, &config);
        assert_eq!(once, reused);
    }

    #[test]
    fn box_seed_step_changes_boundary_but_not_far_corner() {
        // size=10 box: cells with coordinates in 4..=6 are seeded. A cell
        // adjacent to the box sees a non-uniform neighborhood and must change
        // through diffusion; the far corner's neighborhood is uniformly
        // substrate, so only the (zero, since a=1) reaction term applies.
        let config = test_config(10);
        let grid = seed_grid(Shape::Box, 10, None);
        assert_eq!(grid.get(5, 5), Cell::SEEDED);
        assert_eq!(grid.get(3, 5), Cell::SUBSTRATE);

        let next = step(&grid, &config);

        let boundary = next.get(3, 5);
        assert!((boundary.a - 1.0).abs() > 1e-9, "a should diffuse out");
        assert!(boundary.b.abs() > 1e-9, "b should diffuse in");

        let corner = next.get(0, 0);
        assert!((corner.a - 1.0).abs() < 1e-12);
        assert!(corner.b.abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn step_commutes_with_toroidal_rotation(dx in 0usize..16, dy in 0usize..16) {
            let config = test_config(16);
            let grid = seed_grid(Shape::Box, 16, None);

            let step_then_rotate = rotated(&step(&grid, &config), dx, dy);
            let rotate_then_step = step(&rotated(&grid, dx, dy), &config);

            // Rotation translates every neighborhood wholesale, so each
            // output cell sees the same operands in the same order: the
            // grids must match bit for bit.
            prop_assert_eq!(step_then_rotate, rotate_then_step);
        }
    }
}
