//! # automaton
//!
//! Conway's rules on the torus. The next generation is always built in a
//! separate buffer so every cell is judged on its neighbours' *current*
//! state, never on ones already updated this step.
use crate::grid::{Grid, HEIGHT, WIDTH};

/// offsets of the eight cells around (0, 0)
const NEIGHBOURS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// how many of the eight cells around (x, y) are alive; each axis wraps on
/// its own
pub fn live_neighbours(grid: &Grid, x: i8, y: i8) -> u8 {
    NEIGHBOURS
        .iter()
        .filter(|(dx, dy)| grid.alive(x + dx, y + dy))
        .count() as u8
}

/// B3/S23
pub fn next_state(alive: bool, neighbours: u8) -> bool {
    matches!((alive, neighbours), (true, 2) | (_, 3))
}

/// compute the next generation of `current` into `next`, returning how many
/// cells flipped state (not how many are alive)
pub fn step(current: &Grid, next: &mut Grid) -> u16 {
    for x in 0..WIDTH as i8 {
        for y in 0..HEIGHT as i8 {
            let n = live_neighbours(current, x, y);
            next.set(x, y, next_state(current.alive(x, y), n));
        }
    }
    current.difference(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CELL_COUNT;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const GLIDER: [(i8, i8); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

    fn generations(g: &Grid, n: usize) -> Grid {
        let mut current = *g;
        let mut next = Grid::empty();
        for _ in 0..n {
            step(&current, &mut next);
            current.commit(&next);
        }
        current
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live, {} neighbours", n);
            assert_eq!(next_state(false, n), n == 3, "dead, {} neighbours", n);
        }
    }

    #[test]
    fn test_neighbours_wrap_at_corner() {
        // the three cells diagonally/orthogonally across the corner
        let g = Grid::from_cells(&[(31, 7), (31, 0), (0, 7)]);
        assert_eq!(live_neighbours(&g, 0, 0), 3);
    }

    #[test]
    fn test_neighbours_exclude_self() {
        let g = Grid::from_cells(&[(4, 4)]);
        assert_eq!(live_neighbours(&g, 4, 4), 0);
        assert_eq!(live_neighbours(&g, 5, 5), 1);
    }

    #[test]
    fn test_empty_grid_never_changes() {
        let current = Grid::empty();
        let mut next = Grid::from_columns([0xff; WIDTH]);
        for _ in 0..100 {
            assert_eq!(step(&current, &mut next), 0);
            assert_eq!(next, Grid::empty());
        }
    }

    #[test]
    fn test_full_grid_dies_completely() {
        let current = Grid::from_columns([0xff; WIDTH]);
        let mut next = Grid::empty();
        assert_eq!(step(&current, &mut next), CELL_COUNT as u16);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_exactly_three_neighbours_is_alive() {
        // (5, 3) has three live neighbours, dead or alive it ends up alive
        let neighbours = [(4, 2), (6, 2), (5, 4)];
        for centre_alive in [false, true] {
            let mut g = Grid::from_cells(&neighbours);
            g.set(5, 3, centre_alive);
            let mut next = Grid::empty();
            step(&g, &mut next);
            assert!(next.alive(5, 3));
        }
    }

    #[test]
    fn test_blinker_across_the_seam() {
        // horizontal blinker straddling x = 31 / 0
        let horizontal = Grid::from_cells(&[(31, 4), (0, 4), (1, 4)]);
        let vertical = Grid::from_cells(&[(0, 3), (0, 4), (0, 5)]);
        let mut next = Grid::empty();
        assert_eq!(step(&horizontal, &mut next), 4);
        assert_eq!(next, vertical);
        assert_eq!(generations(&horizontal, 2), horizontal);
    }

    #[test]
    fn test_block_is_still_life_on_wrap() {
        let block = Grid::from_cells(&[(31, 7), (0, 7), (31, 0), (0, 0)]);
        let mut next = Grid::empty();
        assert_eq!(step(&block, &mut next), 0);
        assert_eq!(next, block);
    }

    #[test]
    fn test_glider_moves_one_diagonal_per_four_steps() {
        let glider = Grid::from_cells(&GLIDER);
        assert_eq!(generations(&glider, 4), glider.shifted(1, 1));
        assert_eq!(generations(&glider, 8), glider.shifted(2, 2));
    }

    #[test]
    fn test_glider_survives_the_wrap() {
        // 8 rows high, so after 32 steps it has crossed the y seam once
        let glider = Grid::from_cells(&GLIDER).shifted(28, 5);
        assert_eq!(generations(&glider, 32), glider.shifted(8, 8));
        assert_eq!(generations(&glider, 32).population(), 5);
    }

    #[test]
    fn test_glider_keeps_changing() {
        let mut current = Grid::from_cells(&GLIDER);
        let mut next = Grid::empty();
        for _ in 0..16 {
            assert!(step(&current, &mut next) > 0);
            current.commit(&next);
        }
    }

    #[test]
    fn test_step_twice_is_total_over_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x6c69_6665);
        let mut next = Grid::empty();
        let mut after = Grid::empty();
        for _ in 0..200 {
            let mut columns = [0u8; WIDTH];
            rng.fill(&mut columns[..]);
            let g = Grid::from_columns(columns);
            let changed = step(&g, &mut next);
            assert_eq!(changed, g.difference(&next));
            assert!(step(&next, &mut after) as usize <= CELL_COUNT);
        }
    }
}
