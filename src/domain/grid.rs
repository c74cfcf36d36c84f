use super::{Cell, Error, NEIGHBOR_OFFSETS, Neighborhood, Result, Rule};
use rand::Rng;
use rayon::prelude::*;

/// Grid manages the 2D toroidal cell buffer.
///
/// Cells are stored row-major and addressed as `(row, col)`, with `(0, 0)` the
/// top-left corner. A second buffer of the same size receives each new
/// generation and is then swapped in, so a pass only ever reads the
/// generation it started from.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    next: Vec<Cell>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Grid {
    /// Create a grid where each cell is alive with probability `initial_density`.
    ///
    /// Density is clamped into `[0, 1]`; NaN behaves like 0.
    pub fn new<R: Rng>(
        width: usize,
        height: usize,
        initial_density: f64,
        rng: &mut R,
    ) -> Result<Self> {
        Self::cell_count(width, height)?;
        Ok(Self::random_unchecked(width, height, initial_density, rng))
    }

    /// Create a new grid with all cells dead
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        let count = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; count],
            next: vec![Cell::Dead; count],
        })
    }

    /// Number of cells for the given dimensions; both must be non-zero and
    /// their product must fit in `usize`
    fn cell_count(width: usize, height: usize) -> Result<usize> {
        width
            .checked_mul(height)
            .filter(|&count| count > 0)
            .ok_or(Error::InvalidDimension { width, height })
    }

    pub(crate) fn random_unchecked<R: Rng>(
        width: usize,
        height: usize,
        initial_density: f64,
        rng: &mut R,
    ) -> Self {
        let count = width * height;
        let density = clamp_density(initial_density);
        let cells = (0..count)
            .map(|_| Cell::from_alive(rng.random::<f64>() < density))
            .collect();
        Self {
            width,
            height,
            cells,
            next: vec![Cell::Dead; count],
        }
    }

    /// Get grid dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height && col < self.width).then(|| self.cells[self.get_index(row, col)])
    }

    /// Set cell at position; out-of-range positions are ignored
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.height && col < self.width {
            let idx = self.get_index(row, col);
            self.cells[idx] = cell;
        }
    }

    /// Set a cell addressed by signed coordinates, wrapped onto the torus
    pub fn set_wrapped(&mut self, row: isize, col: isize, cell: Cell) {
        let r = row.rem_euclid(self.height as isize) as usize;
        let c = col.rem_euclid(self.width as isize) as usize;
        self.set(r, c, cell);
    }

    /// The eight neighbor states of `(row, col)` in [`NEIGHBOR_OFFSETS`] order,
    /// wrapping around every edge.
    pub fn neighbors_of(&self, row: usize, col: usize) -> Neighborhood {
        sample_neighbors(&self.cells, self.width, self.height, row, col)
    }

    /// Advance one generation on the calling thread
    pub fn advance(&mut self, rule: &dyn Rule) {
        let Self { width, height, cells, next } = self;
        let (width, height) = (*width, *height);
        let current: &[Cell] = cells;

        for (idx, slot) in next.iter_mut().enumerate() {
            let (row, col) = (idx / width, idx % width);
            let neighbors = sample_neighbors(current, width, height, row, col);
            *slot = rule.next_state(current[idx], &neighbors);
        }

        std::mem::swap(&mut self.cells, &mut self.next);
    }

    /// Advance one generation with one rayon task per row.
    /// Pays off on grids larger than roughly 100x100.
    pub fn advance_parallel(&mut self, rule: &dyn Rule) {
        let Self { width, height, cells, next } = self;
        let (width, height) = (*width, *height);
        let current: &[Cell] = cells;

        next.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, slot) in out.iter_mut().enumerate() {
                    let neighbors = sample_neighbors(current, width, height, row, col);
                    *slot = rule.next_state(current[row * width + col], &neighbors);
                }
            });

        std::mem::swap(&mut self.cells, &mut self.next);
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Rows from top to bottom, each `width` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Iterate over all cells with their positions as `(row, col, cell)`
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx / self.width, idx % self.width, cell))
    }
}

/// Clamp a density into `[0, 1]`, mapping NaN to 0
pub fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}

fn sample_neighbors(
    cells: &[Cell],
    width: usize,
    height: usize,
    row: usize,
    col: usize,
) -> Neighborhood {
    let (w, h) = (width as isize, height as isize);
    let sampled = NEIGHBOR_OFFSETS.map(|(dr, dc)| {
        // Toroidal wrapping
        let r = (row as isize + dr).rem_euclid(h) as usize;
        let c = (col as isize + dc).rem_euclid(w) as usize;
        cells[r * width + c]
    });
    Neighborhood::new(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LifeLike, RuleTable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_from(rows: &[&str]) -> Grid {
        let mut grid = Grid::empty(rows[0].len(), rows.len()).unwrap();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.set(r, c, Cell::Alive);
                }
            }
        }
        grid
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::empty(0, 5),
            Err(Error::InvalidDimension { width: 0, height: 5 })
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(Grid::new(4, 0, 0.5, &mut rng).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Grid::empty(usize::MAX, 2),
            Err(Error::InvalidDimension { width: usize::MAX, height: 2 })
        );
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(Grid::new(2, usize::MAX / 2 + 1, 0.5, &mut rng).is_err());
    }

    #[test]
    fn test_dimension_invariant() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for (width, height) in [(1, 1), (3, 3), (7, 2), (2, 9), (64, 17)] {
            let grid = Grid::new(width, height, 0.5, &mut rng).unwrap();
            assert_eq!(grid.dimensions(), (width, height));
            assert_eq!(grid.rows().count(), height);
            assert!(grid.rows().all(|row| row.len() == width));
        }
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::empty(4, 3).unwrap();
        grid.set(2, 3, Cell::Alive);
        grid.set(3, 0, Cell::Alive);
        assert_eq!(grid.get(2, 3), Some(Cell::Alive));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_set_wrapped() {
        let mut grid = Grid::empty(4, 3).unwrap();
        grid.set_wrapped(-1, -1, Cell::Alive);
        grid.set_wrapped(3, 5, Cell::Alive);
        assert_eq!(grid.get(2, 3), Some(Cell::Alive));
        assert_eq!(grid.get(0, 1), Some(Cell::Alive));
    }

    #[test]
    fn test_density_extremes_and_clamping() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(Grid::new(8, 8, 1.0, &mut rng).unwrap().population(), 64);
        assert_eq!(Grid::new(8, 8, 0.0, &mut rng).unwrap().population(), 0);
        assert_eq!(Grid::new(8, 8, 7.5, &mut rng).unwrap().population(), 64);
        assert_eq!(Grid::new(8, 8, -2.0, &mut rng).unwrap().population(), 0);
        assert_eq!(Grid::new(8, 8, f64::NAN, &mut rng).unwrap().population(), 0);
    }

    #[test]
    fn test_wraparound_on_3x3() {
        // Every offset from (0,0) lands on a distinct wrapped cell
        for (index, (dr, dc)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let mut grid = Grid::empty(3, 3).unwrap();
            grid.set_wrapped(*dr, *dc, Cell::Alive);

            let neighbors = grid.neighbors_of(0, 0);
            assert_eq!(neighbors[index], Cell::Alive, "offset ({dr}, {dc})");
            assert_eq!(neighbors.alive_count(), 1);
        }

        let mut grid = Grid::empty(3, 3).unwrap();
        grid.set(2, 2, Cell::Alive);
        assert_eq!(grid.neighbors_of(0, 0)[Neighborhood::TOP_LEFT], Cell::Alive);
        assert_eq!(grid.neighbors_of(1, 1)[Neighborhood::BOTTOM_RIGHT], Cell::Alive);
    }

    #[test]
    fn test_neighbors_exclude_self() {
        let grid = grid_from(&["...", ".#.", "..."]);
        assert_eq!(grid.neighbors_of(1, 1).alive_count(), 0);
        assert_eq!(grid.neighbors_of(0, 0).alive_count(), 1);
    }

    #[test]
    fn test_advance_reads_only_previous_generation() {
        // Each cell copies its left neighbor. Evaluated in place, the single
        // live cell would smear across the whole row in one pass.
        let mut shift_right = RuleTable::new("ShiftRight");
        for neighbors in Neighborhood::all() {
            let next = neighbors[Neighborhood::MID_LEFT];
            shift_right.insert(Cell::Dead, neighbors, next);
            shift_right.insert(Cell::Alive, neighbors, next);
        }

        let mut grid = grid_from(&[".....", "#....", "....."]);
        grid.advance(&shift_right);
        assert_eq!(grid, grid_from(&[".....", ".#...", "....."]));

        let mut parallel = grid_from(&[".....", "#....", "....."]);
        parallel.advance_parallel(&shift_right);
        assert_eq!(parallel, grid);

        // And it wraps off the right edge
        let mut edge = grid_from(&[".....", "....#", "....."]);
        edge.advance(&shift_right);
        assert_eq!(edge, grid_from(&[".....", "#....", "....."]));
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let rule = LifeLike::conway();
        let mut serial = Grid::new(37, 23, 0.4, &mut rng).unwrap();
        let mut parallel = serial.clone();

        for _ in 0..10 {
            serial.advance(&rule);
            parallel.advance_parallel(&rule);
            assert_eq!(serial, parallel);
        }
    }

    #[test]
    fn test_iter_cells_positions() {
        let grid = grid_from(&["..#", "#.."]);
        let alive: Vec<_> = grid
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(alive, vec![(0, 2), (1, 0)]);
    }

    #[test]
    fn test_clear() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut grid = Grid::new(10, 10, 1.0, &mut rng).unwrap();
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
