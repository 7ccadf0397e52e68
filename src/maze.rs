use bit_set::BitSet;
use rand::{self, Rng};

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CellState, COMPASS_PRIMARIES};
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::pathing;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// A maze session: the tile grid plus its two boundary entrances.
///
/// The entrance pair is fixed when the maze is generated or loaded. The left
/// entrance sits on column 0, the right entrance on the last column; solving
/// routes from the left one to the right one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Maze {
    grid: Grid,
    entrances: (Cartesian2DCoordinate, Cartesian2DCoordinate),
}

impl Maze {
    /// Generate a perfect maze of the requested dimensions with two carved
    /// entrances, using the thread local RNG.
    pub fn generate(width: Width, height: Height) -> Result<Maze> {
        Maze::generate_with_rng(width, height, &mut rand::thread_rng())
    }

    /// Same as `generate` but with a caller supplied RNG, so tests can seed a
    /// deterministic generator.
    pub fn generate_with_rng<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<Maze> {
        let mut grid = Grid::new(width, height)?;
        generators::randomised_prim(&mut grid, rng);
        let entrances = generators::carve_entrances(&mut grid, rng);
        Ok(Maze { grid, entrances })
    }

    /// Wrap an already populated grid (the storage loader), re-deriving the
    /// entrance pair from the cell states. Entrances are never trusted from
    /// stored metadata - they are found structurally on every load.
    pub fn from_grid(grid: Grid) -> Result<Maze> {
        let entrances = Maze::find_entrances(&grid)?;
        Ok(Maze { grid, entrances })
    }

    /// The first passable cell of column 0 and of the last column. Fails with
    /// `MalformedMaze` when either border column is fully walled. Idempotent:
    /// re-running on the same grid always returns the same pair.
    pub fn find_entrances(grid: &Grid)
                          -> Result<(Cartesian2DCoordinate, Cartesian2DCoordinate)> {
        let scan_column = |column: ColumnIndex| -> Option<Cartesian2DCoordinate> {
            (0..grid.height())
                .map(|row| Cartesian2DCoordinate::from_row_column_indices(column, RowIndex(row)))
                .find(|&coord| grid.cell(coord).is_passable())
        };

        let left = scan_column(ColumnIndex(0))
            .ok_or_else(|| Error::from(ErrorKind::MalformedMaze(
                "no entrance in the first column".into())))?;
        let right = scan_column(ColumnIndex(grid.width() - 1))
            .ok_or_else(|| Error::from(ErrorKind::MalformedMaze(
                "no entrance in the last column".into())))?;
        Ok((left, right))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn entrances(&self) -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
        self.entrances
    }

    /// Find an escape route from the left entrance to the right one.
    /// `None` means the maze is disconnected (possible with hand edited
    /// files) - that is a result, not an error.
    pub fn solve(&self) -> Option<Vec<Cartesian2DCoordinate>> {
        pathing::solve(&self.grid, self.entrances.0, self.entrances.1)
    }

    /// Number of passable cells in the grid.
    pub fn open_cell_count(&self) -> usize {
        self.grid.rows().flat_map(|row| row.iter()).filter(|c| c.is_passable()).count()
    }

    /// Number of orthogonally adjacent passable cell pairs, each pair counted
    /// once. A perfect maze has exactly `open_cell_count() - 1` of these.
    pub fn passage_edge_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.grid.height() as u32 {
            for x in 0..self.grid.width() as u32 {
                let coord = Cartesian2DCoordinate::new(x, y);
                if !self.grid.cell(coord).is_passable() {
                    continue;
                }
                // scan east and south only so each pair is seen once
                for &next in &[Cartesian2DCoordinate::new(x + 1, y),
                               Cartesian2DCoordinate::new(x, y + 1)] {
                    if self.grid.is_valid_coordinate(next) &&
                       self.grid.cell(next).is_passable() {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Are all passable cells one connected component? Checked with a plain
    /// flood fill over 4-adjacency - deliberately independent of the solver
    /// and of the interior-clipping neighbour rule, so tests can use it to
    /// cross-check both.
    pub fn is_fully_connected(&self) -> bool {
        let total = self.open_cell_count();
        if total == 0 {
            return true;
        }

        let start = self.first_passable_cell().expect("counted passable cells above");
        let mut visited = BitSet::with_capacity(self.grid.size());
        let mut worklist = vec![start];
        let mut reached = 1;
        visited.insert(self.grid.grid_coordinate_to_index(start).expect("in range"));

        while let Some(current) = worklist.pop() {
            for &dir in COMPASS_PRIMARIES.iter() {
                let next = match offset_coordinate(current, dir, 1) {
                    Some(coord) => coord,
                    None => continue,
                };
                if !self.grid.is_valid_coordinate(next) || !self.grid.cell(next).is_passable() {
                    continue;
                }
                let bit_index = self.grid.grid_coordinate_to_index(next).expect("in range");
                if visited.insert(bit_index) {
                    reached += 1;
                    worklist.push(next);
                }
            }
        }

        reached == total
    }

    fn first_passable_cell(&self) -> Option<Cartesian2DCoordinate> {
        for y in 0..self.grid.height() as u32 {
            for x in 0..self.grid.width() as u32 {
                let coord = Cartesian2DCoordinate::new(x, y);
                if self.grid.cell(coord).is_passable() {
                    return Some(coord);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::utils::FnvHashSet;
    use quickcheck::{quickcheck, TestResult};
    use rand::{SeedableRng, XorShiftRng};

    fn seeded_maze(w: usize, h: usize, seed: [u32; 4]) -> Maze {
        let mut rng = XorShiftRng::from_seed(seed);
        Maze::generate_with_rng(Width(w), Height(h), &mut rng).expect("valid test dimensions")
    }

    #[test]
    fn generate_rejects_bad_dimensions() {
        assert!(Maze::generate(Width(4), Height(5)).is_err());
        assert!(Maze::generate(Width(1), Height(1)).is_err());
    }

    #[test]
    fn generated_maze_is_perfect() {
        let maze = seeded_maze(9, 9, [101, 102, 103, 104]);
        assert!(maze.is_fully_connected());
        assert_eq!(maze.passage_edge_count(), maze.open_cell_count() - 1);
    }

    #[test]
    fn generated_maze_has_a_route_between_its_entrances() {
        let maze = seeded_maze(11, 9, [111, 112, 113, 114]);
        let (left, right) = maze.entrances();
        let route = maze.solve().expect("a generated maze always has an escape route");

        assert_eq!(route.first(), Some(&left));
        assert_eq!(route.last(), Some(&right));
        for pair in route.windows(2) {
            let dx = (pair[0].x as i64 - pair[1].x as i64).abs();
            let dy = (pair[0].y as i64 - pair[1].y as i64).abs();
            assert_eq!(dx + dy, 1);
        }
        let unique: FnvHashSet<_> = route.iter().cloned().collect();
        assert_eq!(unique.len(), route.len());
    }

    #[test]
    fn entrance_detection_is_idempotent() {
        let maze = seeded_maze(7, 7, [121, 122, 123, 124]);
        let first = Maze::find_entrances(maze.grid()).expect("entrances exist");
        let second = Maze::find_entrances(maze.grid()).expect("entrances exist");
        assert_eq!(first, second);
        assert_eq!(first, maze.entrances());
    }

    #[test]
    fn walled_border_column_is_malformed() {
        let grid = Grid::new(Width(3), Height(3)).expect("valid test dimensions");
        match Maze::from_grid(grid) {
            Err(Error(ErrorKind::MalformedMaze(_), _)) => {}
            other => panic!("expected MalformedMaze, got {:?}", other),
        }
    }

    #[test]
    fn quickcheck_generated_mazes_are_perfect_and_solvable() {
        fn prop(w: u8, h: u8, seed: u32) -> TestResult {
            // map to odd dimensions in [3, 21]
            let width = 2 * (w as usize % 10) + 3;
            let height = 2 * (h as usize % 10) + 3;
            let mut rng = XorShiftRng::from_seed([seed.wrapping_add(1), 2, 3, 4]);
            let maze = match Maze::generate_with_rng(Width(width), Height(height), &mut rng) {
                Ok(m) => m,
                Err(_) => return TestResult::failed(),
            };

            let lattice = ((width - 1) / 2) * ((height - 1) / 2);
            let tree_holds = maze.passage_edge_count() == maze.open_cell_count() - 1;
            let connected = maze.is_fully_connected();
            let solvable = match maze.solve() {
                Some(route) => {
                    route.first() == Some(&maze.entrances().0) &&
                    route.last() == Some(&maze.entrances().1)
                }
                None => false,
            };
            // entrances add at least one open cell per side on top of the tree
            let count_sane = maze.open_cell_count() >= 2 * lattice - 1 + 2;

            TestResult::from_bool(tree_holds && connected && solvable && count_sane)
        }
        quickcheck(prop as fn(u8, u8, u32) -> TestResult);
    }
}
