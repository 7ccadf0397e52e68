use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::maze::Maze;
use crate::utils::FnvHashSet;

const WALL_GLYPH: &str = "\u{2588}\u{2588}";
const OPEN_GLYPH: &str = "  ";
const PATH_GLYPH: &str = "//";

fn state_glyph(state: CellState) -> &'static str {
    match state {
        CellState::Wall => WALL_GLYPH,
        CellState::Open => OPEN_GLYPH,
        CellState::PathMarked => PATH_GLYPH,
    }
}

/// Display only - the persisted format is the digit text in `storage`, never
/// these glyphs.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // every cell is two glyph columns wide plus one newline per row
        let mut output =
            String::with_capacity(self.grid().size() * 2 + self.grid().height());
        for row in self.grid().rows() {
            for &cell in row {
                output.push_str(state_glyph(cell));
            }
            output.push('\n');
        }
        write!(f, "{}", output)
    }
}

/// Renders a maze with an escape route drawn over it, as a pure read: the
/// route cells show the path glyph while the underlying grid and the entrance
/// pair stay untouched.
#[derive(Debug)]
pub struct PathOverlay<'a> {
    maze: &'a Maze,
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl<'a> PathOverlay<'a> {
    pub fn new(maze: &'a Maze, path: &[Cartesian2DCoordinate]) -> PathOverlay<'a> {
        PathOverlay {
            maze,
            on_path_coordinates: path.iter().cloned().collect(),
        }
    }
}

impl<'a> fmt::Display for PathOverlay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grid = self.maze.grid();
        let mut output = String::with_capacity(grid.size() * 2 + grid.height());
        for (y, row) in grid.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                if self.on_path_coordinates.contains(&coord) {
                    output.push_str(PATH_GLYPH);
                } else {
                    output.push_str(state_glyph(cell));
                }
            }
            output.push('\n');
        }
        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::storage;
    use crate::units::{Height, Width};
    use rand::{SeedableRng, XorShiftRng};

    #[test]
    fn three_state_glyph_mapping() {
        let maze = storage::parse("111\n200\n111\n").expect("well formed");
        let rendered = format!("{}", maze);
        assert_eq!(rendered, "\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\n\
                              //    \n\
                              \u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\u{2588}\n");
    }

    #[test]
    fn overlay_draws_the_route_without_mutating_the_maze() {
        let mut rng = XorShiftRng::from_seed([301, 302, 303, 304]);
        let maze = crate::maze::Maze::generate_with_rng(Width(7), Height(7), &mut rng)
            .expect("valid test dimensions");
        let before = maze.clone();
        let route = maze.solve().expect("generated maze has a route");

        let rendered = format!("{}", PathOverlay::new(&maze, &route));

        assert_eq!(maze, before, "rendering is a pure read");
        assert!(rendered.contains(PATH_GLYPH));
        // the plain rendering of an unmarked maze has no path glyphs
        assert!(!format!("{}", maze).contains(PATH_GLYPH));

        // every route cell renders as the path glyph (two chars per cell)
        let lines: Vec<Vec<char>> = rendered.lines().map(|l| l.chars().collect()).collect();
        for coord in &route {
            let row = &lines[coord.y as usize];
            assert_eq!(row[coord.x as usize * 2], '/');
            assert_eq!(row[coord.x as usize * 2 + 1], '/');
        }
    }
}
