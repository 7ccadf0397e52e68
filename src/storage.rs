//! Digit-text persistence of mazes.
//!
//! One line per row, one digit per cell, no separators: `0` open, `1` wall,
//! `2` marked path (still passable on reload). Entrances are not stored - they
//! are re-derived from the border columns on every load.

use itertools::Itertools;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

use crate::cells::CellState;
use crate::errors::*;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::units::{Height, Width};

/// Serialise the maze grid to the digit-text format, one row per line.
pub fn to_text(maze: &Maze) -> String {
    let body = maze.grid()
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_digit()).collect::<String>())
        .join("\n");
    body + "\n"
}

/// Parse a digit-text maze.
///
/// Fails with `MalformedMaze` on ragged rows, non-digit characters, unusable
/// dimensions or a walled border column. Parsing is atomic: on failure no
/// partial grid escapes.
pub fn parse(text: &str) -> Result<Maze> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err(ErrorKind::MalformedMaze("the maze file is empty".into()).into());
    }

    let width = lines[0].chars().count();
    let height = lines.len();
    let mut cells = Vec::with_capacity(width * height);

    for (line_number, line) in lines.iter().enumerate() {
        let row_width = line.chars().count();
        if row_width != width {
            return Err(ErrorKind::MalformedMaze(
                format!("row {} is {} cells long, expected {}",
                        line_number + 1, row_width, width)).into());
        }
        for ch in line.chars() {
            match CellState::from_digit(ch) {
                Some(state) => cells.push(state),
                None => {
                    return Err(ErrorKind::MalformedMaze(
                        format!("invalid cell character {:?} on row {}",
                                ch, line_number + 1)).into());
                }
            }
        }
    }

    let grid = Grid::from_cells(cells, Width(width), Height(height))
        .chain_err(|| ErrorKind::MalformedMaze("unusable grid dimensions".into()))?;
    Maze::from_grid(grid)
}

/// Load a maze from a file. A missing file reports `MazeFileNotFound`,
/// distinct from malformed content, so callers can keep any current maze.
pub fn load(path: &Path) -> Result<Maze> {
    let mut file = File::open(path).map_err(|io_error| {
        if io_error.kind() == io::ErrorKind::NotFound {
            Error::from(ErrorKind::MazeFileNotFound(path.display().to_string()))
        } else {
            Error::from(io_error)
        }
    })?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    parse(&text)
}

/// Write the maze to a file in the digit-text format.
pub fn save(maze: &Maze, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .chain_err(|| format!("failed to create maze file {}", path.display()))?;
    file.write_all(to_text(maze).as_bytes())
        .chain_err(|| format!("failed to write maze file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::Cartesian2DCoordinate;
    use rand::{SeedableRng, XorShiftRng};
    use std::env;
    use std::fs;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn seeded_maze(w: usize, h: usize, seed: [u32; 4]) -> Maze {
        let mut rng = XorShiftRng::from_seed(seed);
        Maze::generate_with_rng(Width(w), Height(h), &mut rng).expect("valid test dimensions")
    }

    fn assert_malformed(result: Result<Maze>) {
        match result {
            Err(Error(ErrorKind::MalformedMaze(_), _)) => {}
            other => panic!("expected MalformedMaze, got {:?}", other),
        }
    }

    #[test]
    fn text_round_trip_preserves_cells_and_entrances() {
        let maze = seeded_maze(9, 7, [201, 202, 203, 204]);
        let reloaded = parse(&to_text(&maze)).expect("own output must parse");
        assert_eq!(reloaded.grid(), maze.grid());
        assert_eq!(reloaded.entrances(), maze.entrances());
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_malformed(parse("010\n11\n010\n"));
    }

    #[test]
    fn parse_rejects_non_digit_characters() {
        assert_malformed(parse("010\n1x1\n010\n"));
    }

    #[test]
    fn parse_rejects_even_dimensions() {
        assert_malformed(parse("0110\n1111\n0110\n"));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_malformed(parse(""));
    }

    #[test]
    fn parse_rejects_walled_border_columns() {
        assert_malformed(parse("111\n101\n111\n"));
    }

    #[test]
    fn disconnected_maze_loads_but_has_no_route() {
        let maze = parse("010\n111\n010\n").expect("well formed even though disconnected");
        assert_eq!(maze.entrances(), (gc(0, 0), gc(2, 0)));
        assert_eq!(maze.solve(), None);
    }

    #[test]
    fn marked_path_digits_stay_passable_on_reload() {
        let maze = parse("111\n200\n111\n").expect("digit 2 is a passable cell");
        assert_eq!(maze.entrances(), (gc(0, 1), gc(2, 1)));
        assert_eq!(maze.grid().cell(gc(0, 1)), CellState::PathMarked);
        let route = maze.solve().expect("marked row is a corridor");
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn entrance_detection_takes_the_first_passable_cell_per_side() {
        // two openings in the first column, one in the last
        let maze = parse("11111\n00001\n10001\n00000\n11111\n").expect("well formed");
        assert_eq!(maze.entrances(), (gc(0, 1), gc(4, 3)));
    }

    #[test]
    fn save_then_load_round_trips_through_a_file() {
        let maze = seeded_maze(7, 7, [211, 212, 213, 214]);
        let path = env::temp_dir()
            .join(format!("mazescape_round_trip_{}.txt", std::process::id()));

        save(&maze, &path).expect("save must succeed in the temp dir");
        let reloaded = load(&path).expect("just saved file must load");
        fs::remove_file(&path).expect("test file cleanup");

        assert_eq!(reloaded, maze);
    }

    #[test]
    fn loading_a_missing_file_is_reported_distinctly() {
        let path = env::temp_dir().join("mazescape_definitely_not_here.txt");
        match load(&path) {
            Err(Error(ErrorKind::MazeFileNotFound(_), _)) => {}
            other => panic!("expected MazeFileNotFound, got {:?}", other),
        }
    }
}
