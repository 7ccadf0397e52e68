use smallvec::SmallVec;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CellState, COMPASS_PRIMARIES};
use crate::errors::*;
use crate::units::{Height, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A rectangular grid of tile states, `width` columns by `height` rows,
/// stored row major.
///
/// Dimensions are always odd and at least 3: the generator carves on the
/// odd-indexed cell lattice and the entrance logic assumes at least one
/// interior odd row, so anything else is rejected at construction time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a grid with every cell a `Wall`, ready for carving.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w < 3 || h < 3 || w % 2 == 0 || h % 2 == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }
        Ok(Grid {
            cells: vec![CellState::Wall; w * h],
            width: w,
            height: h,
        })
    }

    /// Rebuild a grid from already parsed cell states (the storage loader).
    /// The cell count must match the dimensions exactly.
    pub fn from_cells(cells: Vec<CellState>, width: Width, height: Height) -> Result<Grid> {
        let mut grid = Grid::new(width, height)?;
        assert_eq!(cells.len(),
                   grid.cells.len(),
                   "cell count does not match the grid dimensions");
        grid.cells = cells;
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Row major index of a coordinate, None when out of range.
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// State of the cell at `coord`.
    ///
    /// Panics when `coord` is out of range - the algorithms in this crate only
    /// ever compute in-range coordinates, so an out of range access is a bug in
    /// the caller, not bad user input.
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> CellState {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => self.cells[index],
            None => panic!("coordinate ({}, {}) out of range for a {}x{} grid",
                           coord.x, coord.y, self.width, self.height),
        }
    }

    /// Unconditional cell write. Panics when out of range, same as `cell`.
    /// The carving logic is responsible for writing sensible states.
    pub fn set_cell(&mut self, coord: Cartesian2DCoordinate, state: CellState) {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => self.cells[index] = state,
            None => panic!("coordinate ({}, {}) out of range for a {}x{} grid",
                           coord.x, coord.y, self.width, self.height),
        }
    }

    /// The orthogonal neighbours of `coord` at the given stride whose state
    /// satisfies `required`.
    ///
    /// This is the one neighbour primitive shared by the generator (stride 2,
    /// scanning across wall pairs) and the solver (stride 1, stepping cell by
    /// cell). A neighbour only qualifies when it lies strictly inside the
    /// border ring; at stride 1 the east border column stays reachable so a
    /// route can terminate on the right entrance.
    pub fn neighbours(&self,
                      coord: Cartesian2DCoordinate,
                      stride: u32,
                      required: CellState)
                      -> CoordinateSmallVec {
        let east_limit = self.width - (stride as usize / 2);
        COMPASS_PRIMARIES
            .iter()
            .filter_map(|&dir| offset_coordinate(coord, dir, stride))
            .filter(|c| {
                let (x, y) = (c.x as usize, c.y as usize);
                y > 0 && y < self.height - 1 && x > 0 && x < east_limit &&
                self.cell(*c).satisfies(required)
            })
            .collect()
    }

    /// The rows of the grid, top to bottom, each a `width` long slice.
    pub fn rows(&self) -> ::std::slice::Chunks<CellState> {
        self.cells.chunks(self.width)
    }
}
