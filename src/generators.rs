use rand::Rng;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid::Grid;

/// A not yet carved frontier extension: the candidate cell two steps out from
/// the carved region and the wall cell sitting between the two.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CandidateEdge {
    pub cell: Cartesian2DCoordinate,
    pub wall: Cartesian2DCoordinate,
}

impl CandidateEdge {
    /// The edge reaching `candidate` from `origin`, two cells apart on one axis.
    fn between(origin: Cartesian2DCoordinate, candidate: Cartesian2DCoordinate) -> CandidateEdge {
        CandidateEdge {
            cell: candidate,
            wall: Cartesian2DCoordinate::new((origin.x + candidate.x) / 2,
                                             (origin.y + candidate.y) / 2),
        }
    }
}

/// Apply randomised frontier carving (a randomised Prim's variant on the
/// wall-between-cells representation) to a grid of walls.
///
/// Seeds at a random odd/odd interior cell and keeps a frontier of
/// `CandidateEdge`s, popping entries in random order. An entry whose candidate
/// was already opened from another direction is stale and gets dropped, which
/// is exactly the rule that makes the open cells a spanning tree: every pair
/// of open cells ends up connected by one simple path, for any pop order.
/// Terminates because each odd/odd lattice cell is opened at most once and
/// only newly opened cells enqueue further frontier entries.
pub fn randomised_prim<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let seed = Cartesian2DCoordinate::new(rand_odd_index(rng, grid.width()),
                                          rand_odd_index(rng, grid.height()));
    // the seed's wall is itself so the first pop opens exactly one cell
    let mut frontier = vec![CandidateEdge { cell: seed, wall: seed }];

    while !frontier.is_empty() {
        let pick = rng.gen::<usize>() % frontier.len();
        let edge = frontier.swap_remove(pick);

        if grid.cell(edge.cell) != CellState::Wall {
            continue; // stale entry, the candidate was reached another way
        }

        grid.set_cell(edge.cell, CellState::Open);
        grid.set_cell(edge.wall, CellState::Open);

        for &candidate in grid.neighbours(edge.cell, 2, CellState::Wall).iter() {
            frontier.push(CandidateEdge::between(edge.cell, candidate));
        }
    }
}

/// Open one entrance on the left border and one on the right border, each at
/// an independently chosen random odd row (the rows may coincide), and tunnel
/// each entrance inward until it meets the carved maze body.
///
/// Returns the (left, right) entrance coordinates.
pub fn carve_entrances<R: Rng>(grid: &mut Grid,
                               rng: &mut R)
                               -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
    let left = Cartesian2DCoordinate::new(0, rand_odd_index(rng, grid.height()));
    let right = Cartesian2DCoordinate::new(grid.width() as u32 - 1,
                                           rand_odd_index(rng, grid.height()));
    tunnel_inward(grid, left, CompassPrimary::East);
    tunnel_inward(grid, right, CompassPrimary::West);
    (left, right)
}

/// Open the entrance cell, then advance a cursor one step at a time towards
/// the maze interior, opening each wall cell met, until an already passable
/// cell is hit or the cursor reaches the far border column.
fn tunnel_inward(grid: &mut Grid, entrance: Cartesian2DCoordinate, inward: CompassPrimary) {
    grid.set_cell(entrance, CellState::Open);

    let mut cursor = entrance;
    loop {
        cursor = match offset_coordinate(cursor, inward, 1) {
            Some(next) => next,
            None => break,
        };
        if cursor.x == 0 || cursor.x as usize >= grid.width() - 1 {
            break;
        }
        if grid.cell(cursor).is_passable() {
            break;
        }
        grid.set_cell(cursor, CellState::Open);
    }
}

/// A random odd index strictly between the borders, i.e. from {1, 3, ..., upper - 2}.
fn rand_odd_index<R: Rng>(rng: &mut R, upper: usize) -> u32 {
    let choices = (upper - 1) / 2;
    (2 * (rng.gen::<usize>() % choices) + 1) as u32
}
