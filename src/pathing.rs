use bit_set::BitSet;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Exhaustive depth first search for a route between `start` and `goal`.
///
/// The visited set is shared across every branch of the search, not kept per
/// branch: once any branch has expanded a coordinate no other branch will look
/// at it again, so the result is *a* valid route, not necessarily the shortest
/// one. The search stops at the first success. On a perfect maze that route is
/// also the only simple one.
///
/// Implemented with an explicit worklist rather than recursion so the depth is
/// bounded by heap, not call stack, on large grids. Returns `None` when every
/// reachable cell is exhausted without meeting `goal` - a disconnected maze is
/// a normal "no route" result, not an error.
pub fn solve(grid: &Grid,
             start: Cartesian2DCoordinate,
             goal: Cartesian2DCoordinate)
             -> Option<Vec<Cartesian2DCoordinate>> {

    if start == goal {
        return Some(vec![start]);
    }

    let mut visited = BitSet::with_capacity(grid.size());
    let mut parents: FnvHashMap<Cartesian2DCoordinate, Cartesian2DCoordinate> =
        utils::fnv_hashmap(grid.size());
    let mut worklist = vec![start];

    if let Some(start_index) = grid.grid_coordinate_to_index(start) {
        visited.insert(start_index);
    } else {
        return None;
    }

    while let Some(current) = worklist.pop() {

        for &neighbour in grid.neighbours(current, 1, CellState::Open).iter() {
            let bit_index = match grid.grid_coordinate_to_index(neighbour) {
                Some(index) => index,
                None => continue,
            };
            if !visited.insert(bit_index) {
                continue; // already expanded by some other branch
            }
            parents.insert(neighbour, current);

            if neighbour == goal {
                return Some(trace_route(&parents, start, goal));
            }
            worklist.push(neighbour);
        }
    }

    None
}

/// Walk the parent links back from `goal` and return the route start-first.
fn trace_route(parents: &FnvHashMap<Cartesian2DCoordinate, Cartesian2DCoordinate>,
               start: Cartesian2DCoordinate,
               goal: Cartesian2DCoordinate)
               -> Vec<Cartesian2DCoordinate> {
    let mut route = vec![goal];
    let mut current = goal;
    while current != start {
        current = parents[&current];
        route.push(current);
    }
    route.reverse();
    route
}
