//! A* search from a cell to a target row.
//!
//! Frontier priority is cost-so-far plus the change in row distance from the
//! current cell to the candidate: -1 toward the target row, +1 away from it,
//! 0 sideways. That term is not an estimate of the remaining cost, so this is
//! closer to a greedy best-first search than to textbook A*. The search stops
//! at the first dequeued cell on the target row, which is not guaranteed to
//! end the shortest route. Callers get the back-pointer map and pull either
//! the whole route or just the first step.

use std::collections::HashMap;

use crate::board::{Board, CellId};
use crate::queue::PriorityQueue;

/// Back-pointers of a finished search and the goal cell it reached.
#[derive(Debug, Clone)]
pub struct Trace {
    pub came_from: HashMap<CellId, CellId>,
    pub goal: CellId,
    /// Number of steps from the start to `goal`.
    pub cost: u32,
}

#[inline]
fn heuristic(current: CellId, next: CellId, target_row: usize) -> i32 {
    next.row().abs_diff(target_row) as i32 - current.row().abs_diff(target_row) as i32
}

/// Search for a route from `start` to any cell on `target_row`.
///
/// Returns `None` if the row cannot be reached through open passages.
pub fn a_star(board: &Board, start: CellId, target_row: usize) -> Option<Trace> {
    let mut frontier = PriorityQueue::new();
    let mut came_from = HashMap::new();
    let mut cost_so_far: HashMap<CellId, u32> = HashMap::new();

    frontier.add(start, 0);
    cost_so_far.insert(start, 0);

    while let Some((current, _)) = frontier.try_dequeue() {
        let cost = cost_so_far[&current];
        if current.row() == target_row {
            return Some(Trace {
                came_from,
                goal: current,
                cost,
            });
        }
        for next in board.open_neighbors(current) {
            let new_cost = cost + 1;
            let improved = cost_so_far.get(&next).is_none_or(|&old| new_cost < old);
            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                frontier.add(next, new_cost as i32 + heuristic(current, next, target_row));
            }
        }
    }
    None
}

/// Full route `start ..= goal` recovered from a trace.
pub fn path(trace: &Trace, start: CellId) -> Vec<CellId> {
    let mut route = vec![trace.goal];
    let mut current = trace.goal;
    while current != start {
        match trace.came_from.get(&current) {
            Some(&prev) => {
                route.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    route.reverse();
    route
}

/// The cell right after `start` on the traced route.
///
/// `None` when the start already lies on the target row.
pub fn first_step(trace: &Trace, start: CellId) -> Option<CellId> {
    let mut current = trace.goal;
    while let Some(&prev) = trace.came_from.get(&current) {
        if prev == start {
            return Some(current);
        }
        current = prev;
    }
    None
}

/// Length in steps of the route A* finds, or `None` if there is none.
///
/// Not necessarily the shortest route's length once walls force detours.
pub fn path_length(board: &Board, start: CellId, target_row: usize) -> Option<u32> {
    a_star(board, start, target_row).map(|t| t.cost)
}

/// First step of the route A* finds from `start` to `target_row`.
pub fn next_step(board: &Board, start: CellId, target_row: usize) -> Option<CellId> {
    let trace = a_star(board, start, target_row)?;
    first_step(&trace, start)
}
