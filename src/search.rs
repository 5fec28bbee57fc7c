//! Alpha-beta minimax over pawn paths.
//!
//! The search alternates between a *subject* (maximizing) and its *rival*
//! (minimizing), each advancing toward its own target row. Only pawn moves
//! and jumps are searched; walls are weighed by the bot around this search.
//!
//! A line is scored step by step. For each step the mover gains its row
//! progress, pays the A* distance still left to its row, earns
//! [`GOAL_BONUS`] for landing on the row, and pays [`DEADLOCK_PENALTY`] for
//! landing on a cell with a single open neighbour. Move steps weigh 1.
//! Jump steps weigh 2 on even plies and -2 on odd plies. The subject's steps
//! add to the score and the rival's subtract.

use std::collections::HashMap;

use crate::board::{Board, CellId};
use crate::constants::{DEADLOCK_PENALTY, GOAL_BONUS, INF, SEARCH_DEPTH};
use crate::pathfinding::path_length;
use crate::validator::{jump_cells, step_cells};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Move,
    Jump,
}

/// One pawn step in a searched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub cell: CellId,
    pub kind: StepKind,
}

impl Step {
    pub const fn walk(cell: CellId) -> Self {
        Self {
            cell,
            kind: StepKind::Move,
        }
    }

    pub const fn jump(cell: CellId) -> Self {
        Self {
            cell,
            kind: StepKind::Jump,
        }
    }
}

/// Best line found by a search: steps alternate subject, rival, subject, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub score: i32,
    pub steps: Vec<Step>,
}

impl Line {
    /// The subject's first step, if the search found any.
    pub fn first(&self) -> Option<Step> {
        self.steps.first().copied()
    }
}

/// Legal steps for a pawn at `mover` with the other pawn at `other`.
pub fn candidate_steps(board: &Board, mover: CellId, other: CellId) -> Vec<Step> {
    let mut steps: Vec<Step> = step_cells(board, mover, other)
        .into_iter()
        .map(Step::walk)
        .collect();
    steps.extend(jump_cells(board, mover, other).into_iter().map(Step::jump));
    steps
}

/// Depth-limited minimax searcher over a fixed board.
pub struct Searcher<'a> {
    board: &'a Board,
    /// Target rows indexed by side: 0 = subject, 1 = rival.
    targets: [usize; 2],
    depth: u8,
    pruning: bool,
    nodes: u64,
    distances: HashMap<(CellId, usize), Option<u32>>,
}

impl<'a> Searcher<'a> {
    pub fn new(board: &'a Board, subject_target: usize, rival_target: usize) -> Self {
        Self {
            board,
            targets: [subject_target, rival_target],
            depth: SEARCH_DEPTH,
            pruning: true,
            nodes: 0,
            distances: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Search every branch; used to cross-check the pruned search.
    #[must_use]
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best line for `subject` against `rival`.
    ///
    /// The returned line is empty if the subject has no legal step.
    pub fn search(&mut self, subject: CellId, rival: CellId) -> Line {
        self.nodes = 0;
        let mut path = Vec::with_capacity(self.depth as usize);
        let line = self.alpha_beta([subject, rival], [subject, rival], &mut path, self.depth, -INF, INF);
        log::trace!(
            "searched {} nodes from {:?}: score {} via {:?}",
            self.nodes,
            subject,
            line.score,
            line.steps
        );
        line
    }

    fn alpha_beta(
        &mut self,
        root: [CellId; 2],
        pos: [CellId; 2],
        path: &mut Vec<Step>,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> Line {
        self.nodes += 1;
        let ply = path.len();
        let side = ply % 2;

        if depth == 0 || self.line_finished(pos, ply) {
            return self.leaf(root, path);
        }

        let steps = candidate_steps(self.board, pos[side], pos[1 - side]);
        if steps.is_empty() {
            return self.leaf(root, path);
        }

        let maximizing = side == 0;
        let mut best: Option<Line> = None;
        for step in steps {
            let mut next = pos;
            next[side] = step.cell;
            path.push(step);
            let line = self.alpha_beta(root, next, path, depth - 1, alpha, beta);
            path.pop();

            let better = match &best {
                None => true,
                Some(b) if maximizing => line.score > b.score,
                Some(b) => line.score < b.score,
            };
            if maximizing {
                alpha = alpha.max(line.score);
            } else {
                beta = beta.min(line.score);
            }
            if better {
                best = Some(line);
            }
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best.unwrap_or_else(|| self.leaf(root, path))
    }

    /// The side that moved last has reached its target row.
    fn line_finished(&self, pos: [CellId; 2], ply: usize) -> bool {
        if ply == 0 {
            return false;
        }
        let mover = (ply - 1) % 2;
        pos[mover].row() == self.targets[mover]
    }

    fn leaf(&mut self, root: [CellId; 2], path: &[Step]) -> Line {
        Line {
            score: self.evaluate(root[0], root[1], path),
            steps: path.to_vec(),
        }
    }

    /// Score `steps` played from the given starting cells.
    pub fn evaluate(&mut self, subject: CellId, rival: CellId, steps: &[Step]) -> i32 {
        let mut pos = [subject, rival];
        let mut total = 0;
        for (ply, step) in steps.iter().enumerate() {
            let side = ply % 2;
            let target = self.targets[side];
            let before = pos[side].row().abs_diff(target) as i32;
            let after = step.cell.row().abs_diff(target) as i32;

            let mut value = (before - after) - self.remaining(step.cell, target);
            if after == 0 {
                value += GOAL_BONUS;
            }
            if self.board.open_neighbors(step.cell).count() == 1 {
                value -= DEADLOCK_PENALTY;
            }

            let weight = match step.kind {
                StepKind::Move => 1,
                StepKind::Jump if ply % 2 == 0 => 2,
                StepKind::Jump => -2,
            };
            let perspective = if side == 0 { 1 } else { -1 };
            total += perspective * weight * value;
            pos[side] = step.cell;
        }
        total
    }

    /// A* distance from `cell` to `target`, memoized for this searcher.
    fn remaining(&mut self, cell: CellId, target: usize) -> i32 {
        let board = self.board;
        let dist = *self
            .distances
            .entry((cell, target))
            .or_insert_with(|| path_length(board, cell, target));
        dist.map_or(DEADLOCK_PENALTY, |d| d as i32)
    }
}
