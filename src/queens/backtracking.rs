//! Exhaustive depth-first N-Queens search.

use super::board::{Placement, UNASSIGNED};
use crate::error::ConfigError;
use tracing::{debug, trace};

/// Counters describing the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktrackStats {
    /// Queens placed, including those later removed.
    pub placements: u64,
    /// Times the search returned to an earlier row.
    pub backtracks: u64,
}

/// Row-by-row backtracking solver for N-Queens.
///
/// Columns are tried in ascending order, so the solution returned for a
/// given `n` is always the lexicographically first one.
///
/// ```
/// use u_combopt::queens::{is_valid_placement, BacktrackingSolver};
///
/// let mut solver = BacktrackingSolver::new(8).unwrap();
/// let placement = solver.solve().unwrap();
/// assert_eq!(placement, vec![0, 4, 7, 5, 2, 6, 1, 3]);
/// assert!(is_valid_placement(&placement));
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackingSolver {
    n: usize,
    stats: BacktrackStats,
}

impl BacktrackingSolver {
    /// Creates a solver for an `n × n` board. `n` must be positive.
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        Ok(Self {
            n,
            stats: BacktrackStats::default(),
        })
    }

    /// Board dimension `n`.
    pub fn board_size(&self) -> usize {
        self.n
    }

    /// Counters of the most recent [`solve`](Self::solve) call.
    pub fn stats(&self) -> BacktrackStats {
        self.stats
    }

    /// Searches for a placement of `n` non-attacking queens.
    ///
    /// Returns `None` when no placement exists (`n` = 2 or 3). Always
    /// terminates: every row tries each column at most once per visit.
    pub fn solve(&mut self) -> Option<Placement> {
        let n = self.n;
        let mut stats = BacktrackStats::default();
        let mut board = vec![UNASSIGNED; n];
        // Next column to try in each row.
        let mut next_col = vec![0usize; n];
        let mut row = 0usize;

        let result = loop {
            if row == n {
                break Some(board);
            }

            let mut placed = false;
            while next_col[row] < n {
                let col = next_col[row];
                next_col[row] += 1;
                if is_safe(&board, row, col) {
                    trace!(row, col, "place queen");
                    board[row] = col;
                    stats.placements += 1;
                    placed = true;
                    break;
                }
            }

            if placed {
                row += 1;
                if row < n {
                    next_col[row] = 0;
                }
                continue;
            }

            // Row exhausted: undo and resume the previous row.
            board[row] = UNASSIGNED;
            if row == 0 {
                break None;
            }
            row -= 1;
            trace!(row, col = board[row], "backtrack");
            board[row] = UNASSIGNED;
            stats.backtracks += 1;
        };

        debug!(
            n,
            solved = result.is_some(),
            placements = stats.placements,
            backtracks = stats.backtracks,
            "backtracking finished"
        );
        self.stats = stats;
        result
    }
}

/// Solves N-Queens for an `n × n` board.
///
/// Returns `Ok(None)` when no solution exists and an error for `n == 0`.
pub fn solve(n: usize) -> Result<Option<Placement>, ConfigError> {
    Ok(BacktrackingSolver::new(n)?.solve())
}

/// Checks `col` in `row` against every queen in rows `0..row`.
fn is_safe(board: &[usize], row: usize, col: usize) -> bool {
    board[..row]
        .iter()
        .enumerate()
        .all(|(i, &c)| c != col && c.abs_diff(col) != row - i)
}
