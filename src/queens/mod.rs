//! N-Queens placement.
//!
//! Place `n` queens on an `n × n` board so that no two share a row, column
//! or diagonal. A placement stores one column index per row.
//!
//! - [`BacktrackingSolver`]: exhaustive, deterministic depth-first search
//! - [`QueensGa`]: permutation-encoded genetic search
//!
//! # References
//!
//! - Wirth (1976), *Algorithms + Data Structures = Programs*, §3.5

mod backtracking;
mod board;
mod genetic;

pub use backtracking::{solve, BacktrackStats, BacktrackingSolver};
pub use board::{
    attacking_pairs, is_valid_placement, max_non_attacking_pairs, non_attacking_pairs, Placement,
    UNASSIGNED,
};
pub use genetic::{QueensGa, QueensGaConfig, QueensGaResult, QueensGenerationReport};
