//! Placement checks shared by the N-Queens solvers.

/// Column index of the queen in each row.
pub type Placement = Vec<usize>;

/// Marks a row without a queen on an in-progress board.
pub const UNASSIGNED: usize = usize::MAX;

/// Whether two queens at `(row_a, col_a)` and `(row_b, col_b)` attack each
/// other along a column or diagonal.
#[inline]
pub fn attacks(row_a: usize, col_a: usize, row_b: usize, col_b: usize) -> bool {
    col_a == col_b || col_a.abs_diff(col_b) == row_a.abs_diff(row_b)
}

/// Number of attacking queen pairs.
pub fn attacking_pairs(placement: &[usize]) -> usize {
    let n = placement.len();
    let mut count = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if attacks(i, placement[i], j, placement[j]) {
                count += 1;
            }
        }
    }
    count
}

/// Number of non-attacking queen pairs.
pub fn non_attacking_pairs(placement: &[usize]) -> usize {
    max_non_attacking_pairs(placement.len()) - attacking_pairs(placement)
}

/// `n(n-1)/2`: the non-attacking pair count of a solution.
pub fn max_non_attacking_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Whether `placement` is a complete N-Queens solution.
///
/// Every column must be in `0..n` and no two queens may share a column or
/// a diagonal.
pub fn is_valid_placement(placement: &[usize]) -> bool {
    let n = placement.len();
    placement.iter().all(|&c| c < n) && attacking_pairs(placement) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_solution() {
        let eight = [0, 4, 7, 5, 2, 6, 1, 3];
        assert!(is_valid_placement(&eight));
        assert_eq!(non_attacking_pairs(&eight), 28);
    }

    #[test]
    fn test_attacks() {
        assert!(attacks(0, 0, 3, 0));
        assert!(attacks(0, 0, 2, 2));
        assert!(attacks(1, 3, 3, 1));
        assert!(!attacks(0, 0, 1, 2));
    }

    #[test]
    fn test_pair_counts() {
        // All queens in one column: every pair attacks.
        assert_eq!(attacking_pairs(&[2, 2, 2, 2]), 6);
        assert_eq!(non_attacking_pairs(&[2, 2, 2, 2]), 0);
        // Main diagonal.
        assert_eq!(attacking_pairs(&[0, 1, 2]), 3);
        assert_eq!(max_non_attacking_pairs(0), 0);
        assert_eq!(max_non_attacking_pairs(1), 0);
        assert_eq!(max_non_attacking_pairs(8), 28);
    }

    #[test]
    fn test_rejects_out_of_range_and_unassigned() {
        assert!(!is_valid_placement(&[1, 3, 0, 4]));
        assert!(!is_valid_placement(&[1, UNASSIGNED, 0, 2]));
        assert!(is_valid_placement(&[1, 3, 0, 2]));
        assert!(is_valid_placement(&[]));
    }
}
