//! Commit divergence between a branch and its parent
//!
//! Wraps git's symmetric-difference count. Every failure mode (missing
//! ref, unrelated histories, subprocess error) collapses to `None` so
//! callers can render an "unknown" annotation instead of failing.

use crate::git::GitRepo;

/// Bidirectional commit delta between `branch` and `parent`.
///
/// Returns `(branch_ahead, parent_ahead)`: commits reachable only from
/// `branch`, and commits reachable only from `parent`. Refs with no
/// common ancestor have no meaningful delta, even though `rev-list`
/// happily counts across unrelated histories, so they report `None`
/// too. Read-only; safe to call repeatedly.
pub fn delta(repo: &GitRepo, branch: &str, parent: &str) -> Option<(u64, u64)> {
    if !repo.have_common_ancestor(branch, parent) {
        return None;
    }
    repo.rev_list_count_left_right(branch, parent).ok()
}
