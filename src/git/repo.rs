//! Repository handle and branch-level git operations
//!
//! `GitRepo` is the single context object the core works through. All
//! mutation of the working tree (checkout, rebase, push, refresh) goes
//! through these methods; the flow modules themselves never touch git
//! state directly.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use super::runner::{run_git, run_git_checked};

/// A local branch together with its configured upstream, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    /// Short upstream name (`master`, `origin/master`, ...), when configured.
    pub upstream: Option<String>,
}

/// Outcome of a rebase attempt.
#[derive(Debug, Clone)]
pub enum RebaseOutcome {
    /// Rebase replayed cleanly (or was a no-op).
    Completed,
    /// Rebase stopped on conflicts; the rebase is still in progress.
    Conflict { files: Vec<String> },
    /// Rebase failed outright for some other reason.
    Failed { reason: String },
}

/// Handle for a discovered git repository, rooted at its toplevel.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Discover the repository containing `start_dir`.
    ///
    /// Uses `rev-parse --show-toplevel` rather than `--git-dir` because
    /// it behaves consistently inside worktrees.
    pub fn discover(start_dir: &Path) -> Result<GitRepo> {
        let output = run_git(&["rev-parse", "--show-toplevel"], start_dir)?;
        if !output.status.success() {
            bail!(
                "not inside a git repository: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(GitRepo {
            root: PathBuf::from(toplevel),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all local branches with their upstreams, in ref order.
    ///
    /// `for-each-ref` enumerates `refs/heads` in a stable sorted order,
    /// which makes DAG construction deterministic.
    pub fn local_branches(&self) -> Result<Vec<LocalBranch>> {
        let stdout = run_git_checked(
            &[
                "for-each-ref",
                "refs/heads",
                "--format=%(refname:short)\t%(upstream:short)",
            ],
            &self.root,
        )?;
        Ok(parse_branch_refs(&stdout))
    }

    /// Name of the currently checked-out branch, or `None` when HEAD is
    /// detached or unborn. Never an error.
    pub fn active_branch(&self) -> Option<String> {
        let output = run_git(&["symbolic-ref", "--short", "-q", "HEAD"], &self.root).ok()?;
        if !output.status.success() {
            return None;
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Whether two refs share any common ancestor.
    ///
    /// `merge-base` exits non-zero both for unrelated histories and for
    /// missing refs; either way there is no meaningful divergence.
    pub fn have_common_ancestor(&self, a: &str, b: &str) -> bool {
        run_git(&["merge-base", a, b], &self.root)
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Symmetric-difference commit counts between two refs.
    ///
    /// Returns `(ahead_of_b, ahead_of_a)` for `a...b`. Errors when either
    /// ref is missing or the histories are unrelated; the divergence
    /// layer maps those to "unknown".
    pub fn rev_list_count_left_right(&self, a: &str, b: &str) -> Result<(u64, u64)> {
        let range = format!("{a}...{b}");
        let stdout = run_git_checked(
            &["rev-list", "--count", "--left-right", &range],
            &self.root,
        )?;
        let mut counts = stdout.split_whitespace();
        match (
            counts.next().and_then(|c| c.parse::<u64>().ok()),
            counts.next().and_then(|c| c.parse::<u64>().ok()),
        ) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => bail!("unexpected rev-list output: {stdout:?}"),
        }
    }

    /// Check out a branch.
    pub fn checkout(&self, name: &str) -> Result<()> {
        let output = run_git(&["checkout", name], &self.root)?;
        if !output.status.success() {
            bail!(
                "could not check out {name}: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(())
    }

    /// Fetch a branch from origin and move the local branch to match it.
    ///
    /// `reset --keep` refuses to clobber local changes, unlike `--hard`.
    pub fn refresh_from_remote(&self, name: &str) -> Result<()> {
        run_git_checked(&["fetch", "origin", name], &self.root)?;
        let remote_ref = format!("origin/{name}");
        run_git_checked(&["reset", "--keep", &remote_ref], &self.root)?;
        Ok(())
    }

    /// Rebase `branch` onto `new_base`, replaying only the branch's own
    /// commits from the fork point.
    ///
    /// `--fork-point` anchors the replay at the divergence from the
    /// previous base, which makes repeated cascades idempotent once a
    /// branch is already based on its parent; `--reapply-cherry-picks`
    /// keeps commits that upstream has equivalents of.
    ///
    /// Leaves HEAD on `branch` on success. On `Conflict` the rebase is
    /// left in progress for the caller to abort.
    pub fn rebase_onto(&self, new_base: &str, branch: &str) -> Result<RebaseOutcome> {
        let output = run_git(
            &[
                "rebase",
                "--reapply-cherry-picks",
                "--fork-point",
                new_base,
                branch,
            ],
            &self.root,
        )?;

        if output.status.success() {
            return Ok(RebaseOutcome::Completed);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stdout.contains("CONFLICT") || stderr.contains("CONFLICT") {
            let files = self.conflicting_files().unwrap_or_default();
            return Ok(RebaseOutcome::Conflict { files });
        }

        Ok(RebaseOutcome::Failed {
            reason: stderr.trim_end().to_string(),
        })
    }

    /// Files currently in the unmerged state.
    fn conflicting_files(&self) -> Result<Vec<String>> {
        let stdout = run_git_checked(
            &["diff", "--name-only", "--diff-filter=U"],
            &self.root,
        )?;
        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Abort an in-progress rebase. Errors when none is in progress;
    /// callers treat that as benign.
    pub fn abort_rebase(&self) -> Result<()> {
        let output = run_git(&["rebase", "--abort"], &self.root)?;
        if !output.status.success() {
            bail!(
                "git rebase --abort failed: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(())
    }

    /// Force-push a branch to origin, skipping pre-push hooks.
    pub fn force_push_no_verify(&self, branch: &str) -> Result<()> {
        let output = run_git(
            &["push", "--force", "origin", branch, "--no-verify"],
            &self.root,
        )?;
        if !output.status.success() {
            bail!(
                "git push failed: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }
        Ok(())
    }
}

/// Parse `for-each-ref` output: one `name<TAB>upstream` pair per line.
fn parse_branch_refs(output: &str) -> Vec<LocalBranch> {
    let mut branches = Vec::new();
    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let (name, upstream) = match line.split_once('\t') {
            Some((name, upstream)) => (name, upstream),
            None => (line, ""),
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let upstream = upstream.trim();
        branches.push(LocalBranch {
            name: name.to_string(),
            upstream: if upstream.is_empty() {
                None
            } else {
                Some(upstream.to_string())
            },
        });
    }
    branches
}
