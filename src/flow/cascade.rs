//! Cascading rebase engine
//!
//! Walks the flow DAG depth-first and rebases every child onto its
//! (already rebased) parent. A conflict or failure on one edge aborts
//! that rebase, skips the child's whole subtree, and moves on to the
//! next sibling; nothing short of a broken repository stops the walk.

use colored::Colorize;

use crate::flow::dag::FlowDag;
use crate::git::{display_git_command, GitRepo, RebaseOutcome};

/// Cascade rebases through the subtree rooted at `start`.
///
/// `start` itself is never rebased; it is the already-updated base the
/// first level of children is replayed onto. With `push_updates` each
/// successfully rebased branch is force-pushed to origin (pre-push hooks
/// skipped); push failures are logged and never roll anything back.
pub fn cascade_tree(dag: &FlowDag, start: &str, repo: &GitRepo, push_updates: bool) {
    for child in dag.children_of(start) {
        println!("Rebasing {child} onto {start}...");
        if rebase_child(repo, start, child, push_updates) {
            cascade_tree(dag, child, repo, push_updates);
        } else {
            // The child still sits on the stale base; rebasing its
            // descendants now would compound the damage.
            println!("Continuing to next subtree...");
        }
    }
}

/// Rebase one edge. Returns whether the child's subtree should still be
/// visited.
fn rebase_child(repo: &GitRepo, parent: &str, child: &str, push_updates: bool) -> bool {
    let args = [
        "rebase",
        "--reapply-cherry-picks",
        "--fork-point",
        parent,
        child,
    ];
    println!("{}", display_git_command(&args));

    let outcome = match repo.rebase_onto(parent, child) {
        Ok(outcome) => outcome,
        Err(err) => RebaseOutcome::Failed {
            reason: err.to_string(),
        },
    };

    match outcome {
        RebaseOutcome::Completed => {
            if push_updates {
                push_branch(repo, child);
            }
            true
        }
        RebaseOutcome::Conflict { files } => {
            println!("{}", format!("Rebase of {child} hit conflicts:").red());
            for file in &files {
                println!("{}", format!("  {file}").yellow());
            }
            report_skip(repo, child);
            false
        }
        RebaseOutcome::Failed { reason } => {
            println!("{}", format!("Failed to rebase {child} due to error:").red());
            println!("{}", reason.yellow());
            report_skip(repo, child);
            false
        }
    }
}

fn report_skip(repo: &GitRepo, child: &str) {
    println!(
        "{}",
        format!(
            "Aborting cascade for {child}. Please resolve conflicts on your own."
        )
        .red()
    );
    abort_rebase_quietly(repo);
}

/// Abort an in-progress rebase, tolerating the case where none is in
/// progress (e.g. the rebase failed before starting).
fn abort_rebase_quietly(repo: &GitRepo) {
    if let Err(err) = repo.abort_rebase() {
        println!(
            "{}",
            "Skipping abort since no rebase is in progress".red()
        );
        println!("{}", err.to_string().yellow());
    }
}

fn push_branch(repo: &GitRepo, branch: &str) {
    println!(
        "{}",
        display_git_command(&["push", "--force", "origin", branch, "--no-verify"])
    );
    if let Err(err) = repo.force_push_no_verify(branch) {
        println!("{}", format!("Failed to push {branch} due to error:").red());
        println!("{}", err.to_string().yellow());
        println!(
            "{}",
            "The local rebase is intact; push by hand once the remote is reconciled.".red()
        );
    }
}
