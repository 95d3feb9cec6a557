//! Orchestrates one gitflow invocation
//!
//! Builds the DAG from live git state, resolves which branch to start
//! from, optionally refreshes it from origin and cascades rebases, and
//! always finishes by rendering the tree.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::flow::{cascade_tree, print_tree, FlowDag};
use crate::git::GitRepo;

/// Options for a single run, mirroring the CLI flags.
#[derive(Debug, Clone, Default)]
pub struct FlowOptions {
    /// Rebase all downstream branches onto their parents.
    pub cascade: bool,
    /// Start the tree from this branch instead of the active one.
    pub branch: Option<String>,
    /// Fast-forward the resolved branch to origin before anything else.
    pub refresh: bool,
    /// Colorize output.
    pub color: bool,
    /// Force-push rebased branches to origin (with `cascade`).
    pub push: bool,
}

/// Entry point for the CLI: discover the repository and run.
///
/// Failing to find a repository is the only fatal error here; everything
/// downstream degrades per branch.
pub fn execute(opts: FlowOptions) -> Result<()> {
    let repo = GitRepo::discover(Path::new("."))?;
    run(&repo, &opts)
}

/// Run one invocation against an already-discovered repository.
pub fn run(repo: &GitRepo, opts: &FlowOptions) -> Result<()> {
    let dag = FlowDag::build(repo)?;

    // Detached or unborn HEAD is not an error, just "no active branch".
    let initial_active = repo.active_branch();
    let resolved = opts.branch.clone().or_else(|| initial_active.clone());

    let mut roots: Vec<String> = match &opts.branch {
        Some(branch) => vec![branch.clone()],
        None => dag.roots().to_vec(),
    };

    if let Some(target) = &resolved {
        if initial_active.as_deref() != Some(target.as_str()) {
            repo.checkout(target)?;
        }
    }

    if opts.refresh {
        if let Some(target) = &resolved {
            if let Err(err) = repo.refresh_from_remote(target) {
                println!(
                    "Failed to refresh {target} with error:\n{}",
                    err.to_string().red()
                );
            }
        }
    }

    let mut cascaded = false;
    if opts.cascade {
        match &resolved {
            Some(target) => {
                roots = vec![target.clone()];
                for root in &roots {
                    cascade_tree(&dag, root, repo, opts.push);
                }
                cascaded = true;
            }
            None => {
                println!(
                    "{}",
                    "Cannot cascade without an active branch; pass --branch.".red()
                );
            }
        }
    }

    if cascaded {
        // Match the pre-cascade checkout context for the status render.
        if let Some(original) = &initial_active {
            if let Err(err) = repo.checkout(original) {
                println!("{}", err.to_string().red());
            }
        }
        println!("Status after cascade:");
    }

    let active = repo.active_branch();
    for root in &roots {
        if !print_tree(&dag, root, Some(repo), active.as_deref(), opts.color) {
            break;
        }
    }

    Ok(())
}
