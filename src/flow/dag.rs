//! Branch dependency DAG
//!
//! Builds the upstream-derived dependency tree over local branches: each
//! branch hangs under its configured upstream, and branches with no
//! local parent (untracked, or tracking a remote ref) become roots.

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::git::{GitRepo, LocalBranch};

/// Upstream names with this prefix have no local parent and seed roots.
const REMOTE_PREFIX: &str = "origin/";

/// Dependency tree over branch names.
///
/// `children` has an entry for every local branch plus every upstream
/// that appears, even remote-only ones; child vectors preserve branch
/// enumeration order. Rebuilt from live git state on every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowDag {
    children: HashMap<String, Vec<String>>,
    roots: Vec<String>,
}

impl FlowDag {
    /// Build the DAG from the repository's current branch configuration.
    ///
    /// A cyclic upstream configuration (A tracks B, B tracks A) would
    /// send the renderer and cascade into unbounded recursion, so it is
    /// rejected here with the name of a branch on the cycle.
    pub fn build(repo: &GitRepo) -> Result<FlowDag> {
        let branches = repo.local_branches()?;
        FlowDag::from_branches(&branches)
    }

    /// Construct from an already-enumerated branch list.
    pub fn from_branches(branches: &[LocalBranch]) -> Result<FlowDag> {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut roots: Vec<String> = Vec::new();

        for branch in branches {
            children.entry(branch.name.clone()).or_default();
            match &branch.upstream {
                Some(upstream) => {
                    if upstream.starts_with(REMOTE_PREFIX)
                        && !roots.iter().any(|r| r == upstream)
                    {
                        roots.push(upstream.clone());
                    }
                    children
                        .entry(upstream.clone())
                        .or_default()
                        .push(branch.name.clone());
                }
                None => roots.push(branch.name.clone()),
            }
        }

        let dag = FlowDag { children, roots };
        if let Some(name) = dag.find_cycle(branches) {
            bail!("cyclic upstream configuration detected involving branch '{name}'");
        }
        Ok(dag)
    }

    /// Children of a branch, in enumeration order. Empty for unknown names.
    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the branch participates in the tree at all.
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Depth-first cycle search over the child edges.
    ///
    /// Returns the first branch found on a cycle, scanning in branch
    /// enumeration order so the diagnostic is deterministic.
    fn find_cycle(&self, branches: &[LocalBranch]) -> Option<String> {
        // 1 = on the current DFS stack, 2 = fully explored.
        let mut state: HashMap<&str, u8> = HashMap::new();

        for branch in branches {
            if state.contains_key(branch.name.as_str()) {
                continue;
            }
            if let Some(name) = self.visit(branch.name.as_str(), &mut state) {
                return Some(name);
            }
        }
        None
    }

    fn visit<'a>(&'a self, name: &'a str, state: &mut HashMap<&'a str, u8>) -> Option<String> {
        state.insert(name, 1);
        for child in self.children_of(name) {
            match state.get(child.as_str()) {
                Some(1) => return Some(child.clone()),
                Some(_) => {}
                None => {
                    if let Some(found) = self.visit(child, state) {
                        return Some(found);
                    }
                }
            }
        }
        state.insert(name, 2);
        None
    }
}
