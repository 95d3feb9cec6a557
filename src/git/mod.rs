//! Git plumbing for gitflow
//!
//! This module provides:
//! - Subprocess command wrappers with consistent error handling
//! - The `GitRepo` handle: discovery, branch enumeration, divergence
//!   queries, checkout/refresh/rebase/push primitives

pub mod repo;
pub mod runner;

pub use repo::{GitRepo, LocalBranch, RebaseOutcome};
pub use runner::{display_git_command, run_git, run_git_checked};
