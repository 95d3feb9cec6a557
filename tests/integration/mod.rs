//! Integration tests for gitflow
//!
//! These drive the library against real temporary git repositories:
//! DAG construction from live branch config, divergence rendering, and
//! cascade behavior including conflict isolation and pushing.

pub mod dag;
pub mod render;
