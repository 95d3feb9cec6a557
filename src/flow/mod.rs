//! The gitflow core: DAG construction, rendering, cascading rebases

pub mod cascade;
pub mod dag;
pub mod divergence;
pub mod render;

pub use cascade::cascade_tree;
pub use dag::FlowDag;
pub use render::{print_tree, render_tree, Divergence};
