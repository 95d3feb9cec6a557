pub mod commands;
pub mod flow;
pub mod git;
