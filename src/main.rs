use anyhow::Result;
use clap::Parser;
use gitflow::commands::flow::{self, FlowOptions};

#[derive(Parser)]
#[command(name = "gitflow")]
#[command(about = "Branch dependency tree and cascading rebase for git", long_about = None)]
#[command(version)]
struct Cli {
    /// Rebase all downstream branches of the starting branch onto their
    /// parents, continuing past per-branch failures
    #[arg(long)]
    cascade: bool,

    /// Start the tree from this branch. Defaults to the currently
    /// checked-out branch; cascades only from this branch when given
    #[arg(long)]
    branch: Option<String>,

    /// Update the starting branch from origin (fetch + reset --keep)
    #[arg(long)]
    refresh: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Force-push rebased branches to origin, bypassing pre-push hooks.
    /// Only meaningful together with --cascade
    #[arg(long)]
    push: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let color = !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    flow::execute(FlowOptions {
        cascade: cli.cascade,
        branch: cli.branch,
        refresh: cli.refresh,
        color,
        push: cli.push,
    })
}
