//! Tree renderer
//!
//! Pre-order depth-first walk over the flow DAG producing one indented
//! line per branch, annotated with divergence from its parent and an
//! active-branch marker. Example:
//!
//! ```text
//!  master
//!   |-> my_feature_branch  (-0, +2)
//!     |-> my_current_branch  (-0, +1) *(active branch)
//! ```

use colored::{Color, Colorize};

use crate::flow::dag::FlowDag;
use crate::flow::divergence;
use crate::git::GitRepo;

/// Divergence annotation for a rendered branch, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    /// The delta could not be computed (missing upstream, no common
    /// history, git failure).
    Unknown,
    Counts { branch_ahead: u64, parent_ahead: u64 },
}

/// Apply a color only when coloring is enabled.
///
/// Color carries no semantics; threading the flag explicitly keeps the
/// produced strings deterministic for tests.
fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Format a single tree line for a branch.
///
/// `divergence` is `None` for roots (no parent to compare against).
pub fn branch_line(
    name: &str,
    depth: usize,
    divergence: Option<Divergence>,
    is_active: bool,
    color: bool,
) -> String {
    let indent = "  ".repeat(depth);
    let mut line = if depth == 0 {
        format!(" {name}")
    } else {
        format!("{indent} |-> {name}")
    };

    match divergence {
        Some(Divergence::Unknown) => {
            line.push_str("  (Upstream Branch Not Found)");
            line = paint(&line, Color::Red, color);
        }
        Some(Divergence::Counts {
            branch_ahead,
            parent_ahead,
        }) => {
            let parent_part = if parent_ahead > 0 {
                paint(&format!("-{parent_ahead}"), Color::Red, color)
            } else {
                "-0".to_string()
            };
            let branch_part = if branch_ahead > 0 {
                paint(&format!("+{branch_ahead}"), Color::Green, color)
            } else {
                "+0".to_string()
            };
            line.push_str(&format!("  ({parent_part}, {branch_part})"));
        }
        None => {}
    }

    if is_active {
        line.push_str(" *(active branch)");
        line = paint(&line, Color::Green, color);
    }

    line
}

/// Render the subtree rooted at `start` into `lines`.
///
/// A start name absent from the DAG is a normal terminal case: nothing
/// is rendered and the walk reports completion. The returned bool is a
/// continuation signal for the recursive walk; rendering itself never
/// produces `false`, so today it only ever propagates `true`.
pub fn render_tree(
    dag: &FlowDag,
    start: &str,
    repo: Option<&GitRepo>,
    active: Option<&str>,
    color: bool,
) -> (Vec<String>, bool) {
    let mut lines = Vec::new();
    let completed = walk(dag, start, 0, repo, active, color, &mut lines);
    (lines, completed)
}

/// Render the subtree rooted at `start` directly to stdout.
pub fn print_tree(
    dag: &FlowDag,
    start: &str,
    repo: Option<&GitRepo>,
    active: Option<&str>,
    color: bool,
) -> bool {
    let (lines, completed) = render_tree(dag, start, repo, active, color);
    for line in lines {
        println!("{line}");
    }
    completed
}

fn walk(
    dag: &FlowDag,
    current: &str,
    depth: usize,
    repo: Option<&GitRepo>,
    active: Option<&str>,
    color: bool,
    lines: &mut Vec<String>,
) -> bool {
    if !dag.contains(current) {
        return true;
    }
    if depth == 0 {
        lines.push(branch_line(current, 0, None, active == Some(current), color));
        return walk(dag, current, 1, repo, active, color, lines);
    }
    for child in dag.children_of(current) {
        let delta = repo.map(|repo| match divergence::delta(repo, child, current) {
            Some((branch_ahead, parent_ahead)) => Divergence::Counts {
                branch_ahead,
                parent_ahead,
            },
            None => Divergence::Unknown,
        });
        lines.push(branch_line(
            child,
            depth,
            delta,
            active == Some(child.as_str()),
            color,
        ));
        if !walk(dag, child, depth + 1, repo, active, color, lines) {
            return false;
        }
    }
    true
}
