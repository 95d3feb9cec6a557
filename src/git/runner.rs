//! Git subprocess runner

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Run a git command rooted at `repo_root` and return the raw Output,
/// for callers that inspect the exit status and streams themselves.
pub fn run_git(args: &[&str], repo_root: &Path) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .with_context(|| format!("failed to execute: git {}", args.join(" ")))
}

/// Run a git command, require success, and return trimmed stdout; a
/// non-zero exit becomes an error carrying stderr.
pub fn run_git_checked(args: &[&str], repo_root: &Path) -> Result<String> {
    let output = run_git(args, repo_root)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let cmd = args.first().unwrap_or(&"");
        bail!("git {cmd} failed: {}", stderr.trim_end());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Render a git invocation the way it would be typed at a shell. The
/// cascade announces every mutating command it runs through this.
pub fn display_git_command(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}
