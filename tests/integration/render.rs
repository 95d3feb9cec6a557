//! Rendering and divergence against real repositories

use crate::helpers::{commit_file, git, init_test_repo, open_repo, setup_depth_2_tree};

use gitflow::flow::{divergence, render_tree, FlowDag};
use gitflow::git::LocalBranch;

#[test]
fn renders_divergence_per_parent_child_pair() {
    let temp = init_test_repo();
    let root = temp.path();
    setup_depth_2_tree(root);

    let repo = open_repo(root);
    let dag = FlowDag::build(&repo).unwrap();
    let (lines, completed) = render_tree(&dag, "master", Some(&repo), Some("B"), false);

    assert!(completed);
    assert_eq!(
        lines,
        vec![
            " master".to_string(),
            "   |-> A  (-0, +2)".to_string(),
            "     |-> B  (-0, +1) *(active branch)".to_string(),
        ]
    );
}

#[test]
fn absent_start_renders_nothing() {
    let temp = init_test_repo();
    let root = temp.path();
    setup_depth_2_tree(root);

    let repo = open_repo(root);
    let dag = FlowDag::build(&repo).unwrap();
    let (lines, completed) = render_tree(&dag, "no-such-branch", Some(&repo), None, false);

    assert!(lines.is_empty());
    assert!(completed);
}

#[test]
fn missing_ref_divergence_is_none() {
    let temp = init_test_repo();
    let root = temp.path();

    let repo = open_repo(root);
    assert_eq!(divergence::delta(&repo, "master", "no-such-ref"), None);
    assert_eq!(divergence::delta(&repo, "no-such-ref", "master"), None);
}

#[test]
fn disjoint_history_divergence_is_none() {
    let temp = init_test_repo();
    let root = temp.path();

    // An orphan branch shares no ancestor with master; rev-list would
    // still count across the unrelated histories, so this must come
    // back unknown rather than numeric.
    git(&["checkout", "--orphan", "island"], root);
    commit_file(root, "island.txt", "isolated\n", "Rootless commit");

    let repo = open_repo(root);
    assert_eq!(divergence::delta(&repo, "island", "master"), None);
    assert_eq!(divergence::delta(&repo, "master", "island"), None);
}

#[test]
fn unresolvable_parent_renders_warning() {
    let temp = init_test_repo();
    let root = temp.path();

    let repo = open_repo(root);
    // Hand-built DAG with a parent that exists in no repository: the
    // divergence query fails and the renderer degrades to a warning.
    let branches = vec![LocalBranch {
        name: "master".to_string(),
        upstream: Some("phantom".to_string()),
    }];
    let dag = FlowDag::from_branches(&branches).unwrap();
    let (lines, completed) = render_tree(&dag, "phantom", Some(&repo), None, false);

    assert!(completed);
    assert_eq!(
        lines,
        vec![
            " phantom".to_string(),
            "   |-> master  (Upstream Branch Not Found)".to_string(),
        ]
    );
}
