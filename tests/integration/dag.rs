//! DAG construction against real repositories

use crate::helpers::{
    commit_file, create_tracked_branch, git, init_test_repo, open_repo, setup_depth_2_tree,
};

use gitflow::flow::FlowDag;

#[test]
fn depth_2_feature_tree_constructed() {
    let temp = init_test_repo();
    let root = temp.path();
    setup_depth_2_tree(root);

    let repo = open_repo(root);
    let dag = FlowDag::build(&repo).unwrap();

    assert_eq!(dag.roots(), ["master".to_string()]);
    assert_eq!(dag.children_of("master"), ["A".to_string()]);
    assert_eq!(dag.children_of("A"), ["B".to_string()]);
    assert!(dag.children_of("B").is_empty());
}

#[test]
fn untracked_branch_is_a_root() {
    let temp = init_test_repo();
    let root = temp.path();
    git(&["branch", "scratch"], root);

    let repo = open_repo(root);
    let dag = FlowDag::build(&repo).unwrap();

    assert!(dag.roots().contains(&"master".to_string()));
    assert!(dag.roots().contains(&"scratch".to_string()));
    assert!(dag.contains("scratch"));
    assert!(dag.children_of("scratch").is_empty());
}

#[test]
fn remote_tracking_upstream_becomes_root() {
    let temp = init_test_repo();
    let root = temp.path();

    let remote = tempfile::TempDir::new().unwrap();
    let remote_path = remote.path().join("origin.git");
    git(&["clone", "--bare", ".", remote_path.to_str().unwrap()], root);
    git(&["remote", "add", "origin", remote_path.to_str().unwrap()], root);
    git(&["fetch", "origin"], root);
    git(&["branch", "--set-upstream-to=origin/master", "master"], root);

    let repo = open_repo(root);
    let dag = FlowDag::build(&repo).unwrap();

    assert_eq!(dag.roots(), ["origin/master".to_string()]);
    assert_eq!(dag.children_of("origin/master"), ["master".to_string()]);
}

#[test]
fn build_is_idempotent() {
    let temp = init_test_repo();
    let root = temp.path();
    setup_depth_2_tree(root);
    create_tracked_branch("C", "master", root);
    commit_file(root, "fileC.txt", "C content\n", "Commit on C");

    let repo = open_repo(root);
    let first = FlowDag::build(&repo).unwrap();
    let second = FlowDag::build(&repo).unwrap();

    assert_eq!(first, second);
}

#[test]
fn every_tracked_branch_appears_exactly_once() {
    let temp = init_test_repo();
    let root = temp.path();
    setup_depth_2_tree(root);
    create_tracked_branch("C", "master", root);

    let repo = open_repo(root);
    let branches = repo.local_branches().unwrap();
    let dag = FlowDag::build(&repo).unwrap();

    for branch in &branches {
        if let Some(upstream) = &branch.upstream {
            let occurrences = dag
                .children_of(upstream)
                .iter()
                .filter(|child| *child == &branch.name)
                .count();
            assert_eq!(occurrences, 1, "{} under {}", branch.name, upstream);
        } else {
            assert!(dag.roots().contains(&branch.name));
        }
    }
}
