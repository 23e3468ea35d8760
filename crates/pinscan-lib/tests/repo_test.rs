#![allow(unused_crate_dependencies)]

use pinscan_lib::commands::app;
use pinscan_lib::infrastructure::repo;
use std::fs;
use tempfile::TempDir;

fn init_git_repo(root: &std::path::Path) {
    // Create minimal git directory structure
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join(".git/refs")).unwrap();
}

#[test]
fn find_root_with_github_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    init_git_repo(root);
    fs::create_dir(root.join(".github")).unwrap();

    let result = repo::find_root(root);

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), root);
}

#[test]
fn find_root_without_github_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    init_git_repo(root);

    let result = repo::find_root(root);

    match result.unwrap_err() {
        repo::RepoError::NoGithubFolder { root: reported } => assert_eq!(reported, root),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn find_root_from_nested_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    init_git_repo(root);
    let nested = root.join(repo::WORKFLOWS_DIR);
    fs::create_dir_all(&nested).unwrap();

    assert_eq!(repo::find_root(&nested).unwrap(), root);
}

#[test]
fn find_root_outside_repository() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join(".github")).unwrap();

    let err = repo::find_root(temp_dir.path()).unwrap_err();

    assert!(matches!(err, repo::RepoError::NotARepository { .. }));
    assert!(err.to_string().contains("not inside a git repository"));
}

#[test]
fn scan_from_repository_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    init_git_repo(root);
    let workflows_dir = root.join(".github").join("workflows");
    fs::create_dir_all(&workflows_dir).unwrap();
    fs::write(
        workflows_dir.join("ci.yml"),
        "name: CI\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v4\n",
    )
    .unwrap();
    fs::write(workflows_dir.join("broken.yaml"), "jobs: [unclosed").unwrap();

    let summary = app::scan(root).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].analysis.declared_name.as_deref(), Some("CI"));
    assert_eq!(summary.reports[0].analysis.dependencies.len(), 2);
}
