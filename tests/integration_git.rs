// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for Git operations.
//!
//! Tests the git module with real temporary repositories.

use repo_mirror::error::{GitError, MirrorError};
use repo_mirror::git::ORIGIN;
use repo_mirror::git::cmd::{
    checkout_detached, checkout_tracking, clean, clone, push_branch, start_unborn_branch,
};
use repo_mirror::git::ops::{commit_message, list_remote_heads};
use repo_mirror::git::query::{has_uncommitted_changes, remote_branches};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?}: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Bare `origin.git` holding `main` (README.md) and `dev` (README.md + dev.txt),
/// plus a clone of it at `work`.
fn origin_with_clone(temp: &TempDir) -> (PathBuf, PathBuf) {
    let seed = temp.path().join("seed");
    let origin = temp.path().join("origin.git");
    fs::create_dir(&seed).unwrap();

    run_git(&["init", "-q", "--bare", origin.to_str().unwrap()], temp.path());
    run_git(&["symbolic-ref", "HEAD", "refs/heads/main"], &origin);
    run_git(&["init", "-q"], &seed);
    run_git(&["checkout", "-q", "-b", "main"], &seed);
    fs::write(seed.join("README.md"), "# Test").unwrap();
    run_git(&["add", "."], &seed);
    run_git(&["commit", "-q", "-m", "Initial commit"], &seed);
    run_git(&["checkout", "-q", "-b", "dev"], &seed);
    fs::write(seed.join("dev.txt"), "dev").unwrap();
    run_git(&["add", "."], &seed);
    run_git(&["commit", "-q", "-m", "Dev commit"], &seed);
    run_git(&["push", "-q", origin.to_str().unwrap(), "main", "dev"], &seed);

    let work = temp.path().join("work");
    clone(origin.to_str().unwrap(), &work).unwrap();
    (origin, work)
}

// =============================================================================
// clone / remote_branches
// =============================================================================

#[test]
fn git_clone_lists_every_remote_branch() {
    let temp = temp_dir();
    let (origin, work) = origin_with_clone(&temp);

    let branches = remote_branches(&work, ORIGIN).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["dev", "main"]);

    let dev_tip = run_git(&["rev-parse", "refs/heads/dev"], &origin);
    assert_eq!(branches[0].tip, dev_tip);
}

#[test]
fn git_clone_missing_repository_fails() {
    let temp = temp_dir();
    let missing = temp.path().join("missing.git");

    let err = clone(missing.to_str().unwrap(), &temp.path().join("out")).unwrap_err();
    match err {
        MirrorError::Git(boxed) => assert!(
            matches!(*boxed, GitError::CloneFailed { .. }),
            "expected CloneFailed, got {boxed:?}"
        ),
        other => panic!("expected MirrorError::Git, got {other:?}"),
    }
}

#[test]
fn git_list_remote_heads() {
    let temp = temp_dir();
    let (origin, _) = origin_with_clone(&temp);

    let mut heads = list_remote_heads(origin.to_str().unwrap(), temp.path()).unwrap();
    heads.sort();
    assert_eq!(heads, vec!["dev", "main"]);
}

// =============================================================================
// checkout / clean
// =============================================================================

#[test]
fn git_checkout_detached_matches_branch_tree() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);

    checkout_detached(&work, "origin/dev").unwrap();
    assert!(work.join("dev.txt").exists());
    assert_eq!(run_git(&["rev-parse", "--abbrev-ref", "HEAD"], &work), "HEAD");

    checkout_detached(&work, "origin/main").unwrap();
    assert!(!work.join("dev.txt").exists());
}

#[test]
fn git_checkout_detached_discards_local_edits() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);

    fs::write(work.join("README.md"), "local edit").unwrap();
    checkout_detached(&work, "origin/main").unwrap();
    assert_eq!(fs::read_to_string(work.join("README.md")).unwrap(), "# Test");
}

#[test]
fn git_checkout_unknown_revision_fails() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);

    let err = checkout_detached(&work, "origin/nope").unwrap_err();
    assert!(err.to_string().contains("origin/nope"), "{err}");
}

#[test]
fn git_checkout_tracking_creates_local_branch() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);

    checkout_tracking(&work, ORIGIN, "dev").unwrap();
    assert_eq!(run_git(&["symbolic-ref", "--short", "HEAD"], &work), "dev");
    assert_eq!(commit_message(&work, "HEAD").unwrap(), "Dev commit");
    assert_eq!(
        run_git(&["rev-parse", "--abbrev-ref", "dev@{upstream}"], &work),
        "origin/dev"
    );
}

#[test]
fn git_clean_removes_untracked_and_ignored() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);
    checkout_tracking(&work, ORIGIN, "main").unwrap();

    fs::write(work.join(".gitignore"), "*.log\n").unwrap();
    fs::write(work.join("build.log"), "ignored").unwrap();
    fs::create_dir(work.join("scratch")).unwrap();
    fs::write(work.join("scratch").join("a.txt"), "untracked").unwrap();
    assert!(has_uncommitted_changes(&work).unwrap());

    clean(&work).unwrap();

    assert!(!work.join("build.log").exists());
    assert!(!work.join("scratch").exists());
    assert!(!work.join(".gitignore").exists());
    assert!(!has_uncommitted_changes(&work).unwrap());
}

// =============================================================================
// push
// =============================================================================

#[test]
fn git_push_new_branch() {
    let temp = temp_dir();
    let (origin, work) = origin_with_clone(&temp);
    run_git(&["config", "user.name", "Test"], &work);
    run_git(&["config", "user.email", "test@test.com"], &work);

    start_unborn_branch(&work, "release").unwrap();
    run_git(&["commit", "-q", "-m", "release snapshot"], &work);
    push_branch(&work, ORIGIN, "release").unwrap();

    assert_eq!(
        run_git(&["log", "-1", "--format=%s", "refs/heads/release"], &origin),
        "release snapshot"
    );
}

#[test]
fn git_push_non_fast_forward_fails() {
    let temp = temp_dir();
    let (_, work) = origin_with_clone(&temp);
    run_git(&["config", "user.name", "Test"], &work);
    run_git(&["config", "user.email", "test@test.com"], &work);

    // A fresh root commit on `dev` cannot replace the remote history.
    start_unborn_branch(&work, "dev").unwrap();
    run_git(&["commit", "-q", "-m", "unrelated"], &work);

    assert!(push_branch(&work, ORIGIN, "dev").is_err());
}
