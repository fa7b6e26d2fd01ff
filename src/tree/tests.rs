// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EntryKind, TreeDiff, TreeEntry, TreeSnapshot, apply_diff, diff_trees};
use std::path::Path;

fn snapshot(entries: &[(&str, &str)]) -> TreeSnapshot {
    entries
        .iter()
        .map(|(path, digest)| ((*path).to_string(), TreeEntry::file(*digest, false)))
        .collect()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_diff_identical_trees_is_empty() {
    let tree = snapshot(&[("README.md", "a"), ("src/lib.rs", "b")]);
    let diff = diff_trees(&tree, &tree.clone());
    assert!(diff.is_empty());
}

#[test]
fn test_diff_classifies_changes() {
    let dest = snapshot(&[("keep", "1"), ("old", "2"), ("edit", "3")]);
    let source = snapshot(&[("keep", "1"), ("new", "4"), ("edit", "5")]);

    let diff = diff_trees(&dest, &source);
    insta::assert_debug_snapshot!(diff, @r#"
    TreeDiff {
        added: [
            "new",
        ],
        modified: [
            "edit",
        ],
        removed: [
            "old",
        ],
    }
    "#);
    assert_eq!(diff.stats().to_string(), "+1 ~1 -1");
}

#[test]
fn test_diff_executable_bit_is_a_modification() {
    let mut dest = TreeSnapshot::new();
    dest.insert("run.sh", TreeEntry::file("abc", false));
    let mut source = TreeSnapshot::new();
    source.insert("run.sh", TreeEntry::file("abc", true));

    assert_eq!(diff_trees(&dest, &source).modified, vec!["run.sh"]);
}

#[test]
fn test_diff_file_to_symlink_is_a_modification() {
    let mut dest = TreeSnapshot::new();
    dest.insert("link", TreeEntry::file("abc", false));
    let mut source = TreeSnapshot::new();
    source.insert("link", TreeEntry::symlink("abc"));

    let diff = diff_trees(&dest, &source);
    assert_eq!(diff.modified, vec!["link"]);
    assert_eq!(source.get("link").map(TreeEntry::kind), Some(EntryKind::Symlink));
}

#[test]
fn test_diff_against_empty_destination_adds_everything() {
    let source = snapshot(&[("b", "1"), ("a/c", "2")]);
    let diff = diff_trees(&TreeSnapshot::new(), &source);
    assert_eq!(diff.added, vec!["a/c", "b"]);
    assert!(diff.removed.is_empty());
}

#[test]
fn test_capture_excludes_git_and_keeps_hidden() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write(root, ".git/config", "[core]\n");
    write(root, ".github/workflows/ci.yml", "on: push\n");
    write(root, "src/main.rs", "fn main() {}\n");

    let tree = TreeSnapshot::capture(root).unwrap();
    let paths: Vec<_> = tree.iter().map(|(path, _)| path).collect();
    assert_eq!(paths, vec![".github/workflows/ci.yml", "src/main.rs"]);
}

#[test]
fn test_capture_digest_tracks_content() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write(root, "a.txt", "same");
    write(root, "b.txt", "same");
    write(root, "c.txt", "different");

    let tree = TreeSnapshot::capture(root).unwrap();
    let digest = |p: &str| tree.get(p).unwrap().digest().to_string();
    assert_eq!(digest("a.txt"), digest("b.txt"));
    assert_ne!(digest("a.txt"), digest("c.txt"));
    assert_eq!(digest("a.txt").len(), 64);
}

#[test]
fn test_capture_missing_root() {
    assert!(TreeSnapshot::capture(Path::new("/nonexistent/mirror/tree")).is_err());
}

#[tokio::test]
async fn test_apply_makes_destination_match_source() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let (src, dst) = (source_dir.path(), dest_dir.path());

    write(src, "README.md", "new readme\n");
    write(src, "docs/guide.md", "guide\n");
    write(src, "layout", "now a file\n");

    write(dst, "README.md", "old readme\n");
    write(dst, "obsolete/deep/file.txt", "bye\n");
    write(dst, "layout/was/a/dir.txt", "dir\n");
    write(dst, ".git/HEAD", "ref: refs/heads/main\n");

    let source_tree = TreeSnapshot::capture(src).unwrap();
    let diff = diff_trees(&TreeSnapshot::capture(dst).unwrap(), &source_tree);
    apply_diff(&diff, src, dst).await.unwrap();

    assert_eq!(TreeSnapshot::capture(dst).unwrap(), source_tree);
    assert!(!dst.join("obsolete").exists());
    assert!(dst.join(".git/HEAD").exists());
}

#[tokio::test]
async fn test_apply_empty_diff_touches_nothing() {
    let dest_dir = tempfile::tempdir().unwrap();
    write(dest_dir.path(), "file", "x");

    apply_diff(&TreeDiff::default(), Path::new("/unused"), dest_dir.path())
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(dest_dir.path().join("file")).unwrap(), "x");
}
