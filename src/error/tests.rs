// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, MirrorError, MirrorResult, SyncError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "mirror".to_string(),
        key: "marker".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'marker' in section '[mirror]'"
    );
}

#[test]
fn test_sync_error_names_branch() {
    let err = SyncError::PushFailed {
        branch: "release/1.2".to_string(),
        message: "rejected (non-fast-forward)".to_string(),
    };
    assert_eq!(err.branch(), Some("release/1.2"));
    insta::assert_snapshot!(
        MirrorError::from(err).to_string(),
        @"sync error: failed to push branch 'release/1.2': rejected (non-fast-forward)"
    );

    let unreachable = SyncError::DestinationUnreachable {
        url: "git@github.com:acme/widgets.git".to_string(),
        message: "Repository not found".to_string(),
    };
    assert_eq!(unreachable.branch(), None);
}

#[test]
fn test_as_sync() {
    let err = MirrorError::from(SyncError::BranchFailed {
        branch: "main".to_string(),
        message: "checkout failed".to_string(),
    });
    assert_eq!(err.as_sync().and_then(SyncError::branch), Some("main"));

    let other = MirrorError::Other("boom".into());
    assert!(other.as_sync().is_none());
}

#[test]
fn test_mirror_error_size() {
    // Box<str> variant (Other) is 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<MirrorError>();
    assert!(size <= 24, "MirrorError is {size} bytes, expected <= 24");
}

#[test]
fn test_mirror_result_size() {
    let size = std::mem::size_of::<MirrorResult<()>>();
    assert!(size <= 24, "MirrorResult<()> is {size} bytes, expected <= 24");
}
