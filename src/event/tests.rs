// repo-mirror: Private-to-public repository branch mirror
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    DispatchPayload, Event, EventKind, GateDecision, GateOptions, MirrorRequest, SkipReason,
    evaluate,
};

fn pr_payload(action: &str, merged: bool, head_repo: Option<&str>) -> String {
    let head_repo = head_repo.map_or_else(
        || "null".to_string(),
        |name| format!(r#"{{"full_name": "{name}"}}"#),
    );
    format!(
        r#"{{
            "action": "{action}",
            "number": 42,
            "pull_request": {{
                "number": 42,
                "merged": {merged},
                "base": {{"ref": "main", "repo": {{"full_name": "acme/widgets-private"}}}},
                "head": {{"ref": "feature/x", "repo": {head_repo}}}
            }}
        }}"#
    )
}

fn gate(name: &str, payload: &str) -> GateDecision {
    evaluate(
        &Event::from_github(name, payload).unwrap(),
        &GateOptions::default(),
    )
}

#[test]
fn test_push_mirrors() {
    let decision = gate("push", r#"{"ref": "refs/heads/main"}"#);
    assert_eq!(decision, GateDecision::Mirror(MirrorRequest::default()));
    assert!(decision.should_sync());
}

#[test]
fn test_push_with_empty_payload() {
    let event = Event::from_github("push", "").unwrap();
    assert_eq!(event.kind(), &EventKind::Push { git_ref: None });
}

#[test]
fn test_closed_unmerged_pr_skips() {
    let decision = gate(
        "pull_request",
        &pr_payload("closed", false, Some("acme/widgets-private")),
    );
    assert_eq!(decision, GateDecision::Skip(SkipReason::NotMerged { number: 42 }));
    assert!(!decision.should_sync());
}

#[test]
fn test_opened_pr_skips() {
    let decision = gate(
        "pull_request",
        &pr_payload("opened", false, Some("acme/widgets-private")),
    );
    assert!(matches!(decision, GateDecision::Skip(SkipReason::NotClosed { .. })));
}

#[test]
fn test_merged_same_repo_pr_mirrors() {
    let decision = gate(
        "pull_request",
        &pr_payload("closed", true, Some("acme/widgets-private")),
    );
    assert!(decision.should_sync());
}

#[test]
fn test_merged_fork_pr_relays() {
    let decision = gate(
        "pull_request_target",
        &pr_payload("closed", true, Some("contributor/widgets-private")),
    );
    assert_eq!(
        decision,
        GateDecision::Relay(DispatchPayload {
            base_branch: "main".to_string(),
            pr_number: 42,
        })
    );
    assert!(!decision.should_sync());
}

#[test]
fn test_deleted_fork_counts_as_fork() {
    let decision = gate("pull_request", &pr_payload("closed", true, None));
    assert_eq!(decision.label(), "relay");
}

#[test]
fn test_fork_merge_mirrors_when_relay_disabled() {
    let event = Event::from_github(
        "pull_request",
        &pr_payload("closed", true, Some("contributor/widgets-private")),
    )
    .unwrap();
    let decision = evaluate(
        &event,
        &GateOptions {
            relay_fork_merges: false,
        },
    );
    assert!(decision.should_sync());
}

#[test]
fn test_fork_unmerged_pr_never_relays() {
    let decision = gate(
        "pull_request_target",
        &pr_payload("closed", false, Some("contributor/widgets-private")),
    );
    assert_eq!(decision.label(), "skip");
}

#[test]
fn test_workflow_dispatch_inputs() {
    let decision = gate(
        "workflow_dispatch",
        r#"{"inputs": {"force_sync": "false", "public_repo_name": " gadgets "}}"#,
    );
    assert_eq!(
        decision,
        GateDecision::Mirror(MirrorRequest {
            force_sync: Some(false),
            public_repo_name: Some("gadgets".to_string()),
            forwarded: None,
        })
    );
}

#[test]
fn test_workflow_dispatch_bool_and_missing_inputs() {
    let with_bool = Event::from_github("workflow_dispatch", r#"{"inputs": {"force_sync": true}}"#)
        .unwrap();
    assert!(matches!(
        with_bool.kind(),
        EventKind::WorkflowDispatch(inputs) if inputs.force_sync == Some(true)
    ));

    let without = Event::from_github("workflow_dispatch", r#"{"inputs": null}"#).unwrap();
    assert!(matches!(
        without.kind(),
        EventKind::WorkflowDispatch(inputs) if inputs.force_sync.is_none() && inputs.public_repo_name.is_none()
    ));
}

#[test]
fn test_workflow_dispatch_rejects_bad_bool() {
    assert!(Event::from_github("workflow_dispatch", r#"{"inputs": {"force_sync": "maybe"}}"#).is_err());
}

#[test]
fn test_repository_dispatch_carries_payload() {
    let decision = gate(
        "repository_dispatch",
        r#"{"action": "sync-fork-merge", "client_payload": {"base_branch": "develop", "pr_number": "7"}}"#,
    );
    assert_eq!(
        decision,
        GateDecision::Mirror(MirrorRequest {
            forwarded: Some(DispatchPayload {
                base_branch: "develop".to_string(),
                pr_number: 7,
            }),
            ..MirrorRequest::default()
        })
    );
}

#[test]
fn test_unknown_event_skips() {
    let decision = gate("issues", r#"{"action": "opened"}"#);
    assert_eq!(
        decision,
        GateDecision::Skip(SkipReason::UnsupportedEvent("issues".to_string()))
    );
}

#[test]
fn test_malformed_pr_payload_is_error() {
    assert!(Event::from_github("pull_request", r#"{"action": "closed"}"#).is_err());
    assert!(Event::from_github("push", "{not json").is_err());
}

#[test]
fn test_output_lines() {
    let relay = GateDecision::Relay(DispatchPayload {
        base_branch: "main".to_string(),
        pr_number: 42,
    });
    insta::assert_snapshot!(relay.output_lines(), @r"
    should_sync=false
    decision=relay
    base_branch=main
    pr_number=42
    ");

    let skip = GateDecision::Skip(SkipReason::NotMerged { number: 1 });
    assert_eq!(skip.output_lines(), "should_sync=false\ndecision=skip\n");
}

#[test]
fn test_append_github_output() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("output");
    std::fs::write(&path, "earlier=1\n").unwrap();

    GateDecision::Mirror(MirrorRequest::default())
        .append_github_output(&path)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "earlier=1\nshould_sync=true\ndecision=mirror\n"
    );
}

#[test]
fn test_skip_reason_display() {
    insta::assert_snapshot!(
        GateDecision::Skip(SkipReason::NotMerged { number: 9 }).to_string(),
        @"skip: pull request #9 was closed without merging"
    );
}
