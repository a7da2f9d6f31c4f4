// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::grammar::OneOrMany;

#[test]
fn absent_when_always_includes() {
    let out = evaluate_when(None, EventKind::Push, "main", &[], &Axis::new(), "f.yaml").unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[yare::parameterized(
    push = { EventKind::Push, "push" },
    pull_request = { EventKind::PullRequest, "pull_request" },
    tag = { EventKind::Tag, "tag" },
    deployment = { EventKind::Deployment, "deployment" },
    cron = { EventKind::Cron, "cron" },
    manual = { EventKind::Manual, "manual" },
)]
fn event_name_round_trips_through_the_when_filter(event: EventKind, name: &str) {
    let when = WhenSpec {
        event: Some(OneOrMany(vec![name.to_string()])),
        ..Default::default()
    };
    let out = evaluate_when(Some(&when), event, "main", &[], &Axis::new(), "f.yaml").unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[test]
fn event_mismatch_skips() {
    let when = WhenSpec {
        event: Some(OneOrMany(vec!["tag".to_string()])),
        ..Default::default()
    };
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert!(matches!(out, WhenOutcome::Skipped(_)));
}

#[test]
fn branch_match_includes() {
    let when = WhenSpec {
        branch: Some(OneOrMany(vec!["main".to_string(), "release/*".to_string()])),
        ..Default::default()
    };
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[test]
fn path_glob_matches_changed_file() {
    let when = WhenSpec {
        path: Some(OneOrMany(vec!["src/**/*.rs".to_string()])),
        ..Default::default()
    };
    let changed = vec!["src/lib.rs".to_string()];
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &changed,
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[test]
fn path_glob_no_match_skips() {
    let when = WhenSpec {
        path: Some(OneOrMany(vec!["docs/**".to_string()])),
        ..Default::default()
    };
    let changed = vec!["src/lib.rs".to_string()];
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &changed,
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert!(matches!(out, WhenOutcome::Skipped(_)));
}

#[test]
fn matrix_predicate_matches_axis() {
    let when = WhenSpec {
        matrix: [("go".to_string(), "1.22".to_string())].into_iter().collect(),
        ..Default::default()
    };
    let mut axis = Axis::new();
    axis.insert("go".to_string(), "1.22".to_string());
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &axis,
        "f.yaml",
    )
    .unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[test]
fn matrix_predicate_mismatch_skips() {
    let when = WhenSpec {
        matrix: [("go".to_string(), "1.22".to_string())].into_iter().collect(),
        ..Default::default()
    };
    let mut axis = Axis::new();
    axis.insert("go".to_string(), "1.20".to_string());
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &axis,
        "f.yaml",
    )
    .unwrap();
    assert!(matches!(out, WhenOutcome::Skipped(_)));
}

#[test]
fn evaluate_equality_expression() {
    let when = WhenSpec {
        evaluate: Some("staging == staging".to_string()),
        ..Default::default()
    };
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert_eq!(out, WhenOutcome::Included);
}

#[test]
fn evaluate_inequality_expression_false_skips() {
    let when = WhenSpec {
        evaluate: Some("staging != staging".to_string()),
        ..Default::default()
    };
    let out = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &Axis::new(),
        "f.yaml",
    )
    .unwrap();
    assert!(matches!(out, WhenOutcome::Skipped(_)));
}

#[test]
fn evaluate_expression_without_operator_is_rejected() {
    let when = WhenSpec {
        evaluate: Some("nonsense".to_string()),
        ..Default::default()
    };
    let err = evaluate_when(
        Some(&when),
        EventKind::Push,
        "main",
        &[],
        &Axis::new(),
        "f.yaml",
    )
    .unwrap_err();
    assert!(matches!(err, CompileError::FilterError { .. }));
}
