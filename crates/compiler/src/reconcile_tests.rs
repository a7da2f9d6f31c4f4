// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pc_core::test_support::workflow_record;
use pc_core::ExecutablePlan;
use pc_core::WorkflowState;

fn item(name: &str, state: WorkflowState, depends_on: Vec<&str>) -> Item {
    let mut record = workflow_record(0, name);
    record.state = state;
    record.depends_on = depends_on.iter().map(|s| s.to_string()).collect();
    Item {
        depends_on: record.depends_on.clone(),
        record,
        plan: ExecutablePlan::default(),
        labels: Default::default(),
        runs_on: Vec::new(),
        platform: None,
    }
}

#[test]
fn prunes_dependency_on_skipped_workflow_without_removing_dependent() {
    let items = vec![
        item("lint", WorkflowState::Skipped, vec![]),
        item("build", WorkflowState::Pending, vec!["lint"]),
    ];
    let items = reconcile(items).unwrap();
    let build = items.iter().find(|i| i.name() == "build").unwrap();
    assert!(build.depends_on.is_empty());
}

#[test]
fn unresolved_dependency_removes_the_workflow_and_cascades() {
    // S4: a depends on b (which doesn't exist); c depends on a.
    let items = vec![
        item("a", WorkflowState::Pending, vec!["b"]),
        item("c", WorkflowState::Pending, vec!["a"]),
    ];
    let items = reconcile(items).unwrap();
    assert!(items.is_empty());
}

#[test]
fn keeps_dependency_on_runnable_workflow() {
    let items = vec![
        item("lint", WorkflowState::Pending, vec![]),
        item("build", WorkflowState::Pending, vec!["lint"]),
    ];
    let items = reconcile(items).unwrap();
    let build = items.iter().find(|i| i.name() == "build").unwrap();
    assert_eq!(build.depends_on, vec!["lint".to_string()]);
}

#[test]
fn all_skipped_is_no_startpoint() {
    let items = vec![item("build", WorkflowState::Skipped, vec![])];
    let err = reconcile(items).unwrap_err();
    assert!(matches!(err, CompileError::NoStartpoint));
}

#[test]
fn empty_output_from_removal_is_not_an_error() {
    let items = vec![item("a", WorkflowState::Pending, vec!["ghost"])];
    let items = reconcile(items).unwrap();
    assert!(items.is_empty());
}
