// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::grammar::StepSpec;
use indexmap::IndexMap;

fn step(name: &str, commands: Vec<&str>, privileged: bool) -> StepSpec {
    StepSpec {
        name: name.to_string(),
        image: "alpine".to_string(),
        commands: commands.into_iter().map(String::from).collect(),
        entrypoint: None,
        environment: Default::default(),
        secrets: Vec::new(),
        volumes: Vec::new(),
        when: None,
        settings: Default::default(),
        pull: true,
        detach: false,
        privileged,
    }
}

fn workflow_with_steps(steps: Vec<StepSpec>) -> WorkflowSpec {
    let mut map = IndexMap::new();
    for s in steps {
        map.insert(s.name.clone(), s);
    }
    WorkflowSpec {
        when: None,
        matrix: None,
        labels: Default::default(),
        depends_on: Vec::new(),
        runs_on: Vec::new(),
        platform: None,
        clone: None,
        steps: map,
        services: Default::default(),
        variables: Default::default(),
    }
}

#[test]
fn empty_steps_is_rejected() {
    let wf = workflow_with_steps(vec![]);
    let err = lint(&wf, true, "f.yaml").unwrap_err();
    assert!(matches!(err, CompileError::LintError { .. }));
}

#[test]
fn privileged_step_is_not_a_lint_failure_regardless_of_trust() {
    let wf = workflow_with_steps(vec![step("build", vec!["echo hi"], true)]);
    lint(&wf, false, "f.yaml").unwrap();
    lint(&wf, true, "f.yaml").unwrap();
}

#[test]
fn step_with_no_commands_entrypoint_or_settings_is_rejected() {
    let wf = workflow_with_steps(vec![step("build", vec![], false)]);
    let err = lint(&wf, true, "f.yaml").unwrap_err();
    assert!(matches!(err, CompileError::LintError { .. }));
}

#[test]
fn well_formed_workflow_passes() {
    let wf = workflow_with_steps(vec![step("build", vec!["echo hi"], false)]);
    lint(&wf, false, "f.yaml").unwrap();
}

#[test]
fn blank_depends_on_entry_is_rejected() {
    let mut wf = workflow_with_steps(vec![step("build", vec!["echo hi"], false)]);
    wf.depends_on.push("   ".to_string());
    let err = lint(&wf, true, "f.yaml").unwrap_err();
    assert!(matches!(err, CompileError::LintError { .. }));
}

#[test]
fn author_declared_volume_is_rejected_in_untrusted_mode() {
    let mut wf = workflow_with_steps(vec![step("build", vec!["echo hi"], false)]);
    wf.steps.get_mut("build").unwrap().volumes = vec!["/host/secrets:/secrets".to_string()];
    let err = lint(&wf, false, "f.yaml").unwrap_err();
    assert!(matches!(err, CompileError::LintError { .. }));
}

#[test]
fn author_declared_volume_passes_in_trusted_mode() {
    let mut wf = workflow_with_steps(vec![step("build", vec!["echo hi"], false)]);
    wf.steps.get_mut("build").unwrap().volumes = vec!["/host/cache:/cache".to_string()];
    lint(&wf, true, "f.yaml").unwrap();
}
