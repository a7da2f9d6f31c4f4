// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test builders for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ResourceLimits, Step, WorkflowRecord, WorkflowState};
use indexmap::IndexMap;
use std::collections::BTreeMap;

pub fn workflow_record(pid: u32, name: &str) -> WorkflowRecord {
    WorkflowRecord {
        pid,
        name: name.to_string(),
        axis: IndexMap::new(),
        state: WorkflowState::Pending,
        depends_on: Vec::new(),
        runs_on: Vec::new(),
        labels: BTreeMap::new(),
    }
}

pub fn step(pid: u32, group_id: u32, alias: &str, image: &str) -> Step {
    Step {
        pid,
        group_id,
        alias: alias.to_string(),
        uuid: format!("test-uuid-{pid}"),
        image: image.to_string(),
        commands: Vec::new(),
        entrypoint: None,
        environment: BTreeMap::new(),
        volumes: Vec::new(),
        networks: Vec::new(),
        resource_limits: ResourceLimits::default(),
        registry_auth: Vec::new(),
        workspace: "/compile/workspace".to_string(),
        privileged: false,
        prefix: format!("wp_test_{pid}"),
    }
}
