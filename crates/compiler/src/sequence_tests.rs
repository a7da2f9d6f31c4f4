// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pc_core::test_support::{step, workflow_record};
use pc_core::{ExecutablePlan, FixedPrefixGen, Stage};

fn item_with_two_stages(name: &str) -> Item {
    Item {
        record: workflow_record(0, name),
        plan: ExecutablePlan {
            stages: vec![
                Stage {
                    group_id: 0,
                    steps: vec![step(0, 0, "clone", "forge/clone")],
                },
                Stage {
                    group_id: 0,
                    steps: vec![step(0, 0, "build", "alpine")],
                },
            ],
        },
        labels: Default::default(),
        depends_on: Vec::new(),
        runs_on: Vec::new(),
        platform: None,
    }
}

#[test]
fn workflow_records_are_numbered_before_any_step() {
    let items = vec![item_with_two_stages("a"), item_with_two_stages("b")];
    let items = sequence(items, &FixedPrefixGen::default());

    assert_eq!(items[0].record.pid, 1);
    assert_eq!(items[1].record.pid, 2);
    assert_eq!(items[0].plan.stages[0].steps[0].pid, 3);
    assert_eq!(items[0].plan.stages[1].steps[0].pid, 4);
    assert_eq!(items[1].plan.stages[0].steps[0].pid, 5);
    assert_eq!(items[1].plan.stages[1].steps[0].pid, 6);
}

#[test]
fn group_id_matches_stage_index() {
    let items = vec![item_with_two_stages("a")];
    let items = sequence(items, &FixedPrefixGen::default());
    assert_eq!(items[0].plan.stages[0].steps[0].group_id, 0);
    assert_eq!(items[0].plan.stages[1].steps[0].group_id, 1);
}

#[test]
fn prefix_is_shared_across_all_steps_in_one_compilation() {
    let items = vec![item_with_two_stages("a")];
    let gen = FixedPrefixGen::new("01fixedtoken");
    let items = sequence(items, &gen);
    assert_eq!(items[0].plan.stages[0].steps[0].prefix, "wp_01fixedtoken_2");
    assert_eq!(items[0].plan.stages[1].steps[0].prefix, "wp_01fixedtoken_3");
}
