// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier sequencing: the last step before a plan is handed back to
//! the caller.
//!
//! Two phases, not one shared counter: every workflow record is
//! numbered first, in the order `compile` already built `items` in
//! (source-order then matrix-order — this module never reorders), and
//! only once every record has a pid does step numbering begin, again
//! walking every item in the same order. This keeps workflow pids a
//! low, dense block instead of interleaving them with however many
//! steps each workflow happens to declare. Each step's `group_id` is
//! its stage's index within its own workflow's plan. Every step also
//! receives the per-compilation prefix from `id_gen`, namespacing every
//! container/volume/network name it requests.

use pc_core::{Item, PrefixGen};

pub fn sequence(mut items: Vec<Item>, id_gen: &dyn PrefixGen) -> Vec<Item> {
    let prefix = id_gen.next();

    let mut next_pid: u32 = 1;
    for item in &mut items {
        item.record.pid = next_pid;
        next_pid += 1;
    }

    for item in &mut items {
        for (stage_index, stage) in item.plan.stages.iter_mut().enumerate() {
            let group_id = stage_index as u32;
            stage.group_id = group_id;
            for step in &mut stage.steps {
                step.group_id = group_id;
                step.pid = next_pid;
                step.prefix = format!("wp_{prefix}_{}", step.pid);
                next_pid += 1;
            }
        }
    }

    items
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
