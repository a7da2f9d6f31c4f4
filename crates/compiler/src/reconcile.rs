// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency reconciliation.
//!
//! A `depends_on` entry naming a workflow that doesn't exist anywhere in
//! this compilation can never be satisfied, now or later — the whole
//! workflow that named it is removed, and removal cascades to anything
//! that in turn depended on it. This runs to a fixed point: removing `a`
//! can strand `c`, which depended on `a`.
//!
//! A `depends_on` entry naming a workflow that exists but was skipped by
//! the when-filter is different: skipped is a real, resolved outcome,
//! just one that will never run. Such entries are pruned from the list
//! rather than causing removal — the dependent still starts, it simply
//! stops waiting on something that will never complete.
//!
//! Removing workflows can legitimately empty the output entirely with no
//! error. [`pc_core::CompileError::NoStartpoint`] fires only when at
//! least one workflow survives reconciliation and every survivor is
//! skipped — nothing is left to actually start.

use pc_core::{CompileError, Item};
use std::collections::HashSet;

pub fn reconcile(mut items: Vec<Item>) -> Result<Vec<Item>, CompileError> {
    let mut names: HashSet<String> = items.iter().map(|i| i.name().to_string()).collect();

    loop {
        let mut removed = false;
        items.retain(|item| {
            let keep = item.depends_on.iter().all(|dep| names.contains(dep));
            if !keep {
                tracing::warn!(
                    workflow = item.name(),
                    depends_on = ?item.depends_on,
                    "removing workflow with an unresolvable dependency"
                );
                removed = true;
            }
            keep
        });
        if !removed {
            break;
        }
        names = items.iter().map(|i| i.name().to_string()).collect();
    }

    let skipped: HashSet<String> = items
        .iter()
        .filter(|i| i.record.is_skipped())
        .map(|i| i.name().to_string())
        .collect();
    for item in &mut items {
        let before = item.depends_on.len();
        item.depends_on.retain(|dep| !skipped.contains(dep));
        if item.depends_on.len() != before {
            tracing::debug!(workflow = item.name(), "pruned dependency on skipped workflow");
        }
        item.record.depends_on = item.depends_on.clone();
    }

    let runnable = items.iter().filter(|i| !i.record.is_skipped()).count();
    if !items.is_empty() && runnable == 0 {
        tracing::warn!("every surviving workflow is skipped");
        return Err(CompileError::NoStartpoint);
    }

    Ok(items)
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
