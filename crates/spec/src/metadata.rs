// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metadata binding: folds the provider's `CI_*` variables, the
//! workflow's matrix axis, and the caller's global variables into the
//! single environment the substituter resolves `${VAR}` references
//! against.
//!
//! Precedence, lowest to highest: caller globals, matrix axis values,
//! provider metadata. A provider-bound `CI_*` name can never be
//! shadowed by a matrix axis or a caller global sharing its name.

use pc_collab::{BindContext, Environment, MetadataProvider};
use pc_core::Axis;

/// Bind the full environment for one workflow instance.
pub fn bind_environment(
    provider: &dyn MetadataProvider,
    ctx: &BindContext<'_>,
    axis: &Axis,
    globals: &Environment,
) -> Environment {
    let mut env = Environment::new();

    for (k, v) in globals {
        env.insert(k.clone(), v.clone());
    }

    for (k, v) in axis {
        env.insert(k.clone(), v.clone());
    }

    for (k, v) in provider.bind(ctx) {
        env.insert(k, v);
    }

    env
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
