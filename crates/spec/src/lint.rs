// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural validation of a parsed workflow, run before the
//! when-filter.
//!
//! Privileged-step requests are not a lint failure, trusted repository
//! or not: an untrusted repo simply never gets the escalation at
//! lowering time. Rejecting it here would make privileged a hard
//! parse-time error instead of a silent, no-op downgrade.
//!
//! Author-declared volume mounts are different: an untrusted repo
//! requesting one is a hard lint failure, not a silent drop, since a
//! mount reaches outside the container in a way a downgraded privilege
//! flag never does.

use crate::grammar::WorkflowSpec;
use pc_core::CompileError;

pub fn lint(workflow: &WorkflowSpec, trusted: bool, file: &str) -> Result<(), CompileError> {
    if workflow.steps.is_empty() {
        tracing::debug!(file, "lint rejected: no steps declared");
        return Err(CompileError::LintError {
            file: file.to_string(),
            location: "steps".to_string(),
            message: "workflow must declare at least one step".to_string(),
        });
    }

    for (name, step) in &workflow.steps {
        if step.commands.is_empty() && step.entrypoint.is_none() && step.settings.is_empty() {
            tracing::debug!(file, step = name.as_str(), "lint rejected: step has no runnable body");
            return Err(CompileError::LintError {
                file: file.to_string(),
                location: format!("steps.{name}"),
                message: "step must declare commands, an entrypoint, or plugin settings"
                    .to_string(),
            });
        }

        if !trusted && !step.volumes.is_empty() {
            tracing::debug!(file, step = name.as_str(), "lint rejected: volume mount requested by untrusted repository");
            return Err(CompileError::LintError {
                file: file.to_string(),
                location: format!("steps.{name}.volumes"),
                message: "volume mounts are disallowed for untrusted repositories".to_string(),
            });
        }
    }

    for name in &workflow.depends_on {
        if name.trim().is_empty() {
            tracing::debug!(file, "lint rejected: blank depends_on entry");
            return Err(CompileError::LintError {
                file: file.to_string(),
                location: "depends_on".to_string(),
                message: "depends_on entries must not be blank".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
