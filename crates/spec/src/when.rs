// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The when-filter: decides whether a workflow instance runs at all.
//!
//! Runs after substitution and parsing, so `evaluate` expressions
//! compare already-resolved text — it is a plain literal `==`/`!=`
//! comparator, not a general expression language.

use crate::grammar::WhenSpec;
use globset::Glob;
use pc_collab::EventKind;
use pc_core::{Axis, CompileError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhenOutcome {
    Included,
    Skipped(String),
}

/// Evaluate a workflow's `when` predicate against the bound context. An
/// absent or entirely empty predicate always includes.
pub fn evaluate_when(
    when: Option<&WhenSpec>,
    event: EventKind,
    branch: &str,
    changed_files: &[String],
    axis: &Axis,
    file: &str,
) -> Result<WhenOutcome, CompileError> {
    let when = match when {
        Some(w) if !w.is_empty() => w,
        _ => return Ok(WhenOutcome::Included),
    };

    if let Some(events) = &when.event {
        if !events.contains(event.as_str()) {
            return Ok(WhenOutcome::Skipped(format!(
                "event '{}' not in {:?}",
                event.as_str(),
                events.0
            )));
        }
    }

    if let Some(branches) = &when.branch {
        if !branches.contains(branch) {
            return Ok(WhenOutcome::Skipped(format!(
                "branch '{branch}' not in {:?}",
                branches.0
            )));
        }
    }

    if let Some(paths) = &when.path {
        if !paths.is_empty() {
            let mut matched = false;
            for pattern in &paths.0 {
                let glob = Glob::new(pattern).map_err(|e| CompileError::FilterError {
                    file: file.to_string(),
                    message: format!("invalid path pattern '{pattern}': {e}"),
                })?;
                let matcher = glob.compile_matcher();
                if changed_files.iter().any(|f| matcher.is_match(f)) {
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Ok(WhenOutcome::Skipped(format!(
                    "no changed file matched path patterns {:?}",
                    paths.0
                )));
            }
        }
    }

    for (axis_name, expected) in &when.matrix {
        match axis.get(axis_name) {
            Some(actual) if actual == expected => {}
            _ => {
                return Ok(WhenOutcome::Skipped(format!(
                    "matrix axis '{axis_name}' did not match '{expected}'"
                )));
            }
        }
    }

    if let Some(expr) = &when.evaluate {
        if !evaluate_expression(expr, file)? {
            return Ok(WhenOutcome::Skipped(format!(
                "evaluate expression '{expr}' was false"
            )));
        }
    }

    Ok(WhenOutcome::Included)
}

fn evaluate_expression(expr: &str, file: &str) -> Result<bool, CompileError> {
    let (op, idx) = if let Some(idx) = expr.find("!=") {
        ("!=", idx)
    } else if let Some(idx) = expr.find("==") {
        ("==", idx)
    } else {
        return Err(CompileError::FilterError {
            file: file.to_string(),
            message: format!("evaluate expression '{expr}' must use '==' or '!='"),
        });
    };
    let lhs = expr[..idx].trim();
    let rhs = expr[idx + 2..].trim();
    Ok(match op {
        "==" => lhs == rhs,
        _ => lhs != rhs,
    })
}

#[cfg(test)]
#[path = "when_tests.rs"]
mod tests;
