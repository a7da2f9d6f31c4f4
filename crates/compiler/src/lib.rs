// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Back half of the pipeline compiler: lowering, dependency
//! reconciliation, and identifier sequencing.
//!
//! [`compile`] is the single entry point: it drives every source file
//! in `pc-spec` through the full pipeline and returns the sequenced,
//! reconciled set of workflow [`Item`]s the backend will execute.

mod lower;
mod reconcile;
mod request;
mod sequence;

pub use request::CompileRequest;

use pc_core::{CompileError, Item};
use pc_spec::WhenOutcome;
use std::collections::HashSet;

/// Run a full compilation: load, expand, bind, substitute, parse, lint,
/// filter, lower, reconcile, and sequence every workflow instance drawn
/// from `req`'s forge source.
///
/// Aborts on the first error; there is no partial success.
pub fn compile(req: &CompileRequest<'_>) -> Result<Vec<Item>, CompileError> {
    let sources = pc_core::sort_sources(req.forge.specs());
    if sources.is_empty() {
        return Err(CompileError::EmptySet);
    }

    let secrets = req.secrets.secrets();
    let registries = req.registries.registries();

    let mut items = Vec::new();
    let mut seen_files: HashSet<String> = HashSet::new();

    for source in &sources {
        check_cancelled(req)?;

        let file = pc_core::sanitize(&source.name);
        let _span = tracing::info_span!("compile_source", file = %file).entered();
        if !seen_files.insert(file.clone()) {
            return Err(CompileError::DuplicateWorkflowName(file));
        }

        let axes = pc_spec::expand_matrix(&source.bytes, &file, req.config.matrix_size_limit)?;
        tracing::debug!(combinations = axes.len(), "matrix expanded");
        let text = source.text();

        for axis in &axes {
            check_cancelled(req)?;

            // A matrix expansion produces several Items that share one
            // workflow name; they are instances of the same logical
            // workflow, not a name collision.
            let workflow_name = file.clone();

            let ctx = pc_collab::BindContext {
                forge: req.forge_identity,
                repo: req.repo,
                current_pipeline: req.current_pipeline,
                previous_pipeline: req.previous_pipeline,
                workflow_name: &workflow_name,
                event_url: req.event_url,
            };
            let env = pc_spec::bind_environment(req.metadata, &ctx, axis, req.globals);
            let substituted = pc_spec::substitute(&text, &env, &file)?;
            let workflow = pc_spec::parse(&substituted, &file)?;
            pc_spec::lint(&workflow, req.repo.trusted, &file)?;

            let outcome = pc_spec::evaluate_when(
                workflow.when.as_ref(),
                req.current_pipeline.event,
                &req.current_pipeline.branch,
                &req.current_pipeline.changed_files,
                axis,
                &file,
            )?;

            if let WhenOutcome::Skipped(reason) = &outcome {
                tracing::debug!(workflow = %workflow_name, reason, "workflow skipped by when-filter");
            }

            let plan = match &outcome {
                WhenOutcome::Included => lower::lower(
                    &workflow,
                    &env,
                    req.config,
                    req.repo,
                    &secrets,
                    &registries,
                    req.current_pipeline.event,
                    &req.current_pipeline.branch,
                    &req.current_pipeline.changed_files,
                    axis,
                    &file,
                    req.id_gen,
                )?,
                WhenOutcome::Skipped(_) => pc_core::ExecutablePlan::default(),
            };

            // A workflow whose steps all lowered away under their own
            // per-step `when` produces an empty plan; drop it silently,
            // same as any other empty-plan result. A workflow-level skip
            // still surfaces with its (always empty) plan.
            if matches!(outcome, WhenOutcome::Included) && plan.is_empty() {
                tracing::debug!(workflow = %workflow_name, "all steps excluded by when-filters, dropping empty plan");
                continue;
            }

            let state = match outcome {
                WhenOutcome::Included => pc_core::WorkflowState::Pending,
                WhenOutcome::Skipped(_) => pc_core::WorkflowState::Skipped,
            };

            let record = pc_core::WorkflowRecord {
                pid: 0,
                name: workflow_name.clone(),
                axis: axis.clone(),
                state,
                depends_on: workflow.depends_on.clone(),
                runs_on: workflow.runs_on.clone(),
                labels: workflow.labels.clone(),
            };

            items.push(pc_core::Item {
                record,
                plan,
                labels: workflow.labels,
                depends_on: workflow.depends_on,
                runs_on: workflow.runs_on,
                platform: workflow.platform,
            });
        }
    }

    check_cancelled(req)?;
    let items = reconcile::reconcile(items)?;
    let items = sequence::sequence(items, req.id_gen);

    Ok(items)
}

fn check_cancelled(req: &CompileRequest<'_>) -> Result<(), CompileError> {
    if (req.cancelled)() {
        Err(CompileError::Cancelled)
    } else {
        Ok(())
    }
}
