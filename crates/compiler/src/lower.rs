// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lowering: turns a parsed, filtered [`WorkflowSpec`] into an
//! [`ExecutablePlan`] — the container-backend-ready stage/step tree.
//!
//! This grammar has no step-level dependency declaration, so every
//! runnable step forms one parallel stage after the synthesized clone
//! step. A step's own `when` is evaluated here, against the same
//! predicate engine the workflow-level filter uses; a step that misses
//! is left out of the plan entirely rather than materialized in a
//! skipped state, since the grammar has no per-step skip outcome. A
//! workflow whose steps all miss lowers to an empty plan, which the
//! caller drops silently (see spec Design Notes on empty plans).
//! Identifier sequencing (pid, group_id, prefix) happens later in
//! `sequence.rs`; this module fills in everything else.

use globset::Glob;
use pc_collab::{ConfigSnapshot, Environment, EventKind, Registry, RepoMeta, Secret};
use pc_core::{Axis, CompileError, ExecutablePlan, PrefixGen, RegistryAuth, ResourceLimits, Stage, Step};
use pc_spec::{evaluate_when, CloneSpec, StepSpec, WhenOutcome, WorkflowSpec};

#[allow(clippy::too_many_arguments)]
pub fn lower(
    workflow: &WorkflowSpec,
    env: &Environment,
    config: &ConfigSnapshot,
    repo: &RepoMeta,
    secrets: &[Secret],
    registries: &[Registry],
    event: EventKind,
    branch: &str,
    changed_files: &[String],
    axis: &Axis,
    file: &str,
    id_gen: &dyn PrefixGen,
) -> Result<ExecutablePlan, CompileError> {
    let mut runnable = Vec::with_capacity(workflow.steps.len());
    for step in workflow.steps.values() {
        if let Some(when) = &step.when {
            let outcome = evaluate_when(Some(when), event, branch, changed_files, axis, file)?;
            if matches!(outcome, WhenOutcome::Skipped(_)) {
                tracing::debug!(step = %step.name, "step excluded by its own when-filter");
                continue;
            }
        }
        runnable.push(step);
    }

    if runnable.is_empty() {
        return Ok(ExecutablePlan { stages: Vec::new() });
    }

    let mut stages = Vec::new();

    let clone = workflow.clone.clone().unwrap_or_else(|| CloneSpec {
        image: Some(config.default_clone_image.clone()),
        commands: Vec::new(),
        environment: Default::default(),
    });
    stages.push(lower_clone(&clone, env, config, repo, registries, id_gen));

    let steps = runnable
        .into_iter()
        .map(|step| lower_step(step, env, config, repo, secrets, registries, event, id_gen))
        .collect();
    stages.push(Stage { group_id: 0, steps });

    Ok(ExecutablePlan { stages })
}

fn lower_clone(
    clone: &CloneSpec,
    env: &Environment,
    config: &ConfigSnapshot,
    repo: &RepoMeta,
    registries: &[Registry],
    id_gen: &dyn PrefixGen,
) -> Stage {
    let image = clone
        .image
        .clone()
        .unwrap_or_else(|| config.default_clone_image.clone());

    let mut environment = env.clone();
    for (k, v) in &clone.environment {
        environment.insert(k.clone(), v.clone());
    }
    if authenticate_with_netrc(repo, config) {
        environment.insert("CI_NETRC_MACHINE".to_string(), "1".to_string());
    }

    let step = Step {
        pid: 0,
        group_id: 0,
        alias: "clone".to_string(),
        uuid: id_gen.next(),
        image: image.clone(),
        commands: clone.commands.clone(),
        entrypoint: None,
        environment,
        volumes: config.volumes.clone(),
        networks: config.networks.clone(),
        resource_limits: config.limits,
        registry_auth: matching_registries(&image, registries),
        workspace: "/compile/workspace".to_string(),
        privileged: false,
        prefix: String::new(),
    };

    Stage {
        group_id: 0,
        steps: vec![step],
    }
}

#[allow(clippy::too_many_arguments)]
fn lower_step(
    spec: &StepSpec,
    env: &Environment,
    config: &ConfigSnapshot,
    repo: &RepoMeta,
    secrets: &[Secret],
    registries: &[Registry],
    event: EventKind,
    id_gen: &dyn PrefixGen,
) -> Step {
    let mut environment = env.clone();
    for (k, v) in &spec.environment {
        environment.insert(k.clone(), v.clone());
    }
    if authenticate_with_netrc(repo, config) && !config.netrc_only_trusted {
        environment.insert("CI_NETRC_MACHINE".to_string(), "1".to_string());
    }
    for name in &spec.secrets {
        if let Some(secret) = matching_secret(name, &spec.image, event, spec.is_plugin_shaped(), secrets) {
            environment.insert(secret.name.to_uppercase(), secret.value.clone());
        }
    }

    // Administrator volumes attach unconditionally; author-declared ones
    // only in a trusted repository.
    let mut volumes = if repo.trusted { spec.volumes.clone() } else { Vec::new() };
    volumes.extend(config.volumes.iter().cloned());

    let privileged = spec.privileged && repo.trusted && image_in_allow_list(&spec.image, &config.privileged);
    if spec.privileged && !privileged {
        tracing::debug!(step = %spec.name, image = %spec.image, "privileged request downgraded");
    }

    Step {
        pid: 0,
        group_id: 0,
        alias: spec.name.clone(),
        uuid: id_gen.next(),
        image: spec.image.clone(),
        commands: spec.commands.clone(),
        entrypoint: spec.entrypoint.clone(),
        environment,
        volumes,
        networks: config.networks.clone(),
        resource_limits: ResourceLimits::default().clamped_against(&config.limits),
        registry_auth: matching_registries(&spec.image, registries),
        workspace: "/compile/workspace".to_string(),
        privileged,
        prefix: String::new(),
    }
}

fn authenticate_with_netrc(repo: &RepoMeta, config: &ConfigSnapshot) -> bool {
    repo.private || config.authenticate_public_repos
}

fn image_in_allow_list(image: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        Glob::new(pattern)
            .map(|g| g.compile_matcher().is_match(image))
            .unwrap_or(false)
    })
}

fn matching_registries(image: &str, registries: &[Registry]) -> Vec<RegistryAuth> {
    registries
        .iter()
        .filter(|r| image.starts_with(&r.hostname))
        .map(|r| RegistryAuth {
            hostname: r.hostname.clone(),
            username: r.username.clone(),
            password: r.password.clone(),
            email: r.email.clone(),
        })
        .collect()
}

fn matching_secret<'a>(
    name: &str,
    image: &str,
    event: EventKind,
    plugin_shaped: bool,
    secrets: &'a [Secret],
) -> Option<&'a Secret> {
    secrets.iter().find(|s| {
        s.name == name
            && (s.event_allow_list.is_empty() || s.event_allow_list.contains(&event))
            && (s.image_allow_list.is_empty() || image_in_allow_list(image, &s.image_allow_list))
            && (!s.plugin_only || plugin_shaped)
    })
}

#[cfg(test)]
#[path = "lower_tests.rs"]
mod tests;
