// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes of the four collaborator traits, for use across the
//! workspace's test suites. Gated behind `#[cfg(any(test, feature =
//! "test-support"))]`.

use crate::{BindContext, Environment, ForgeIdentity, MetadataProvider, Registry, RegistryStore};
use crate::{Secret, SecretStore};
use pc_core::SourceSpec;

#[derive(Debug, Clone, Default)]
pub struct FakeForgeSource {
    pub specs: Vec<SourceSpec>,
}

impl FakeForgeSource {
    pub fn new(specs: Vec<SourceSpec>) -> Self {
        Self { specs }
    }
}

impl crate::ForgeSource for FakeForgeSource {
    fn specs(&self) -> Vec<SourceSpec> {
        self.specs.clone()
    }
}

/// Binds the standard CI_* environment conventions from the bind
/// context. Matrix values and caller globals are not this provider's
/// job — the metadata binder in `pc-spec` folds those in afterward.
#[derive(Debug, Clone, Default)]
pub struct StandardMetadataProvider;

impl MetadataProvider for StandardMetadataProvider {
    fn bind(&self, ctx: &BindContext) -> Environment {
        let mut env = Environment::new();
        env.insert("CI_FORGE_URL".into(), ctx.forge.url.clone());
        env.insert("CI_FORGE_NAME".into(), ctx.forge.name.clone());
        env.insert("CI_REPO".into(), ctx.repo.full_name.clone());
        env.insert(
            "CI_REPO_PRIVATE".into(),
            ctx.repo.private.to_string(),
        );
        env.insert(
            "CI_REPO_TRUSTED".into(),
            ctx.repo.trusted.to_string(),
        );
        env.insert(
            "CI_PIPELINE_NUMBER".into(),
            ctx.current_pipeline.number.to_string(),
        );
        env.insert(
            "CI_PIPELINE_EVENT".into(),
            ctx.current_pipeline.event.as_str().to_string(),
        );
        env.insert(
            "CI_COMMIT_BRANCH".into(),
            ctx.current_pipeline.branch.clone(),
        );
        env.insert(
            "CI_COMMIT_SHA".into(),
            ctx.current_pipeline.commit_sha.clone(),
        );
        env.insert(
            "CI_COMMIT_REF".into(),
            ctx.current_pipeline.ref_name.clone(),
        );
        env.insert(
            "CI_COMMIT_MESSAGE".into(),
            ctx.current_pipeline.message.clone(),
        );
        env.insert(
            "CI_COMMIT_AUTHOR".into(),
            ctx.current_pipeline.author.clone(),
        );
        if let Some(prev) = ctx.previous_pipeline {
            env.insert("CI_PREV_COMMIT_SHA".into(), prev.commit_sha.clone());
            env.insert("CI_PREV_PIPELINE_NUMBER".into(), prev.number.to_string());
        }
        env.insert("CI_WORKFLOW_NAME".into(), ctx.workflow_name.to_string());
        env.insert("CI_PIPELINE_URL".into(), ctx.event_url.to_string());
        env
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeSecretStore {
    pub secrets: Vec<Secret>,
}

impl FakeSecretStore {
    pub fn new(secrets: Vec<Secret>) -> Self {
        Self { secrets }
    }
}

impl SecretStore for FakeSecretStore {
    fn secrets(&self) -> Vec<Secret> {
        self.secrets.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRegistryStore {
    pub registries: Vec<Registry>,
}

impl FakeRegistryStore {
    pub fn new(registries: Vec<Registry>) -> Self {
        Self { registries }
    }
}

impl RegistryStore for FakeRegistryStore {
    fn registries(&self) -> Vec<Registry> {
        self.registries.clone()
    }
}
