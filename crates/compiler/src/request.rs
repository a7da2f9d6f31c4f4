// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single bundle of inputs [`crate::compile`] needs: the four
//! external collaborators, the configuration snapshot, the event
//! context, and the cancellation signal.

use pc_collab::{ConfigSnapshot, Environment, ForgeIdentity, ForgeSource, MetadataProvider};
use pc_collab::{PipelineMeta, RegistryStore, RepoMeta, SecretStore};
use pc_core::PrefixGen;

pub struct CompileRequest<'a> {
    pub forge: &'a dyn ForgeSource,
    pub metadata: &'a dyn MetadataProvider,
    pub secrets: &'a dyn SecretStore,
    pub registries: &'a dyn RegistryStore,
    pub config: &'a ConfigSnapshot,
    pub forge_identity: &'a ForgeIdentity,
    pub repo: &'a RepoMeta,
    pub current_pipeline: &'a PipelineMeta,
    pub previous_pipeline: Option<&'a PipelineMeta>,
    pub event_url: &'a str,
    /// Caller-supplied global variables, lowest substitution precedence.
    pub globals: &'a Environment,
    pub id_gen: &'a dyn PrefixGen,
    /// Polled before each file and each matrix expansion; returning
    /// `true` aborts the compilation with [`pc_core::CompileError::Cancelled`].
    pub cancelled: &'a dyn Fn() -> bool,
}
