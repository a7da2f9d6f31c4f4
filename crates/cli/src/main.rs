// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pcc`: compiles a directory of declarative pipeline files against a
//! TOML fixture describing the forge/repo/event/config context, and
//! prints the resulting plan as JSON.
//!
//! This is a local harness, not the production entry point — a real
//! deployment drives `pc-compiler` from a forge webhook handler, not a
//! directory on disk.

use anyhow::{Context, Result};
use clap::Parser;
use pc_collab::fakes::{FakeRegistryStore, FakeSecretStore, StandardMetadataProvider};
use pc_collab::{
    ConfigSnapshot, EventKind, ForgeIdentity, ForgeSource, PipelineMeta, Registry, RepoMeta,
    Secret,
};
use pc_compiler::{compile, CompileRequest};
use pc_core::{FixedPrefixGen, PrefixGen, SourceSpec, UlidPrefixGen};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pcc",
    about = "Compile a directory of declarative pipeline files into an executable plan"
)]
struct Args {
    /// Directory containing .yaml/.yml pipeline source files.
    pipelines_dir: PathBuf,
    /// TOML fixture describing the forge/repo/pipeline/config context.
    fixture: PathBuf,
    /// Use a fixed identifier prefix instead of a fresh ULID, for
    /// reproducible output.
    #[arg(long)]
    fixed_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    forge: ForgeFixture,
    repo: RepoFixture,
    pipeline: PipelineFixture,
    #[serde(default)]
    previous_pipeline: Option<PipelineFixture>,
    config: ConfigSnapshot,
    #[serde(default)]
    secrets: Vec<SecretFixture>,
    #[serde(default)]
    registries: Vec<RegistryFixture>,
    #[serde(default)]
    globals: BTreeMap<String, String>,
    event_url: String,
}

#[derive(Debug, Deserialize)]
struct ForgeFixture {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RepoFixture {
    full_name: String,
    #[serde(default)]
    trusted: bool,
    #[serde(default)]
    private: bool,
}

#[derive(Debug, Deserialize)]
struct PipelineFixture {
    number: u64,
    event: String,
    branch: String,
    commit_sha: String,
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    changed_files: Vec<String>,
}

impl PipelineFixture {
    fn into_meta(self) -> Result<PipelineMeta> {
        let event = EventKind::parse(&self.event)
            .with_context(|| format!("unknown event kind '{}'", self.event))?;
        Ok(PipelineMeta {
            number: self.number,
            event,
            branch: self.branch,
            commit_sha: self.commit_sha,
            ref_name: self.ref_name,
            message: self.message,
            author: self.author,
            changed_files: self.changed_files,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SecretFixture {
    name: String,
    value: String,
    #[serde(default)]
    image_allow_list: Vec<String>,
    #[serde(default)]
    event_allow_list: Vec<String>,
    #[serde(default)]
    plugin_only: bool,
}

impl SecretFixture {
    fn into_secret(self) -> Result<Secret> {
        let event_allow_list = self
            .event_allow_list
            .iter()
            .map(|e| EventKind::parse(e).with_context(|| format!("unknown event kind '{e}'")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Secret {
            name: self.name,
            value: self.value,
            image_allow_list: self.image_allow_list,
            event_allow_list,
            plugin_only: self.plugin_only,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFixture {
    hostname: String,
    username: String,
    password: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<RegistryFixture> for Registry {
    fn from(r: RegistryFixture) -> Self {
        Registry {
            hostname: r.hostname,
            username: r.username,
            password: r.password,
            email: r.email,
        }
    }
}

struct DirForgeSource {
    specs: Vec<SourceSpec>,
}

impl DirForgeSource {
    fn load(dir: &Path) -> Result<Self> {
        let mut specs = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
            let entry = entry?;
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "yaml" && ext != "yml" {
                continue;
            }
            let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            specs.push(SourceSpec::new(name, bytes));
        }
        Ok(Self { specs })
    }
}

impl ForgeSource for DirForgeSource {
    fn specs(&self) -> Vec<SourceSpec> {
        self.specs.clone()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let fixture_text = fs::read_to_string(&args.fixture)
        .with_context(|| format!("reading fixture {}", args.fixture.display()))?;
    let fixture: Fixture = toml::from_str(&fixture_text)
        .with_context(|| format!("parsing fixture {}", args.fixture.display()))?;

    let forge_identity = ForgeIdentity {
        name: fixture.forge.name,
        url: fixture.forge.url,
    };
    let repo = RepoMeta {
        full_name: fixture.repo.full_name,
        trusted: fixture.repo.trusted,
        private: fixture.repo.private,
    };
    let current_pipeline = fixture.pipeline.into_meta()?;
    let previous_pipeline = fixture
        .previous_pipeline
        .map(PipelineFixture::into_meta)
        .transpose()?;
    let secrets = fixture
        .secrets
        .into_iter()
        .map(SecretFixture::into_secret)
        .collect::<Result<Vec<_>>>()?;
    let registries: Vec<Registry> = fixture.registries.into_iter().map(Registry::from).collect();

    let forge = DirForgeSource::load(&args.pipelines_dir)?;
    let metadata = StandardMetadataProvider;
    let secret_store = FakeSecretStore::new(secrets);
    let registry_store = FakeRegistryStore::new(registries);

    let id_gen: Box<dyn PrefixGen> = match args.fixed_prefix {
        Some(p) => Box::new(FixedPrefixGen::new(p)),
        None => Box::new(UlidPrefixGen),
    };
    let never_cancelled = || false;

    let req = CompileRequest {
        forge: &forge,
        metadata: &metadata,
        secrets: &secret_store,
        registries: &registry_store,
        config: &fixture.config,
        forge_identity: &forge_identity,
        repo: &repo,
        current_pipeline: &current_pipeline,
        previous_pipeline: previous_pipeline.as_ref(),
        event_url: &fixture.event_url,
        globals: &fixture.globals,
        id_gen: id_gen.as_ref(),
        cancelled: &never_cancelled,
    };

    let items = compile(&req)?;
    let out: Vec<_> = items
        .iter()
        .map(|item| {
            serde_json::json!({
                "pid": item.record.pid,
                "name": item.name(),
                "skipped": item.record.is_skipped(),
                "depends_on": item.depends_on,
                "runs_on": item.runs_on,
                "platform": item.platform,
                "steps": item.plan.step_count(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
