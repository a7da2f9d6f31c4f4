// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The declarative workflow tree: the typed, post-substitution shape
//! produced by [`crate::parse`].
//!
//! The grammar is closed — every struct here derives
//! `#[serde(deny_unknown_fields)]` so an unrecognized key anywhere in
//! the document is a parse error, not a silently-ignored typo.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value that may be written as a single string or a list of strings
/// in the source YAML.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct OneOrMany(pub Vec<String>);

impl OneOrMany {
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for OneOrMany {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }
        Ok(match Raw::deserialize(d)? {
            Raw::One(s) => OneOrMany(vec![s]),
            Raw::Many(v) => OneOrMany(v),
        })
    }
}

/// A `when` predicate. Every field that is present must match for the
/// predicate to hold; an absent field imposes no constraint. An
/// entirely absent `when` block always matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WhenSpec {
    #[serde(default)]
    pub event: Option<OneOrMany>,
    #[serde(default)]
    pub branch: Option<OneOrMany>,
    /// Glob patterns matched against the current pipeline's changed
    /// files.
    #[serde(default)]
    pub path: Option<OneOrMany>,
    /// Matrix coordinates that must match exactly (`axis_name: value`).
    #[serde(default)]
    pub matrix: BTreeMap<String, String>,
    /// A post-substitution comparison expression, e.g. `"main == main"`
    /// or `"staging != production"`.
    #[serde(default)]
    pub evaluate: Option<String>,
}

impl WhenSpec {
    pub fn is_empty(&self) -> bool {
        self.event.is_none()
            && self.branch.is_none()
            && self.path.is_none()
            && self.matrix.is_empty()
            && self.evaluate.is_none()
    }
}

/// A clone step. When the workflow omits this block entirely, the
/// compiler prepends a generated one using the administrator-default
/// clone image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CloneSpec {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// A background service attached alongside the steps of a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceSpec {
    pub image: String,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub commands: Vec<String>,
}

fn default_pull() -> bool {
    true
}

/// A container step. Closed key set: `image`, `commands`,
/// `entrypoint`, `environment`, `secrets`, `volumes`, `when`,
/// `settings`, `pull`, `detach`, `privileged`. `name` is not a step
/// key — it is the YAML map key under `steps:` and is injected by the
/// parser, mirroring how the source format names steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    #[serde(skip_deserializing, default)]
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub entrypoint: Option<Vec<String>>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    /// Names of secrets this step requests by name.
    #[serde(default)]
    pub secrets: Vec<String>,
    #[serde(default)]
    pub volumes: Vec<String>,
    #[serde(default)]
    pub when: Option<WhenSpec>,
    #[serde(default)]
    pub settings: BTreeMap<String, serde_yaml::Value>,
    #[serde(default = "default_pull")]
    pub pull: bool,
    #[serde(default)]
    pub detach: bool,
    #[serde(default)]
    pub privileged: bool,
}

impl StepSpec {
    /// A step is "plugin-shaped" when it declares no custom commands —
    /// the shape plugin-only secrets are restricted to.
    pub fn is_plugin_shaped(&self) -> bool {
        self.commands.is_empty()
    }
}

/// One declarative workflow, parsed and substituted, before linting and
/// lowering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkflowSpec {
    #[serde(default)]
    pub when: Option<WhenSpec>,
    /// Already consumed by the matrix expander before this struct is
    /// parsed; kept here (but ignored) purely so the closed schema
    /// doesn't reject a block it already processed upstream.
    #[serde(default)]
    pub matrix: Option<serde_yaml::Value>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub runs_on: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub clone: Option<CloneSpec>,
    #[serde(default, deserialize_with = "deserialize_steps")]
    pub steps: IndexMap<String, StepSpec>,
    #[serde(default)]
    pub services: IndexMap<String, ServiceSpec>,
    /// Author-declared variable block. Part of the closed schema but not
    /// yet consulted by substitution or metadata binding — see DESIGN.md.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// Inject the YAML map key into each step's `.name` field.
///
/// Walks entries one at a time instead of deserializing straight into an
/// `IndexMap` so a repeated step name is caught here: `IndexMap`'s own
/// `Deserialize` impl inserts by key like any other map and would silently
/// keep the last occurrence, which is wrong for a schema where the map key
/// doubles as the step's identity.
fn deserialize_steps<'de, D>(deserializer: D) -> Result<IndexMap<String, StepSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    struct V;
    impl<'de> serde::de::Visitor<'de> for V {
        type Value = IndexMap<String, StepSpec>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of named step blocks")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: serde::de::MapAccess<'de>,
        {
            let mut steps = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, mut step)) = map.next_entry::<String, StepSpec>()? {
                if steps.contains_key(&name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate step name `{name}`"
                    )));
                }
                step.name = name.clone();
                steps.insert(name, step);
            }
            Ok(steps)
        }
    }
    deserializer.deserialize_map(V)
}
