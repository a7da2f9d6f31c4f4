// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source specifications: the raw `(name, bytes)` pairs the forge
//! collaborator hands to the compiler.

/// An immutable `(name, bytes)` pair describing one pipeline source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Sort a set of source specs deterministically: pure lexicographic
/// order on the original (un-sanitized) `name`, byte-wise.
pub fn sort_sources(mut specs: Vec<SourceSpec>) -> Vec<SourceSpec> {
    specs.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    specs
}

/// Sanitize a source name for display: basename, strip one leading dot,
/// strip a trailing `.yml`/`.yaml` extension.
///
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)` for all `x`.
pub fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut base = base.trim_start_matches('.');
    loop {
        if let Some(stripped) = base.strip_suffix(".yaml").or_else(|| base.strip_suffix(".yml")) {
            base = stripped;
        } else {
            break;
        }
    }
    base.to_string()
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
