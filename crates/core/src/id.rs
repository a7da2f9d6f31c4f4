// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier generation.
//!
//! The compiler needs exactly one source of non-determinism: the
//! per-compilation prefix embedded in every container/volume/network
//! name. [`PrefixGen`] abstracts that so tests can inject a fixed value
//! and still assert byte-identical plans.

use ulid::Ulid;

/// Trait for truncating identifiers to a short prefix.
pub trait ShortId {
    /// Returns a string slice truncated to at most `n` characters.
    fn short(&self, n: usize) -> &str;
}

impl ShortId for str {
    fn short(&self, n: usize) -> &str {
        if self.len() <= n {
            self
        } else {
            &self[..n]
        }
    }
}

/// Generates the per-compilation time-sortable token used to namespace
/// every name the plan requests.
pub trait PrefixGen: Send + Sync {
    /// A lowercase, time-sortable identifier, unique per compilation.
    fn next(&self) -> String;
}

/// Production generator: a lowercase ULID.
///
/// A time-sortable identifier is required (not a plain random UUID) so
/// operators grepping container names by prefix get chronological
/// ordering for free.
#[derive(Clone, Default)]
pub struct UlidPrefixGen;

impl PrefixGen for UlidPrefixGen {
    fn next(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

/// Test generator: always returns the same value, so compilations are
/// byte-identical modulo nothing.
#[derive(Clone)]
pub struct FixedPrefixGen(pub String);

impl FixedPrefixGen {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Default for FixedPrefixGen {
    fn default() -> Self {
        Self("01fixedcompilationtestulid".to_string())
    }
}

impl PrefixGen for FixedPrefixGen {
    fn next(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
