// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the pipeline compilation core.
//!
//! Every component's error converts into this one enum via `#[from]` so
//! the compiler's top-level entry point can propagate with a single `?`.
//! There is no partial success: the first error aborts the whole
//! compilation.

use thiserror::Error;

/// Errors the compiler can return. Kinds match the ones named throughout
/// the design: one error per component, never a blended cause.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Caller supplied zero source specifications when at least one was
    /// required.
    #[error("empty source set")]
    EmptySet,

    /// A `matrix:` stanza could not be parsed.
    #[error("matrix parse error in {file}: {message}")]
    MatrixParseError { file: String, message: String },

    /// Matrix expansion would exceed the configured ceiling.
    #[error("matrix in {file} expands to {actual} combinations, exceeding the limit of {limit}")]
    MatrixTooLarge {
        file: String,
        limit: usize,
        actual: usize,
    },

    /// Variable substitution hit an unknown variable or a malformed
    /// `${...}` placeholder.
    #[error("substitution error in {file}: {message}")]
    SubstitutionError { file: String, message: String },

    /// The substituted text failed to parse against the declarative
    /// schema.
    #[error("pipeline parse error in {file}: {message}")]
    PipelineParseError { file: String, message: String },

    /// A structural or trust-sensitive lint rule was violated.
    #[error("lint error in {file} at {location}: {message}")]
    LintError {
        file: String,
        location: String,
        message: String,
    },

    /// The `when` predicate failed to evaluate (not: evaluated to false).
    #[error("when-filter error in {file}: {message}")]
    FilterError { file: String, message: String },

    /// Lowering failed, e.g. an author-named secret reference could not
    /// be resolved.
    #[error("compile error in {workflow}: {message}")]
    CompileError { workflow: String, message: String },

    /// Two workflows (possibly from different files) share a name.
    #[error("duplicate workflow name '{0}' across source files")]
    DuplicateWorkflowName(String),

    /// After dependency reconciliation, every surviving workflow is
    /// skipped — there is nothing runnable to start from.
    #[error("no startpoint: every surviving workflow is skipped")]
    NoStartpoint,

    /// The caller's cancellation signal fired mid-compilation.
    #[error("compilation cancelled")]
    Cancelled,
}
