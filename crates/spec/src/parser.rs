// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses a substituted source document into a [`WorkflowSpec`].
//!
//! Runs after the substituter, so `${VAR}` references have already
//! resolved — a parse error here means the document shape itself is
//! wrong, never a missing variable.

use crate::grammar::WorkflowSpec;
use pc_core::CompileError;

pub fn parse(text: &str, file: &str) -> Result<WorkflowSpec, CompileError> {
    serde_yaml::from_str(text).map_err(|e| CompileError::PipelineParseError {
        file: file.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
