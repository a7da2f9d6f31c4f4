// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Matrix expansion: turns a workflow's `matrix:` block into the set of
//! axis combinations the workflow will be cloned across.
//!
//! This runs on the raw pre-substitution bytes of the source file, since
//! the matrix values themselves are what `${...}` placeholders later
//! resolve against.

use pc_core::{Axis, CompileError};
use serde_yaml::Value;

fn value_to_string(value: &Value, file: &str) -> Result<String, CompileError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CompileError::MatrixParseError {
            file: file.to_string(),
            message: format!("matrix axis value must be a scalar, found {other:?}"),
        }),
    }
}

/// Expand the `matrix:` block of one source file into its axis
/// combinations. A workflow without a `matrix:` block expands to a
/// single empty axis — i.e. one workflow, unchanged.
///
/// The first-declared axis varies slowest; the last-declared axis
/// varies fastest, so axes nest in declaration order.
pub fn expand_matrix(source: &[u8], file: &str, limit: usize) -> Result<Vec<Axis>, CompileError> {
    let doc: Value =
        serde_yaml::from_slice(source).map_err(|e| CompileError::MatrixParseError {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    let mapping = match doc.as_mapping() {
        Some(m) => m,
        None => return Ok(vec![Axis::new()]),
    };

    let matrix_value = match mapping.get(Value::String("matrix".to_string())) {
        Some(v) => v,
        None => return Ok(vec![Axis::new()]),
    };

    let matrix_mapping = matrix_value.as_mapping().ok_or_else(|| CompileError::MatrixParseError {
        file: file.to_string(),
        message: "matrix block must be a mapping of axis name to a value or list of values"
            .to_string(),
    })?;

    let mut axes: Vec<(String, Vec<String>)> = Vec::with_capacity(matrix_mapping.len());
    for (k, v) in matrix_mapping {
        let name = k
            .as_str()
            .ok_or_else(|| CompileError::MatrixParseError {
                file: file.to_string(),
                message: "matrix axis name must be a string".to_string(),
            })?
            .to_string();
        let values = match v {
            Value::Sequence(seq) => seq
                .iter()
                .map(|item| value_to_string(item, file))
                .collect::<Result<Vec<_>, _>>()?,
            other => vec![value_to_string(other, file)?],
        };
        if values.is_empty() {
            return Err(CompileError::MatrixParseError {
                file: file.to_string(),
                message: format!("matrix axis '{name}' has no values"),
            });
        }
        axes.push((name, values));
    }

    if axes.is_empty() {
        return Ok(vec![Axis::new()]);
    }

    let mut combos: Vec<Axis> = vec![Axis::new()];
    for (name, values) in &axes {
        let mut next = Vec::with_capacity(combos.len() * values.len());
        for combo in &combos {
            for value in values {
                let mut c = combo.clone();
                c.insert(name.clone(), value.clone());
                next.push(c);
            }
        }
        combos = next;

        if combos.len() > limit {
            tracing::warn!(file, limit, actual = combos.len(), "matrix product exceeds configured limit");
            return Err(CompileError::MatrixTooLarge {
                file: file.to_string(),
                limit,
                actual: combos.len(),
            });
        }
    }

    Ok(combos)
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
