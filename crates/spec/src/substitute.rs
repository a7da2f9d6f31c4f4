// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable substitution: replaces `${VAR}` placeholders with values
//! from the bound environment.
//!
//! `$$` escapes to a literal `$`. A lone `$` not followed by `{` is
//! passed through unchanged — it isn't a placeholder opener. Anything
//! that looks like an opener but never closes, or whose name contains
//! characters other than ASCII alphanumerics and `_`, is rejected: this
//! is the brace-balance guard that keeps a malformed `${` from being
//! silently swallowed or from reading past its intended reference.
//!
//! The same guard applies to the replacement value itself. A variable
//! bound to text containing an unbalanced `{`/`}` is refused rather
//! than spliced in: otherwise a provider-controlled value (a commit
//! message, a branch name) could open or close a reference that was
//! never written in the template, which is exactly the injection this
//! pass exists to prevent.

use pc_collab::Environment;
use pc_core::CompileError;

fn braces_balanced(s: &str) -> bool {
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

pub fn substitute(text: &str, env: &Environment, file: &str) -> Result<String, CompileError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        if let Some(&(_, '$')) = chars.peek() {
            chars.next();
            out.push('$');
            continue;
        }

        if let Some(&(_, '{')) = chars.peek() {
            chars.next();
            let start = i + 2;
            let rest = &text[start..];
            let close = rest.find('}').ok_or_else(|| CompileError::SubstitutionError {
                file: file.to_string(),
                message: format!("unterminated '${{' reference starting at byte {i}"),
            })?;
            let name = &rest[..close];
            if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
                return Err(CompileError::SubstitutionError {
                    file: file.to_string(),
                    message: format!("invalid variable reference '${{{name}}}'"),
                });
            }
            let value = env.get(name).ok_or_else(|| CompileError::SubstitutionError {
                file: file.to_string(),
                message: format!("unknown variable '{name}'"),
            })?;
            if !braces_balanced(value) {
                return Err(CompileError::SubstitutionError {
                    file: file.to_string(),
                    message: format!(
                        "value bound to '{name}' contains an unbalanced brace and was refused"
                    ),
                });
            }
            out.push_str(value);
            for _ in 0..=close {
                chars.next();
            }
            continue;
        }

        out.push('$');
    }

    Ok(out)
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
