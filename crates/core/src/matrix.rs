// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A matrix axis: one point in a parameter matrix.

use indexmap::IndexMap;

/// One point in a parameter matrix — a mapping of named scalars.
///
/// Insertion order is preserved (`IndexMap`) so that the axis values
/// appear in declaration order wherever they're rendered.
pub type Axis = IndexMap<String, String>;
