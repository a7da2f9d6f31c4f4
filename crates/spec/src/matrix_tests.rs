// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn no_matrix_block_yields_single_empty_axis() {
    let src = b"steps:\n  build:\n    image: alpine\n";
    let axes = expand_matrix(src, "pipeline.yaml", 256).unwrap();
    assert_eq!(axes, vec![Axis::new()]);
}

#[test]
fn scalar_axis_value_is_wrapped_as_singleton() {
    let src = b"matrix:\n  go: \"1.22\"\n";
    let axes = expand_matrix(src, "pipeline.yaml", 256).unwrap();
    assert_eq!(axes.len(), 1);
    assert_eq!(axes[0].get("go"), Some(&"1.22".to_string()));
}

#[test]
fn two_axes_expand_in_declaration_order_with_first_slowest() {
    let src = b"matrix:\n  go:\n    - \"1.21\"\n    - \"1.22\"\n  os:\n    - linux\n    - darwin\n    - windows\n";
    let axes = expand_matrix(src, "pipeline.yaml", 256).unwrap();
    assert_eq!(axes.len(), 6);
    let pairs: Vec<(&str, &str)> = axes
        .iter()
        .map(|a| (a.get("go").unwrap().as_str(), a.get("os").unwrap().as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("1.21", "linux"),
            ("1.21", "darwin"),
            ("1.21", "windows"),
            ("1.22", "linux"),
            ("1.22", "darwin"),
            ("1.22", "windows"),
        ]
    );
}

#[test]
fn matrix_above_limit_is_rejected() {
    let src = b"matrix:\n  a:\n    - 1\n    - 2\n    - 3\n  b:\n    - 1\n    - 2\n    - 3\n";
    let err = expand_matrix(src, "pipeline.yaml", 5).unwrap_err();
    match err {
        CompileError::MatrixTooLarge { limit, actual, .. } => {
            assert_eq!(limit, 5);
            assert_eq!(actual, 9);
        }
        other => panic!("expected MatrixTooLarge, got {other:?}"),
    }
}

#[test]
fn empty_axis_value_list_is_rejected() {
    let src = b"matrix:\n  go: []\n";
    let err = expand_matrix(src, "pipeline.yaml", 256).unwrap_err();
    assert!(matches!(err, CompileError::MatrixParseError { .. }));
}

#[test]
fn malformed_matrix_block_is_rejected() {
    let src = b"matrix: not-a-mapping\n";
    let err = expand_matrix(src, "pipeline.yaml", 256).unwrap_err();
    assert!(matches!(err, CompileError::MatrixParseError { .. }));
}
