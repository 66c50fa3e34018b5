//! Logged assertion helpers for make_colors tests.
//!
//! These wrap standard assertions with tracing output so CI logs show the
//! compared values even when the failure message is truncated.

#![allow(dead_code)]

use std::fmt::Debug;

use make_colors::cells;

/// Assert equality with detailed logging.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert a result is `Ok` and return its value.
#[track_caller]
pub fn assert_ok_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => {
            tracing::trace!(context = context, value = ?value, "result is ok");
            value
        }
        Err(err) => {
            tracing::error!(context = context, error = ?err, "expected Ok");
            panic!("{context}: expected Ok, got Err({err:?})");
        }
    }
}

/// Assert a result is `Err` and return the error.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    match result {
        Err(err) => {
            tracing::trace!(context = context, error = ?err, "result is err");
            err
        }
        Ok(value) => {
            tracing::error!(context = context, value = ?value, "expected Err");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

/// Assert the output contains no escape byte.
#[track_caller]
pub fn assert_no_escapes(context: &str, output: &str) {
    if output.contains('\x1b') {
        tracing::error!(context = context, output = ?output, "unexpected escape sequence");
    }
    assert!(!output.contains('\x1b'), "{context}: escape in {output:?}");
}

/// Assert every line has the same display width, ignoring escapes.
///
/// Returns that width.
#[track_caller]
pub fn assert_uniform_width(context: &str, output: &str) -> usize {
    let widths: Vec<usize> = output.lines().map(cells::visible_len).collect();
    tracing::debug!(context = context, widths = ?widths, "line widths");
    let first = widths.first().copied().unwrap_or(0);
    assert!(
        widths.iter().all(|&width| width == first),
        "{context}: uneven line widths {widths:?} in\n{output}"
    );
    first
}
