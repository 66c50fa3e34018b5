//! Scoped environment variable overrides.
//!
//! Mutating the environment is only sound while no other thread reads it,
//! so every test using these helpers must be `#[serial]`.

#![allow(dead_code)]

/// Variables that affect color detection.
pub const COLOR_VARS: [&str; 5] = [
    "NO_COLOR",
    "FORCE_COLOR",
    "MAKE_COLORS",
    "MAKE_COLORS_FORCE",
    "TERM",
];

/// Run `f` with the given variables set (`Some`) or removed (`None`).
///
/// Original values are restored afterwards.
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let originals: Vec<(&str, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (*key, std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        set(key, *value);
    }

    let result = f();

    for (key, value) in &originals {
        set(key, value.as_deref());
    }

    result
}

/// Run `f` with every color variable removed except the given ones.
pub fn with_color_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let overrides: Vec<(&str, Option<&str>)> = COLOR_VARS
        .iter()
        .map(|key| {
            let value = vars.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    with_env(&overrides, f)
}

fn set(key: &str, value: Option<&str>) {
    // SAFETY: callers are serialized test functions; no other thread
    // touches the environment meanwhile.
    match value {
        Some(value) => unsafe { std::env::set_var(key, value) },
        None => unsafe { std::env::remove_var(key) },
    }
}
