// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.
//!
//! Everything here is a pure string transform: nothing consults the
//! filesystem, so the same input always yields the same output on any host.

use crate::types::TargetOs;

/// Drive that POSIX-rooted paths are mapped onto for a Windows target.
const SYNTHETIC_DRIVE: &str = "C:";

/// Prefix stripped from Windows paths for a POSIX target.
const WINDOWS_ROOT: &str = "C:\\";

/// Rewrite `path` into the canonical form for `target`.
///
/// - Windows: a POSIX-rooted path (`/data/x`) becomes `C:\data\x`; anything
///   else only has `/` converted to `\`.
/// - POSIX: a `C:\`-rooted path (`C:\data\x`) becomes `/data/x`; anything
///   else only has `\` converted to `/`.
///
/// The result contains only the target's separator, which makes the
/// function idempotent.
pub fn normalize(path: &str, target: TargetOs) -> String {
    match target {
        TargetOs::Windows => {
            let converted = path.replace('/', "\\");
            if path.starts_with('/') {
                format!("{SYNTHETIC_DRIVE}{converted}")
            } else {
                converted
            }
        }
        TargetOs::Posix => match path.strip_prefix(WINDOWS_ROOT) {
            Some(rest) => format!("/{}", rest.replace('\\', "/")),
            None => path.replace('\\', "/"),
        },
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final path segment, ignoring trailing separators.
///
/// `"/data/app.log"` → `"app.log"`; `"/data/dir/"` → `"dir"`.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { &path[..1] };
    }
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Extension of the last path segment, including the dot.
///
/// Empty when the last segment has no `.`: `"/a.d/file"` → `""`,
/// `"/a/file.tmp"` → `".tmp"`, `"/a/.bashrc"` → `".bashrc"`.
pub fn extension(path: &str) -> &str {
    let segment = match path.rfind(is_separator) {
        Some(idx) => &path[idx + 1..],
        None => path,
    };
    match segment.rfind('.') {
        Some(idx) => &segment[idx..],
        None => "",
    }
}
