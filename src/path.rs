//! Windows path joining for enumeration results.
//!
//! These helpers operate on strings rather than [`std::path::Path`] so the
//! joined form is identical whichever host builds it.

/// Primary separator the kernel uses.
pub const DIRECTORY_SEPARATOR: char = '\\';
/// Alternate separator accepted by Win32.
pub const ALT_DIRECTORY_SEPARATOR: char = '/';
/// Separator between a drive letter and the rest of a path.
pub const VOLUME_SEPARATOR: char = ':';

pub fn is_directory_separator(c: char) -> bool {
    c == DIRECTORY_SEPARATOR || c == ALT_DIRECTORY_SEPARATOR
}

pub fn ends_in_directory_separator(path: &str) -> bool {
    path.chars().next_back().is_some_and(is_directory_separator)
}

fn starts_with_directory_separator(path: &str) -> bool {
    path.chars().next().is_some_and(is_directory_separator)
}

/// Joins path segments, skipping empty ones and inserting a separator only
/// where neither neighbour already supplies one.
pub fn join(parts: &[&str]) -> String {
    let mut joined = String::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for part in parts.iter().filter(|p| !p.is_empty()) {
        if !joined.is_empty()
            && !ends_in_directory_separator(&joined)
            && !starts_with_directory_separator(part)
        {
            joined.push(DIRECTORY_SEPARATOR);
        }
        joined.push_str(part);
    }
    joined
}

/// `X:` with nothing after it, which is relative to the drive's current
/// directory and must not gain a separator.
fn is_bare_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() == 2 && bytes[1] == VOLUME_SEPARATOR as u8
}

/// `\`, `/` or `X:\`, which keep their separator when trimmed.
fn is_root(path: &str) -> bool {
    match path.as_bytes() {
        [sep] => is_directory_separator(*sep as char),
        [_, b':', sep] => is_directory_separator(*sep as char),
        _ => false,
    }
}

/// Drops one trailing separator unless `path` is a root.
pub fn trim_ending_directory_separator(path: &str) -> &str {
    if ends_in_directory_separator(path) && !is_root(path) {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// Full path of `file_name` in `directory`.
pub fn full_path(directory: &str, file_name: &str) -> String {
    join(&[directory, file_name])
}

/// Full path of an entry expressed relative to the root the caller passed in,
/// keeping whatever trailing separator they wrote.
///
/// `root_directory` is `original_root_directory` with trailing separators
/// trimmed, and `directory` is the directory the entry was found in, which
/// starts with `root_directory`.
pub fn specified_full_path(
    original_root_directory: &str,
    root_directory: &str,
    directory: &str,
    file_name: &str,
) -> String {
    // Below the root, slicing off the root leaves a leading separator. The
    // original root may already end in one, in which case drop it here.
    let mut relative = directory.get(root_directory.len()..).unwrap_or_default();
    if ends_in_directory_separator(original_root_directory) {
        if let Some(rest) = relative.strip_prefix(is_directory_separator) {
            relative = rest;
        }
    }

    if is_bare_drive(original_root_directory) {
        let mut path = String::from(original_root_directory);
        path.push_str(&join(&[relative, file_name]));
        return path;
    }

    join(&[original_root_directory, relative, file_name])
}
