//! File name handling for uploaded audio
//!
//! Clients name uploads `<content-hash>:<n>.<ext>`. The server never checks
//! the hash; it only strips directory components and the extension.

/// Reduce a client-declared file name to a bare file name
///
/// Keeps only the final path segment, treating both `/` and `\` as
/// separators. The segment is otherwise kept byte for byte, whitespace
/// included. Returns `None` for names that are empty after stripping or
/// that would refer to a directory (`.`, `..`).
pub fn sanitize_file_name(declared: &str) -> Option<&str> {
    let name = declared.rsplit(['/', '\\']).next().unwrap_or(declared);

    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

/// Split `name` into stem and extension at the last `.`
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => {
            let dot = leading + pos;
            (&name[..dot], Some(&name[dot + 1..]))
        }
        None => (name, None),
    }
}

/// Storage id for a sanitized file name: the name minus its extension
pub fn derive_id(name: &str) -> &str {
    split_extension(name).0
}

/// True when `name` is a single plain path segment safe to join onto the
/// storage folder
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
