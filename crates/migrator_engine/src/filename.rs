use std::path::PathBuf;

use migrator_core::UNKNOWN_POST_NAME;

/// Relative Markdown path for a slug: `a/b/c` becomes `a/b/c.md`.
///
/// Both `/` and `\` separate segments. Empty, `.` and `..` segments are
/// dropped so the result always stays below the posts root.
pub fn post_relative_path(slug: &str) -> PathBuf {
    let mut segments: Vec<&str> = slug
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect();

    let file_stem = segments.pop().unwrap_or(UNKNOWN_POST_NAME);
    let mut path: PathBuf = segments.into_iter().collect();
    path.push(format!("{file_stem}.md"));
    path
}
