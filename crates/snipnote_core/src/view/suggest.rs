//! Tag autocomplete suggestions.

use crate::model::collection::Collection;

/// Fixed suggestion list offered by the tag input.
pub const LANGUAGE_SUGGESTIONS: &[&str] = &[
    "markdown",
    "bash",
    "c",
    "cpp",
    "csharp",
    "css",
    "dart",
    "go",
    "html",
    "java",
    "javascript",
    "json",
    "kotlin",
    "php",
    "python",
    "ruby",
    "rust",
    "sql",
    "swift",
    "typescript",
    "yaml",
];

/// Returns fixed-list entries starting with `prefix` (ASCII case-insensitive),
/// then tags already used in `collection` that match and are not in the list.
pub fn suggest_tags(prefix: &str, collection: &Collection) -> Vec<String> {
    let needle = prefix.trim().to_ascii_lowercase();
    let matches = |candidate: &str| candidate.to_ascii_lowercase().starts_with(&needle);

    let mut suggestions: Vec<String> = LANGUAGE_SUGGESTIONS
        .iter()
        .copied()
        .filter(|candidate| matches(*candidate))
        .map(str::to_string)
        .collect();
    for tag in collection.tags() {
        if matches(tag) && !LANGUAGE_SUGGESTIONS.contains(&tag) {
            suggestions.push(tag.to_string());
        }
    }
    suggestions
}
