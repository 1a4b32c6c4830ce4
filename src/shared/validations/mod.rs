/// Trims a free-text search term; blank terms mean "no filter".
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Optional form text: blank or whitespace-only input counts as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Patch for an optional text column: `None` keeps the stored value,
/// `Some(None)` or blank text clears it.
pub fn patch_text(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(non_blank)
}

/// Case-insensitive substring match used by in-memory filters.
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
