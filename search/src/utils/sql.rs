//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching.
///
/// # Example
///
/// ```
/// use search_filters::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Build a LIKE pattern from user input with user-facing wildcards
///
/// The input is escaped first, then `wildcard_any` becomes `%` and
/// `wildcard_one` becomes `_`. Empty wildcards are left untranslated.
pub fn like_pattern(input: &str, wildcard_any: &str, wildcard_one: &str) -> String {
    let mut pattern = escape_like_pattern(input);
    if !wildcard_any.is_empty() {
        pattern = pattern.replace(&escape_like_pattern(wildcard_any), "%");
    }
    if !wildcard_one.is_empty() {
        pattern = pattern.replace(&escape_like_pattern(wildcard_one), "_");
    }
    pattern
}
