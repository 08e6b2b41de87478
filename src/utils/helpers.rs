use regex::Regex;

/// Derive a lowercase, URL-safe slug from a post title.
///
/// Runs of anything outside `[a-z0-9]` collapse into a single `-`, and
/// leading/trailing separators are stripped, so "Test Post" becomes
/// "test-post".
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let separators = Regex::new(r"[^a-z0-9]+").unwrap();
    separators
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
