//! String presentation helpers.

/// Convert a snake_case token into Title Case words joined by spaces.
///
/// `::`-delimited tokens are converted segment by segment and joined with
/// " - ", e.g. `web_app::wikidata` => "Web App - Wikidata".
pub fn to_human_readable(s: &str) -> String {
    if s.contains("::") {
        return s
            .split("::")
            .map(to_human_readable)
            .collect::<Vec<_>>()
            .join(" - ");
    }
    s.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Uppercase the first character only; the rest of the word is untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
