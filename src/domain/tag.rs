//! Tag extraction for todo.txt tokens
//!
//! Projects are written `+Project`, `p:Project` or `p-Project`.
//! A task is prioritized when its first token is a `(X)` marker.

/// Returns true if the token names a project
pub fn is_project_token(token: &str) -> bool {
    token.starts_with('+') || token.starts_with("p:") || token.starts_with("p-")
}

/// Returns true if the line's first token is a priority marker
pub fn is_priority_line(tokens: &[&str]) -> bool {
    tokens.first().is_some_and(|first| first.starts_with('('))
}

/// Iterates over the project tokens of a text, in order of appearance
pub fn project_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace().filter(|token| is_project_token(token))
}
