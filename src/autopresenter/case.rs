//! Attribute key case conversion.
//!
//! Formatter lookup tries a key as written, then in snake_case, then in camelCase, so a
//! formatter registered as `full_name` also answers `fullName` and the other way round.

/// Converts a key to snake_case.
///
/// Keys made only of lowercase ASCII letters come back unchanged. Otherwise each
/// whitespace-separated word is capitalized, whitespace is dropped, and an underscore is
/// inserted before every uppercase letter that follows another character.
pub fn snake(key: &str) -> String {
    if !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase()) {
        return key.to_string();
    }

    let joined: String = key.split_whitespace().map(upper_first).collect();
    let mut out = String::with_capacity(joined.len() + 4);
    for (i, c) in joined.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Converts a key to camelCase.
///
/// Dashes, underscores and spaces separate words; every word is capitalized, the words are
/// joined, and the first character is lowercased.
pub fn camel(key: &str) -> String {
    let studly: String = key.split(['-', '_', ' ']).map(upper_first).collect();
    lower_first(&studly)
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
