use once_cell::sync::Lazy;
use regex::Regex;

use crate::generator::GeneratorError;

static NAME_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z][A-Za-z0-9]*$").expect("name pattern is valid"));

/// Strict and reserved Rust keywords; the name becomes a module path segment.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Capitalized, these would shadow a type or variant the generated files refer to.
const SHADOWING: &[&str] = &[
    "arc", "clone", "debug", "deserialize", "entity", "ok", "option", "result", "router",
    "serialize", "some", "string", "validate", "vec",
];

/// Checks an entity name and returns its lower-cased form, used for directories,
/// file names and the default route.
pub fn validate_name(raw: &str) -> Result<String, GeneratorError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(GeneratorError::InvalidName("Name is required".into()));
    }
    if !NAME_RULE.is_match(name) {
        return Err(GeneratorError::InvalidName(
            "Name must start with a letter and contain only letters and numbers".into(),
        ));
    }
    let name = name.to_lowercase();
    if KEYWORDS.contains(&name.as_str()) {
        return Err(GeneratorError::InvalidName(format!(
            "{name:?} is a reserved Rust keyword and cannot name a module"
        )));
    }
    if SHADOWING.contains(&name.as_str()) {
        return Err(GeneratorError::InvalidName(format!(
            "{name:?} would clash with a type used by the generated code"
        )));
    }
    Ok(name)
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English plural by suffix rules only; irregular nouns come out regular.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();

    if ["s", "sh", "ch", "x", "z"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }

    if let Some(stem) = word.strip_suffix(&['y', 'Y'][..]) {
        let before = stem.chars().last();
        if before.is_some_and(|c| c.is_alphabetic() && !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }

    if lower.ends_with("fe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if lower.ends_with('f') {
        return format!("{}ves", &word[..word.len() - 1]);
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_by_suffix() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("equipment"), "equipments");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("quiz"), "quizes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("person"), "persons");
    }

    #[test]
    fn names_are_checked_and_lowercased() {
        assert_eq!(validate_name("OrderItem").unwrap(), "orderitem");
        assert_eq!(validate_name(" vessel2 ").unwrap(), "vessel2");
        for bad in ["", "   ", "2fast", "order-item", "order_item", "café"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn keywords_and_shadowing_names_are_rejected() {
        for bad in ["box", "Type", "self", "SELF", "match", "crate", "option", "String", "entity"] {
            match validate_name(bad) {
                Err(GeneratorError::InvalidName(message)) => {
                    assert!(message.contains(&bad.to_lowercase()), "{message}")
                }
                other => panic!("{bad:?} accepted: {other:?}"),
            }
        }
        assert_eq!(validate_name("boxes").unwrap(), "boxes");
        assert_eq!(validate_name("matcher").unwrap(), "matcher");
    }

    #[test]
    fn case_helpers() {
        assert_eq!(capitalize("category"), "Category");
        assert_eq!(capitalize(""), "");
    }
}
