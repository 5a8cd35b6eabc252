//! English pluralization for relation table names.
//!
//! Navigation segments name relations (`tag`); the correlated subquery
//! targets the relation's table (`tags`). The rules cover the regular
//! endings plus the irregulars and uncountables that show up in schemas.

const UNCOUNTABLE: &[&str] = &[
    "metadata",
    "data",
    "information",
    "equipment",
    "series",
    "species",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
];

/// Returns the plural form of a singular noun.
#[must_use]
pub(crate) fn pluralize(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return String::from(word);
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return String::from(*plural);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}
