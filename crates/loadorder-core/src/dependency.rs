//! Parsed dependency lists.
//!
//! Content files declare prerequisites as a single comma-separated string
//! (`"core, physics , ui"`). The string is parsed once, at the boundary, into
//! a [`Dependencies`] value holding trimmed, non-empty tokens. Readiness
//! checks iterate the tokens and never re-parse.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An ordered list of dependency tokens.
///
/// Tokens are trimmed and never empty. Duplicates are kept as written.
///
/// Deserializes from a comma-separated string, a list of names, or a null /
/// `None` value (no dependencies). Serializes as the joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Dependencies {
    tokens: Vec<String>,
}

impl Dependencies {
    /// An empty dependency list.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a comma-separated dependency string.
    ///
    /// Whitespace around each token is trimmed and empty tokens are dropped,
    /// so `" , , A ,"` parses to the single token `A`.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    /// Iterate the tokens in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when `name` is one of the tokens.
    pub fn contains(&self, name: &str) -> bool {
        self.tokens.iter().any(|token| token == name)
    }

    /// The tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }
}

impl FromStr for Dependencies {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl From<&str> for Dependencies {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Dependencies {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Option<String>> for Dependencies {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<Dependencies> for String {
    fn from(deps: Dependencies) -> Self {
        deps.to_string()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dependencies {
    /// Build a list from individual names. Each name goes through the same
    /// trimming as the string form; blank names are dropped.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let tokens = iter
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }
}

impl<'de> Deserialize<'de> for Dependencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DependenciesVisitor)
    }
}

struct DependenciesVisitor;

impl<'de> Visitor<'de> for DependenciesVisitor {
    type Value = Dependencies;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a comma-separated string, a list of names, or null")
    }

    fn visit_str<E: de::Error>(self, raw: &str) -> Result<Self::Value, E> {
        Ok(Dependencies::parse(raw))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Dependencies::none())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Dependencies::none())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut names: Vec<String> = Vec::new();
        while let Some(name) = seq.next_element::<String>()? {
            names.push(name);
        }
        Ok(names.into_iter().collect())
    }
}

/// Deserialize an optional dependency list where a present key always means
/// `Some`, so formats without implicit options (RON) accept a bare string.
/// Pair with `#[serde(default)]` for the absent case.
pub fn deserialize_present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Dependencies>, D::Error> {
    Dependencies::deserialize(deserializer).map(Some)
}

impl fmt::Display for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(deps: &Dependencies) -> Vec<&str> {
        deps.iter().collect()
    }

    #[test]
    fn parse_simple_list() {
        let deps = Dependencies::parse("core,physics,ui");
        assert_eq!(tokens(&deps), vec!["core", "physics", "ui"]);
    }

    #[test]
    fn parse_trims_whitespace() {
        let deps = Dependencies::parse("  core ,\tphysics\n, ui  ");
        assert_eq!(tokens(&deps), vec!["core", "physics", "ui"]);
    }

    #[test]
    fn blank_tokens_are_discarded() {
        let deps = Dependencies::parse(" , , A ,");
        assert_eq!(tokens(&deps), vec!["A"]);
        assert_eq!(deps, Dependencies::parse("A"));
    }

    #[test]
    fn empty_and_whitespace_strings_have_no_tokens() {
        assert!(Dependencies::parse("").is_empty());
        assert!(Dependencies::parse("   ").is_empty());
        assert!(Dependencies::parse(",,,").is_empty());
        assert_eq!(Dependencies::parse(""), Dependencies::none());
    }

    #[test]
    fn missing_string_has_no_tokens() {
        assert!(Dependencies::from(None::<String>).is_empty());
        let deps = Dependencies::from(Some("A, B".to_string()));
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let deps = Dependencies::parse("A, B, A");
        assert_eq!(tokens(&deps), vec!["A", "B", "A"]);
        assert!(deps.contains("B"));
        assert!(!deps.contains("C"));
    }

    #[test]
    fn inner_whitespace_is_part_of_the_name() {
        let deps = Dependencies::parse("Green Hills , Chemical Plant");
        assert_eq!(tokens(&deps), vec!["Green Hills", "Chemical Plant"]);
    }

    #[test]
    fn from_str_never_fails() {
        let deps: Dependencies = "A,B".parse().unwrap();
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn from_iter_trims_and_drops_blanks() {
        let deps: Dependencies = ["A", "  ", " B "].into_iter().collect();
        assert_eq!(tokens(&deps), vec!["A", "B"]);
    }

    #[test]
    fn display_joins_tokens() {
        let deps = Dependencies::parse(" A ,B,, C");
        assert_eq!(deps.to_string(), "A, B, C");
        assert_eq!(Dependencies::none().to_string(), "");
    }

    #[test]
    fn deserializes_from_string_or_null() {
        let deps: Dependencies = serde_json::from_str(r#"" A , B ""#).unwrap();
        assert_eq!(tokens(&deps), vec!["A", "B"]);

        let deps: Dependencies = serde_json::from_str("null").unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn deserializes_from_list() {
        let deps: Dependencies = serde_json::from_str(r#"["A", " ", " B "]"#).unwrap();
        assert_eq!(tokens(&deps), vec!["A", "B"]);
    }

    #[test]
    fn rejects_numbers() {
        let result: Result<Dependencies, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_joined_string() {
        let deps = Dependencies::parse("A,B");
        assert_eq!(serde_json::to_string(&deps).unwrap(), r#""A, B""#);
    }
}
