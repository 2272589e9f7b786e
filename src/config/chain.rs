//! Order-preserving component chains (middleware, installed apps, validators).

use serde::{Deserialize, Serialize};

/// Sequence of component identifiers whose order is significant.
///
/// The chain never sorts or de-duplicates its input: reordering middleware or
/// application registration changes observable request handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedChain(Vec<String>);

impl OrderedChain {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append another chain after this one.
    pub fn concat(mut self, other: OrderedChain) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Position of an identifier, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|entry| entry == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for OrderedChain {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a OrderedChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a chain from identifiers, keeping them exactly as given.
pub fn build_ordered_chain<I, S>(identifiers: I) -> OrderedChain
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    identifiers.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_preserves_order() {
        let chain = build_ordered_chain(["A", "B", "C"]);
        assert_eq!(chain.as_slice(), ["A", "B", "C"]);
    }

    #[test]
    fn test_chain_is_not_normalized() {
        let chain = build_ordered_chain(["C", "A", "C", "B"]);
        assert_eq!(chain.as_slice(), ["C", "A", "C", "B"]);
        assert_eq!(chain.position("C"), Some(0));
    }

    #[test]
    fn test_concat_keeps_segments_in_order() {
        let chain = build_ordered_chain(["a", "b"]).concat(build_ordered_chain(["c"]));
        assert_eq!(chain.as_slice(), ["a", "b", "c"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_empty_chain() {
        let chain = build_ordered_chain(Vec::<String>::new());
        assert!(chain.is_empty());
        assert!(!chain.contains("A"));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let chain = build_ordered_chain(["x", "y"]);
        assert_eq!(serde_json::to_string(&chain).unwrap(), r#"["x","y"]"#);
    }
}
