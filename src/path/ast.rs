//! Token sequence produced by the path parser.

/// An ordered list of path tokens, root to leaf.
///
/// Each token is either a property name or a decimal-digit string naming a
/// sequence index. Which one applies is decided by the container the token
/// is applied to, not by the token itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPath {
    tokens: Vec<String>,
}

impl TokenPath {
    /// Creates a token path from already-split tokens.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }

    pub(crate) fn push(&mut self, token: String) {
        self.tokens.push(token);
    }
}

impl<S: Into<String>> FromIterator<S> for TokenPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TokenPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl PartialEq<[&str]> for TokenPath {
    fn eq(&self, other: &[&str]) -> bool {
        self.tokens.len() == other.len() && self.tokens.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for TokenPath {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}
